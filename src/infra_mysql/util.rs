use super::repo_tx_mysql::MySqlTx;
use crate::application_port::RelationError;
use crate::domain_port::{StorageTx, downcast_tx};
use sqlx::mysql::MySqlDatabaseError;

pub fn downcast(tx: &mut dyn StorageTx) -> Result<&mut MySqlTx, RelationError> {
    downcast_tx::<MySqlTx>(tx).map_err(|e| RelationError::Store(e.to_string()))
}

pub fn is_dup_key(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql_err) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return mysql_err.number() == 1062; // ER_DUP_ENTRY
        }
    }

    false
}

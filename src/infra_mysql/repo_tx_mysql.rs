use crate::domain_port::{StorageTx, TxManager};
use anyhow::anyhow;
use sqlx::{MySql, MySqlConnection, MySqlPool, Transaction};
use std::any::Any;

pub struct MySqlTxManager {
    pool: MySqlPool,
}

impl MySqlTxManager {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlTxManager { pool }
    }
}

#[async_trait::async_trait]
impl TxManager for MySqlTxManager {
    async fn begin(&self) -> anyhow::Result<Box<dyn StorageTx>> {
        let tx = self.pool.begin().await.map_err(|e| anyhow!(e))?;
        Ok(Box::new(MySqlTx::new(tx)))
    }
}

pub struct MySqlTx {
    inner: Transaction<'static, MySql>,
}

impl MySqlTx {
    pub fn new(inner: Transaction<'static, MySql>) -> Self {
        MySqlTx { inner }
    }

    pub fn conn(&mut self) -> &mut MySqlConnection {
        &mut self.inner
    }
}

#[async_trait::async_trait]
impl StorageTx for MySqlTx {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        self.inner.commit().await.map_err(|e| anyhow!(e))?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        self.inner.rollback().await.map_err(|e| anyhow!(e))?;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

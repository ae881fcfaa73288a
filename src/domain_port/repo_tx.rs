use std::any::Any;

#[async_trait::async_trait]
pub trait TxManager: Send + Sync {
    async fn begin(&self) -> anyhow::Result<Box<dyn StorageTx>>;
}

#[async_trait::async_trait]
pub trait StorageTx: Send {
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
    async fn rollback(self: Box<Self>) -> anyhow::Result<()>;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Recovers the adapter's concrete transaction from a port-level handle.
pub fn downcast_tx<T: Any>(tx: &mut dyn StorageTx) -> anyhow::Result<&mut T> {
    tx.as_any_mut()
        .downcast_mut::<T>()
        .ok_or_else(|| anyhow::anyhow!("transaction belongs to another store backend"))
}

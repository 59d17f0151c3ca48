// db/db.rs
use std::sync::Arc;

use sqlx::{Pool, Postgres};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Handle to the ledger store. All persisted state is owned here;
/// services never touch the pool except through this client.
#[derive(Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
    writer: Arc<Mutex<()>>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Postgres>")
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient {
            pool,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Serializes every read-then-write financial unit (join counting,
    /// deposit approval, withdrawal approval, maturation credit). Hold
    /// the guard for the lifetime of the transaction so the request
    /// path and the maturation sweep never interleave a stale balance
    /// read with a write.
    pub async fn acquire_writer(&self) -> OwnedMutexGuard<()> {
        self.writer.clone().lock_owned().await
    }
}

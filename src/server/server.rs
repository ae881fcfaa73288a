use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::MemoryStore;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;

/// Services shared by every request handler.
pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub affinity_service: Arc<dyn AffinityService>,
    pub relationship_service: Arc<dyn RelationshipService>,
    pool: Option<Pool<MySql>>,
}

struct StorePorts {
    friendship_repo: Arc<dyn FriendshipRepo>,
    friend_request_repo: Arc<dyn FriendRequestRepo>,
    affinity_source: Arc<dyn AffinitySource>,
    tx_manager: Arc<dyn TxManager>,
}

impl StorePorts {
    fn memory(store: MemoryStore) -> Self {
        Self {
            friendship_repo: Arc::new(store.clone()),
            friend_request_repo: Arc::new(store.clone()),
            affinity_source: Arc::new(store.clone()),
            tx_manager: Arc::new(store),
        }
    }

    fn mysql(pool: &Pool<MySql>) -> Self {
        Self {
            friendship_repo: Arc::new(MySqlFriendshipRepo::new(pool.clone())),
            friend_request_repo: Arc::new(MySqlFriendRequestRepo::new(pool.clone())),
            affinity_source: Arc::new(MySqlAffinitySource::new(pool.clone())),
            tx_manager: Arc::new(MySqlTxManager::new(pool.clone())),
        }
    }
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let (ports, pool) = match settings.store.backend.as_str() {
            "memory" => {
                warn!("using in-memory store, data is lost on exit");
                (StorePorts::memory(MemoryStore::new()), None)
            }
            "mysql" => {
                let pool = Pool::<MySql>::connect(&settings.store.dsn).await?;
                (StorePorts::mysql(&pool), Some(pool))
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        let auth_service: Arc<dyn AuthService> = match settings.auth.backend.as_str() {
            "fake" => Arc::new(FakeAuthService::new()),
            "jwt" => {
                if settings.auth.jwt_secret.is_empty() {
                    return Err(anyhow::anyhow!("auth.jwt_secret is required for jwt backend"));
                }
                Arc::new(JwtAuthService::new(JwtConfig {
                    audience: settings.auth.audience.clone(),
                    signing_key: settings.auth.jwt_secret.clone().into_bytes(),
                }))
            }
            other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
        };

        let server = Self::from_ports(
            ports,
            auth_service,
            Duration::from_millis(settings.affinity.timeout_ms),
            pool,
        );
        info!(
            store = %settings.store.backend,
            auth = %settings.auth.backend,
            "server started"
        );
        Ok(server)
    }

    /// In-memory store and token-as-user-id auth, for local runs and tests.
    pub fn in_memory(store: MemoryStore, affinity_timeout: Duration) -> Self {
        Self::from_ports(
            StorePorts::memory(store),
            Arc::new(FakeAuthService::new()),
            affinity_timeout,
            None,
        )
    }

    fn from_ports(
        ports: StorePorts,
        auth_service: Arc<dyn AuthService>,
        affinity_timeout: Duration,
        pool: Option<Pool<MySql>>,
    ) -> Self {
        let affinity_service: Arc<dyn AffinityService> = Arc::new(RealAffinityService::new(
            ports.affinity_source,
            affinity_timeout,
        ));
        let relationship_service: Arc<dyn RelationshipService> =
            Arc::new(RealRelationshipService::new(
                ports.friendship_repo,
                ports.friend_request_repo,
                ports.tx_manager,
            ));

        Self {
            auth_service,
            affinity_service,
            relationship_service,
            pool,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

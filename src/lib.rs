//! CarDikhao Admin Console client.
//!
//! Client-side data layer for the marketplace's staff console: session
//! lifecycle, a query cache with write-through invalidation, and typed
//! resource clients for brands, models, cars, enquiries, and sell/scrap
//! requests. The rendering layer sits on top of `views` and subscribes to
//! cache notices for user feedback.

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod session;
pub mod views;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cache::QueryCache;
use config::Config;
use errors::AppError;
use http::Transport;
use session::SessionStore;

/// Initialize logging for an embedding application. `RUST_LOG` overrides the
/// configured level. Call at most once, before building the client.
pub fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Shared handles behind every page of the console.
#[derive(Clone)]
pub struct AdminClient {
    pub http: Arc<Transport>,
    pub cache: Arc<QueryCache>,
    pub session: Arc<SessionStore>,
    pub config: Arc<Config>,
}

impl AdminClient {
    /// Build a client from configuration, restoring any persisted session.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let session = Arc::new(SessionStore::open(&config.session_path)?);
        let http = Arc::new(Transport::new(config.api_url.clone(), Arc::clone(&session))?);
        let cache = Arc::new(QueryCache::new(config.cache_ttl));

        tracing::info!("Admin client targeting {}", config.api_url);
        if session.is_logged_in() {
            tracing::info!("Restored existing session");
        }

        Ok(Self {
            http,
            cache,
            session,
            config: Arc::new(config),
        })
    }
}

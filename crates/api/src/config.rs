//! Process configuration read from the environment.

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,
    /// sqlx SQLite URL of the shared store.
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("LENDTRACK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = std::env::var("LENDTRACK_DB").unwrap_or_else(|_| {
            tracing::warn!("LENDTRACK_DB not set; using ./lendtrack.db");
            "sqlite://lendtrack.db?mode=rwc".to_string()
        });

        Self {
            bind_addr,
            database_url,
        }
    }
}

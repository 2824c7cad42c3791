use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// PostgreSQL connection string. Scans are kept in memory when unset.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Shared secret for pattern management. Mutation is disabled when unset.
    pub admin_token: Option<String>,
    /// JSON file overriding keyword lists and the known-scammer table.
    pub detection_rules_path: Option<String>,
    pub max_body_bytes: usize,
    pub recent_limit_default: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: optional("BACKEND_HOST")?.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: optional("BACKEND_PORT")?
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: optional("DATABASE_URL")?,
            database_max_connections: optional("DATABASE_MAX_CONNECTIONS")?
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            admin_token: optional("ADMIN_TOKEN")?.filter(|t| !t.is_empty()),
            detection_rules_path: optional("DETECTION_RULES_PATH")?,
            max_body_bytes: optional("MAX_BODY_BYTES")?
                .and_then(|v| v.parse().ok())
                .unwrap_or(64 * 1024),
            recent_limit_default: optional("RECENT_LIMIT_DEFAULT")?
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            database_max_connections: 10,
            admin_token: None,
            detection_rules_path: None,
            max_body_bytes: 64 * 1024,
            recent_limit_default: 20,
        }
    }
}

/// Read a variable that may be absent. Non-unicode values are still an error.
fn optional(key: &str) -> Result<Option<String>, env::VarError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e),
    }
}

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub paging: PagingConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    pub default_size: u32,
    pub max_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub basic_realm: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CASHCARD_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Paging overrides
        if let Ok(v) = env::var("PAGING_DEFAULT_SIZE") {
            self.paging.default_size = v.parse().unwrap_or(self.paging.default_size);
        }
        if let Ok(v) = env::var("PAGING_MAX_SIZE") {
            self.paging.max_size = v.parse().unwrap_or(self.paging.max_size);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_BASIC_REALM") {
            self.security.basic_realm = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            paging: PagingConfig {
                default_size: 20,
                max_size: 1000,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            security: SecurityConfig {
                enable_cors: true,
                basic_realm: "cashcards".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            paging: PagingConfig {
                default_size: 20,
                max_size: 500,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            security: SecurityConfig {
                enable_cors: true,
                basic_realm: "cashcards".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            paging: PagingConfig {
                default_size: 20,
                max_size: 100,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            security: SecurityConfig {
                enable_cors: false,
                basic_realm: "cashcards".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub fetch: FetchConfig,
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
pub struct FetchConfig {
    /// Upper bound on the number of groups one fetch may return
    pub max_limit: Option<i64>,
    /// Log generated join SQL at debug level
    pub debug_logging: bool,
    /// Campaign-primary fetch (campaigns with their ad groups)
    pub campaign: DirectionConfig,
    /// AdGroup-primary fetch (ad groups with their campaign)
    pub ad_group: DirectionConfig,
}

/// Behaviour that historically differed between the two fetch directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionConfig {
    /// When the caller names no related field, project every related field
    /// instead of only the related id.
    pub default_to_all_fields_when_empty: bool,
    /// Keep related objects whose identity column is null
    pub keep_rows_without_related: bool,
}

impl DirectionConfig {
    pub const CAMPAIGN_DEFAULT: DirectionConfig = DirectionConfig {
        default_to_all_fields_when_empty: false,
        keep_rows_without_related: false,
    };

    pub const AD_GROUP_DEFAULT: DirectionConfig = DirectionConfig {
        default_to_all_fields_when_empty: true,
        keep_rows_without_related: true,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_auth: bool,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
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
        // Fetch overrides
        if let Ok(v) = env::var("FETCH_MAX_LIMIT") {
            self.fetch.max_limit = parse_max_limit(&v, self.fetch.max_limit);
        }
        if let Ok(v) = env::var("FETCH_DEBUG_LOGGING") {
            self.fetch.debug_logging = v.parse().unwrap_or(self.fetch.debug_logging);
        }
        if let Ok(v) = env::var("FETCH_CAMPAIGN_ALL_FIELDS_WHEN_EMPTY") {
            self.fetch.campaign.default_to_all_fields_when_empty =
                v.parse().unwrap_or(self.fetch.campaign.default_to_all_fields_when_empty);
        }
        if let Ok(v) = env::var("FETCH_CAMPAIGN_KEEP_ROWS_WITHOUT_RELATED") {
            self.fetch.campaign.keep_rows_without_related =
                v.parse().unwrap_or(self.fetch.campaign.keep_rows_without_related);
        }
        if let Ok(v) = env::var("FETCH_AD_GROUP_ALL_FIELDS_WHEN_EMPTY") {
            self.fetch.ad_group.default_to_all_fields_when_empty =
                v.parse().unwrap_or(self.fetch.ad_group.default_to_all_fields_when_empty);
        }
        if let Ok(v) = env::var("FETCH_AD_GROUP_KEEP_ROWS_WITHOUT_RELATED") {
            self.fetch.ad_group.keep_rows_without_related =
                v.parse().unwrap_or(self.fetch.ad_group.keep_rows_without_related);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_AUTH") {
            self.security.enable_auth = v.parse().unwrap_or(self.security.enable_auth);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            fetch: FetchConfig {
                max_limit: Some(1000),
                debug_logging: true,
                campaign: DirectionConfig::CAMPAIGN_DEFAULT,
                ad_group: DirectionConfig::AD_GROUP_DEFAULT,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            security: SecurityConfig {
                enable_auth: false,
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            fetch: FetchConfig {
                max_limit: Some(500),
                debug_logging: false,
                campaign: DirectionConfig::CAMPAIGN_DEFAULT,
                ad_group: DirectionConfig::AD_GROUP_DEFAULT,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            security: SecurityConfig {
                enable_auth: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            fetch: FetchConfig {
                max_limit: Some(100),
                debug_logging: false,
                campaign: DirectionConfig::CAMPAIGN_DEFAULT,
                ad_group: DirectionConfig::AD_GROUP_DEFAULT,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            security: SecurityConfig {
                enable_auth: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }
}

/// `none` removes the cap; anything else that is not a number keeps `current`
fn parse_max_limit(value: &str, current: Option<i64>) -> Option<i64> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return None;
    }
    value.parse().map(Some).unwrap_or(current)
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env_or("DATABASE_HOST", "localhost"),
            port: env_or("DATABASE_PORT", "5432").parse()?,
            username: env_or("DATABASE_USERNAME", "app"),
            password: env_or("DATABASE_PASSWORD", "passwd"),
            database: env_or("DATABASE_NAME", "app"),
        };
        let redis = RedisConfig {
            host: env_or("REDIS_HOST", "localhost"),
            port: env_or("REDIS_PORT", "6379").parse()?,
        };
        let auth = AuthConfig {
            ttl: env_or("AUTH_TOKEN_TTL", "86400").parse()?,
        };
        Ok(Self {
            database,
            redis,
            auth,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

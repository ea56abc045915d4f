use anyhow::Result;
use std::path::PathBuf;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse::<u16>()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse::<u64>()?,
        };
        let storage = StorageConfig {
            media_root: std::env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media")),
        };
        let server = ServerConfig {
            port: match std::env::var("PORT") {
                Ok(port) => port.parse::<u16>()?,
                Err(_) => 8080,
            },
        };
        Ok(Self {
            database,
            redis,
            auth,
            storage,
            server,
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

// アクセストークンの有効期間（秒）
pub struct AuthConfig {
    pub ttl: u64,
}

// 写真提出ファイルの保存先ルート
pub struct StorageConfig {
    pub media_root: PathBuf,
}

pub struct ServerConfig {
    pub port: u16,
}

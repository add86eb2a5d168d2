use std::net::{AddrParseError, SocketAddr};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::pagination::{PageSize, DEFAULT_PER_PAGE};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub pagination: PaginationSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationSettings {
    pub per_page: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Empty list allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Defaults, then `trivia.toml` (or `$TRIVIA_CONFIG`), then `TRIVIA__*`
    /// environment variables such as `TRIVIA__SERVER__PORT=9000`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let file = dotenv::var("TRIVIA_CONFIG").unwrap_or_else(|_| "trivia".to_owned());
        let builder = Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            );
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite:trivia.db")?
            .set_default("database.max_connections", 5)?
            .set_default("pagination.per_page", i64::from(DEFAULT_PER_PAGE))?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.pagination.per_page)
    }
}

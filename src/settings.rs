use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Settings {
    /// Reads `DATABASE_URL`, `BIND_ADDR` and `MAX_CONNECTIONS`, after loading `.env` if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_env(Environment::default())
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("bind_addr", "0.0.0.0:5000")?
            .set_default("max_connections", 5)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

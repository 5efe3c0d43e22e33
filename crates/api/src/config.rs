//! Process configuration, explicitly constructed at startup.

use estoque_store::DbConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub database: DbConfig,
}

impl Config {
    /// `PORT` (hosted deployments set it) with a local default of 8080.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        Self {
            listen_addr: format!("0.0.0.0:{port}"),
            database: DbConfig::from_env(),
        }
    }
}

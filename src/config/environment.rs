use std::env;
use std::net::SocketAddr;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub listen_addr: SocketAddr,
    pub metrics_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let listen_addr = env::var("METRICS_ADDR").unwrap_or_else(|_| "0.0.0.0:2110".to_string());
        let listen_addr = listen_addr
            .parse()
            .map_err(|_| format!("METRICS_ADDR is not a socket address: {}", listen_addr))?;

        let metrics_enabled = env::var("METRICS_ENABLED")
            .map(|v| !matches!(v.as_str(), "false" | "0"))
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            metrics_enabled,
        })
    }
}

use std::env;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    /// JSON array of units to load at start-up
    pub seed_path: Option<String>,
    pub cors_allow_any: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            seed_path: None,
            cors_allow_any: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            bind_addr: env::var("BIND_ADDR")
                .ok()
                .and_then(|a| a.parse().ok())
                .unwrap_or(defaults.bind_addr),
            seed_path: env::var("SEED_PATH").ok().filter(|p| !p.is_empty()),
            cors_allow_any: env::var("CORS_ALLOW_ANY")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.cors_allow_any),
        }
    }
}

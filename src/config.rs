use crate::error::{Error, Result};
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub seed_on_start: bool,
    pub fault_probability: f64,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub chaos_seed: Option<u64>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "127.0.0.1:4000"),
            database_url: get_env_or("DATABASE_URL", "sqlite://talentflow.db"),
            seed_on_start: get_env_parse_or("SEED_ON_START", true)?,
            fault_probability: get_env_parse_or("FAULT_PROBABILITY", 0.07)?,
            latency_min_ms: get_env_parse_or("LATENCY_MIN_MS", 200)?,
            latency_max_ms: get_env_parse_or("LATENCY_MAX_MS", 1200)?,
            chaos_seed: match env::var("CHAOS_SEED") {
                Ok(raw) => Some(
                    raw.parse()
                        .map_err(|e| Error::Config(format!("Invalid value for CHAOS_SEED: {}", e)))?,
                ),
                Err(_) => None,
            },
        })
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

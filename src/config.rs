use std::{env, fmt::Display, str::FromStr};

use tracing::info;

/// Runtime configuration, loaded once at startup from the environment.
pub struct Config {
    pub port: u16,
    pub db_url: String,
    pub admin_user: String,
    pub admin_pass: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("MESS_PORT", "3000"),
            db_url: try_load("MESS_DB_URL", "sqlite://mess.db?mode=rwc"),
            admin_user: try_load("MESS_ADMIN_USER", "messmaster"),
            admin_pass: try_load("MESS_ADMIN_PASS", "renovate"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .unwrap_or_else(|e| panic!("Invalid {key} value: {e}"))
}

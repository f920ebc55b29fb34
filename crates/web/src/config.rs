use std::time::Duration;

use anyhow::{Context, Result, bail};
use storage::PoolSettings;

use crate::cors::CorsPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool: PoolSettings,
    pub run_migrations: bool,
    pub cors: CorsPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_connections: u32 = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            None => PoolSettings::default().max_connections,
        };
        if max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let acquire_timeout = match lookup("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .context("DATABASE_ACQUIRE_TIMEOUT_SECS must be a number")?,
            ),
            None => PoolSettings::default().acquire_timeout,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(raw) => raw
                .parse()
                .context("RUN_MIGRATIONS must be true or false")?,
            None => true,
        };

        let cors = CorsPolicy::from_parts(
            lookup("CORS_POLICY").as_deref().unwrap_or("open"),
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
        )?;

        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?,
            pool: PoolSettings {
                max_connections,
                acquire_timeout,
            },
            run_migrations,
            cors,
        })
    }
}

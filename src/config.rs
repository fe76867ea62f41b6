use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Process-wide configuration, read once from the environment.
///
/// `DATABASE_URL` points sqlx at the backing database; `PORT` is the HTTP
/// listen port; `LOGLEVEL` seeds the tracing filter when `RUST_LOG` is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:schools.db".to_string(),
            port: 8000,
            loglevel: "info".to_string(),
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::raw().only(&["DATABASE_URL", "PORT", "LOGLEVEL"]))
        .extract()
        .expect("invalid environment configuration")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_local_development() {
        let cfg = Config::default();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.database_url, "sqlite:schools.db");
        assert_eq!(cfg.loglevel, "info");
    }
}

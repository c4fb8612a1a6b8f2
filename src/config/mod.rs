mod basic;
mod labs;

pub use basic::{BasicConfig, Lab};
pub use labs::{CorsConfig, ItemsConfig, UploadsConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Cross-origin policy (see `cors` table in config.toml).
    #[serde(default)]
    pub cors: CorsConfig,

    /// Upload lab settings (see `uploads` table in config.toml).
    #[serde(default)]
    pub uploads: UploadsConfig,

    /// Items lab settings (see `items` table in config.toml).
    #[serde(default)]
    pub items: ItemsConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "APILAB_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `APILAB_`-prefixed environment variables (`__` separates nested keys).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from defaults, `config.toml` (if present) and the environment.
    pub fn load() -> Self {
        let cfg: Self = Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration: {err}"));
        if cfg.uploads.chunk_size == 0 {
            panic!("uploads.chunk_size must be greater than zero");
        }
        cfg
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(cfg.basic.lab, Lab::Orders);
        assert_eq!(cfg.basic.listen_port, 8000);
        assert_eq!(cfg.uploads.max_part_size, 10 * 1024 * 1024);
        assert_eq!(cfg.uploads.chunk_size, 1024 * 1024);
        assert_eq!(cfg.items.database_url, "sqlite://database.db");
        assert_eq!(cfg.cors.allow_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn toml_overrides_nested_tables() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                lab = "uploads"
                listen_port = 9100

                [uploads]
                upload_dir = "/tmp/apilab-uploads"
                "#,
            ))
            .extract()
            .unwrap();
        assert_eq!(cfg.basic.lab, Lab::Uploads);
        assert_eq!(cfg.basic.listen_port, 9100);
        assert_eq!(
            cfg.uploads.upload_dir,
            PathBuf::from("/tmp/apilab-uploads")
        );
        assert_eq!(cfg.uploads.chunk_size, 1024 * 1024);
    }
}

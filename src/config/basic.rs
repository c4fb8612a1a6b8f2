use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Which standalone lab this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Lab {
    /// Single greeting endpoint behind a restricted CORS policy.
    Hello,
    /// Path/query parameters and in-memory orders.
    #[default]
    Orders,
    /// Validated CRUD over an in-memory todo list.
    Todos,
    /// Multipart upload strategies.
    Uploads,
    /// SQLite-backed items with a startup/shutdown lifecycle.
    Items,
}

impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lab::Hello => "hello",
            Lab::Orders => "orders",
            Lab::Todos => "todos",
            Lab::Uploads => "uploads",
            Lab::Items => "items",
        };
        f.write_str(name)
    }
}

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `127.0.0.1`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `8000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Lab served by this process.
    /// TOML: `basic.lab`. Default: `orders`.
    #[serde(default)]
    pub lab: Lab,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: default_loglevel(),
            lab: Lab::default(),
        }
    }
}

fn default_listen_ip() -> IpAddr {
    Ipv4Addr::LOCALHOST.into()
}

fn default_listen_port() -> u16 {
    8000
}

fn default_loglevel() -> String {
    "info".to_string()
}

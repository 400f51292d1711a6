use std::net::SocketAddr;

use serde::Deserialize;
use tally_core::error::{Result, TallyError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub counter: CounterSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
            counter: CounterSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.counter.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            TallyError::BadRequest(format!("server.listen must be a valid socket address: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Maximum number of distinct keys; 0 means unbounded.
    #[serde(default)]
    pub max_entries: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterSection {
    #[serde(default = "default_counter_key")]
    pub key: String,

    #[serde(default)]
    pub mode: CounterMode,

    #[serde(default)]
    pub on_store_error: StoreErrorPolicy,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            key: default_counter_key(),
            mode: CounterMode::default(),
            on_store_error: StoreErrorPolicy::default(),
        }
    }
}

impl CounterSection {
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(TallyError::BadRequest("counter.key must not be empty".into()));
        }
        Ok(())
    }
}

fn default_counter_key() -> String {
    "key".into()
}

/// How the counter composes its read and write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterMode {
    /// Separate `get` and `put`. Concurrent increments can be lost.
    #[default]
    Racy,
    /// Single `update` under the store's write lock.
    Atomic,
}

/// What the `/inc` handler does when the counter fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorPolicy {
    /// Report the error with a non-2xx status.
    #[default]
    Surface,
    /// Log it and answer 200 with an empty body.
    Ignore,
}

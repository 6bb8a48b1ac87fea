use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

// SPI transport parameters for the NRF24L01 breakout
pub const NRF_SPI_FREQUENCY_HZ: u32 = 8_000_000;
pub const NRF_SPI_DEVICE: u8 = 0;
pub const NRF_SPI_CE_PIN: u64 = 25;

/// Delay between polling cycles when the radio has nothing ready.
pub const POLL_IDLE_INTERVAL: Duration = Duration::from_secs(2);

/// Upper bound on payloads drained in a single polling cycle, so a bursty
/// sender cannot keep the loop out of its idle step forever.
pub const MAX_DRAIN_PER_CYCLE: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key/value configuration store backed by a JSON file.
///
/// Values are addressed by dotted keys ("radio.channel"). A missing key is
/// not an error; it resolves to an empty string or zero so callers can apply
/// their own defaults.
pub struct Config {
    root: Value,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let root = serde_json::from_str(text)?;
        Ok(Self { root })
    }

    /// Look up a dotted key, either as a literal top-level key
    /// ("radio.baud": ...) or as a path into nested objects.
    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.root.get(key) {
            return Some(value);
        }

        let mut node = &self.root;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        Some(node)
    }

    pub fn get_value(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn get_value_as_integer(&self, key: &str) -> i64 {
        match self.lookup(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Pretty-printed view of the loaded configuration, for `--dump-config`.
    pub fn dump(&self) -> String {
        serde_json::to_string_pretty(&self.root).unwrap_or_default()
    }
}

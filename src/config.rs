//! Configuration management for TicketChain

use crate::blockchain::DEFAULT_DIFFICULTY;
use crate::codec::DIGEST_HEX_LEN;
use crate::error::ChainError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoEvent {
    pub event: String,
    pub buyer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_events")]
    pub events: Vec<DemoEvent>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            events: default_events(),
        }
    }
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_events() -> Vec<DemoEvent> {
    [
        ("Dandiya Night", "Aarav"),
        ("Painting Competition", "Bhumi"),
        ("Movie Screening", "Rahul"),
        ("Carnival", "Isha"),
        ("DJ Night", "Kabir"),
    ]
    .iter()
    .map(|(event, buyer)| DemoEvent {
        event: event.to_string(),
        buyer: buyer.to_string(),
    })
    .collect()
}

impl Config {
    pub fn validate(&self) -> Result<(), ChainError> {
        // A digest has DIGEST_HEX_LEN characters, so a longer zero prefix can never be found.
        if self.ledger.difficulty as usize > DIGEST_HEX_LEN {
            return Err(ChainError::Config(format!(
                "ledger.difficulty must be at most {}, got {}",
                DIGEST_HEX_LEN, self.ledger.difficulty
            )));
        }

        for (i, entry) in self.demo.events.iter().enumerate() {
            if entry.event.trim().is_empty() {
                return Err(ChainError::Config(format!("demo.events[{}].event must not be empty", i)));
            }
            if entry.buyer.trim().is_empty() {
                return Err(ChainError::Config(format!("demo.events[{}].buyer must not be empty", i)));
            }
        }

        Ok(())
    }
}

pub fn parse_config(config_str: &str) -> Result<Config, ChainError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from `path`, falling back to defaults when the file is absent.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ChainError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

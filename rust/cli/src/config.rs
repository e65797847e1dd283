use std::fs;

use holdem_engine::player::Difficulty;
use holdem_table::TableSettings;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub buy_in: u32,
    pub big_blind: u32,
    pub difficulty: Difficulty,
    pub decision_timeout_secs: u64,
    pub bot_think_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            buy_in: 1000,
            big_blind: 20,
            difficulty: Difficulty::Medium,
            decision_timeout_secs: 60,
            bot_think_ms: 0,
        }
    }
}

impl Config {
    /// Small blind is half the big blind, at least one chip.
    pub fn small_blind(&self) -> u32 {
        (self.big_blind / 2).max(1)
    }

    pub fn table_settings(&self, max_seats: usize, hand_limit: Option<u32>) -> TableSettings {
        TableSettings {
            small_blind: self.small_blind(),
            big_blind: self.big_blind,
            buy_in: self.buy_in,
            max_seats,
            decision_timeout_secs: self.decision_timeout_secs,
            bot_think_ms: self.bot_think_ms,
            hand_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub buy_in: ValueSource,
    pub big_blind: ValueSource,
    pub difficulty: ValueSource,
    pub decision_timeout_secs: ValueSource,
    pub bot_think_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            buy_in: ValueSource::Default,
            big_blind: ValueSource::Default,
            difficulty: ValueSource::Default,
            decision_timeout_secs: ValueSource::Default,
            bot_think_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `HOLDEM_CONFIG`, then `HOLDEM_*` variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.buy_in {
            cfg.buy_in = v;
            sources.buy_in = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.difficulty {
            cfg.difficulty = v;
            sources.difficulty = ValueSource::File;
        }
        if let Some(v) = f.decision_timeout_secs {
            cfg.decision_timeout_secs = v;
            sources.decision_timeout_secs = ValueSource::File;
        }
        if let Some(v) = f.bot_think_ms {
            cfg.bot_think_ms = v;
            sources.bot_think_ms = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("HOLDEM_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_SEED: {seed}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(buy_in) = env_value("HOLDEM_BUY_IN") {
        cfg.buy_in = buy_in
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_BUY_IN: {buy_in}")))?;
        sources.buy_in = ValueSource::Env;
    }
    if let Some(bb) = env_value("HOLDEM_BIG_BLIND") {
        cfg.big_blind = bb
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_BIG_BLIND: {bb}")))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(d) = env_value("HOLDEM_DIFFICULTY") {
        cfg.difficulty = d.parse().map_err(ConfigError::Invalid)?;
        sources.difficulty = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    buy_in: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    decision_timeout_secs: Option<u64>,
    #[serde(default)]
    bot_think_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table_settings(10, None)
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {e}")))
}

use anyhow::{Result, bail};
use std::path::PathBuf;

/// Where to start when the consumer group has no committed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetReset {
    Earliest,
    Latest,
}

impl OffsetReset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Earliest => "earliest",
            Self::Latest => "latest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub brokers: String,
    pub topic: String,
    pub group_id: String,
    pub offset_reset: OffsetReset,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let offset_reset = match var("KAFKA_AUTO_OFFSET_RESET", "earliest").as_str() {
            "earliest" => OffsetReset::Earliest,
            "latest" => OffsetReset::Latest,
            other => bail!(
                "KAFKA_AUTO_OFFSET_RESET must be `earliest` or `latest`, got `{}`",
                other
            ),
        };

        Ok(Self {
            brokers: var("KAFKA_BROKER_ADDRESS", "localhost:9092"),
            topic: var("KAFKA_TOPIC", "buzzline"),
            group_id: var("KAFKA_CONSUMER_GROUP_ID", "buzz_group"),
            offset_reset,
            db_path: var("TONE_DB_PATH", "data/message_tone.sqlite").into(),
        })
    }
}

use std::env;
use std::time::Duration;

use crate::services::session::Credentials;

const DEFAULT_CHECK_INTERVAL_MINUTES: u64 = 5;
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} must be {expected}, got: {value}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub credentials: Credentials,
    pub bot_token: String,
    pub channel_id: u64,
    pub check_interval: Duration,
    pub webdriver_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let last_name = require("ICBC_LAST_NAME")?;
        let license_number = require("ICBC_LICENSE_NUMBER")?;
        let keyword = require("ICBC_KEYWORD")?;
        let bot_token = require("DISCORD_BOT_TOKEN")?;

        let channel_id = require("DISCORD_CHANNEL_ID")?;
        let channel_id: u64 = channel_id.parse().map_err(|_| ConfigError::Invalid {
            key: "DISCORD_CHANNEL_ID",
            expected: "a number",
            value: channel_id,
        })?;

        let check_interval_secs = match env::var("CHECK_INTERVAL_MINUTES") {
            Err(_) => DEFAULT_CHECK_INTERVAL_MINUTES * 60,
            Ok(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|minutes| *minutes > 0)
                    .and_then(|minutes| minutes.checked_mul(60));
                match secs {
                    Some(secs) => secs,
                    None => {
                        return Err(ConfigError::Invalid {
                            key: "CHECK_INTERVAL_MINUTES",
                            expected: "a non-zero number of minutes",
                            value: raw,
                        })
                    }
                }
            }
        };

        let webdriver_url =
            env::var("WEBDRIVER_URL").unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string());

        Ok(Self {
            credentials: Credentials {
                last_name,
                license_number,
                keyword,
            },
            bot_token,
            channel_id,
            check_interval: Duration::from_secs(check_interval_secs),
            webdriver_url,
        })
    }

    pub fn check_interval_minutes(&self) -> u64 {
        self.check_interval.as_secs() / 60
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

//! Chat configuration loaded from TOML and environment.
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | bot_name | NUTRIGENIO__BOT_NAME | NutriGênio |
//! | typing_delay_ms | NUTRIGENIO__TYPING_DELAY_MS | 1000 |
//! | thinking_delay_ms | NUTRIGENIO__THINKING_DELAY_MS | 1000 |

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_CONFIG_PATH: &str = "config/nutrigenio.toml";
const DEFAULT_BOT_NAME: &str = "NutriGênio";
const DEFAULT_DELAY_MS: u64 = 1000;

fn default_bot_name() -> String {
    DEFAULT_BOT_NAME.to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Name the bot introduces itself with.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Simulated typing time before an assessment prompt or validation error.
    #[serde(default = "default_delay_ms")]
    pub typing_delay_ms: u64,
    /// Simulated thinking time before a canned reply in free chat.
    #[serde(default = "default_delay_ms")]
    pub thinking_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            typing_delay_ms: DEFAULT_DELAY_MS,
            thinking_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl ChatConfig {
    /// Precedence: env `NUTRIGENIO__*` > file (`NUTRIGENIO_CONFIG` or `config/nutrigenio.toml`) > defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("NUTRIGENIO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Same as [`ChatConfig::load`] with an explicit file path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .set_default("bot_name", DEFAULT_BOT_NAME)?
            .set_default("typing_delay_ms", DEFAULT_DELAY_MS as i64)?
            .set_default("thinking_delay_ms", DEFAULT_DELAY_MS as i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("NUTRIGENIO").separator("__").try_parsing(true))
            .build()?;

        let cfg: Self = built.try_deserialize()?;
        tracing::debug!(
            bot_name = %cfg.bot_name,
            typing_delay_ms = cfg.typing_delay_ms,
            thinking_delay_ms = cfg.thinking_delay_ms,
            "chat config loaded"
        );
        Ok(cfg)
    }

    /// No delays; the bot answers on the next scheduler tick.
    pub fn instant() -> Self {
        Self {
            typing_delay_ms: 0,
            thinking_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

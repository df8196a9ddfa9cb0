use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Registration endpoint used when no override is configured
pub const DEFAULT_SIGNUP_URL: &str = "https://medical-backend-l140.onrender.com/api/signup";
pub const DEFAULT_HOME_URL: &str = "https://medical-webpage-front.vercel.app";
pub const DEFAULT_LOGIN_URL: &str = "https://medical-webpage-signin.vercel.app";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Registration API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint receiving the signup POST
    #[serde(default = "default_signup_url")]
    pub signup_url: String,
    /// Request timeout in seconds (0 = no timeout)
    #[serde(default)]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_signup_url() -> String {
    DEFAULT_SIGNUP_URL.to_string()
}

fn default_user_agent() -> String {
    format!("healthconnect-signup/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            signup_url: default_signup_url(),
            timeout_secs: 0,
            user_agent: default_user_agent(),
        }
    }
}

/// Links shown on the success panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_home_url")]
    pub home_url: String,
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

fn default_home_url() -> String {
    DEFAULT_HOME_URL.to_string()
}

fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            login_url: default_login_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval; also paces the submit spinner
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Validate the current step's fields before "Next" advances.
    /// Off by default: "Next" advances unconditionally and all fields are
    /// checked on "Complete Sign Up".
    #[serde(default)]
    pub validate_on_next: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for logs and other local state
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("healthconnect").to_string_lossy().to_string())
        .unwrap_or_else(|| ".healthconnect".to_string())
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

impl Config {
    /// Project-local config file, checked in the working directory
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("healthconnect.toml")
    }

    /// Per-user config file in the platform config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("healthconnect").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the wizard works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with HEALTHCONNECT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("HEALTHCONNECT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            links: LinksConfig::default(),
            ui: UiConfig::default(),
            wizard: WizardConfig::default(),
            logging: LoggingConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::stepper::{
    ClickAction, Icon, StepDescriptor, StepState, StepperContext, StepperOptions, StyleSpec,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub stepper: StepperOptions,
    /// Stepper-wide click behavior; steps may override it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click_step: Option<ClickAction>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
    pub ui: UiConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One `[[steps]]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub state: StepState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click: Option<ClickAction>,
    /// Text shown in the step body while it is expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl StepConfig {
    fn new(label: &str, description: &str, body: &str) -> Self {
        Self {
            label: label.to_string(),
            description: Some(description.to_string()),
            body: Some(body.to_string()),
            ..Self::default()
        }
    }

    pub fn to_descriptor(&self) -> StepDescriptor {
        let mut step = StepDescriptor::new(&self.label)
            .with_state(self.state)
            .with_optional(self.optional);
        step.description = self.description.clone();
        step.icon = self.icon.clone();
        step.check_icon = self.check_icon.clone();
        step.error_icon = self.error_icon.clone();
        step.on_click_step = self.on_click.map(ClickAction::into_handler);
        step
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    /// Rows given to the notes editor inside an expanded body
    #[serde(default = "default_notes_height")]
    pub notes_height: u16,
}

fn default_notes_height() -> u16 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state: String,
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

impl Config {
    /// Load configuration, lowest precedence first: built-in defaults,
    /// `.stepper/config.toml`, `~/.config/stepper/config.toml`, an explicit
    /// file, then `STEPPER__*` environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let defaults_json =
            serde_json::to_string(&Config::default()).context("Failed to serialize defaults")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("stepper").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("STEPPER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        let config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories as needed
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }

        if let Some(index) = self.steps.iter().position(|s| s.label.trim().is_empty()) {
            return Err(ConfigError::EmptyLabel { index });
        }

        let initial = self.stepper.initial_step;
        let in_range = usize::try_from(initial).is_ok_and(|i| i < self.steps.len());
        if !in_range {
            return Err(ConfigError::InitialStepOutOfRange {
                initial,
                count: self.steps.len(),
            });
        }

        let styles = &self.stepper.styles;
        for spec in [
            &styles.vertical_step,
            &styles.vertical_step_container,
            &styles.vertical_step_content,
        ]
        .into_iter()
        .flatten()
        {
            validate_colors(spec)?;
        }

        Ok(())
    }

    /// Build the shared stepper state from the configured steps
    pub fn build_context(&self) -> StepperContext {
        let steps = self.steps.iter().map(StepConfig::to_descriptor).collect();
        let context = StepperContext::new(steps, self.stepper.clone());
        match self.on_click_step {
            Some(action) => context.with_on_click(action.into_handler()),
            None => context,
        }
    }

    /// Body text for each step, in display order
    pub fn step_bodies(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|s| s.body.clone().unwrap_or_default())
            .collect()
    }

    fn local_config_path() -> PathBuf {
        PathBuf::from(".stepper").join("config.toml")
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

    /// Where `stepper init` writes its config
    pub fn config_file_path(&self) -> PathBuf {
        self.state_path().join("config.toml")
    }
}

fn validate_colors(spec: &StyleSpec) -> Result<(), ConfigError> {
    for value in [&spec.fg, &spec.bg].into_iter().flatten() {
        if ratatui::style::Color::from_str(value).is_err() {
            return Err(ConfigError::InvalidColor {
                value: value.clone(),
            });
        }
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stepper: StepperOptions {
                clickable: true,
                scroll_tracking: true,
                ..StepperOptions::default()
            },
            on_click_step: Some(ClickAction::Jump),
            steps: vec![
                StepConfig::new(
                    "Account",
                    "Create your login",
                    "Pick a username and a password.",
                ),
                StepConfig::new(
                    "Profile",
                    "Tell us about yourself",
                    "Name, team and time zone.",
                ),
                StepConfig {
                    optional: true,
                    ..StepConfig::new(
                        "Preferences",
                        "Notifications and theme",
                        "Everything here can be changed later.",
                    )
                },
                StepConfig::new("Review", "Check and submit", "Confirm the details above."),
            ],
            ui: UiConfig {
                tick_rate_ms: 100,
                notes_height: default_notes_height(),
            },
            paths: PathsConfig {
                state: ".stepper".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

//! Configuration error types

use thiserror::Error;

/// Problems with a loaded configuration that would leave the stepper unusable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no steps configured; add at least one [[steps]] entry")]
    NoSteps,

    #[error("initial step {initial} is outside the step list (0..{count})")]
    InitialStepOutOfRange { initial: isize, count: usize },

    #[error("step {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("invalid color {value:?} in stepper styles")]
    InvalidColor { value: String },
}

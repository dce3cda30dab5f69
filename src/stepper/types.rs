//! Value types shared by the stepper context, the resolver and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual variant of the stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    Circle,
    CircleAlt,
    Line,
}

impl Variant {
    /// Circle-family variants share the circle layout.
    pub fn is_circle(&self) -> bool {
        matches!(self, Variant::Circle | Variant::CircleAlt)
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Variant::Line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Per-step override of the global loading/error flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// An icon identifier. In the terminal front-end this is the glyph itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icon(pub String);

impl Icon {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self(glyph.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn default_check() -> Self {
        Self::new("✓")
    }

    pub fn default_error() -> Self {
        Self::new("✗")
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Icon {
    fn from(glyph: &str) -> Self {
        Self::new(glyph)
    }
}

/// A style override for one of the named stepper slots.
///
/// Colors are names or hex strings understood by the renderer
/// (e.g. `"blue"`, `"#1e90ff"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default)]
    pub bold: bool,
}

/// Style overrides for the slots of a vertical step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StepStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_step: Option<StyleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_step_container: Option<StyleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_step_content: Option<StyleSpec>,
}

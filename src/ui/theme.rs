//! Colors, glyphs and style overrides for the stepper view.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

use crate::stepper::{StepAttributes, StepIconKind, StyleSpec};

pub const COMPLETED_COLOR: Color = Color::Blue;
pub const INVALID_COLOR: Color = Color::Red;
pub const IDLE_COLOR: Color = Color::DarkGray;

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Convert a configured style override into a ratatui style.
///
/// Colors are checked when the config loads, so an unparseable one is
/// ignored here.
pub fn style_from_spec(spec: &StyleSpec) -> Style {
    let mut style = Style::default();
    if let Some(fg) = spec.fg.as_deref().and_then(|c| Color::from_str(c).ok()) {
        style = style.fg(fg);
    }
    if let Some(bg) = spec.bg.as_deref().and_then(|c| Color::from_str(c).ok()) {
        style = style.bg(bg);
    }
    if spec.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

pub fn slot_style(spec: &Option<StyleSpec>) -> Style {
    spec.as_ref().map(style_from_spec).unwrap_or_default()
}

/// Glyph for the icon slot
pub fn icon_glyph(icon: &StepIconKind, spinner_frame: usize) -> String {
    match icon {
        StepIconKind::Check(icon) | StepIconKind::Error(icon) | StepIconKind::Custom(icon) => {
            icon.to_string()
        }
        StepIconKind::Loading => SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()].to_string(),
        StepIconKind::Number(n) => n.to_string(),
    }
}

/// Color of the icon and, for circle steps, the connector below it
pub fn state_color(attrs: &StepAttributes) -> Color {
    if attrs.invalid {
        INVALID_COLOR
    } else if attrs.completed || attrs.active {
        COMPLETED_COLOR
    } else if attrs.current {
        Color::White
    } else {
        IDLE_COLOR
    }
}

pub fn connector_color(attrs: &StepAttributes) -> Color {
    if attrs.invalid {
        INVALID_COLOR
    } else if attrs.completed {
        COMPLETED_COLOR
    } else {
        IDLE_COLOR
    }
}

/// Label style: bold while current, dimmed until first visited
pub fn label_style(attrs: &StepAttributes) -> Style {
    let mut style = Style::default().fg(if attrs.invalid {
        INVALID_COLOR
    } else {
        Color::White
    });
    if attrs.current {
        style = style.add_modifier(Modifier::BOLD);
    }
    if attrs.label_opacity < 1.0 {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stepper::Icon;

    #[test]
    fn test_style_from_spec() {
        let spec = StyleSpec {
            fg: Some("blue".to_string()),
            bg: Some("#102030".to_string()),
            bold: true,
        };
        let style = style_from_spec(&spec);
        assert_eq!(style.fg, Some(Color::Blue));
        assert_eq!(style.bg, Some(Color::Rgb(0x10, 0x20, 0x30)));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_missing_slot_is_default_style() {
        assert_eq!(slot_style(&None), Style::default());
    }

    #[test]
    fn test_icon_glyphs() {
        assert_eq!(icon_glyph(&StepIconKind::Number(3), 0), "3");
        assert_eq!(icon_glyph(&StepIconKind::Check(Icon::new("✓")), 0), "✓");
        assert_eq!(icon_glyph(&StepIconKind::Loading, 0), SPINNER_FRAMES[0]);
        assert_eq!(
            icon_glyph(&StepIconKind::Loading, SPINNER_FRAMES.len() + 1),
            SPINNER_FRAMES[1]
        );
    }
}

//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the stepper's key bindings, used by the
//! footer hint line and by the key handler tests.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., arrow key for a vim key)
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    pub action: Action,
    /// Context where this shortcut is active
    pub context: ShortcutContext,
}

/// What a shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    Click,
    NextStep,
    PrevStep,
    Reset,
    EditNotes,
    ToggleExpand,
    ToggleScrollTracking,
    CycleVariant,
    ToggleLoading,
    ToggleError,
    StopEditing,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Moving through the step list
    Steps,
    /// Typing into a step's notes editor
    Notes,
}

impl ShortcutContext {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Steps => "Steps",
            ShortcutContext::Notes => "Notes",
        }
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "j/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.key == key || self.alt_key == Some(key)
    }
}

fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        description: "Quit",
        action: Action::Quit,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Down),
        description: "Focus next step",
        action: Action::FocusNext,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('k'),
        alt_key: Some(KeyCode::Up),
        description: "Focus previous step",
        action: Action::FocusPrev,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char(' ')),
        description: "Click focused step",
        action: Action::Click,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('n'),
        alt_key: Some(KeyCode::Right),
        description: "Next step",
        action: Action::NextStep,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('p'),
        alt_key: Some(KeyCode::Left),
        description: "Previous step",
        action: Action::PrevStep,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('r'),
        alt_key: None,
        description: "Reset to first step",
        action: Action::Reset,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('i'),
        alt_key: Some(KeyCode::Tab),
        description: "Edit notes",
        action: Action::EditNotes,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('e'),
        alt_key: None,
        description: "Toggle expand all",
        action: Action::ToggleExpand,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('s'),
        alt_key: None,
        description: "Toggle scroll tracking",
        action: Action::ToggleScrollTracking,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('v'),
        alt_key: None,
        description: "Cycle variant",
        action: Action::CycleVariant,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('L'),
        alt_key: None,
        description: "Toggle loading",
        action: Action::ToggleLoading,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Char('X'),
        alt_key: None,
        description: "Toggle error",
        action: Action::ToggleError,
        context: ShortcutContext::Steps,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Stop editing",
        action: Action::StopEditing,
        context: ShortcutContext::Notes,
    },
];

pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Find the shortcut a key triggers in a context
pub fn lookup(context: ShortcutContext, key: KeyCode) -> Option<&'static Shortcut> {
    shortcuts_for_context(context).find(|s| s.matches(key))
}

pub fn action_for(context: ShortcutContext, key: KeyCode) -> Option<Action> {
    lookup(context, key).map(|s| s.action)
}

/// One-line hint for the footer, e.g. "Steps: q/Esc Quit · j/↓ Focus next step · ..."
pub fn footer_hint(context: ShortcutContext) -> String {
    let hints = shortcuts_for_context(context)
        .map(|s| format!("{} {}", s.key_display(), s.description))
        .collect::<Vec<_>>()
        .join(" · ");
    format!("{}: {}", context.display_name(), hints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_shortcuts_have_descriptions() {
        for shortcut in SHORTCUTS {
            assert!(
                !shortcut.description.is_empty(),
                "Shortcut {:?} has empty description",
                shortcut.key
            );
        }
    }

    #[test]
    fn test_no_duplicate_keys_within_context() {
        for context in [ShortcutContext::Steps, ShortcutContext::Notes] {
            let mut seen = HashSet::new();
            for shortcut in shortcuts_for_context(context) {
                for key in std::iter::once(shortcut.key).chain(shortcut.alt_key) {
                    assert!(
                        seen.insert(format!("{key:?}")),
                        "{key:?} bound twice in {}",
                        context.display_name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_key_display_with_alt() {
        let shortcut = lookup(ShortcutContext::Steps, KeyCode::Down).unwrap();
        assert_eq!(shortcut.key_display(), "j/↓");
        let click = lookup(ShortcutContext::Steps, KeyCode::Char(' ')).unwrap();
        assert_eq!(click.key_display(), "Enter/Space");
    }

    #[test]
    fn test_lookup_respects_context() {
        assert_eq!(
            lookup(ShortcutContext::Notes, KeyCode::Esc).map(|s| s.description),
            Some("Stop editing")
        );
        assert!(lookup(ShortcutContext::Notes, KeyCode::Char('q')).is_none());
    }

    #[test]
    fn test_action_for_vim_and_arrow_keys() {
        let steps = ShortcutContext::Steps;
        assert_eq!(action_for(steps, KeyCode::Char('j')), Some(Action::FocusNext));
        assert_eq!(action_for(steps, KeyCode::Down), Some(Action::FocusNext));
        assert_eq!(action_for(steps, KeyCode::Right), Some(Action::NextStep));
        assert_eq!(action_for(steps, KeyCode::Char('z')), None);
    }

    #[test]
    fn test_footer_hint_lists_context_shortcuts() {
        let hint = footer_hint(ShortcutContext::Notes);
        assert_eq!(hint, "Notes: Esc Stop editing");
    }

    #[test]
    fn test_footer_hint_names_steps_context() {
        let hint = footer_hint(ShortcutContext::Steps);
        assert!(hint.starts_with("Steps: q/Esc Quit · j/↓ Focus next step"));
    }
}

pub mod keybindings;
pub mod stepper_view;
pub mod terminal_guard;
pub mod theme;

pub use stepper_view::{StepNotes, StepperView, ViewProps};
pub use terminal_guard::{install_panic_hook, TerminalSession};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

use crate::config::Config;
use crate::stepper::{StepBody, StepperContext, Variant, VerticalStepper};
use crate::ui::keybindings::{self, Action, ShortcutContext};
use crate::ui::{StepNotes, StepperView, TerminalSession, ViewProps};

pub struct App {
    config: Config,
    stepper: VerticalStepper<StepNotes>,
    /// Static body text per step, from config
    bodies: Vec<String>,
    view: StepperView,
    /// Step under the keyboard cursor
    focus: usize,
    editing: bool,
    should_quit: bool,
    status: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let stepper = VerticalStepper::new(config.build_context());
        let bodies = config.step_bodies();
        let focus = usize::try_from(stepper.context().current_step_index()).unwrap_or(0);

        let mut app = Self {
            config,
            stepper,
            bodies,
            view: StepperView::new(),
            focus,
            editing: false,
            should_quit: false,
            status: None,
        };
        app.after_update();
        app
    }

    pub fn stepper(&self) -> &VerticalStepper<StepNotes> {
        &self.stepper
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::start()?;
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tracing::info!(steps = self.stepper.context().step_count(), "stepper started");

        while !self.should_quit {
            session.terminal().draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.view.tick();
        }

        session.restore();
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.editing {
            if keybindings::action_for(ShortcutContext::Notes, key.code)
                == Some(Action::StopEditing)
            {
                self.editing = false;
            } else if let Some(notes) = self.focused_notes_mut() {
                notes.editor.input(key);
            }
            return;
        }

        if let Some(action) = keybindings::action_for(ShortcutContext::Steps, key.code) {
            self.perform(action);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.view.hit_test(mouse.column, mouse.row) {
                    self.editing = false;
                    self.click(index);
                    self.after_update();
                }
            }
            MouseEventKind::ScrollDown => self.view.scroll_by(1),
            MouseEventKind::ScrollUp => self.view.scroll_by(-1),
            _ => {}
        }
    }

    pub fn perform(&mut self, action: Action) {
        let count = self.stepper.context().step_count();
        let current = self.stepper.context().current_step_index();
        self.status = None;

        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => {
                if self.focus + 1 < count {
                    self.focus += 1;
                    self.view.reveal(self.focus);
                }
            }
            Action::FocusPrev => {
                if self.focus > 0 {
                    self.focus -= 1;
                    self.view.reveal(self.focus);
                }
            }
            Action::Click => self.click(self.focus),
            Action::NextStep => {
                // Moving one past the last step marks the stepper finished
                if usize::try_from(current).is_ok_and(|c| c < count) {
                    self.stepper.next_step();
                    self.follow_current();
                }
            }
            Action::PrevStep => {
                if current > 0 {
                    self.stepper.prev_step();
                    self.follow_current();
                }
            }
            Action::Reset => {
                self.stepper.reset_steps();
                self.follow_current();
            }
            Action::EditNotes => {
                if self.focused_notes_mut().is_some() {
                    self.editing = true;
                } else {
                    self.status = Some("Notes are only available on an open step".to_string());
                }
            }
            Action::ToggleExpand => {
                self.stepper.update(|c| {
                    c.options.expand_vertical_steps = !c.options.expand_vertical_steps;
                });
            }
            Action::ToggleScrollTracking => {
                self.stepper.update(|c| {
                    c.options.scroll_tracking = !c.options.scroll_tracking;
                });
            }
            Action::CycleVariant => {
                self.stepper.update(|c| {
                    c.options.variant = match c.options.variant {
                        Variant::Circle => Variant::CircleAlt,
                        Variant::CircleAlt => Variant::Line,
                        Variant::Line => Variant::Circle,
                    };
                });
            }
            Action::ToggleLoading => {
                self.stepper
                    .update(|c| c.options.is_loading = !c.options.is_loading);
            }
            Action::ToggleError => {
                self.stepper.update(|c| c.options.is_error = !c.options.is_error);
            }
            Action::StopEditing => self.editing = false,
        }

        self.after_update();
    }

    fn click(&mut self, index: usize) {
        self.focus = index;
        if !self.stepper.click(index) {
            let label = self
                .stepper
                .context()
                .step(index)
                .map(|s| s.label.clone())
                .unwrap_or_default();
            self.status = Some(format!("\"{label}\" has no click handler"));
        }
    }

    fn follow_current(&mut self) {
        let count = self.stepper.context().step_count();
        if let Ok(current) = usize::try_from(self.stepper.context().current_step_index()) {
            if current < count {
                self.focus = current;
            }
        }
    }

    fn focused_notes_mut(&mut self) -> Option<&mut StepNotes> {
        self.stepper
            .body_mut(self.focus)
            .and_then(StepBody::state_mut)
    }

    /// Forward the winning scroll request to the view and drop editing if
    /// the edited body collapsed.
    fn after_update(&mut self) {
        if let Some(request) = self.stepper.take_scroll_target() {
            self.view.scroll_to(request);
        }
        if self.editing && self.focused_notes_mut().is_none() {
            self.editing = false;
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "Stepper",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {} ", progress_title(self.stepper.context()))),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Steps
                Constraint::Length(1), // Status
                Constraint::Length(1), // Shortcuts
            ])
            .split(inner);

        let props = ViewProps {
            bodies: &self.bodies,
            focus: self.focus,
            editing: self.editing,
            notes_height: self.config.ui.notes_height,
        };
        self.view
            .render(frame, chunks[0], &mut self.stepper, &props);

        let status = match &self.status {
            Some(message) => Span::styled(message.clone(), Style::default().fg(Color::Yellow)),
            None => Span::styled(
                options_summary(self.stepper.context()),
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[1]);

        let context = if self.editing {
            ShortcutContext::Notes
        } else {
            ShortcutContext::Steps
        };
        frame.render_widget(
            Paragraph::new(keybindings::footer_hint(context))
                .style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }
}

fn progress_title(context: &StepperContext) -> String {
    let count = context.step_count();
    if context.has_completed_all_steps() {
        return "· all steps completed".to_string();
    }
    match usize::try_from(context.current_step_index()) {
        Ok(current) if current < count => format!("· step {} of {}", current + 1, count),
        _ => "· no current step".to_string(),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn options_summary(context: &StepperContext) -> String {
    let options = &context.options;
    let variant = match options.variant {
        Variant::Circle => "circle",
        Variant::CircleAlt => "circle-alt",
        Variant::Line => "line",
    };
    format!(
        "variant {} · expand {} · tracking {} · loading {} · error {}",
        variant,
        on_off(options.expand_vertical_steps),
        on_off(options.scroll_tracking),
        on_off(options.is_loading),
        on_off(options.is_error),
    )
}

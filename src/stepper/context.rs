//! Shared stepper state: the ordered step list, the current step pointer
//! and the stepper-wide options every step reads.
//!
//! `StepperContext::set_step` is the only way the current step changes.
//! Steps never mutate the context directly; click handlers receive a
//! `StepSetter` and call it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use super::types::{Icon, Orientation, StepState, StepStyles, Variant};

/// Mutator handed to click handlers
pub trait StepSetter {
    fn set_step(&mut self, index: isize);
}

/// Click handler invoked with `(step index, setStep)`
pub type ClickHandler = Rc<dyn Fn(usize, &mut dyn StepSetter)>;

/// Declarative click behavior, used where handlers come from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickAction {
    /// Make the clicked step current
    Jump,
    /// Swallow the click. On a step this shadows the stepper-wide handler.
    Ignore,
}

impl ClickAction {
    pub fn into_handler(self) -> ClickHandler {
        match self {
            ClickAction::Jump => Rc::new(|index, set_step: &mut dyn StepSetter| {
                set_step.set_step(isize::try_from(index).unwrap_or(isize::MAX));
            }),
            ClickAction::Ignore => Rc::new(|_, _: &mut dyn StepSetter| {}),
        }
    }
}

/// Configured data for a single step
#[derive(Clone, Default)]
pub struct StepDescriptor {
    index: usize,
    has_visited: bool,
    pub label: String,
    pub description: Option<String>,
    pub icon: Option<Icon>,
    pub check_icon: Option<Icon>,
    pub error_icon: Option<Icon>,
    pub state: StepState,
    pub optional: bool,
    pub on_click_step: Option<ClickHandler>,
}

impl StepDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_check_icon(mut self, icon: impl Into<Icon>) -> Self {
        self.check_icon = Some(icon.into());
        self
    }

    pub fn with_error_icon(mut self, icon: impl Into<Icon>) -> Self {
        self.error_icon = Some(icon.into());
        self
    }

    pub fn with_state(mut self, state: StepState) -> Self {
        self.state = state;
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_on_click(mut self, handler: ClickHandler) -> Self {
        self.on_click_step = Some(handler);
        self
    }

    /// Position of the step in the stepper (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this step has ever been the current step
    pub fn has_visited(&self) -> bool {
        self.has_visited
    }
}

impl fmt::Debug for StepDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("index", &self.index)
            .field("label", &self.label)
            .field("description", &self.description)
            .field("icon", &self.icon)
            .field("check_icon", &self.check_icon)
            .field("error_icon", &self.error_icon)
            .field("state", &self.state)
            .field("optional", &self.optional)
            .field("has_visited", &self.has_visited)
            .field("on_click_step", &self.on_click_step.is_some())
            .finish()
    }
}

/// Stepper-wide options shared by every step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepperOptions {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub clickable: bool,
    #[serde(default)]
    pub expand_vertical_steps: bool,
    #[serde(default)]
    pub scroll_tracking: bool,
    #[serde(default = "Icon::default_check")]
    pub check_icon: Icon,
    #[serde(default = "Icon::default_error")]
    pub error_icon: Icon,
    /// Step that is current when the stepper is created
    #[serde(default)]
    pub initial_step: isize,
    #[serde(default)]
    pub styles: StepStyles,
}

impl Default for StepperOptions {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            orientation: Orientation::default(),
            is_loading: false,
            is_error: false,
            clickable: false,
            expand_vertical_steps: false,
            scroll_tracking: false,
            check_icon: Icon::default_check(),
            error_icon: Icon::default_error(),
            initial_step: 0,
            styles: StepStyles::default(),
        }
    }
}

/// Shared state for one stepper instance
pub struct StepperContext {
    steps: Vec<StepDescriptor>,
    current_step_index: isize,
    pub options: StepperOptions,
    pub on_click_step: Option<ClickHandler>,
}

impl StepperContext {
    /// Create a context; step indices are assigned from list order and the
    /// initial step is marked visited.
    pub fn new(steps: Vec<StepDescriptor>, options: StepperOptions) -> Self {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, mut step)| {
                step.index = index;
                step.has_visited = false;
                step
            })
            .collect();

        let initial = options.initial_step;
        let mut context = Self {
            steps,
            current_step_index: initial,
            options,
            on_click_step: None,
        };
        context.mark_visited(initial);
        context
    }

    pub fn with_on_click(mut self, handler: ClickHandler) -> Self {
        self.on_click_step = Some(handler);
        self
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step_index(&self) -> isize {
        self.current_step_index
    }

    /// Move the current step pointer. Any integer is accepted; an index
    /// outside the list simply matches no step.
    pub fn set_step(&mut self, index: isize) {
        let previous = self.current_step_index;
        self.current_step_index = index;
        self.mark_visited(index);
        tracing::debug!(previous, current = index, "current step changed");
    }

    pub fn next_step(&mut self) {
        self.set_step(self.current_step_index.saturating_add(1));
    }

    pub fn prev_step(&mut self) {
        self.set_step(self.current_step_index.saturating_sub(1));
    }

    /// Return to the first step. Visited flags are kept.
    pub fn reset_steps(&mut self) {
        self.set_step(0);
    }

    pub fn is_last_step(&self) -> bool {
        self.current_index_in_range()
            .is_some_and(|index| index + 1 == self.steps.len())
    }

    /// True once the pointer has moved past the last step
    pub fn has_completed_all_steps(&self) -> bool {
        usize::try_from(self.current_step_index).is_ok_and(|index| index >= self.steps.len())
    }

    fn current_index_in_range(&self) -> Option<usize> {
        usize::try_from(self.current_step_index)
            .ok()
            .filter(|index| *index < self.steps.len())
    }

    fn mark_visited(&mut self, index: isize) {
        if let Some(step) = usize::try_from(index)
            .ok()
            .and_then(|i| self.steps.get_mut(i))
        {
            step.has_visited = true;
        }
    }
}

impl StepSetter for StepperContext {
    fn set_step(&mut self, index: isize) {
        StepperContext::set_step(self, index);
    }
}

impl fmt::Debug for StepperContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperContext")
            .field("steps", &self.steps)
            .field("current_step_index", &self.current_step_index)
            .field("options", &self.options)
            .field("on_click_step", &self.on_click_step.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Vec<StepDescriptor> {
        vec![
            StepDescriptor::new("Account"),
            StepDescriptor::new("Profile"),
            StepDescriptor::new("Review"),
        ]
    }

    #[test]
    fn test_indices_follow_list_order() {
        let context = StepperContext::new(three_steps(), StepperOptions::default());
        let indices: Vec<usize> = context.steps().iter().map(StepDescriptor::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_initial_step_is_visited() {
        let context = StepperContext::new(three_steps(), StepperOptions::default());
        assert!(context.steps()[0].has_visited());
        assert!(!context.steps()[1].has_visited());
        assert!(!context.steps()[2].has_visited());
    }

    #[test]
    fn test_set_step_marks_visited_and_keeps_it() {
        let mut context = StepperContext::new(three_steps(), StepperOptions::default());
        context.set_step(2);
        assert!(context.steps()[2].has_visited());

        context.set_step(0);
        assert!(context.steps()[2].has_visited());
        assert!(!context.steps()[1].has_visited());
    }

    #[test]
    fn test_out_of_range_index_is_accepted() {
        let mut context = StepperContext::new(three_steps(), StepperOptions::default());
        context.set_step(-4);
        assert_eq!(context.current_step_index(), -4);
        context.set_step(17);
        assert_eq!(context.current_step_index(), 17);
        assert!(context.has_completed_all_steps());
    }

    #[test]
    fn test_next_prev_and_reset() {
        let mut context = StepperContext::new(three_steps(), StepperOptions::default());
        context.next_step();
        context.next_step();
        assert_eq!(context.current_step_index(), 2);
        assert!(context.is_last_step());

        context.prev_step();
        assert_eq!(context.current_step_index(), 1);
        assert!(!context.is_last_step());

        context.reset_steps();
        assert_eq!(context.current_step_index(), 0);
        assert!(context.steps()[2].has_visited());
    }

    #[test]
    fn test_has_completed_all_steps() {
        let mut context = StepperContext::new(three_steps(), StepperOptions::default());
        assert!(!context.has_completed_all_steps());
        context.set_step(3);
        assert!(context.has_completed_all_steps());
        assert!(!context.is_last_step());
    }

    #[test]
    fn test_initial_step_from_options() {
        let options = StepperOptions {
            initial_step: 1,
            ..StepperOptions::default()
        };
        let context = StepperContext::new(three_steps(), options);
        assert_eq!(context.current_step_index(), 1);
        assert!(context.steps()[1].has_visited());
        assert!(!context.steps()[0].has_visited());
    }

    #[test]
    fn test_jump_action_sets_clicked_index() {
        let mut context = StepperContext::new(three_steps(), StepperOptions::default());
        let handler = ClickAction::Jump.into_handler();
        handler(2, &mut context);
        assert_eq!(context.current_step_index(), 2);
    }

    #[test]
    fn test_ignore_action_leaves_pointer() {
        let mut context = StepperContext::new(three_steps(), StepperOptions::default());
        let handler = ClickAction::Ignore.into_handler();
        handler(2, &mut context);
        assert_eq!(context.current_step_index(), 0);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: StepperOptions = serde_json::from_str(r#"{"variant": "line"}"#).unwrap();
        assert_eq!(options.variant, Variant::Line);
        assert_eq!(options.check_icon, Icon::default_check());
        assert_eq!(options.initial_step, 0);
        assert!(!options.expand_vertical_steps);
    }
}

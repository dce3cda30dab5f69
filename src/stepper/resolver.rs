//! Step state resolution.
//!
//! Everything a step shows is derived from its descriptor and the shared
//! context on every read. Nothing here is stored and nothing can fail.

use serde::Serialize;

use super::context::{StepDescriptor, StepperContext};
use super::types::{Icon, StepState};

/// Label opacity for a step that has been current at least once
pub const VISITED_OPACITY: f32 = 1.0;
/// Label opacity for a step that has never been current
pub const UNVISITED_OPACITY: f32 = 0.8;

/// Derived visual and interaction state of one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStep {
    pub index: usize,
    pub is_completed_step: bool,
    pub is_current_step: bool,
    pub is_loading: bool,
    pub is_error: bool,
    pub active: bool,
    pub check_icon: Icon,
    pub error_icon: Icon,
    pub is_clickable: bool,
    pub opacity: f32,
    pub should_render_body: bool,
    pub optional: bool,
    pub has_visited: bool,
}

/// Derive a step's state from its descriptor and the stepper context.
pub fn resolve_step(step: &StepDescriptor, context: &StepperContext) -> ResolvedStep {
    let options = &context.options;
    let current = context.current_step_index();
    let index = isize::try_from(step.index()).unwrap_or(isize::MAX);

    let is_completed_step = index < current;
    let is_current_step = index == current;

    let active = if options.variant.is_line() {
        is_completed_step || is_current_step
    } else {
        is_completed_step
    };

    ResolvedStep {
        index: step.index(),
        is_completed_step,
        is_current_step,
        is_loading: options.is_loading || step.state == StepState::Loading,
        is_error: options.is_error || step.state == StepState::Error,
        active,
        check_icon: step
            .check_icon
            .clone()
            .unwrap_or_else(|| options.check_icon.clone()),
        error_icon: step
            .error_icon
            .clone()
            .unwrap_or_else(|| options.error_icon.clone()),
        is_clickable: options.clickable || step.on_click_step.is_some(),
        opacity: if step.has_visited() {
            VISITED_OPACITY
        } else {
            UNVISITED_OPACITY
        },
        should_render_body: options.expand_vertical_steps || is_current_step,
        optional: step.optional,
        has_visited: step.has_visited(),
    }
}

/// Resolve every step in display order.
pub fn resolve_all(context: &StepperContext) -> Vec<ResolvedStep> {
    context
        .steps()
        .iter()
        .map(|step| resolve_step(step, context))
        .collect()
}

/// Dispatch a click on the step at `index`.
///
/// The step's own handler wins over the stepper-wide one. The handler runs
/// whether or not the step is shown as clickable. Returns `true` if a
/// handler ran; clicking an unknown index or a step with no handler in
/// reach does nothing.
pub fn dispatch_click(context: &mut StepperContext, index: usize) -> bool {
    let Some(step) = context.step(index) else {
        return false;
    };

    let handler = step
        .on_click_step
        .clone()
        .or_else(|| context.on_click_step.clone());

    match handler {
        Some(handler) => {
            tracing::debug!(index, "dispatching step click");
            handler(index, context);
            true
        }
        None => false,
    }
}

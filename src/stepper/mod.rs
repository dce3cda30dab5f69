//! Vertical stepper state.
//!
//! `StepperContext` holds the shared state, `resolver` derives each step's
//! visual state from it, and `VerticalStepper` keeps step bodies and scroll
//! requests in line with that derived state after every change.

pub mod attributes;
pub mod body;
pub mod context;
pub mod resolver;
pub mod scroll;
pub mod types;

pub use attributes::{StepAttributes, StepIconKind, StepLayout};
pub use body::{BodyPresence, BodyTransition, StepBody};
pub use context::{
    ClickAction, ClickHandler, StepDescriptor, StepSetter, StepperContext, StepperOptions,
};
pub use resolver::{dispatch_click, resolve_all, resolve_step, ResolvedStep};
pub use scroll::{ScrollBehavior, ScrollBlock, ScrollPort, ScrollRequest};
pub use types::{Icon, Orientation, StepState, StepStyles, StyleSpec, Variant};

/// A stepper together with the bodies of its steps.
///
/// `S` is the per-body state. It is created when a body expands and
/// dropped when it collapses.
#[derive(Debug)]
pub struct VerticalStepper<S> {
    context: StepperContext,
    bodies: Vec<StepBody<S>>,
    scroll: ScrollPort,
}

impl<S: Default> VerticalStepper<S> {
    pub fn new(context: StepperContext) -> Self {
        let bodies = (0..context.step_count()).map(|_| StepBody::new()).collect();
        let mut stepper = Self {
            context,
            bodies,
            scroll: ScrollPort::default(),
        };
        stepper.reconcile();
        stepper
    }

    pub fn context(&self) -> &StepperContext {
        &self.context
    }

    /// Change the context and bring the bodies back in line with it.
    pub fn update(&mut self, f: impl FnOnce(&mut StepperContext)) -> Vec<BodyTransition> {
        f(&mut self.context);
        self.reconcile()
    }

    pub fn set_step(&mut self, index: isize) -> Vec<BodyTransition> {
        self.update(|context| context.set_step(index))
    }

    pub fn next_step(&mut self) -> Vec<BodyTransition> {
        self.update(StepperContext::next_step)
    }

    pub fn prev_step(&mut self) -> Vec<BodyTransition> {
        self.update(StepperContext::prev_step)
    }

    pub fn reset_steps(&mut self) -> Vec<BodyTransition> {
        self.update(StepperContext::reset_steps)
    }

    /// Dispatch a click on a step. Returns `true` if a handler ran.
    pub fn click(&mut self, index: usize) -> bool {
        let handled = dispatch_click(&mut self.context, index);
        self.reconcile();
        handled
    }

    pub fn resolved(&self) -> Vec<ResolvedStep> {
        resolve_all(&self.context)
    }

    pub fn attributes(&self) -> Vec<StepAttributes> {
        self.resolved()
            .iter()
            .map(|resolved| StepAttributes::new(resolved, &self.context))
            .collect()
    }

    pub fn body(&self, index: usize) -> Option<&StepBody<S>> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut StepBody<S>> {
        self.bodies.get_mut(index)
    }

    pub fn scroll_port(&self) -> &ScrollPort {
        &self.scroll
    }

    /// The scroll request that wins this cycle, if any
    pub fn take_scroll_target(&mut self) -> Option<ScrollRequest> {
        self.scroll.take_target()
    }

    /// Sync every body with its step's `should_render_body` and queue a
    /// scroll request for each mount when tracking is on.
    pub fn reconcile(&mut self) -> Vec<BodyTransition> {
        let resolved = resolve_all(&self.context);
        let tracking = self.context.options.scroll_tracking;

        let transitions: Vec<BodyTransition> = self
            .bodies
            .iter_mut()
            .zip(&resolved)
            .map(|(body, step)| body.sync(step.should_render_body))
            .collect();

        for (index, transition) in transitions.iter().enumerate() {
            match transition {
                BodyTransition::Mounted => {
                    tracing::debug!(index, "step body expanded");
                    if tracking {
                        self.scroll.request(ScrollRequest::on_mount(index));
                    }
                }
                BodyTransition::Unmounted => tracing::debug!(index, "step body collapsed"),
                BodyTransition::Unchanged => {}
            }
        }

        transitions
    }
}

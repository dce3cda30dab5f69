//! Presentation attributes handed to the rendering layer.

use serde::Serialize;

use super::context::StepperContext;
use super::resolver::ResolvedStep;
use super::types::{Icon, Orientation, Variant};

/// Layout family of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepLayout {
    Circle,
    Line,
}

/// What the step's icon slot shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum StepIconKind {
    Check(Icon),
    Error(Icon),
    Loading,
    Custom(Icon),
    /// 1-based step number
    Number(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepAttributes {
    pub optional: bool,
    pub completed: bool,
    pub active: bool,
    pub clickable: bool,
    pub invalid: bool,
    pub current: bool,
    pub layout: StepLayout,
    /// Line steps draw a side border that lights up while active
    pub container_bordered: bool,
    /// Circle steps indent their content under the label
    pub content_indented: bool,
    pub content_min_height: u16,
    pub label_opacity: f32,
    pub icon: StepIconKind,
}

impl StepAttributes {
    pub fn new(resolved: &ResolvedStep, context: &StepperContext) -> Self {
        let variant = context.options.variant;
        let optional = context
            .step(resolved.index)
            .is_some_and(|step| step.optional);

        Self {
            optional,
            completed: resolved.is_completed_step,
            active: resolved.active,
            clickable: resolved.is_clickable,
            invalid: resolved.is_error,
            current: resolved.is_current_step,
            layout: if variant.is_circle() {
                StepLayout::Circle
            } else {
                StepLayout::Line
            },
            container_bordered: variant.is_line(),
            content_indented: !variant.is_line(),
            content_min_height: content_min_height(variant, context.options.orientation),
            label_opacity: resolved.opacity,
            icon: icon_kind(resolved, context),
        }
    }
}

fn content_min_height(variant: Variant, orientation: Orientation) -> u16 {
    if variant.is_line() && orientation == Orientation::Vertical {
        0
    } else {
        1
    }
}

/// Error and loading only show on the step in progress. Completed steps
/// show their check icon; everything else shows its own icon or number.
fn icon_kind(resolved: &ResolvedStep, context: &StepperContext) -> StepIconKind {
    if resolved.is_current_step && resolved.is_error {
        return StepIconKind::Error(resolved.error_icon.clone());
    }
    if resolved.is_current_step && resolved.is_loading {
        return StepIconKind::Loading;
    }
    if resolved.is_completed_step {
        return StepIconKind::Check(resolved.check_icon.clone());
    }
    match context.step(resolved.index).and_then(|step| step.icon.clone()) {
        Some(icon) => StepIconKind::Custom(icon),
        None => StepIconKind::Number(resolved.index + 1),
    }
}

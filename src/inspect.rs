//! Machine-readable snapshot of a stepper, printed by `stepper inspect`.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::stepper::{resolve_step, ResolvedStep, StepAttributes, StepperContext};

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub resolved: ResolvedStep,
    pub attributes: StepAttributes,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepperReport {
    pub current_step_index: isize,
    pub step_count: usize,
    pub is_last_step: bool,
    pub has_completed_all_steps: bool,
    pub steps: Vec<StepReport>,
}

impl StepperReport {
    pub fn new(context: &StepperContext) -> Self {
        let steps = context
            .steps()
            .iter()
            .map(|step| {
                let resolved = resolve_step(step, context);
                let attributes = StepAttributes::new(&resolved, context);
                StepReport {
                    label: step.label.clone(),
                    description: step.description.clone(),
                    resolved,
                    attributes,
                }
            })
            .collect();

        Self {
            current_step_index: context.current_step_index(),
            step_count: context.step_count(),
            is_last_step: context.is_last_step(),
            has_completed_all_steps: context.has_completed_all_steps(),
            steps,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize stepper report")
    }
}

/// Build a report, optionally moving the current step first
pub fn inspect(mut context: StepperContext, current: Option<isize>) -> StepperReport {
    if let Some(index) = current {
        context.set_step(index);
    }
    StepperReport::new(&context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::stepper::StepIconKind;

    #[test]
    fn test_report_reflects_initial_step() {
        let report = inspect(Config::default().build_context(), None);
        assert_eq!(report.current_step_index, 0);
        assert_eq!(report.step_count, 4);
        assert!(!report.is_last_step);
        assert!(report.steps[0].resolved.is_current_step);
        assert_eq!(report.steps[0].label, "Account");
    }

    #[test]
    fn test_current_override_completes_earlier_steps() {
        let report = inspect(Config::default().build_context(), Some(2));
        let completed: Vec<bool> = report
            .steps
            .iter()
            .map(|s| s.resolved.is_completed_step)
            .collect();
        assert_eq!(completed, vec![true, true, false, false]);
        assert!(matches!(
            report.steps[0].attributes.icon,
            StepIconKind::Check(_)
        ));
        assert_eq!(report.steps[3].attributes.icon, StepIconKind::Number(4));
    }

    #[test]
    fn test_past_the_end_reports_completion() {
        let report = inspect(Config::default().build_context(), Some(4));
        assert!(report.has_completed_all_steps);
        assert!(report.steps.iter().all(|s| s.resolved.is_completed_step));
    }

    #[test]
    fn test_json_has_expected_fields() {
        let report = inspect(Config::default().build_context(), None);
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json(false).unwrap()).unwrap();

        assert_eq!(value["step_count"], 4);
        assert_eq!(value["steps"][0]["resolved"]["is_current_step"], true);
        assert_eq!(value["steps"][1]["attributes"]["icon"]["kind"], "number");
        assert_eq!(value["steps"][1]["attributes"]["icon"]["value"], 2);
        assert_eq!(value["steps"][2]["attributes"]["optional"], true);
    }
}

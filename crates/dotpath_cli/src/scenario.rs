//! Click scenarios for headless runs.

use anyhow::{anyhow, Result};
use dotpath_animation::Headless;
use dotpath_core::Stage;
use serde::Deserialize;
use std::path::Path;

/// Sequence of clicks and waits.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Click an element by name
    Click { target: String },
    /// Click the container itself
    ClickBackground,
    /// Let time pass before the next click
    Wait { ms: u64 },
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Click every waypoint after the first, back to back
    pub fn visit_all(stage: &Stage) -> Self {
        let steps = stage
            .waypoints()
            .skip(1)
            .map(|(_, el)| ScenarioStep::Click {
                target: el.name().to_string(),
            })
            .collect();
        Self { steps }
    }

    /// Schedule the clicks on a headless host, resolving names on `stage`
    pub fn schedule(&self, stage: &Stage, host: &mut Headless) -> Result<usize> {
        let mut at_ms = 0.0;
        let mut clicks = 0;

        for step in &self.steps {
            match step {
                ScenarioStep::Click { target } => {
                    let id = stage
                        .lookup(target)
                        .ok_or_else(|| anyhow!("scenario clicks unknown element `{target}`"))?;
                    host.push_click(at_ms, id);
                    clicks += 1;
                }
                ScenarioStep::ClickBackground => {
                    host.push_click(at_ms, stage.background());
                    clicks += 1;
                }
                ScenarioStep::Wait { ms } => at_ms += *ms as f64,
            }
        }

        Ok(clicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotpath_core::Point;

    fn stage() -> Stage {
        Stage::with_waypoints(&[
            Point::new(10.0, 10.0),
            Point::new(40.0, 65.0),
            Point::new(180.0, 135.0),
        ])
    }

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_json(
            r#"{"steps": [
                {"type": "click", "target": "dot2"},
                {"type": "wait", "ms": 300},
                {"type": "click_background"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            scenario.steps,
            vec![
                ScenarioStep::Click {
                    target: "dot2".to_string()
                },
                ScenarioStep::Wait { ms: 300 },
                ScenarioStep::ClickBackground,
            ]
        );
    }

    #[test]
    fn test_schedule_accumulates_waits() {
        let stage = stage();
        let scenario = Scenario::from_json(
            r#"{"steps": [
                {"type": "click", "target": "dot2"},
                {"type": "wait", "ms": 300},
                {"type": "click", "target": "dot3"},
                {"type": "click_background"}
            ]}"#,
        )
        .unwrap();
        let mut host = Headless::default();

        assert_eq!(scenario.schedule(&stage, &mut host).unwrap(), 3);
        assert_eq!(host.pending_clicks(), 3);
    }

    #[test]
    fn test_unknown_target_fails() {
        let scenario = Scenario::from_json(r#"{"steps": [{"type": "click", "target": "dot9"}]}"#)
            .unwrap();
        let mut host = Headless::default();
        assert!(scenario.schedule(&stage(), &mut host).is_err());
    }

    #[test]
    fn test_visit_all_skips_start() {
        let scenario = Scenario::visit_all(&stage());
        let targets: Vec<_> = scenario
            .steps
            .iter()
            .map(|s| match s {
                ScenarioStep::Click { target } => target.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(targets, vec!["dot2", "dot3"]);
    }
}

//! plotinput Replay
//!
//! Headless shell for the plotinput router: registers the modules a script
//! names, feeds its pointer, key and wheel steps through an [`InputRouter`], and
//! records every delivered event, menu request and isolated callback failure.

mod host;
mod script;

pub use host::HeadlessHost;
pub use script::{ModuleSpec, Script, Step, strategy_by_name};

use kurbo::Rect;
use plotinput_core::{
    CallbackFailure, ConfigError, DispatchPhase, InputRouter, InteractionModule, ModuleMenu,
    PressOutcome, RouterState, SelectionEvent,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors that stop a replay before or while it runs.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Script parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown strategy '{0}'")]
    UnknownStrategy(String),
    #[error("Module '{0}' is declared twice")]
    DuplicateModule(String),
    #[error("Invalid setup: {0}")]
    Config(#[from] ConfigError),
}

/// Something observed during a replay, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum ReplayRecord {
    Event { module: String, event: SelectionEvent },
    Menu { menu: ModuleMenu },
    Failure { module: String, phase: DispatchPhase, error: String },
}

/// Router and host state after the last step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub state: RouterState,
    pub region: Rect,
    pub pinned: bool,
    pub partial_repaints: usize,
    pub full_repaints: usize,
    pub failures: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub records: Vec<ReplayRecord>,
    pub summary: ReplaySummary,
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    record: &'static str,
    #[serde(flatten)]
    summary: &'a ReplaySummary,
}

impl ReplayReport {
    /// Delivered events with the label of the module that produced them.
    pub fn events(&self) -> impl Iterator<Item = (&str, &SelectionEvent)> {
        self.records.iter().filter_map(|record| match record {
            ReplayRecord::Event { module, event } => Some((module.as_str(), event)),
            _ => None,
        })
    }

    /// One JSON object per record, then a summary line.
    pub fn to_json_lines(&self) -> Result<String, ReplayError> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        let summary = SummaryLine {
            record: "summary",
            summary: &self.summary,
        };
        out.push_str(&serde_json::to_string(&summary)?);
        out.push('\n');
        Ok(out)
    }
}

type Records = Rc<RefCell<Vec<ReplayRecord>>>;

fn record_events(module: &mut InteractionModule, records: &Records) {
    let label = module.label().to_string();

    let (r, l) = (records.clone(), label.clone());
    module.add_point_listener(move |e| {
        r.borrow_mut().push(ReplayRecord::Event {
            module: l.clone(),
            event: e.clone().into(),
        })
    });
    let (r, l) = (records.clone(), label.clone());
    module.add_range_listener(move |e| {
        r.borrow_mut().push(ReplayRecord::Event {
            module: l.clone(),
            event: e.clone().into(),
        })
    });
    let r = records.clone();
    module.add_gesture_listener(move |e| {
        r.borrow_mut().push(ReplayRecord::Event {
            module: label.clone(),
            event: (*e).into(),
        })
    });
}

/// Run `script` against a fresh router and headless host.
pub fn run(script: &Script) -> Result<ReplayReport, ReplayError> {
    script.config.validate()?;

    let records: Records = Rc::default();
    let failures = records.clone();
    let sink = move |failure: CallbackFailure| {
        failures.borrow_mut().push(ReplayRecord::Failure {
            module: failure.module,
            phase: failure.phase,
            error: failure.error.to_string(),
        })
    };
    let mut router = InputRouter::new(script.config.clone()).with_error_sink(sink);
    let mut host = HeadlessHost::new(script.bounds, script.region).with_axes(script.axes);

    for spec in &script.modules {
        if router.module(&spec.label).is_some() {
            return Err(ReplayError::DuplicateModule(spec.label.clone()));
        }
        let mut module = spec.build()?;
        record_events(&mut module, &records);
        router.register(module)?;
        if let Some(group) = spec.arm {
            router.arm(&spec.label, group);
        }
    }

    for (index, step) in script.steps.iter().enumerate() {
        log::trace!("Step {index}: {step:?}");
        match step {
            Step::Pointer(event) => {
                let outcome = router.handle_pointer_event(&mut host, event);
                if let Some(PressOutcome::Menu(menu)) = outcome {
                    records.borrow_mut().push(ReplayRecord::Menu { menu });
                }
            }
            Step::Key(key) => router.key_pressed(&mut host, key),
            Step::Wheel { wheel, delta } => router.wheel_moved(&mut host, *wheel, *delta),
        }
    }

    let records = records.take();
    let summary = ReplaySummary {
        steps: script.steps.len(),
        state: router.state(),
        region: host.region(),
        pinned: router.is_pinned(),
        partial_repaints: host.partial_repaints(),
        full_repaints: host.full_repaints(),
        failures: records
            .iter()
            .filter(|r| matches!(r, ReplayRecord::Failure { .. }))
            .count(),
    };
    log::info!("Replayed {} steps into {} records", summary.steps, records.len());
    Ok(ReplayReport { records, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotinput_core::{ButtonGroup, Gesture};

    const COMPONENT: &str = r#""bounds": { "x0": 0, "y0": 0, "x1": 400, "y1": 300 },
        "region": { "x0": 50, "y0": 50, "x1": 350, "y1": 250 }"#;

    fn script(body: &str) -> Script {
        Script::from_json_str(&format!("{{ {COMPONENT}, {body} }}")).unwrap()
    }

    #[test]
    fn test_box_drag_reports_range_for_primary_module_only() {
        let script = script(
            r#""modules": [
                { "label": "A", "strategy": "box", "arm": "primary" },
                { "label": "B", "strategy": "box", "arm": "secondary" }
            ],
            "steps": [
                { "type": "down", "position": [10, 10], "button": "left" },
                { "type": "move", "position": [30, 25] },
                { "type": "move", "position": [50, 40] },
                { "type": "up", "position": [50, 40], "button": "left" }
            ]"#,
        );
        let report = run(&script).unwrap();
        let events: Vec<_> = report.events().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "A");
        let range = events[0].1.as_range().unwrap();
        let (x, y) = (range.x_range().unwrap(), range.y_range().unwrap());
        assert_eq!((x.min(), x.max(), y.min(), y.max()), (10.0, 50.0, 10.0, 40.0));
        assert_eq!(report.summary.state, RouterState::Idle);
        assert_eq!(report.summary.full_repaints, 1);
    }

    #[test]
    fn test_short_composite_drag_reports_gesture() {
        let script = script(
            r#""modules": [{ "label": "G", "strategy": "gesture_box", "arm": "primary" }],
            "steps": [
                { "type": "down", "position": [100, 100], "button": "left" },
                { "type": "move", "position": [105, 95] },
                { "type": "up", "position": [105, 95], "button": "left" }
            ]"#,
        );
        let report = run(&script).unwrap();
        let (_, event) = report.events().next().unwrap();
        assert_eq!(event.as_gesture().unwrap().gesture(), Gesture::ZoomOut);
    }

    #[test]
    fn test_resize_updates_region() {
        let script = script(
            r#""steps": [
                { "type": "down", "position": [350, 150], "button": "left",
                  "modifiers": { "ctrl": true } },
                { "type": "move", "position": [370, 150], "modifiers": { "ctrl": true } },
                { "type": "up", "position": [370, 150], "button": "left",
                  "modifiers": { "ctrl": true } }
            ]"#,
        );
        let report = run(&script).unwrap();
        assert_eq!(report.summary.region, Rect::new(50.0, 50.0, 370.0, 250.0));
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_menu_and_pin_are_recorded() {
        let script = script(
            r#""modules": [{ "label": "Zoom", "strategy": "box", "arm": "primary" }],
            "steps": [
                { "type": "down", "position": [20, 20], "button": "right" },
                { "type": "down", "position": [20, 20], "button": "left" },
                { "type": "move", "position": [60, 60] },
                { "key": { "char": "p" } },
                { "type": "up", "position": [60, 60], "button": "left" }
            ]"#,
        );
        let report = run(&script).unwrap();
        let ReplayRecord::Menu { menu } = &report.records[0] else {
            panic!("expected a menu record first");
        };
        assert_eq!(menu.group, ButtonGroup::Primary);
        assert!(menu.items[0].armed);
        assert_eq!(report.events().count(), 1);
        assert!(report.summary.pinned);
        assert_eq!(report.summary.full_repaints, 0);
    }

    #[test]
    fn test_duplicate_module_is_an_error() {
        let script = script(
            r#""modules": [
                { "label": "A", "strategy": "box" },
                { "label": "A", "strategy": "angle" }
            ]"#,
        );
        assert!(matches!(run(&script), Err(ReplayError::DuplicateModule(label)) if label == "A"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let script = script(r#""config": { "edge_band": -1 }"#);
        assert!(matches!(run(&script), Err(ReplayError::Config(_))));
    }

    #[test]
    fn test_json_lines_end_with_summary() {
        let script = script(
            r#""modules": [{ "label": "A", "strategy": "angle", "arm": "primary" }],
            "steps": [
                { "type": "down", "position": [10, 10], "button": "left" },
                { "type": "up", "position": [40, 40], "button": "left" }
            ]"#,
        );
        let output = run(&script).unwrap().to_json_lines().unwrap();
        let lines: Vec<serde_json::Value> =
            output.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["record"], "event");
        assert_eq!(lines[0]["module"], "A");
        assert_eq!(lines[1]["record"], "summary");
        assert_eq!(lines[1]["state"], "idle");
    }

    #[test]
    fn test_load_script_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drag.json");
        std::fs::write(&path, format!("{{ {COMPONENT} }}")).unwrap();
        let report = run(&Script::load(&path).unwrap()).unwrap();
        assert_eq!(report.summary.steps, 0);
        assert_eq!(report.summary.region, Rect::new(50.0, 50.0, 350.0, 250.0));
    }
}

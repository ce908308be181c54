#![forbid(unsafe_code)]

//! Script replay: feed parsed steps through a controller and record one frame
//! per input.

use pagestack::{StackController, StackFrame, Transition};
use serde_json::json;

use crate::determinism::frame_hash;
use crate::script::ScriptStep;

/// Result of replaying one script line.
#[derive(Debug, Clone)]
pub struct ReplayRecord {
    pub line: usize,
    pub input: &'static str,
    pub transition: Transition,
    pub frame: StackFrame,
    pub hash: String,
}

impl ReplayRecord {
    /// Short human-readable detail for the transition, if it carries any.
    pub fn detail(&self) -> Option<String> {
        match self.transition {
            Transition::Changed { from, to } => Some(format!("{from} -> {to}")),
            Transition::Restacked { count, from, to } => {
                Some(format!("{count} cards, {from} -> {to}"))
            }
            Transition::Bounce { index, target } => Some(format!("card {index} back to {target}")),
            Transition::PeekChanged { from, to } => Some(format!("{from:?} -> {to:?}")),
            Transition::Resized { orientation } => Some(orientation.as_str().to_string()),
            Transition::Ignored(reason) => Some(reason.to_string()),
            Transition::Unchanged => None,
        }
    }

    /// One text line: `line input transition active peek positions`.
    pub fn to_text(&self) -> String {
        let positions: Vec<String> = self
            .frame
            .positions()
            .iter()
            .map(|p| format!("{p:.1}"))
            .collect();
        let peek = self
            .frame
            .peeked
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        let detail = self.detail().map(|d| format!(" ({d})")).unwrap_or_default();
        format!(
            "{:>4} {:<13} {:<12} active={:<3} peek={:<3} [{}]{}",
            self.line,
            self.input,
            self.transition.kind(),
            self.frame.active_index(),
            peek,
            positions.join(", "),
            detail
        )
    }

    /// One JSON line with the full frame.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let value = json!({
            "line": self.line,
            "input": self.input,
            "transition": self.transition.kind(),
            "detail": self.detail(),
            "hash": self.hash,
            "frame": serde_json::to_value(&self.frame)?,
        });
        Ok(value.to_string())
    }
}

/// Replay every step against `stack`.
pub fn replay(steps: &[ScriptStep], stack: &mut StackController) -> Vec<ReplayRecord> {
    let _span = tracing::info_span!("harness.replay", steps = steps.len()).entered();
    steps
        .iter()
        .map(|step| {
            let transition = stack.handle(step.input);
            let frame = stack.frame();
            let hash = frame_hash(&frame);
            ReplayRecord {
                line: step.line,
                input: step.input.name(),
                transition,
                frame,
                hash,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn desktop() -> StackController {
        StackController::default()
            .with_card_count(3)
            .with_container(1000.0, 700.0)
    }

    #[test]
    fn replay_records_one_frame_per_step() {
        let steps = parse_script(
            "{\"kind\":\"click\",\"index\":0}\n{\"kind\":\"hover_enter\",\"index\":2}\n",
        )
        .unwrap();
        let records = replay(&steps, &mut desktop());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].frame.positions(), vec![280.0, 920.0, 970.0]);
        assert_eq!(records[1].frame.positions(), vec![280.0, 920.0, 950.0]);
        assert_ne!(records[0].hash, records[1].hash);
    }

    #[test]
    fn text_line_shows_transition() {
        let steps = parse_script("{\"kind\":\"click\",\"index\":1}").unwrap();
        let text = replay(&steps, &mut desktop())[0].to_text();
        assert!(text.contains("click"), "{text}");
        assert!(text.contains("changed"), "{text}");
        assert!(text.contains("idle -> open(1)"), "{text}");
        assert!(text.contains("active=1"), "{text}");
    }

    #[test]
    fn ignored_input_carries_reason() {
        let steps = parse_script("{\"kind\":\"click\",\"index\":9}").unwrap();
        let record = &replay(&steps, &mut desktop())[0];
        assert_eq!(record.detail().as_deref(), Some("card 9 out of range for 3 cards"));
    }

    #[test]
    fn json_line_parses() {
        let steps = parse_script("{\"kind\":\"add_card\"}").unwrap();
        let line = replay(&steps, &mut desktop())[0].to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["transition"], "restacked");
        assert_eq!(value["frame"]["state"]["index"], 3);
        assert_eq!(value["frame"]["cards"].as_array().map(Vec::len), Some(4));
    }
}

#![forbid(unsafe_code)]

//! Seeded input storms for stress testing the controller.
//!
//! Generates deterministic [`StackInput`] sequences, feeds them through a
//! [`StackController`], and checks the controller invariants after every
//! input.
//!
//! # Burst Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | [`StormPattern::ClickStorm`] | Clicks on random (sometimes missing) cards |
//! | [`StormPattern::HoverFlood`] | Hover enter/leave pairs across the stack |
//! | [`StormPattern::DragBurst`] | Drags on random cards with offsets around the threshold |
//! | [`StormPattern::Churn`] | Cards added and removed while clicking |
//! | [`StormPattern::RapidResize`] | Widths bouncing across the breakpoint |
//! | [`StormPattern::Mixed`] | Everything interleaved |
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"storm_start","pattern":"mixed","event_count":1000}
//! {"event":"storm_complete","processed":1000,"ignored":212,"violations":0,"final_hash":"…"}
//! ```

use std::collections::BTreeMap;

use pagestack::{DragOffset, StackController, StackFrame, StackInput, Transition};
use serde::Serialize;
use serde_json::{Map, json};

use crate::determinism::{DeterminismFixture, frame_hash};

// ============================================================================
// Configuration
// ============================================================================

/// Shape of the generated input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StormPattern {
    ClickStorm,
    HoverFlood,
    DragBurst,
    Churn,
    RapidResize,
    Mixed,
}

impl StormPattern {
    /// Stable name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClickStorm => "click_storm",
            Self::HoverFlood => "hover_flood",
            Self::DragBurst => "drag_burst",
            Self::Churn => "churn",
            Self::RapidResize => "rapid_resize",
            Self::Mixed => "mixed",
        }
    }
}

/// Configuration for an input storm.
#[derive(Debug, Clone, Copy)]
pub struct StormConfig {
    pub pattern: StormPattern,
    pub count: usize,
    pub seed: u64,
    /// Upper bound for generated card indices. Indices at or past the live
    /// card count exercise the out-of-range path.
    pub index_span: usize,
}

impl StormConfig {
    pub fn new(pattern: StormPattern, count: usize, seed: u64) -> Self {
        Self {
            pattern,
            count,
            seed,
            index_span: 12,
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Simple deterministic PRNG (xorshift64) for reproducible sequences.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next() % max as u64) as usize
    }

    fn offset(&mut self) -> f64 {
        // -300..=300 px, dense around the 120 px threshold.
        let magnitude = [0.0, 60.0, 119.0, 120.0, 121.0, 180.0, 300.0][self.below(7)];
        if (self.next() & 1) == 0 { magnitude } else { -magnitude }
    }
}

/// Generated storm with metadata.
#[derive(Debug, Clone)]
pub struct InputStorm {
    pub inputs: Vec<StackInput>,
    pub pattern_name: &'static str,
    pub seed: u64,
}

/// Generate a deterministic input storm from config.
pub fn generate_storm(config: &StormConfig) -> InputStorm {
    let mut rng = Rng::new(config.seed);
    let span = config.index_span.max(1);
    let inputs = (0..config.count)
        .map(|step| match config.pattern {
            StormPattern::ClickStorm => click(&mut rng, span),
            StormPattern::HoverFlood => {
                if step % 2 == 0 {
                    StackInput::HoverEnter {
                        index: rng.below(span),
                    }
                } else {
                    StackInput::HoverLeave
                }
            }
            StormPattern::DragBurst => drag(&mut rng, span),
            StormPattern::Churn => match rng.below(3) {
                0 => StackInput::AddCard,
                1 => StackInput::RemoveCard,
                _ => click(&mut rng, span),
            },
            StormPattern::RapidResize => resize(&mut rng),
            StormPattern::Mixed => mixed(&mut rng, span),
        })
        .collect();

    InputStorm {
        inputs,
        pattern_name: config.pattern.name(),
        seed: config.seed,
    }
}

fn click(rng: &mut Rng, span: usize) -> StackInput {
    StackInput::Click {
        index: rng.below(span),
    }
}

fn drag(rng: &mut Rng, span: usize) -> StackInput {
    StackInput::DragEnd {
        index: rng.below(span),
        offset: DragOffset::new(0.0, rng.offset()),
    }
}

fn resize(rng: &mut Rng) -> StackInput {
    let width = [320.0, 390.0, 767.0, 768.0, 1024.0, 1440.0][rng.below(6)];
    let height = [568.0, 844.0, 900.0][rng.below(3)];
    StackInput::Resize { width, height }
}

fn mixed(rng: &mut Rng, span: usize) -> StackInput {
    match rng.below(10) {
        0 | 1 => click(rng, span),
        2 => StackInput::ClickOutside {
            exempt: (rng.next() & 1) == 0,
        },
        3 => StackInput::HoverEnter {
            index: rng.below(span),
        },
        4 => StackInput::HoverLeave,
        5 | 6 => drag(rng, span),
        7 => StackInput::AddCard,
        8 => StackInput::RemoveCard,
        _ => resize(rng),
    }
}

// ============================================================================
// Invariants
// ============================================================================

/// Check the controller invariants against its current state.
///
/// Returns one message per violated invariant; an empty list means healthy.
pub fn check_invariants(stack: &StackController) -> Vec<String> {
    let mut violations = Vec::new();
    let count = stack.card_count();
    let active = stack.active_index();

    if active < -1 || active >= count as i32 {
        violations.push(format!("active index {active} out of range for {count} cards"));
    }
    if let Some(p) = stack.peeked_index() {
        if p >= count {
            violations.push(format!("peeked index {p} out of range for {count} cards"));
        }
        if stack.orientation().is_vertical() {
            violations.push(format!("peeked index {p} set in vertical orientation"));
        }
    }

    let frame = stack.frame();
    if frame.len() != count {
        violations.push(format!("frame has {} cards, expected {count}", frame.len()));
    }
    if let Some(card) = frame.cards.iter().find(|c| !c.position.is_finite()) {
        violations.push(format!("card {} has non-finite position", card.index));
    }
    let draggable = frame.draggable_indices().count();
    if draggable > 2 {
        violations.push(format!("{draggable} draggable cards"));
    }
    if frame.cards.iter().filter(|c| c.is_active).count() > 1 {
        violations.push("more than one active card".to_string());
    }
    if !stack.orientation().is_vertical() {
        let extent = frame.metrics.main_axis_extent;
        let first_closed = usize::try_from(active + 1).unwrap_or(0);
        if let Some(card) = frame.cards[first_closed.min(count)..]
            .iter()
            .find(|c| c.base > extent)
        {
            violations.push(format!(
                "closed card {} at {} past extent {extent}",
                card.index, card.base
            ));
        }
        if let Some(active) = stack.state().active() {
            violations.extend(overlap_cap_violations(stack, active, &frame));
        }
    }

    violations
}

/// Open cards inside the visible window must sit at most their own width
/// under the card above them.
fn overlap_cap_violations(
    stack: &StackController,
    active: usize,
    frame: &StackFrame,
) -> Vec<String> {
    let window = stack.policy().layout.max_open_visible;
    let widths = stack.card_widths();
    (0..active.min(frame.len().saturating_sub(1)))
        .filter(|&i| active - i < window)
        .filter_map(|i| {
            let floor = frame.cards[i + 1].base - widths[i];
            (frame.cards[i].base < floor).then(|| {
                format!(
                    "open card {i} at {} leaves a gap under card {} (floor {floor})",
                    frame.cards[i].base,
                    i + 1
                )
            })
        })
        .collect()
}

// ============================================================================
// Running
// ============================================================================

/// Outcome of one storm run.
#[derive(Debug, Clone, Serialize)]
pub struct StormReport {
    pub pattern: &'static str,
    pub seed: u64,
    pub processed: usize,
    pub ignored: usize,
    pub transitions: BTreeMap<&'static str, usize>,
    /// `(step, message)` pairs, in order.
    pub violations: Vec<(usize, String)>,
    pub final_active: i32,
    pub final_cards: usize,
    pub final_hash: String,
}

/// Feed `storm` through `stack`, checking invariants after every input.
///
/// Returns the report and the JSONL log lines.
pub fn run_storm(
    storm: &InputStorm,
    stack: &mut StackController,
    fixture: &DeterminismFixture,
) -> (StormReport, Vec<String>) {
    let _span = tracing::info_span!(
        "harness.storm",
        pattern = storm.pattern_name,
        seed = storm.seed,
        events = storm.inputs.len()
    )
    .entered();

    let mut log = vec![fixture.record(
        "storm_start",
        Map::from_iter([
            ("pattern".into(), json!(storm.pattern_name)),
            ("event_count".into(), json!(storm.inputs.len())),
        ]),
    )];

    let mut transitions = BTreeMap::new();
    let mut ignored = 0;
    let mut violations = Vec::new();

    for (step, input) in storm.inputs.iter().enumerate() {
        let transition = stack.handle(*input);
        if matches!(transition, Transition::Ignored(_)) {
            ignored += 1;
        }
        *transitions.entry(transition.kind()).or_insert(0) += 1;

        for message in check_invariants(stack) {
            tracing::warn!(
                target: "pagestack.harness",
                step,
                input = input.name(),
                message = %message,
                "invariant violated"
            );
            log.push(fixture.record(
                "storm_violation",
                Map::from_iter([
                    ("step".into(), json!(step)),
                    ("input".into(), json!(input.name())),
                    ("detail".into(), json!(message)),
                ]),
            ));
            violations.push((step, message));
        }
    }

    let final_hash = frame_hash(&stack.frame());
    let report = StormReport {
        pattern: storm.pattern_name,
        seed: storm.seed,
        processed: storm.inputs.len(),
        ignored,
        transitions,
        violations,
        final_active: stack.active_index(),
        final_cards: stack.card_count(),
        final_hash,
    };

    log.push(fixture.record(
        "storm_complete",
        Map::from_iter([
            ("processed".into(), json!(report.processed)),
            ("ignored".into(), json!(report.ignored)),
            ("violations".into(), json!(report.violations.len())),
            ("final_hash".into(), json!(report.final_hash)),
        ]),
    ));
    tracing::info!(
        target: "pagestack.harness",
        processed = report.processed,
        ignored = report.ignored,
        violations = report.violations.len(),
        "storm complete"
    );

    (report, log)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pagestack::{CardSpec, StackState};

    fn fixture() -> DeterminismFixture {
        DeterminismFixture::new_with("storm_test", 7, true)
    }

    fn desktop() -> StackController {
        StackController::default()
            .with_card_count(4)
            .with_container(1440.0, 900.0)
    }

    #[test]
    fn generates_requested_count() {
        let storm = generate_storm(&StormConfig::new(StormPattern::Mixed, 500, 1));
        assert_eq!(storm.inputs.len(), 500);
        assert_eq!(storm.pattern_name, "mixed");
    }

    #[test]
    fn generation_is_deterministic() {
        let config = StormConfig::new(StormPattern::DragBurst, 200, 99);
        assert_eq!(generate_storm(&config).inputs, generate_storm(&config).inputs);
        let other = StormConfig::new(StormPattern::DragBurst, 200, 100);
        assert_ne!(generate_storm(&config).inputs, generate_storm(&other).inputs);
    }

    #[test]
    fn hover_flood_alternates() {
        let storm = generate_storm(&StormConfig::new(StormPattern::HoverFlood, 6, 3));
        for (i, input) in storm.inputs.iter().enumerate() {
            if i % 2 == 0 {
                assert!(matches!(input, StackInput::HoverEnter { .. }));
            } else {
                assert_eq!(*input, StackInput::HoverLeave);
            }
        }
    }

    #[test]
    fn every_pattern_runs_clean() {
        for pattern in [
            StormPattern::ClickStorm,
            StormPattern::HoverFlood,
            StormPattern::DragBurst,
            StormPattern::Churn,
            StormPattern::RapidResize,
            StormPattern::Mixed,
        ] {
            let storm = generate_storm(&StormConfig::new(pattern, 400, 0xC0FFEE));
            let (report, log) = run_storm(&storm, &mut desktop(), &fixture());
            assert!(report.violations.is_empty(), "{pattern:?}: {:?}", report.violations);
            assert_eq!(report.processed, 400);
            assert_eq!(report.transitions.values().sum::<usize>(), 400);
            assert_eq!(log.len(), 2);
        }
    }

    #[test]
    fn same_seed_same_final_hash() {
        let storm = generate_storm(&StormConfig::new(StormPattern::Mixed, 300, 5));
        let (a, _) = run_storm(&storm, &mut desktop(), &fixture());
        let (b, _) = run_storm(&storm, &mut desktop(), &fixture());
        assert_eq!(a.final_hash, b.final_hash);
        assert_eq!(a.final_active, b.final_active);
    }

    #[test]
    fn healthy_controller_has_no_violations() {
        let stack = desktop().with_state(StackState::Open(3));
        assert!(check_invariants(&stack).is_empty());
    }

    #[test]
    fn wide_cards_respect_overlap_cap() {
        let stack = StackController::default()
            .with_cards([300.0, 300.0, 300.0, 250.0].map(CardSpec::new))
            .with_container(1440.0, 900.0)
            .with_state(StackState::Open(3));
        assert!(check_invariants(&stack).is_empty());

        let storm = generate_storm(&StormConfig::new(StormPattern::Churn, 300, 11));
        let mut stack = stack;
        let (report, _) = run_storm(&storm, &mut stack, &fixture());
        assert!(report.violations.is_empty(), "{:?}", report.violations);
    }

    #[test]
    fn out_of_range_clicks_are_counted_as_ignored() {
        let storm = InputStorm {
            inputs: vec![StackInput::Click { index: 40 }, StackInput::Click { index: 1 }],
            pattern_name: "manual",
            seed: 0,
        };
        let (report, _) = run_storm(&storm, &mut desktop(), &fixture());
        assert_eq!(report.ignored, 1);
        assert_eq!(report.transitions.get("changed"), Some(&1));
        assert_eq!(report.final_active, 1);
    }
}

#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping a [`StackController`].
//!
//! This module holds the logic shared between the wasm-bindgen exports and
//! the native tests. No JS/WASM types here.

use pagestack::{
    CardSpec, DragOffset, DragTracker, Orientation, StackController, StackInput, StackPolicy,
    Transition,
};
use web_time::Instant;

const FRAME_HASH_ALGO: &str = "fnv1a64";
const FNV64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV64_PRIME: u64 = 0x100000001b3;

/// Stack runner driven by a JavaScript host.
pub struct RunnerCore {
    stack: StackController,
    tracker: DragTracker,
    /// Kind label of the most recent transition.
    last_kind: &'static str,
    /// One line per processed input, drained by `take_logs`.
    logs: Vec<String>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl RunnerCore {
    /// Runner with the default policy, `cards` cards, and the given container.
    pub fn new(width: f64, height: f64, cards: usize) -> Self {
        Self::with_policy(StackPolicy::default(), width, height, cards)
    }

    pub fn with_policy(policy: StackPolicy, width: f64, height: f64, cards: usize) -> Self {
        Self {
            stack: StackController::new(policy)
                .with_card_count(cards)
                .with_container(width, height),
            tracker: DragTracker::default(),
            last_kind: "unchanged",
            logs: Vec::new(),
        }
    }

    /// Runner configured from a JSON policy document.
    ///
    /// Missing fields fall back to defaults. The policy is validated before
    /// use; the error string lists every violation.
    pub fn from_policy_json(
        json: &str,
        width: f64,
        height: f64,
        cards: usize,
    ) -> Result<Self, String> {
        let policy: StackPolicy = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let policy = policy.validated().map_err(|e| e.to_string())?;
        Ok(Self::with_policy(policy, width, height, cards))
    }

    pub fn controller(&self) -> &StackController {
        &self.stack
    }

    // ---- Inputs ----

    /// Apply one input and return the transition kind label.
    pub fn apply(&mut self, input: StackInput) -> &'static str {
        let transition = self.stack.handle(input);
        self.record(input.name(), transition)
    }

    pub fn click(&mut self, index: usize) -> &'static str {
        self.apply(StackInput::Click { index })
    }

    pub fn click_outside(&mut self, exempt: bool) -> &'static str {
        self.apply(StackInput::ClickOutside { exempt })
    }

    pub fn hover_enter(&mut self, index: usize) -> &'static str {
        self.apply(StackInput::HoverEnter { index })
    }

    pub fn hover_leave(&mut self) -> &'static str {
        self.apply(StackInput::HoverLeave)
    }

    pub fn drag_end(&mut self, index: usize, dx: f64, dy: f64) -> &'static str {
        self.apply(StackInput::DragEnd {
            index,
            offset: DragOffset::new(dx, dy),
        })
    }

    pub fn add_card(&mut self) -> &'static str {
        self.apply(StackInput::AddCard)
    }

    /// Append a card with a known rendered width.
    pub fn push_card(&mut self, width_px: f64) -> &'static str {
        let transition = self.stack.push_card(CardSpec::new(width_px));
        self.record("push_card", transition)
    }

    pub fn remove_card(&mut self) -> &'static str {
        self.apply(StackInput::RemoveCard)
    }

    pub fn resize(&mut self, width: f64, height: f64) -> &'static str {
        self.tracker.reset();
        self.apply(StackInput::Resize { width, height })
    }

    /// Force an orientation until the next resize.
    pub fn set_vertical(&mut self, vertical: bool) -> &'static str {
        let orientation = if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        let transition = self.stack.set_orientation(orientation);
        self.record("set_orientation", transition)
    }

    /// Parse a JSON-encoded input and apply it.
    ///
    /// Returns `None` when the payload is not a valid input.
    pub fn push_encoded_input(&mut self, json: &str) -> Option<&'static str> {
        let input: StackInput = serde_json::from_str(json).ok()?;
        Some(self.apply(input))
    }

    // ---- Raw pointer lifecycle ----

    /// Pointer pressed on card `index`. Presses on cards that cannot be
    /// dragged still track, so a release without travel becomes a click.
    pub fn pointer_down(&mut self, index: usize, x: f64, y: f64) {
        self.tracker.pointer_down(index, x, y, Instant::now());
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.tracker.pointer_move(x, y);
    }

    /// Pointer released. Returns the transition kind if the press produced
    /// an input.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<&'static str> {
        let input = self.tracker.pointer_up(x, y, Instant::now())?;
        Some(self.apply(input))
    }

    pub fn pointer_leave(&mut self) -> Option<&'static str> {
        let input = self.tracker.pointer_leave(Instant::now())?;
        Some(self.apply(input))
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Live displacement of the in-progress drag, if any.
    pub fn live_offset(&self) -> Option<(f64, f64)> {
        self.tracker.live_offset().map(|o| (o.x, o.y))
    }

    // ---- Outputs ----

    pub fn positions(&self) -> Vec<f64> {
        self.stack.positions()
    }

    /// Indices of cards that currently accept drags.
    pub fn draggable(&self) -> Vec<u32> {
        self.stack
            .frame()
            .draggable_indices()
            .filter_map(|i| u32::try_from(i).ok())
            .collect()
    }

    pub fn active_index(&self) -> i32 {
        self.stack.active_index()
    }

    /// Peeked card index, `-1` when nothing is peeked.
    pub fn peeked_index(&self) -> i32 {
        self.stack
            .peeked_index()
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    pub fn card_count(&self) -> usize {
        self.stack.card_count()
    }

    pub fn is_vertical(&self) -> bool {
        self.stack.orientation() == Orientation::Vertical
    }

    pub fn last_kind(&self) -> &'static str {
        self.last_kind
    }

    /// The full frame as JSON.
    pub fn frame_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.stack.frame()).map_err(|e| e.to_string())
    }

    /// FNV-1a hash of the committed positions, prefixed with the algorithm.
    pub fn frame_hash(&self) -> String {
        let mut hash = FNV64_OFFSET_BASIS;
        let mut feed = |bytes: &[u8]| {
            for &b in bytes {
                hash ^= u64::from(b);
                hash = hash.wrapping_mul(FNV64_PRIME);
            }
        };
        feed(&self.stack.active_index().to_le_bytes());
        feed(&self.peeked_index().to_le_bytes());
        for position in self.stack.positions() {
            feed(&position.to_le_bytes());
        }
        format!("{FRAME_HASH_ALGO}:{hash:016x}")
    }

    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    fn record(&mut self, input: &str, transition: Transition) -> &'static str {
        let kind = transition.kind();
        self.last_kind = kind;
        self.logs.push(format!(
            "input={input} transition={kind} active={} peek={}",
            self.stack.active_index(),
            self.peeked_index()
        ));
        kind
    }
}

#![forbid(unsafe_code)]

//! The stack controller: one owned struct holding the interaction state.
//!
//! Every input goes through a named `on_*` handler (or [`StackController::handle`],
//! which dispatches a [`StackInput`]) and returns a [`Transition`] describing
//! what changed. Derived outputs (positions, drag affordances, frames) are
//! recomputed from the current state on demand and never cached.
//!
//! # Invariants
//!
//! 1. `active_index()` is in `[-1, N-1]` after every input.
//! 2. `peeked_index()` is `None` or `< N`, and always `None` in the vertical
//!    orientation.
//! 3. Hover never changes the active card.
//! 4. Only the active card and the one directly above it are draggable, and
//!    only in the vertical orientation.
//!
//! # Failure Modes
//!
//! Inputs naming a card that does not exist are rejected with
//! [`IgnoreReason::CardOutOfRange`] and a `warn` event. Inputs that are
//! meaningless in the current orientation are rejected at `debug`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pagestack_core::{
    ContainerSize, DragOffset, DragOutcome, DragRole, Orientation, StackInput, ViewportMetrics,
    classify_drag,
};
use pagestack_layout::StackSolution;
use web_time::Duration;

use crate::frame::{CardFrame, StackFrame};
use crate::policy_config::StackPolicy;
use crate::state::{IgnoreReason, StackState, Transition};

/// Per-card layout inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardSpec {
    /// Rendered width on desktop, used by the overlap cap.
    pub width_px: f64,
}

impl CardSpec {
    /// Create a card with the given width.
    #[must_use]
    pub const fn new(width_px: f64) -> Self {
        Self { width_px }
    }
}

/// Owns the stack state and applies inputs to it.
#[derive(Debug, Clone)]
pub struct StackController {
    policy: StackPolicy,
    state: StackState,
    peeked: Option<usize>,
    cards: Vec<CardSpec>,
    container: ContainerSize,
    orientation: Orientation,
}

impl Default for StackController {
    fn default() -> Self {
        Self::new(StackPolicy::default())
    }
}

impl StackController {
    /// Create an empty, idle, horizontal stack.
    #[must_use]
    pub fn new(policy: StackPolicy) -> Self {
        Self {
            policy,
            state: StackState::Idle,
            peeked: None,
            cards: Vec::new(),
            container: ContainerSize::default(),
            orientation: Orientation::Horizontal,
        }
    }

    /// Seed the stack with cards. The state is left idle.
    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = CardSpec>) -> Self {
        let fallback = self.policy.default_card_width;
        self.cards
            .extend(cards.into_iter().map(|c| sanitize(c, fallback)));
        self
    }

    /// Seed the stack with `count` cards of the default width.
    #[must_use]
    pub fn with_card_count(self, count: usize) -> Self {
        let spec = CardSpec::new(self.policy.default_card_width);
        self.with_cards(std::iter::repeat_n(spec, count))
    }

    /// Set the container size and derive the orientation from it.
    #[must_use]
    pub fn with_container(mut self, width: f64, height: f64) -> Self {
        let _ = self.on_resize(width, height);
        self
    }

    /// Start in the given state, clamped to the current card count.
    #[must_use]
    pub fn with_state(mut self, state: StackState) -> Self {
        self.state = state.clamp_to(self.cards.len());
        self
    }

    // ---- Accessors ----

    /// The policy this controller was built with.
    #[must_use]
    pub fn policy(&self) -> &StackPolicy {
        &self.policy
    }

    #[must_use]
    pub fn state(&self) -> StackState {
        self.state
    }

    /// Signed active index, `-1` when idle.
    #[must_use]
    pub fn active_index(&self) -> i32 {
        self.state.active_index()
    }

    #[must_use]
    pub fn peeked_index(&self) -> Option<usize> {
        self.peeked
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn cards(&self) -> &[CardSpec] {
        &self.cards
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// Container extents projected onto the stack axis.
    #[must_use]
    pub fn metrics(&self) -> ViewportMetrics {
        self.container.metrics(self.orientation)
    }

    // ---- Input dispatch ----

    /// Apply one input.
    pub fn handle(&mut self, input: StackInput) -> Transition {
        let _span = tracing::debug_span!("stack.input", kind = input.name()).entered();
        match input {
            StackInput::Click { index } => self.on_card_click(index),
            StackInput::ClickOutside { exempt } => self.on_click_outside(exempt),
            StackInput::HoverEnter { index } => self.on_card_hover_enter(index),
            StackInput::HoverLeave => self.on_card_hover_leave(),
            StackInput::DragEnd { index, offset } => self.on_drag_end(index, offset),
            StackInput::AddCard => self.on_add_card(),
            StackInput::RemoveCard => self.on_remove_card(),
            StackInput::Resize { width, height } => self.on_resize(width, height),
        }
    }

    /// A card was clicked.
    ///
    /// Desktop always opens the clicked card. On mobile a click on the active
    /// card is a no-op.
    pub fn on_card_click(&mut self, index: usize) -> Transition {
        if let Some(ignored) = self.check_index("click", index) {
            return ignored;
        }
        if self.orientation.is_vertical() && self.state.active() == Some(index) {
            return Transition::Unchanged;
        }
        self.commit("click", StackState::Open(index))
    }

    /// A click landed outside the stack. Collapses everything unless the
    /// target was inside an exempt region.
    pub fn on_click_outside(&mut self, exempt: bool) -> Transition {
        if exempt {
            return self.ignore("click_outside", IgnoreReason::ExemptRegion);
        }
        self.commit("click_outside", StackState::Idle)
    }

    /// The pointer entered a card (desktop only).
    pub fn on_card_hover_enter(&mut self, index: usize) -> Transition {
        if self.orientation.is_vertical() {
            return self.ignore("hover_enter", IgnoreReason::HoverOnVertical);
        }
        if let Some(ignored) = self.check_index("hover_enter", index) {
            return ignored;
        }
        self.set_peek(Some(index))
    }

    /// The pointer left the hovered card (desktop only).
    pub fn on_card_hover_leave(&mut self) -> Transition {
        if self.orientation.is_vertical() {
            return self.ignore("hover_leave", IgnoreReason::HoverOnVertical);
        }
        self.set_peek(None)
    }

    /// A vertical drag finished on card `index` with the given offset.
    pub fn on_drag_end(&mut self, index: usize, offset: DragOffset) -> Transition {
        if !self.orientation.is_vertical() {
            return self.ignore("drag_end", IgnoreReason::DragOnHorizontal);
        }
        if let Some(ignored) = self.check_index("drag_end", index) {
            return ignored;
        }
        let Some(role) = self.drag_role(index) else {
            return self.ignore("drag_end", IgnoreReason::NotDraggable { index });
        };

        match classify_drag(offset, self.policy.gesture, role) {
            DragOutcome::Close => self.commit("drag_end", self.state.close_one()),
            DragOutcome::Open => {
                let to = self.state.open_one(self.cards.len());
                self.commit("drag_end", to)
            }
            DragOutcome::Cancel => {
                let target = self
                    .solve()
                    .positions()
                    .get(index)
                    .copied()
                    .unwrap_or_default();
                tracing::debug!(
                    target: "pagestack.controller",
                    index,
                    role = role.as_str(),
                    offset_y = offset.y,
                    target,
                    "drag below threshold, bouncing back"
                );
                Transition::Bounce { index, target }
            }
        }
    }

    /// Append a card of the default width and open it.
    pub fn on_add_card(&mut self) -> Transition {
        self.push_card(CardSpec::new(self.policy.default_card_width))
    }

    /// Append a card and open it.
    ///
    /// A non-finite or non-positive width is replaced by the policy default.
    pub fn push_card(&mut self, spec: CardSpec) -> Transition {
        self.cards.push(sanitize(spec, self.policy.default_card_width));
        let count = self.cards.len();
        self.restack("add_card", StackState::Open(count - 1))
    }

    /// Remove the top card, clamping the active card and the peek.
    pub fn on_remove_card(&mut self) -> Transition {
        if self.cards.pop().is_none() {
            return self.ignore("remove_card", IgnoreReason::EmptyStack);
        }
        let count = self.cards.len();
        if self.peeked.is_some_and(|p| p >= count) {
            self.peeked = None;
        }
        self.restack("remove_card", self.state.clamp_to(count))
    }

    /// The container was re-measured. Re-derives the orientation from the
    /// width and the policy breakpoint.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Transition {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            tracing::warn!(
                target: "pagestack.controller",
                width,
                height,
                "ignoring invalid container size"
            );
            return Transition::Ignored(IgnoreReason::InvalidSize);
        }
        self.container = ContainerSize::new(width, height);
        let orientation = Orientation::for_width(width, self.policy.breakpoint_px);
        self.apply_orientation(orientation);
        tracing::debug!(
            target: "pagestack.controller",
            width,
            height,
            orientation = orientation.as_str(),
            "container resized"
        );
        Transition::Resized { orientation }
    }

    /// Force an orientation until the next resize. Switching to vertical
    /// clears the peek.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Transition {
        if self.orientation == orientation {
            return Transition::Unchanged;
        }
        self.apply_orientation(orientation);
        Transition::Resized { orientation }
    }

    // ---- Derived outputs ----

    /// Drag affordance of a card, `None` when it cannot be dragged.
    #[must_use]
    pub fn drag_role(&self, index: usize) -> Option<DragRole> {
        if !self.orientation.is_vertical() || index >= self.cards.len() {
            return None;
        }
        let active = self.state.active();
        if active == Some(index) {
            return Some(DragRole::Active);
        }
        let next = active.map_or(0, |k| k + 1);
        (index == next).then_some(DragRole::Next)
    }

    /// Whether a card accepts drag gestures.
    #[must_use]
    pub fn is_draggable(&self, index: usize) -> bool {
        self.drag_role(index).is_some()
    }

    /// Desktop widths, in card order.
    #[must_use]
    pub fn card_widths(&self) -> Vec<f64> {
        self.cards.iter().map(|c| c.width_px).collect()
    }

    /// Run both solvers for the current state.
    #[must_use]
    pub fn solve(&self) -> StackSolution {
        let widths = self.card_widths();
        self.policy.layout_for(self.orientation).solve(
            self.state.active(),
            self.peeked,
            self.cards.len(),
            self.metrics(),
            Some(&widths),
        )
    }

    /// Final positions (`base + peek`) for every card.
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        self.solve().positions()
    }

    /// Build the render targets for the current state.
    #[must_use]
    pub fn frame(&self) -> StackFrame {
        let count = self.cards.len();
        let _span = tracing::trace_span!(
            "stack.layout",
            cards = count,
            orientation = self.orientation.as_str()
        )
        .entered();

        let solution = self.solve();
        let active = self.state.active();
        let follow_index = active.map_or(1, |k| k + 2);
        let follow_delay = self.policy.motion.mobile_follow_delay();

        let cards = solution
            .base
            .iter()
            .zip(&solution.peek)
            .enumerate()
            .map(|(index, (&base, &peek))| CardFrame {
                index,
                base,
                peek,
                position: base + peek,
                is_active: active == Some(index),
                drag_role: self.drag_role(index),
                transition_delay: if self.orientation.is_vertical() && index == follow_index {
                    follow_delay
                } else {
                    Duration::ZERO
                },
            })
            .collect();

        StackFrame {
            state: self.state,
            peeked: self.peeked,
            orientation: self.orientation,
            metrics: self.metrics(),
            cards,
        }
    }

    // ---- Internals ----

    fn commit(&mut self, input: &'static str, to: StackState) -> Transition {
        let from = self.state;
        if from == to {
            return Transition::Unchanged;
        }
        self.state = to;
        tracing::debug!(
            target: "pagestack.controller",
            input,
            from = %from,
            to = %to,
            "stack transition"
        );
        Transition::Changed { from, to }
    }

    fn restack(&mut self, input: &'static str, to: StackState) -> Transition {
        let from = self.state;
        self.state = to;
        let count = self.cards.len();
        tracing::debug!(
            target: "pagestack.controller",
            input,
            count,
            from = %from,
            to = %to,
            "stack restacked"
        );
        Transition::Restacked { count, from, to }
    }

    fn set_peek(&mut self, to: Option<usize>) -> Transition {
        let from = self.peeked;
        if from == to {
            return Transition::Unchanged;
        }
        self.peeked = to;
        tracing::trace!(
            target: "pagestack.controller",
            from = ?from,
            to = ?to,
            "peek changed"
        );
        Transition::PeekChanged { from, to }
    }

    fn apply_orientation(&mut self, orientation: Orientation) {
        if orientation.is_vertical() {
            self.peeked = None;
        }
        self.orientation = orientation;
    }

    fn check_index(&self, input: &'static str, index: usize) -> Option<Transition> {
        let count = self.cards.len();
        if index < count {
            return None;
        }
        tracing::warn!(
            target: "pagestack.controller",
            input,
            index,
            count,
            "card index out of range"
        );
        Some(Transition::Ignored(IgnoreReason::CardOutOfRange { index, count }))
    }

    fn ignore(&self, input: &'static str, reason: IgnoreReason) -> Transition {
        tracing::debug!(
            target: "pagestack.controller",
            input,
            reason = %reason,
            "input ignored"
        );
        Transition::Ignored(reason)
    }
}

fn sanitize(spec: CardSpec, fallback: f64) -> CardSpec {
    if spec.width_px.is_finite() && spec.width_px > 0.0 {
        spec
    } else {
        CardSpec::new(fallback)
    }
}

#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the stack runner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly
//! types. Only compiled on `wasm32` targets.
//!
//! Indices cross the boundary as `u32`; "none" is `-1` for `i32` values.
//! Input methods return the transition kind label (`"changed"`, `"bounce"`,
//! `"ignored"`, ...).

use js_sys::{Array, Float64Array, Object, Reflect, Uint32Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::RunnerCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn kind_or_null(kind: Option<&'static str>) -> JsValue {
    kind.map_or(JsValue::NULL, JsValue::from_str)
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

/// Base positions for a stack, without a controller.
///
/// `activeIndex` of `-1` selects the idle stack. `cardSizes`, when given,
/// caps each visible open card so it sits at most its own width under the
/// card above it (the top card is measured against the extent).
#[wasm_bindgen(js_name = computeStackPositions)]
pub fn compute_stack_positions(
    active_index: i32,
    total_cards: u32,
    main_axis_extent: f64,
    max_open_visible: u32,
    max_closed_visible: u32,
    card_sizes: Option<Vec<f64>>,
) -> Float64Array {
    let positions = pagestack::compute_stack_positions(
        active_index,
        total_cards as usize,
        main_axis_extent,
        max_open_visible as usize,
        max_closed_visible as usize,
        card_sizes.as_deref(),
    );
    Float64Array::from(positions.as_slice())
}

/// Hover peek offsets. `peekedIndex` of `-1` means nothing is hovered.
#[wasm_bindgen(js_name = computeStackPeekOffsets)]
pub fn compute_stack_peek_offsets(
    peeked_index: i32,
    active_index: i32,
    total_cards: u32,
) -> Float64Array {
    let offsets = pagestack::compute_stack_peek_offsets(
        usize::try_from(peeked_index).ok(),
        active_index,
        total_cards as usize,
    );
    Float64Array::from(offsets.as_slice())
}

#[wasm_bindgen]
pub struct StackRunner {
    inner: RunnerCore,
}

#[wasm_bindgen]
impl StackRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, cards: u32) -> Self {
        install_panic_hook();
        Self {
            inner: RunnerCore::new(width, height, cards as usize),
        }
    }

    /// Build a runner from a JSON policy document. Throws with the list of
    /// violations when the policy is invalid.
    #[wasm_bindgen(js_name = withPolicy)]
    pub fn with_policy(
        policy_json: &str,
        width: f64,
        height: f64,
        cards: u32,
    ) -> Result<StackRunner, JsValue> {
        install_panic_hook();
        RunnerCore::from_policy_json(policy_json, width, height, cards as usize)
            .map(|inner| Self { inner })
            .map_err(|e| JsValue::from_str(&e))
    }

    // ---- Inputs ----

    pub fn click(&mut self, index: u32) -> String {
        self.inner.click(index as usize).to_string()
    }

    /// Click outside the stack. `exempt` marks targets inside an exempt
    /// region such as an info drawer.
    #[wasm_bindgen(js_name = clickOutside)]
    pub fn click_outside(&mut self, exempt: bool) -> String {
        self.inner.click_outside(exempt).to_string()
    }

    #[wasm_bindgen(js_name = hoverEnter)]
    pub fn hover_enter(&mut self, index: u32) -> String {
        self.inner.hover_enter(index as usize).to_string()
    }

    #[wasm_bindgen(js_name = hoverLeave)]
    pub fn hover_leave(&mut self) -> String {
        self.inner.hover_leave().to_string()
    }

    /// A finished drag on card `index`, with its total offset in px.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, index: u32, dx: f64, dy: f64) -> String {
        self.inner.drag_end(index as usize, dx, dy).to_string()
    }

    #[wasm_bindgen(js_name = addCard)]
    pub fn add_card(&mut self) -> String {
        self.inner.add_card().to_string()
    }

    /// Append a card whose rendered width is known.
    #[wasm_bindgen(js_name = pushCard)]
    pub fn push_card(&mut self, width_px: f64) -> String {
        self.inner.push_card(width_px).to_string()
    }

    #[wasm_bindgen(js_name = removeCard)]
    pub fn remove_card(&mut self) -> String {
        self.inner.remove_card().to_string()
    }

    pub fn resize(&mut self, width: f64, height: f64) -> String {
        self.inner.resize(width, height).to_string()
    }

    #[wasm_bindgen(js_name = setVertical)]
    pub fn set_vertical(&mut self, vertical: bool) -> String {
        self.inner.set_vertical(vertical).to_string()
    }

    /// Parse a JSON-encoded input and apply it. Returns the transition kind,
    /// or `null` if the payload is malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> JsValue {
        kind_or_null(self.inner.push_encoded_input(json))
    }

    // ---- Raw pointer lifecycle ----

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, index: u32, x: f64, y: f64) {
        self.inner.pointer_down(index as usize, x, y);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(x, y);
    }

    /// Release. Returns the transition kind, or `null` with no press.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> JsValue {
        kind_or_null(self.inner.pointer_up(x, y))
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> JsValue {
        kind_or_null(self.inner.pointer_leave())
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// `{ x, y }` of the in-progress drag, or `null`.
    #[wasm_bindgen(js_name = liveOffset)]
    pub fn live_offset(&self) -> JsValue {
        match self.inner.live_offset() {
            Some((x, y)) => {
                let obj = Object::new();
                set_js(&obj, "x", JsValue::from_f64(x));
                set_js(&obj, "y", JsValue::from_f64(y));
                obj.into()
            }
            None => JsValue::NULL,
        }
    }

    // ---- Outputs ----

    pub fn positions(&self) -> Float64Array {
        Float64Array::from(self.inner.positions().as_slice())
    }

    pub fn draggable(&self) -> Uint32Array {
        Uint32Array::from(self.inner.draggable().as_slice())
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> i32 {
        self.inner.active_index()
    }

    #[wasm_bindgen(js_name = peekedIndex)]
    pub fn peeked_index(&self) -> i32 {
        self.inner.peeked_index()
    }

    #[wasm_bindgen(js_name = cardCount)]
    pub fn card_count(&self) -> u32 {
        u32::try_from(self.inner.card_count()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = isVertical)]
    pub fn is_vertical(&self) -> bool {
        self.inner.is_vertical()
    }

    /// Full frame (state, orientation, per-card positions and delays) as JSON.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        self.inner.frame_json().map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = frameHash)]
    pub fn frame_hash(&self) -> String {
        self.inner.frame_hash()
    }

    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        let arr = Array::new();
        for log in self.inner.take_logs() {
            arr.push(&JsValue::from_str(&log));
        }
        arr
    }
}

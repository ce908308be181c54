#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagestack_core::{DragOffset, StackInput};
use pagestack_runtime::{CardSpec, StackController};

#[derive(Debug, Arbitrary)]
enum Op {
    Click(u8),
    ClickOutside(bool),
    HoverEnter(u8),
    HoverLeave,
    DragEnd(u8, i16, i16),
    AddCard,
    RemoveCard,
    Resize(u16, u16),
}

impl Op {
    fn input(&self) -> StackInput {
        match *self {
            Op::Click(i) => StackInput::Click { index: i.into() },
            Op::ClickOutside(exempt) => StackInput::ClickOutside { exempt },
            Op::HoverEnter(i) => StackInput::HoverEnter { index: i.into() },
            Op::HoverLeave => StackInput::HoverLeave,
            Op::DragEnd(i, x, y) => StackInput::DragEnd {
                index: i.into(),
                offset: DragOffset::new(x.into(), y.into()),
            },
            Op::AddCard => StackInput::AddCard,
            Op::RemoveCard => StackInput::RemoveCard,
            Op::Resize(w, h) => StackInput::Resize {
                width: w.into(),
                height: h.into(),
            },
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Session {
    widths: Vec<u16>,
    width: u16,
    height: u16,
    ops: Vec<Op>,
}

fuzz_target!(|session: Session| {
    let mut stack = StackController::default()
        .with_cards(
            session
                .widths
                .iter()
                .take(24)
                .map(|&w| CardSpec::new(f64::from(w))),
        )
        .with_container(session.width.into(), session.height.into());

    for op in session.ops.iter().take(512) {
        stack.handle(op.input());

        let count = stack.card_count();
        if let Some(active) = stack.state().active() {
            assert!(active < count, "active {active} out of range for {count}");
        }
        if let Some(peeked) = stack.peeked_index() {
            assert!(peeked < count, "peek {peeked} out of range for {count}");
            assert!(!stack.orientation().is_vertical(), "peek kept on vertical");
        }

        let positions = stack.positions();
        assert_eq!(positions.len(), count);
        assert!(positions.iter().all(|p| p.is_finite()), "{positions:?}");

        let horizontal_active = stack
            .state()
            .active()
            .filter(|_| !stack.orientation().is_vertical());
        if let Some(active) = horizontal_active {
            let base = stack.solve().base;
            let widths = stack.card_widths();
            let window = stack.policy().layout.max_open_visible;
            for i in (0..active).filter(|&i| active - i < window) {
                assert!(
                    base[i] >= base[i + 1] - widths[i],
                    "card {i} at {} below cap {}",
                    base[i],
                    base[i + 1] - widths[i]
                );
            }
        }

        let draggable = (0..count).filter(|&i| stack.is_draggable(i)).count();
        assert!(draggable <= 2, "{draggable} draggable cards");
    }
});

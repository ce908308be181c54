#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagestack_layout::{compute_stack_peek_offsets, compute_stack_positions};

#[derive(Debug, Arbitrary)]
struct Input {
    active: i8,
    peeked: Option<u8>,
    total: u8,
    extent: u16,
    max_open: u8,
    max_closed: u8,
    widths: Option<Vec<u16>>,
}

fuzz_target!(|input: Input| {
    let total = usize::from(input.total % 64);
    let extent = f64::from(input.extent);
    let widths: Option<Vec<f64>> = input
        .widths
        .map(|w| w.into_iter().map(f64::from).collect());

    let positions = compute_stack_positions(
        input.active.into(),
        total,
        extent,
        usize::from(input.max_open % 8),
        usize::from(input.max_closed % 8),
        widths.as_deref(),
    );
    assert_eq!(positions.len(), total);
    assert!(positions.iter().all(|p| p.is_finite()), "{positions:?}");

    let offsets = compute_stack_peek_offsets(
        input.peeked.map(usize::from),
        input.active.into(),
        total,
    );
    assert_eq!(offsets.len(), total);
    if input.peeked.is_none() {
        assert!(offsets.iter().all(|&o| o == 0.0));
    }
});

//! Property-based tests for the presentation and scroll state machines.
//!
//! Tests verify that invariants hold for arbitrary names, seeds, marker
//! strings and scroll sequences.

use nako_app::{
    ColourAllocator, MAX_COLOUR_BOUND, ScrollBuffer, irc_to_ansi, rank, sort_names,
};
use proptest::prelude::*;

/// Nick-like tokens, optionally carrying a rank glyph.
fn name_strategy() -> impl Strategy<Value = String> {
    "[~&@%+*]?[a-zA-Z_\\[\\]]{1,12}"
}

/// Text mixing colour markers, digits and letters.
fn marked_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            2 => Just("\u{3}".to_owned()),
            3 => "[0-9]{1,2}",
            3 => "[a-z ]{1,4}",
        ],
        0..20,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_allocation_stable_and_in_range(
        seed in any::<i64>(),
        bound in 2u8..=MAX_COLOUR_BOUND,
        names in prop::collection::vec(name_strategy(), 1..20),
    ) {
        let mut colours = ColourAllocator::with_bound(seed, bound).unwrap();
        let first: Vec<u8> = names.iter().map(|n| colours.allocate(n)).collect();

        for (name, index) in names.iter().zip(&first) {
            prop_assert_eq!(colours.allocate(name), *index);
            prop_assert!((1..bound).contains(index));
        }
    }

    #[test]
    fn prop_same_seed_agrees(seed in any::<i64>(), names in prop::collection::vec(name_strategy(), 1..20)) {
        let mut a = ColourAllocator::new(seed);
        let mut b = ColourAllocator::new(seed);

        // Different allocation order must not change the outcome
        for name in names.iter().rev() {
            b.allocate(name);
        }
        for name in &names {
            prop_assert_eq!(a.allocate(name), b.allocate(name));
        }
    }

    #[test]
    fn prop_sort_is_idempotent_and_ordered(names in prop::collection::vec(name_strategy(), 0..30)) {
        let sorted = sort_names(&names);
        prop_assert_eq!(&sort_names(&sorted), &sorted);
        prop_assert_eq!(sorted.len(), names.len());

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(rank(a) > rank(b) || (rank(a) == rank(b) && a <= b));
        }
    }

    #[test]
    fn prop_codec_is_fixed_point(text in marked_text_strategy()) {
        let once = irc_to_ansi(&text);
        prop_assert_eq!(irc_to_ansi(&once), once);
    }

    #[test]
    fn prop_scroll_respects_boundaries(
        count in 0usize..60,
        height in 1usize..20,
        deltas in prop::collection::vec(-15isize..15, 0..40),
    ) {
        let mut buffer = ScrollBuffer::new(height);
        for i in 0..count {
            buffer.append(i.to_string());
        }

        for delta in deltas {
            let before = buffer.state();
            buffer.scroll_by(delta);
            let after = buffer.state();

            let target = before.origin_offset as isize + delta;
            if target < 0 || count <= height {
                prop_assert_eq!(after, before);
            }

            prop_assert!(after.origin_offset <= count.saturating_sub(height));
            prop_assert!(buffer.visible().len() <= height);
            if after.autoscroll {
                prop_assert_eq!(after.origin_offset, count.saturating_sub(height));
            }
        }
    }
}

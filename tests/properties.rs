//! Property-based invariant tests for the lightbox state machine.
//!
//! These hold for any gallery size and any starting point:
//!
//! 1. `Next` applied N times returns to the start (cycle closure).
//! 2. `Previous` undoes `Next`, and `Next` undoes `Previous`.
//! 3. `JumpTo(i)` succeeds exactly for in-range `i`; out of range it leaves
//!    the index unchanged.
//! 4. Opening an empty set always fails and never opens.
//! 5. Every successful navigation resets zoom.
//! 6. After `Close`, every command is rejected without a state change.
//! 7. Arbitrary command sequences keep the index in range.
//! 8. Swipe classification: navigation only beyond the threshold, direction
//!    follows the sign.
//! 9. Tab cycles the focus ring back to where it started.

use proptest::prelude::*;
use simple_lightbox::focus::{Availability, FocusTarget, FocusTrap};
use simple_lightbox::image_set::{ImageDescriptor, ImageSet};
use simple_lightbox::input::{Command, Gesture, classify_displacement};
use simple_lightbox::session::{LightboxError, OpenRequest, Session};

// ── Helpers ─────────────────────────────────────────────────────────────

fn images(n: usize) -> ImageSet {
    (0..n)
        .map(|i| ImageDescriptor::new(format!("/img/{i}.jpg"), format!("Photo {i}")))
        .collect()
}

fn open(n: usize, start: usize) -> Session {
    Session::opened(OpenRequest::new(images(n), start)).unwrap()
}

/// A gallery size and a valid start index.
fn gallery_strategy() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=24).prop_flat_map(|n| (Just(n), 0..n))
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Next),
        Just(Command::Previous),
        (0usize..32).prop_map(Command::JumpTo),
        Just(Command::ToggleZoom),
        Just(Command::ToggleThumbnails),
    ]
}

fn navigation_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Next),
        Just(Command::Previous),
        (0usize..24).prop_map(Command::JumpTo),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Cycle closure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_n_times_returns_to_start((n, start) in gallery_strategy()) {
        let mut session = open(n, start);
        for _ in 0..n {
            session.apply(Command::Next).unwrap();
        }
        prop_assert_eq!(session.current_index(), Some(start));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Previous is the inverse of Next
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn previous_undoes_next((n, start) in gallery_strategy()) {
        let mut session = open(n, start);
        session.apply(Command::Next).unwrap();
        session.apply(Command::Previous).unwrap();
        prop_assert_eq!(session.current_index(), Some(start));

        session.apply(Command::Previous).unwrap();
        session.apply(Command::Next).unwrap();
        prop_assert_eq!(session.current_index(), Some(start));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. JumpTo bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn jump_in_range_lands((n, start) in gallery_strategy(), target in 0usize..24) {
        prop_assume!(target < n);
        let mut session = open(n, start);
        prop_assert!(session.apply(Command::JumpTo(target)).is_ok());
        prop_assert_eq!(session.current_index(), Some(target));
    }

    #[test]
    fn jump_out_of_range_is_rejected((n, start) in gallery_strategy(), past in 0usize..100) {
        let mut session = open(n, start);
        let before = session.clone();
        let index = n + past;
        prop_assert_eq!(
            session.apply(Command::JumpTo(index)),
            Err(LightboxError::IndexOutOfRange { index, size: n })
        );
        prop_assert_eq!(session, before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Empty sets never open
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_open_fails(start in any::<usize>()) {
        let mut session = Session::default();
        prop_assert_eq!(
            session.open(OpenRequest::new(images(0), start)),
            Err(LightboxError::EmptyImageSet)
        );
        prop_assert!(!session.is_open());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Navigation resets zoom
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn navigation_resets_zoom(
        (n, start) in gallery_strategy(),
        zoomed in any::<bool>(),
        command in navigation_strategy(),
    ) {
        let mut session = open(n, start);
        if zoomed {
            session.apply(Command::ToggleZoom).unwrap();
        }
        if session.apply(command).is_ok() {
            prop_assert!(!session.is_zoomed());
        } else {
            prop_assert_eq!(session.is_zoomed(), zoomed);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Closed sessions reject everything
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn apply_after_close_is_rejected(
        (n, start) in gallery_strategy(),
        command in prop_oneof![command_strategy(), Just(Command::Close)],
    ) {
        let mut session = open(n, start);
        session.apply(Command::Close).unwrap();
        let before = session.snapshot();
        prop_assert_eq!(session.apply(command), Err(LightboxError::InvalidCommandWhileClosed));
        prop_assert_eq!(session.snapshot(), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Index stays in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_always_in_range(
        (n, start) in gallery_strategy(),
        commands in prop::collection::vec(command_strategy(), 0..64),
    ) {
        let mut session = open(n, start);
        for command in commands {
            let _ = session.apply(command);
            let index = session.current_index().unwrap();
            prop_assert!(index < n, "index {} out of range for size {}", index, n);
        }
        prop_assert!(session.is_open());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Swipe classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn short_movement_never_navigates(threshold in 1.0f64..200.0, ratio in -1.0f64..=1.0) {
        prop_assert_eq!(classify_displacement(threshold * ratio, threshold), Gesture::Tap);
    }

    #[test]
    fn long_movement_follows_direction(threshold in 1.0f64..200.0, extra in 0.5f64..500.0) {
        let dx = threshold + extra;
        prop_assert_eq!(classify_displacement(-dx, threshold), Gesture::Swipe(Command::Next));
        prop_assert_eq!(classify_displacement(dx, threshold), Gesture::Swipe(Command::Previous));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Focus ring cycles
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tab_cycles_back(size in 1usize..10, presses in 0usize..20) {
        let available = Availability::for_gallery(size, 2);
        let mut trap = FocusTrap::new(&FocusTarget::DEFAULT_RING, available, FocusTarget::Close, None);
        let len = trap.ring().len();
        for _ in 0..presses {
            trap.tab();
        }
        for _ in 0..presses {
            trap.shift_tab();
        }
        prop_assert_eq!(trap.focused(), FocusTarget::Close);
        for _ in 0..len {
            trap.tab();
        }
        prop_assert_eq!(trap.focused(), FocusTarget::Close);
    }
}

#![forbid(unsafe_code)]

//! Target resolution: which slot the dragged item would occupy if dropped now.
//!
//! The dragged item's centroid is its sampled midpoint shifted by the live
//! pointer delta. From the origin slot the resolver walks outward in the
//! drag direction, one neighbor at a time, claiming every slot whose
//! midpoint the centroid has strictly passed and stopping at the first one
//! it has not. Ties never advance, which keeps the target on the origin side
//! while the pointer hovers exactly over a midpoint.
//!
//! # Invariants
//!
//! 1. A returned target is the `index` of some sampled boundary, so it is
//!    always a valid position in the sequence that was sampled.
//! 2. For a fixed `(session, boundaries, origin)` the result is identical on
//!    every call.
//! 3. Zero offset resolves to the origin slot.

use crate::boundary::Boundary;
use crate::session::DragSession;

/// Resolve the drop target for `session` against sampled `boundaries`.
///
/// `origin_x` is the container's left edge in pointer coordinates; it is
/// only consulted for the trailing-edge rule, which compares the live
/// pointer (not the dragged centroid) with the end of the last sampled item
/// in the container's frame.
///
/// Returns `None` when the geometry is incomplete (nothing sampled, or the
/// dragged item itself has no boundary); callers keep the previous target.
#[must_use]
pub fn resolve_target(
    session: &DragSession,
    boundaries: &[Boundary],
    origin_x: f32,
) -> Option<usize> {
    let dragged_pos = boundaries
        .iter()
        .position(|b| b.index == session.dragged_index)?;

    let offset = session.offset();
    let dragged_center = boundaries[dragged_pos].mid + offset;
    let mut target = session.dragged_index;

    if offset < 0.0 {
        for boundary in boundaries[..dragged_pos].iter().rev() {
            if dragged_center < boundary.mid {
                target = boundary.index;
            } else {
                break;
            }
        }
    } else if offset > 0.0 {
        for boundary in &boundaries[dragged_pos + 1..] {
            if dragged_center > boundary.mid {
                target = boundary.index;
            } else {
                break;
            }
        }

        // Dropping into the empty space after the last item.
        if let Some(last) = boundaries.last() {
            let pointer_in_container = session.current.x - origin_x;
            if pointer_in_container > last.end {
                target = last.index;
            }
        }
    }

    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::sample_boundaries;
    use tabshift_core::{ItemId, Point};

    const GAP: f32 = 4.0;

    /// Four 100-wide items: mids at 50, 154, 258, 362; last end 412.
    fn strip() -> Vec<Boundary> {
        sample_boundaries([Some(100.0); 4], GAP)
    }

    fn session(index: usize, start_x: f32, current_x: f32) -> DragSession {
        let mut s = DragSession::begin(ItemId(index as u64), index, Point::new(start_x, 25.0), 4);
        s.current = Point::new(current_x, 25.0);
        s
    }

    #[test]
    fn zero_offset_stays_on_origin() {
        assert_eq!(resolve_target(&session(1, 150.0, 150.0), &strip(), 0.0), Some(1));
    }

    #[test]
    fn rightward_past_one_midpoint() {
        // Center 50 + 110 = 160 > 154, < 258.
        assert_eq!(resolve_target(&session(0, 50.0, 160.0), &strip(), 0.0), Some(1));
    }

    #[test]
    fn rightward_past_two_midpoints() {
        // Center 50 + 220 = 270 > 258, < 362.
        assert_eq!(resolve_target(&session(0, 50.0, 270.0), &strip(), 0.0), Some(2));
    }

    #[test]
    fn rightward_tie_does_not_advance() {
        // Center exactly on item 1's midpoint.
        assert_eq!(resolve_target(&session(0, 50.0, 154.0), &strip(), 0.0), Some(0));
    }

    #[test]
    fn leftward_walk_stops_at_first_unpassed() {
        // Item 3 center 362 - 220 = 142: passes mid 258 and 154, not 50.
        assert_eq!(resolve_target(&session(3, 362.0, 142.0), &strip(), 0.0), Some(1));
    }

    #[test]
    fn leftward_tie_does_not_advance() {
        // Center 362 - 104 = 258, exactly item 2's midpoint.
        assert_eq!(resolve_target(&session(3, 362.0, 258.0), &strip(), 0.0), Some(3));
    }

    #[test]
    fn leftward_all_the_way() {
        assert_eq!(resolve_target(&session(3, 362.0, -500.0), &strip(), 0.0), Some(0));
    }

    #[test]
    fn trailing_space_clamps_to_last() {
        // Item 0 dragged only slightly, but pointer sits past the strip end.
        // Offset 20 (center 70) would not pass anything on its own.
        let s = session(0, 400.0, 420.0);
        assert_eq!(resolve_target(&s, &strip(), 0.0), Some(3));
    }

    #[test]
    fn trailing_rule_uses_container_frame() {
        // Same pointer, but the container starts at x=100, so the pointer is
        // at 320 in container coordinates: inside the strip.
        let s = session(0, 400.0, 420.0);
        assert_eq!(resolve_target(&s, &strip(), 100.0), Some(0));
    }

    #[test]
    fn trailing_rule_ignored_for_leftward_drag() {
        let s = session(3, 500.0, 480.0);
        assert_eq!(resolve_target(&s, &strip(), 0.0), Some(3));
    }

    #[test]
    fn empty_geometry_is_unchanged() {
        assert_eq!(resolve_target(&session(0, 0.0, 300.0), &[], 0.0), None);
    }

    #[test]
    fn unmeasured_dragged_item_is_unchanged() {
        let boundaries = sample_boundaries([Some(100.0), None, Some(100.0)], GAP);
        assert_eq!(resolve_target(&session(1, 0.0, 300.0), &boundaries, 0.0), None);
    }

    #[test]
    fn unmeasured_neighbor_is_skipped() {
        // Item 1 unmeasured; item 2 boundary starts at 104 (mid 154).
        let boundaries = sample_boundaries([Some(100.0), None, Some(100.0), Some(100.0)], GAP);
        let s = session(0, 50.0, 160.0);
        assert_eq!(resolve_target(&s, &boundaries, 0.0), Some(2));
    }

    #[test]
    fn idempotent_for_fixed_inputs() {
        let s = session(2, 258.0, 40.0);
        let b = strip();
        let first = resolve_target(&s, &b, 0.0);
        for _ in 0..8 {
            assert_eq!(resolve_target(&s, &b, 0.0), first);
        }
    }
}

//! Admission filter in front of the direction queue.

use crate::grid::Direction;

/// Decide whether `candidate` may be queued.
///
/// - Nothing queued (`last_queued` is `Empty`): reject the snake's current
///   heading and its reversal.
/// - Something queued: reject a repeat of the newest entry and its reversal.
///
/// `Empty` itself is never admitted.
pub const fn accept(
    candidate: Direction,
    last_queued: Direction,
    heading: Direction,
) -> bool {
    if candidate.is_empty() {
        return false;
    }
    let reference = if last_queued.is_empty() { heading } else { last_queued };
    !(candidate as u8 == reference as u8 || candidate as u8 == reference.opposite() as u8)
}

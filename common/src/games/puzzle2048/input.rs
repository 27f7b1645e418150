use super::types::Direction;

/// Minimum swipe length in pixels before a drag counts as a move.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 30.0;

/// Classifies a drag vector (screen coordinates, y grows downward). The axis with
/// the larger magnitude wins; drags no longer than `threshold` are taps.
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    let abs_dx = dx.abs();
    let abs_dy = dy.abs();

    if abs_dx.max(abs_dy) <= threshold {
        return None;
    }

    if abs_dx > abs_dy {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

//! Axis-aligned box overlap tests.
//!
//! Both tests read the cached faces of the boxes, so callers must make sure
//! `update_sides` has run for the current tick. Both are asymmetric: only the
//! first box's vertical velocity is used for the look-ahead.

use crate::core::body::BoxBody;

/// Scale applied to the vertical velocity when probing for ground contact.
/// Widens the window in which a jump is accepted.
pub const GROUND_LOOKAHEAD: f32 = 10.0;

/// Conservative AABB overlap test with a one-tick look-ahead on the y axis.
///
/// `a.bottom + a.velocity.y` is compared against `b.top`, so a box falling
/// onto `b` registers contact one tick before it would pass through.
pub fn detect_box_collision(a: &BoxBody, b: &BoxBody) -> bool {
    let x_collision = a.right >= b.left && a.left <= b.right;
    let y_collision = a.top >= b.bottom && a.bottom + a.velocity.y <= b.top;
    let z_collision = a.front >= b.back && a.back <= b.front;

    x_collision && y_collision && z_collision
}

/// Vertical-only proximity test used to decide whether `a` may jump off `b`.
pub fn detect_ground(a: &BoxBody, b: &BoxBody) -> bool {
    a.top >= b.bottom && a.bottom - a.velocity.y * GROUND_LOOKAHEAD <= b.top
}

use glam::Vec3;

use crate::core::collision::detect_box_collision;

/// Per-tick downward velocity increment.
pub const GRAVITY: f32 = -0.002;

/// Fraction of vertical speed kept when a box bounces off the ground.
pub const FRICTION: f32 = 0.5;

/// Per-tick forward (z) velocity increment for boxes with `z_acceleration`.
pub const Z_ACCELERATION: f32 = 0.0003;

/// Axis-aligned rectangular prism with position, velocity and cached faces.
///
/// The face scalars are a snapshot: they are recomputed at the start of
/// [`BoxBody::update`] (and at construction), so after position changes they
/// lag one tick behind until the next `update_sides`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBody {
    width: f32,
    height: f32,
    depth: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub front: f32,
    pub back: f32,
    pub gravity: f32,
    pub z_acceleration: bool,
}

impl BoxBody {
    /// Create a box of the given size at the origin, at rest.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let mut body = Self {
            width,
            height,
            depth,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            front: 0.0,
            back: 0.0,
            gravity: GRAVITY,
            z_acceleration: false,
        };
        body.update_sides();
        body
    }

    /// Unit cube (1 x 1 x 1).
    pub fn cube() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.update_sides();
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_z_acceleration(mut self, enabled: bool) -> Self {
        self.z_acceleration = enabled;
        self
    }

    /// Full size as (width, height, depth).
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() / 2.0
    }

    /// Recompute the six face scalars from the current position.
    pub fn update_sides(&mut self) {
        let half = self.half_extents();

        self.right = self.position.x + half.x;
        self.left = self.position.x - half.x;

        self.top = self.position.y + half.y;
        self.bottom = self.position.y - half.y;

        self.front = self.position.z + half.z;
        self.back = self.position.z - half.z;
    }

    /// Advance one tick: refresh faces, accelerate forward if enabled,
    /// integrate x/z, then fall (or bounce) relative to `ground`.
    pub fn update(&mut self, ground: &BoxBody) {
        self.update_sides();

        if self.z_acceleration {
            self.velocity.z += Z_ACCELERATION;
        }

        self.position.x += self.velocity.x;
        self.position.z += self.velocity.z;

        self.apply_gravity(ground);
    }

    /// Add gravity to the vertical velocity. If the box would touch `ground`
    /// this tick it bounces with damped, inverted speed and does not move;
    /// otherwise it falls by its vertical velocity.
    pub fn apply_gravity(&mut self, ground: &BoxBody) {
        self.velocity.y += self.gravity;

        if detect_box_collision(self, ground) {
            self.velocity.y *= FRICTION;
            self.velocity.y = -self.velocity.y;
        } else {
            self.position.y += self.velocity.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn ground() -> BoxBody {
        BoxBody::new(10.0, 0.5, 50.0).with_position(Vec3::new(0.0, -2.0, 0.0))
    }

    #[test]
    fn faces_follow_position_and_extents() {
        let b = BoxBody::new(2.0, 4.0, 6.0).with_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.left, 0.0);
        assert_eq!(b.right, 2.0);
        assert_eq!(b.bottom, 0.0);
        assert_eq!(b.top, 4.0);
        assert_eq!(b.back, 0.0);
        assert_eq!(b.front, 6.0);
    }

    #[test]
    fn faces_are_stale_until_update_sides() {
        let mut b = BoxBody::cube();
        b.position.x = 5.0;
        assert_eq!(b.right, 0.5);
        b.update_sides();
        assert_eq!(b.right, 5.5);
    }

    #[test]
    fn ground_bounce_damps_and_inverts() {
        let ground = ground();
        // Bottom face sitting exactly on the ground's top face (-1.75).
        let v = -0.01;
        let mut b = BoxBody::cube()
            .with_position(Vec3::new(0.0, -1.25, 0.0))
            .with_velocity(Vec3::new(0.0, v, 0.0));
        let y_before = b.position.y;

        b.apply_gravity(&ground);

        let expected = -(v + GRAVITY) * FRICTION;
        assert!((b.velocity.y - expected).abs() < EPS, "vy={}", b.velocity.y);
        assert!(b.velocity.y > 0.0);
        assert_eq!(b.position.y, y_before);
    }

    #[test]
    fn free_fall_integrates_position() {
        let ground = ground();
        let mut b = BoxBody::cube().with_velocity(Vec3::new(0.0, -0.001, 0.0));
        b.apply_gravity(&ground);
        assert!((b.velocity.y - (-0.001 + GRAVITY)).abs() < EPS);
        assert!((b.position.y - b.velocity.y).abs() < EPS);
    }

    #[test]
    fn forward_acceleration_accumulates() {
        let ground = ground();
        let mut b = BoxBody::cube()
            .with_position(Vec3::new(0.0, -1.25, -20.0))
            .with_z_acceleration(true);

        let n = 50;
        for _ in 0..n {
            b.update(&ground);
        }

        let expected = Z_ACCELERATION * n as f32;
        assert!(
            (b.velocity.z - expected).abs() < 1e-5,
            "vz={} expected={}",
            b.velocity.z,
            expected
        );
        assert!(b.position.z > -20.0);
    }

    #[test]
    fn no_forward_acceleration_by_default() {
        let ground = ground();
        let mut b = BoxBody::cube();
        for _ in 0..10 {
            b.update(&ground);
        }
        assert_eq!(b.velocity.z, 0.0);
        assert_eq!(b.position.z, 0.0);
    }

    #[test]
    fn update_moves_horizontally_by_velocity() {
        let ground = ground();
        let mut b = BoxBody::cube().with_velocity(Vec3::new(0.05, 0.0, -0.05));
        b.update(&ground);
        assert!((b.position.x - 0.05).abs() < EPS);
        assert!((b.position.z + 0.05).abs() < EPS);
    }

    #[test]
    fn falling_box_comes_to_rest_on_ground() {
        let ground = ground();
        let mut b = BoxBody::cube().with_velocity(Vec3::new(0.0, -0.001, 0.0));
        for _ in 0..2000 {
            b.update(&ground);
        }
        // Hovering just above the ground top face, never sinking through it.
        assert!(b.bottom >= ground.top - 0.01, "bottom={}", b.bottom);
        assert!(b.bottom < ground.top + 0.05, "bottom={}", b.bottom);
        assert!(b.velocity.y.abs() < 0.01);
    }
}

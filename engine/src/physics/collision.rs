//! Collision resolver
//!
//! Pure functions that clamp a moving box's displacement against a static
//! obstacle set. The resolver has no knowledge of players: it receives a box,
//! a velocity and a time step and returns the corrected velocity, the
//! displacement to apply and the contacts found along the way.
//!
//! # Algorithm
//!
//! Axis-separated sweep, vertical first:
//!
//! 1. Move the box along Y only. Among the obstacles whose facing side the
//!    box reaches, the nearest stops the motion: falling snaps the feet onto
//!    its top face (grounded), rising snaps the head just below its bottom
//!    face (ceiling). Either way `velocity.y` becomes zero. Boxes the body
//!    already overlaps vertically (a wall it is pressed against) are not
//!    floors or ceilings.
//! 2. Move the box along XZ. Each axis is swept on its own, so a blocked axis
//!    does not cancel the free one. A blocked axis moves up to the contact
//!    face minus [`CONTACT_GAP`] and keeps a damped share of its velocity
//!    (`restitution`) instead of stopping dead.
//!
//! The result does not depend on obstacle order. This is not a continuous
//! sweep: a displacement larger than an obstacle's thickness can tunnel
//! through it.

use glam::Vec3;

use super::aabb::Aabb;

/// Gap left between the body and a ceiling or wall face it was stopped at.
pub const CONTACT_GAP: f32 = 0.001;

/// Depth within which a face the body touches still counts as ahead of it.
/// Covers rounding between the resolver and a collider rebuilt from the
/// moved position.
pub const CONTACT_EPSILON: f32 = 0.01;

/// Tunables for [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverParams {
    /// Height the horizontal test box is raised above the feet, so the
    /// floor the player stands on never blocks horizontal motion.
    pub skin: f32,
    /// Fraction of velocity kept on an axis blocked by a wall.
    pub restitution: f32,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            skin: 0.05,
            restitution: 0.5,
        }
    }
}

/// Result of a collision pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionOutcome {
    /// Velocity after contacts zeroed or damped its components
    pub velocity: Vec3,
    /// Displacement to apply to the box owner this tick
    pub displacement: Vec3,
    /// Floor contact directly beneath
    pub grounded: bool,
    /// Ceiling contact directly above
    pub hit_ceiling: bool,
    /// Outward normal of the wall that blocked horizontal motion, if any
    pub wall_normal: Option<Vec3>,
}

impl CollisionOutcome {
    /// Outcome that leaves everything untouched (used for `dt <= 0`).
    pub fn unchanged(velocity: Vec3) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Check if any contact was reported
    pub fn has_contact(&self) -> bool {
        self.grounded || self.hit_ceiling || self.wall_normal.is_some()
    }
}

/// Resolve `body` moving with `velocity` for `dt` seconds against `obstacles`.
///
/// # Arguments
/// * `body` - Current collision box of the moving entity
/// * `velocity` - Desired velocity in m/s
/// * `dt` - Time step in seconds; `dt <= 0` returns an unchanged outcome
/// * `obstacles` - Static world boxes, read-only for this call
/// * `params` - Skin height and wall restitution
pub fn resolve(
    body: &Aabb,
    velocity: Vec3,
    dt: f32,
    obstacles: &[Aabb],
    params: &ResolverParams,
) -> CollisionOutcome {
    if dt <= 0.0 || !dt.is_finite() {
        return CollisionOutcome::unchanged(velocity);
    }

    let mut outcome = CollisionOutcome::unchanged(velocity);

    // Vertical pass
    let dy = velocity.y * dt;
    let vertical_probe = body.translated(Vec3::new(0.0, dy, 0.0));
    outcome.displacement.y = dy;

    if velocity.y < 0.0 {
        let floor = obstacles
            .iter()
            .filter(|o| o.max.y <= body.min.y + CONTACT_EPSILON && vertical_probe.intersects(o))
            .map(|o| o.max.y)
            .reduce(f32::max);
        if let Some(top) = floor {
            outcome.displacement.y = top - body.min.y;
            outcome.velocity.y = 0.0;
            outcome.grounded = true;
        }
    } else if velocity.y > 0.0 {
        let ceiling = obstacles
            .iter()
            .filter(|o| o.min.y >= body.max.y - CONTACT_EPSILON && vertical_probe.intersects(o))
            .map(|o| o.min.y)
            .reduce(f32::min);
        if let Some(bottom) = ceiling {
            outcome.displacement.y = (bottom - CONTACT_GAP) - body.max.y;
            outcome.velocity.y = 0.0;
            outcome.hit_ceiling = true;
        }
    }

    // Horizontal pass, from the vertically resolved box lifted by the skin
    let mut probe = body.translated(Vec3::new(0.0, outcome.displacement.y, 0.0));
    probe.min.y = (probe.min.y + params.skin).min(probe.max.y);

    let dx = velocity.x * dt;
    let dz = velocity.z * dt;
    if dx == 0.0 && dz == 0.0 {
        return outcome;
    }

    let mut move_x = sweep_axis(&probe, 0, dx, obstacles);
    let mut move_z = sweep_axis(&probe, 2, dz, obstacles);
    let mut x_blocked = move_x != dx;
    let mut z_blocked = move_z != dz;

    // Both axes clear alone but not together: an edge hit head-on along the
    // diagonal. Keep the dominant axis and treat the other as blocked.
    if !x_blocked && !z_blocked && dx != 0.0 && dz != 0.0 {
        let moved = probe.translated(Vec3::new(dx, 0.0, dz));
        let corner = obstacles
            .iter()
            .any(|o| moved.intersects(o) && !probe.intersects(o));
        if corner {
            if dx.abs() >= dz.abs() {
                move_z = 0.0;
                z_blocked = true;
            } else {
                move_x = 0.0;
                x_blocked = true;
            }
        }
    }

    outcome.displacement.x = move_x;
    outcome.displacement.z = move_z;

    let mut wall_normal = None;
    if x_blocked {
        outcome.velocity.x *= params.restitution;
        wall_normal = Some(Vec3::new(-velocity.x.signum(), 0.0, 0.0));
    }
    if z_blocked && (!x_blocked || velocity.z.abs() > velocity.x.abs()) {
        wall_normal = Some(Vec3::new(0.0, 0.0, -velocity.z.signum()));
    }
    if z_blocked {
        outcome.velocity.z *= params.restitution;
    }

    outcome.wall_normal = wall_normal;
    outcome
}

/// How far `probe` can move by `delta` along `axis` (0 = X, 2 = Z).
///
/// Only faces ahead of the box count: obstacles it overlaps by more than
/// [`CONTACT_EPSILON`] along `axis` are ignored. A blocking face stops the
/// box [`CONTACT_GAP`] short of it, which may push a box that sank into the
/// face by rounding back out.
fn sweep_axis(probe: &Aabb, axis: usize, delta: f32, obstacles: &[Aabb]) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let other = 2 - axis;

    obstacles
        .iter()
        .filter(|o| {
            probe.min.y < o.max.y
                && probe.max.y > o.min.y
                && probe.min[other] < o.max[other]
                && probe.max[other] > o.min[other]
        })
        .fold(delta, |allowed, o| {
            if delta > 0.0 && o.min[axis] >= probe.max[axis] - CONTACT_EPSILON {
                allowed.min(o.min[axis] - CONTACT_GAP - probe.max[axis])
            } else if delta < 0.0 && o.max[axis] <= probe.min[axis] + CONTACT_EPSILON {
                allowed.max(o.max[axis] + CONTACT_GAP - probe.min[axis])
            } else {
                allowed
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0.5 x 2.0 x 0.5 body with feet at `feet`.
    fn body_at(feet: Vec3) -> Aabb {
        Aabb::new(
            Vec3::new(feet.x - 0.25, feet.y, feet.z - 0.25),
            Vec3::new(feet.x + 0.25, feet.y + 2.0, feet.z + 0.25),
        )
    }

    fn floor() -> Aabb {
        Aabb::new(Vec3::new(-20.0, -0.5, -20.0), Vec3::new(20.0, 0.0, 20.0))
    }

    fn wall_east() -> Aabb {
        // Face at x = 1.0
        Aabb::new(Vec3::new(1.0, 0.0, -10.0), Vec3::new(2.0, 10.0, 10.0))
    }

    #[test]
    fn test_no_obstacles_free_fall() {
        let body = body_at(Vec3::new(0.0, 5.0, 0.0));
        let velocity = Vec3::new(1.0, -3.0, 2.0);
        let out = resolve(&body, velocity, 0.1, &[], &ResolverParams::default());
        assert_eq!(out.velocity, velocity);
        assert!((out.displacement - velocity * 0.1).length() < 1e-6);
        assert!(!out.has_contact());
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let body = body_at(Vec3::new(0.0, 0.1, 0.0));
        let velocity = Vec3::new(0.0, -100.0, 0.0);
        let out = resolve(&body, velocity, 0.0, &[floor()], &ResolverParams::default());
        assert_eq!(out.displacement, Vec3::ZERO);
        assert_eq!(out.velocity, velocity);
        assert!(!out.grounded);
    }

    #[test]
    fn test_landing_snaps_feet_to_floor() {
        let body = body_at(Vec3::new(0.0, 0.25, 0.0));
        let out = resolve(
            &body,
            Vec3::new(0.0, -7.5, 0.0),
            0.1,
            &[floor()],
            &ResolverParams::default(),
        );
        assert!(out.grounded);
        assert_eq!(out.velocity.y, 0.0);
        assert!((out.displacement.y + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_resting_contact_is_stable() {
        let body = body_at(Vec3::ZERO);
        let out = resolve(
            &body,
            Vec3::new(0.0, -2.0, 0.0),
            1.0 / 60.0,
            &[floor()],
            &ResolverParams::default(),
        );
        assert!(out.grounded);
        assert_eq!(out.displacement.y, 0.0);
    }

    #[test]
    fn test_ceiling_snap() {
        let ceiling = Aabb::new(Vec3::new(-5.0, 3.0, -5.0), Vec3::new(5.0, 4.0, 5.0));
        let body = body_at(Vec3::new(0.0, 0.9, 0.0));
        let out = resolve(
            &body,
            Vec3::new(0.0, 5.0, 0.0),
            0.1,
            &[ceiling],
            &ResolverParams::default(),
        );
        assert!(out.hit_ceiling);
        assert!(!out.grounded);
        assert_eq!(out.velocity.y, 0.0);
        let head = body.max.y + out.displacement.y;
        assert!(head < 3.0);
        assert!(head > 2.99);
    }

    #[test]
    fn test_walking_on_floor_is_not_blocked() {
        let body = body_at(Vec3::ZERO);
        let out = resolve(
            &body,
            Vec3::new(5.0, -2.0, 5.0),
            0.1,
            &[floor()],
            &ResolverParams::default(),
        );
        assert!(out.grounded);
        assert!(out.wall_normal.is_none());
        assert!((out.displacement.x - 0.5).abs() < 1e-6);
        assert!((out.displacement.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wall_slide_keeps_free_axis() {
        // Body face at x = 0.75, wall at x = 1.0
        let body = body_at(Vec3::new(0.5, 0.0, 0.0));
        let velocity = Vec3::new(6.0, 0.0, 4.0);
        let out = resolve(&body, velocity, 0.1, &[floor(), wall_east()], &ResolverParams::default());

        // Stops at the face, short by the contact gap
        assert!((out.displacement.x - (0.25 - CONTACT_GAP)).abs() < 1e-5);
        assert!((out.displacement.z - 0.4).abs() < 1e-6);
        assert!((out.velocity.x - 3.0).abs() < 1e-6);
        assert_eq!(out.velocity.z, 4.0);
        assert_eq!(out.wall_normal, Some(Vec3::NEG_X));
    }

    #[test]
    fn test_diagonal_edge_hit_keeps_dominant_axis() {
        // A post whose corner sits exactly on the diagonal path
        let post = Aabb::new(Vec3::new(0.5, 0.0, 0.5), Vec3::new(1.5, 3.0, 1.5));
        let body = body_at(Vec3::ZERO);
        let velocity = Vec3::new(4.0, 0.0, 3.0);
        let out = resolve(&body, velocity, 0.1, &[post], &ResolverParams::default());

        let moved = body.translated(out.displacement);
        assert!(!moved.intersects(&post));
        assert!((out.displacement.x - 0.4).abs() < 1e-6);
        assert_eq!(out.displacement.z, 0.0);
        assert!((out.velocity.z - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_obstacle_order_irrelevant_for_horizontal_block() {
        let body = body_at(Vec3::new(0.5, 0.0, 0.0));
        let velocity = Vec3::new(6.0, -1.0, 0.0);
        let params = ResolverParams::default();
        let a = resolve(&body, velocity, 0.1, &[floor(), wall_east()], &params);
        let b = resolve(&body, velocity, 0.1, &[wall_east(), floor()], &params);
        assert_eq!(a.displacement.x, b.displacement.x);
        assert_eq!(a.velocity.x, b.velocity.x);
        assert_eq!(a.wall_normal, b.wall_normal);
    }

    #[test]
    fn test_wall_beside_body_is_not_a_floor() {
        // Body sunk 1e-6 into the wall face by rounding
        let body = body_at(Vec3::new(0.75 + 1e-6, 0.0, 0.0));
        let velocity = Vec3::new(0.0, -2.0, -6.0);
        let params = ResolverParams::default();

        for obstacles in [[wall_east(), floor()], [floor(), wall_east()]] {
            let out = resolve(&body, velocity, 0.1, &obstacles, &params);
            assert!(out.grounded);
            assert_eq!(out.displacement.y, 0.0);
            assert!((out.displacement.z + 0.6).abs() < 1e-6);
            assert!(out.wall_normal.is_none());
        }
    }

    #[test]
    fn test_wall_beside_body_is_not_a_ceiling() {
        let body = body_at(Vec3::new(0.75 + 1e-6, 0.0, 0.0));
        let velocity = Vec3::new(0.0, 10.0, 0.0);
        let params = ResolverParams::default();

        for obstacles in [[wall_east(), floor()], [floor(), wall_east()]] {
            let out = resolve(&body, velocity, 0.1, &obstacles, &params);
            assert!(!out.hit_ceiling);
            assert!(!out.grounded);
            assert_eq!(out.velocity.y, 10.0);
            assert!((out.displacement.y - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sunk_body_pushed_back_out_of_wall() {
        let body = body_at(Vec3::new(0.75 + 1e-6, 0.0, 0.0));
        let out = resolve(
            &body,
            Vec3::new(0.5, -2.0, 0.0),
            0.1,
            &[floor(), wall_east()],
            &ResolverParams::default(),
        );
        let moved = body.translated(out.displacement);
        assert!(!moved.intersects(&wall_east()));
        assert!(moved.max.x < 1.0);
        assert_eq!(out.wall_normal, Some(Vec3::NEG_X));
    }

    #[test]
    fn test_nearest_floor_wins_regardless_of_order() {
        let step = Aabb::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.5, 5.0));
        let body = body_at(Vec3::new(0.0, 0.6, 0.0));
        let velocity = Vec3::new(0.0, -10.0, 0.0);
        let params = ResolverParams::default();

        let a = resolve(&body, velocity, 0.1, &[floor(), step], &params);
        let b = resolve(&body, velocity, 0.1, &[step, floor()], &params);
        assert_eq!(a, b);
        assert!((body.min.y + a.displacement.y - 0.5).abs() < 1e-6);
    }
}

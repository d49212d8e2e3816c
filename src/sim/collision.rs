//! Collision tests between projectiles and combatants
//!
//! Bullets are treated as points at their center; combatants are circles.

use glam::Vec2;

use super::combatant::Combatant;
use super::projectile::Projectile;
use crate::Bounds;

/// Strict containment: a point on the rim does not count
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// True if an active projectile sits inside the combatant
pub fn projectile_hits(projectile: &Projectile, target: &Combatant) -> bool {
    projectile.active && point_in_circle(projectile.pos, target.pos, target.radius())
}

/// Circle center placement, within `bounds`, farthest from `avoid`
///
/// Candidates are the four corners inset by `radius`.
pub fn farthest_corner(bounds: &Bounds, radius: f32, avoid: Vec2) -> Vec2 {
    let min = Vec2::splat(radius);
    let max = Vec2::new(bounds.width - radius, bounds.height - radius).max(min);
    [
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, max.y),
    ]
    .into_iter()
    .max_by(|a, b| {
        a.distance_squared(avoid)
            .partial_cmp(&b.distance_squared(avoid))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
    .unwrap_or(min)
}

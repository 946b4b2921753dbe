//! Enemy projectiles
//!
//! Straight-line flight with a lifetime. The hit test is a proximity check
//! against the target position the host supplies each tick; real collision
//! volumes stay on the host side.

use serde::{Deserialize, Serialize};

use crate::behavior::attack::ShotIntent;
use crate::behavior::config::RangedAttack;
use crate::core::types::{EnemyId, ProjectileId, Seconds, Vec3};

/// A shot in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub shooter: EnemyId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub damage: i32,
    pub expires_at: Seconds,
}

impl Projectile {
    /// Launch from a shot intent toward the target's position at fire time
    pub fn launch(shot: &ShotIntent, ranged: &RangedAttack, clock: Seconds) -> Self {
        let direction = (shot.target - shot.origin).normalize();
        Self {
            id: ProjectileId::new(),
            shooter: shot.shooter,
            position: shot.origin,
            velocity: direction * ranged.projectile_speed,
            damage: ranged.projectile_damage,
            expires_at: clock + Seconds::from(ranged.projectile_lifetime),
        }
    }
}

/// What happened to one projectile this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileFate {
    InFlight,
    /// Lifetime ran out; dropped silently
    Expired,
    /// Reached the target; the host applies the damage
    Hit { damage: i32, position: Vec3 },
}

/// Advance one projectile by `dt` and resolve expiry and target proximity
pub fn advance_projectile(
    projectile: &mut Projectile,
    dt: f32,
    target: Option<Vec3>,
    hit_radius: f32,
    clock: Seconds,
) -> ProjectileFate {
    if clock >= projectile.expires_at {
        return ProjectileFate::Expired;
    }

    projectile.position = projectile.position + projectile.velocity * dt;

    if let Some(target) = target {
        if projectile.position.distance(&target) <= hit_radius {
            return ProjectileFate::Hit {
                damage: projectile.damage,
                position: projectile.position,
            };
        }
    }

    ProjectileFate::InFlight
}

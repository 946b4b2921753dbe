//! Ranged attack timing
//!
//! Shots are gated by a cooldown accumulator checked against the session
//! clock and by the attack range. The shot itself is an intent: the session
//! turns it into a projectile, the host plays the effect.

use serde::{Deserialize, Serialize};

use crate::behavior::config::RangedAttack;
use crate::behavior::enemy::Enemy;
use crate::core::types::{EnemyId, Seconds, Vec3};

/// A ranged attack for the combat executor to carry out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotIntent {
    pub shooter: EnemyId,
    pub origin: Vec3,
    pub target: Vec3,
}

/// Take a shot if the cooldown has elapsed and the target is in range
///
/// Arms the cooldown on success. Enemies without a ranged block never shoot.
pub fn try_ranged_attack(enemy: &mut Enemy, target: Vec3, clock: Seconds) -> Option<ShotIntent> {
    let ranged = enemy.config.ranged?;

    if clock < enemy.next_shot_at {
        return None;
    }

    if enemy.last_position.distance(&target) > ranged.attack_range {
        return None;
    }

    enemy.next_shot_at = clock + Seconds::from(ranged.shoot_cooldown);
    Some(ShotIntent {
        shooter: enemy.id,
        origin: enemy.last_position,
        target,
    })
}

/// Where an approach should actually halt
///
/// Ranged enemies keep their standoff distance from the target; melee
/// enemies close to contact.
pub fn approach_destination(position: Vec3, target: Vec3, ranged: Option<&RangedAttack>) -> Vec3 {
    let Some(ranged) = ranged else {
        return target;
    };

    if ranged.standoff_distance <= 0.0 {
        return target;
    }

    let to_target = target - position;
    if to_target.length() <= ranged.standoff_distance {
        // Already inside the standoff; hold position
        return position;
    }

    target - to_target.normalize() * ranged.standoff_distance
}

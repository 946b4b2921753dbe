//! Per-enemy behavior configuration
//!
//! One enemy type, parameterized by capabilities, instead of a class per
//! variant: the ranged block and the gait are what distinguish a basic
//! slime from a ranged one.

use serde::{Deserialize, Serialize};

/// Locomotion gait
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gait {
    /// Continuous stride; motion intents are issued every tick
    Stride,
    /// Discrete jumps; new motion intents are withheld while a hop is in
    /// flight, so the movement executor can finish the arc
    Hop { height: f32, duration: f32 },
}

impl Default for Gait {
    fn default() -> Self {
        Gait::Stride
    }
}

/// Ranged attack capability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedAttack {
    /// Maximum distance (world units) at which a shot is taken
    pub attack_range: f32,
    /// Seconds between shots
    pub shoot_cooldown: f32,
    /// How far short of the target the approach halts
    pub standoff_distance: f32,
    /// Projectile flight speed (world units per second)
    pub projectile_speed: f32,
    /// Damage delivered on a projectile hit
    pub projectile_damage: i32,
    /// Seconds before an unspent projectile expires
    pub projectile_lifetime: f32,
}

impl Default for RangedAttack {
    fn default() -> Self {
        Self {
            attack_range: 10.0,
            shoot_cooldown: 2.0,
            standoff_distance: 5.0,
            projectile_speed: 10.0,
            projectile_damage: 1,
            projectile_lifetime: 5.0,
        }
    }
}

/// Behavior configuration for one enemy
///
/// Immutable once the enemy is spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Starting (and maximum) health
    pub max_health: i32,

    // Sight
    /// Detection distance (world units); boundary exclusive
    pub sight_range: f32,
    /// Field-of-view half-angle in degrees; boundary exclusive
    pub sight_angle: f32,

    // Movement
    pub wander_speed: f32,
    pub approach_speed: f32,
    /// Must exceed the other two; panic is fast
    pub flee_speed: f32,
    pub gait: Gait,

    /// Ranged combat block; `None` for melee-only variants
    pub ranged: Option<RangedAttack>,

    /// Emit idle vocalization effect requests on a randomized interval
    pub idle_voice: bool,
}

impl EnemyConfig {
    /// The melee slime: slow, chatty, closes to contact
    pub fn basic_slime() -> Self {
        Self {
            max_health: 1,
            sight_range: 20.0,
            sight_angle: 45.0,
            wander_speed: 1.0,
            approach_speed: 2.0,
            flee_speed: 3.0,
            gait: Gait::Stride,
            ranged: None,
            idle_voice: true,
        }
    }

    /// The ranged slime: hops, keeps its distance, lobs projectiles
    pub fn ranged_slime() -> Self {
        Self {
            max_health: 1,
            sight_range: 20.0,
            sight_angle: 45.0,
            wander_speed: 1.0,
            approach_speed: 2.0,
            flee_speed: 3.0,
            gait: Gait::Hop {
                height: 1.0,
                duration: 0.5,
            },
            ranged: Some(RangedAttack::default()),
            idle_voice: false,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0 {
            return Err(format!("max_health must be positive, got {}", self.max_health));
        }

        if self.sight_range <= 0.0 {
            return Err("sight_range must be positive".into());
        }

        if self.sight_angle <= 0.0 || self.sight_angle > 180.0 {
            return Err(format!(
                "sight_angle must be in (0, 180], got {}",
                self.sight_angle
            ));
        }

        if self.wander_speed <= 0.0 || self.approach_speed <= 0.0 || self.flee_speed <= 0.0 {
            return Err("movement speeds must be positive".into());
        }

        if self.flee_speed <= self.wander_speed || self.flee_speed <= self.approach_speed {
            return Err("flee_speed must exceed wander_speed and approach_speed".into());
        }

        if let Gait::Hop { height, duration } = self.gait {
            if height <= 0.0 || duration <= 0.0 {
                return Err("hop height and duration must be positive".into());
            }
        }

        if let Some(ranged) = &self.ranged {
            if ranged.attack_range <= 0.0 || ranged.shoot_cooldown <= 0.0 {
                return Err("attack_range and shoot_cooldown must be positive".into());
            }
            if ranged.standoff_distance < 0.0 || ranged.standoff_distance >= ranged.attack_range {
                return Err(format!(
                    "standoff_distance ({}) must sit inside attack_range ({})",
                    ranged.standoff_distance, ranged.attack_range
                ));
            }
            if ranged.projectile_speed <= 0.0 || ranged.projectile_lifetime <= 0.0 {
                return Err("projectile speed and lifetime must be positive".into());
            }
            if ranged.projectile_damage <= 0 {
                return Err("projectile_damage must be positive".into());
            }
        }

        Ok(())
    }
}

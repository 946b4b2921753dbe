//! The enemy entity
//!
//! Holds identity, health, behavior state, and the time accumulators the
//! state machine checks against the session clock. Position and orientation
//! are owned by the host movement executor; `last_position` is the reading
//! cached from the most recent tick so death-time logic (flee broadcast,
//! death burst placement) does not depend on the host still having a body.

use serde::{Deserialize, Serialize};

use crate::behavior::config::EnemyConfig;
use crate::behavior::state::BehaviorState;
use crate::core::error::{Result, WarrenError};
use crate::core::types::{EnemyId, Seconds, Vec3};

/// One spawned creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub config: EnemyConfig,
    pub health: i32,
    pub state: BehaviorState,

    /// Target position seen this tick, or carried through a flee
    pub last_known_target: Option<Vec3>,
    /// Where the current wander leg is headed
    pub wander_destination: Option<Vec3>,
    /// Where the current flee leg is headed
    pub flee_destination: Option<Vec3>,
    /// Position reading cached from the most recent update
    pub last_position: Vec3,

    // Time accumulators (session-clock seconds)
    pub next_shot_at: Seconds,
    pub next_voice_at: Seconds,
    pub hop_until: Seconds,
}

impl Enemy {
    /// Build a validated enemy at a spawn position
    ///
    /// An invalid config is fatal to this entity: the error is reported once
    /// here, and the entity never enters the registry.
    pub fn new(config: EnemyConfig, position: Vec3) -> Result<Self> {
        if let Err(reason) = config.validate() {
            tracing::error!(%reason, "rejecting enemy spawn");
            return Err(WarrenError::InvalidEnemyConfig(reason));
        }

        Ok(Self {
            id: EnemyId::new(),
            health: config.max_health,
            config,
            state: BehaviorState::default(),
            last_known_target: None,
            wander_destination: None,
            flee_destination: None,
            last_position: position,
            next_shot_at: 0.0,
            next_voice_at: 0.0,
            hop_until: 0.0,
        })
    }

    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }

    /// Apply damage; returns true if this call killed the enemy
    ///
    /// A dead enemy absorbs further damage as a no-op, so death side effects
    /// fire exactly once no matter how many sources land in the same tick.
    /// Health never goes below zero.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.state == BehaviorState::Dead {
            return false;
        }

        self.health = (self.health - amount).max(0);
        tracing::debug!(id = ?self.id, health = self.health, "enemy took damage");

        if self.health == 0 {
            self.state = BehaviorState::Dead;
            self.last_known_target = None;
            self.wander_destination = None;
            self.flee_destination = None;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_basic() -> Enemy {
        Enemy::new(EnemyConfig::basic_slime(), Vec3::ZERO).unwrap()
    }

    #[test]
    fn test_spawn_starts_wandering_at_full_health() {
        let enemy = spawn_basic();
        assert_eq!(enemy.state, BehaviorState::Wandering);
        assert_eq!(enemy.health, enemy.config.max_health);
        assert!(enemy.last_known_target.is_none());
    }

    #[test]
    fn test_invalid_config_is_fatal_at_spawn() {
        let config = EnemyConfig {
            sight_range: -1.0,
            ..EnemyConfig::basic_slime()
        };
        assert!(Enemy::new(config, Vec3::ZERO).is_err());
    }

    #[test]
    fn test_lethal_damage_kills() {
        let mut enemy = spawn_basic();
        assert!(enemy.take_damage(1));
        assert_eq!(enemy.state, BehaviorState::Dead);
        assert_eq!(enemy.health, 0);
    }

    #[test]
    fn test_damage_after_death_is_noop() {
        let mut enemy = spawn_basic();
        assert!(enemy.take_damage(1));

        // Repeated hits: no second kill report, health pinned at zero
        for _ in 0..5 {
            assert!(!enemy.take_damage(3));
        }
        assert_eq!(enemy.health, 0);
        assert_eq!(enemy.state, BehaviorState::Dead);
    }

    #[test]
    fn test_overkill_clamps_health_at_zero() {
        let mut enemy = Enemy::new(
            EnemyConfig {
                max_health: 2,
                ..EnemyConfig::basic_slime()
            },
            Vec3::ZERO,
        )
        .unwrap();

        assert!(enemy.take_damage(100));
        assert_eq!(enemy.health, 0);
    }

    #[test]
    fn test_nonlethal_damage_keeps_state() {
        let mut enemy = Enemy::new(
            EnemyConfig {
                max_health: 3,
                ..EnemyConfig::basic_slime()
            },
            Vec3::ZERO,
        )
        .unwrap();

        assert!(!enemy.take_damage(1));
        assert_eq!(enemy.health, 2);
        assert_eq!(enemy.state, BehaviorState::Wandering);
    }

    #[test]
    fn test_death_clears_stored_positions() {
        let mut enemy = spawn_basic();
        enemy.last_known_target = Some(Vec3::new(1.0, 0.0, 1.0));
        enemy.wander_destination = Some(Vec3::new(2.0, 0.0, 2.0));

        enemy.take_damage(1);

        assert!(enemy.last_known_target.is_none());
        assert!(enemy.wander_destination.is_none());
        assert!(enemy.flee_destination.is_none());
    }
}

//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Values can be overridden from a
//! TOML file; unspecified fields keep their defaults.

use serde::{Deserialize, Serialize};

/// Configuration for the behavior simulation
///
/// These values have been tuned to match the feel of the original encounter
/// pacing. Changing them will affect how alert and skittish enemies are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === FLEE BROADCAST ===
    /// Radius (world units) of the flee broadcast around a dying enemy
    ///
    /// Every live enemy within this distance (inclusive) of the death
    /// position is forced into the fleeing state.
    pub flee_radius: f32,

    /// How far (world units) a fleeing enemy runs from the danger origin
    ///
    /// The flee destination is placed this far along the direction pointing
    /// directly away from the broadcaster's position.
    pub flee_distance: f32,

    /// How close (world units) a fleeing enemy must get to its flee point
    /// before it calms down and returns to wandering
    ///
    /// Checked against the enemy's own position rather than the movement
    /// executor's remaining-distance reading, so a flee issued this tick is
    /// not ended by a stale reading from the previous path.
    pub flee_arrival_distance: f32,

    // === WANDERING ===
    /// Half-extent (world units) of the square around an enemy in which
    /// random wander destinations are drawn
    pub wander_radius: f32,

    /// Maximum snap distance (world units) passed to the nav query when
    /// validating a sampled wander point
    pub wander_snap_distance: f32,

    /// How many candidate points to try per tick before giving up
    ///
    /// When every candidate is unreachable (isolated spawn, tiny island),
    /// the enemy stays in place this tick and tries again next tick. This
    /// bound is what guarantees wander sampling terminates.
    pub wander_sample_attempts: u32,

    /// Destination-reached threshold (world units) for wander legs
    ///
    /// Mirrors the movement executor's stopping distance: a leg counts as
    /// finished when the executor reports no pending path and remaining
    /// distance at or under this value.
    pub stopping_distance: f32,

    // === IDLE VOICE ===
    /// Minimum seconds between idle vocalizations
    pub voice_interval_min: f32,

    /// Maximum seconds between idle vocalizations
    ///
    /// Each enemy re-arms its voice timer with a uniform draw from
    /// [min, max] after every call.
    pub voice_interval_max: f32,

    // === PROJECTILES ===
    /// Distance (world units) at which a projectile counts as hitting the
    /// target
    ///
    /// Stand-in for the host's collision volume; kept generous enough that
    /// a projectile stepping `speed * dt` per tick cannot tunnel through at
    /// the default speeds.
    pub projectile_hit_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Flee broadcast
            flee_radius: 15.0,
            flee_distance: 12.0,
            flee_arrival_distance: 0.75,

            // Wandering
            wander_radius: 10.0,
            wander_snap_distance: 2.0,
            wander_sample_attempts: 8,
            stopping_distance: 0.1,

            // Idle voice (5-10s, matching the original pacing)
            voice_interval_min: 5.0,
            voice_interval_max: 10.0,

            // Projectiles
            projectile_hit_radius: 0.75,
        }
    }
}

impl SimConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for
    /// unspecified fields
    pub fn load(path: &std::path::Path) -> crate::core::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.flee_radius <= 0.0 || self.flee_distance <= 0.0 {
            return Err("flee_radius and flee_distance must be positive".into());
        }

        if self.flee_arrival_distance <= 0.0 {
            return Err("flee_arrival_distance must be positive".into());
        }

        if self.wander_radius <= 0.0 || self.wander_snap_distance <= 0.0 {
            return Err("wander_radius and wander_snap_distance must be positive".into());
        }

        if self.wander_sample_attempts == 0 {
            return Err("wander_sample_attempts must be at least 1".into());
        }

        if self.stopping_distance < 0.0 {
            return Err("stopping_distance must not be negative".into());
        }

        // Voice interval must be a valid range
        if self.voice_interval_min <= 0.0 || self.voice_interval_max < self.voice_interval_min {
            return Err(format!(
                "voice interval [{}, {}] is not a valid range",
                self.voice_interval_min, self.voice_interval_max
            ));
        }

        if self.projectile_hit_radius <= 0.0 {
            return Err("projectile_hit_radius must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_voice_interval_rejected() {
        let config = SimConfig {
            voice_interval_min: 10.0,
            voice_interval_max: 5.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_sample_attempts_rejected() {
        let config = SimConfig {
            wander_sample_attempts: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: SimConfig = toml::from_str("flee_radius = 20.0").unwrap();
        assert_eq!(config.flee_radius, 20.0);
        // Everything else keeps its default
        assert_eq!(config.wander_radius, SimConfig::default().wander_radius);
    }
}

//! Player weapon logic
//!
//! Magazine, fire cadence, and timed reload as clock comparisons; each
//! trigger pull that lands yields hitscan rays for the host physics to
//! resolve. Damage comes back into the core through the session's
//! `apply_damage`, never through this module.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Seconds, Vec3};

/// Static parameters for one weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub magazine_size: u32,
    /// Seconds a reload takes
    pub reload_time: f32,
    /// Seconds between trigger pulls
    pub fire_cadence: f32,
    /// Rays per shot (shotguns fire several)
    pub pellet_count: u32,
    /// Cone half-angle jitter applied to each pellet, in degrees
    pub spread_degrees: f32,
    /// Maximum hitscan distance
    pub max_range: f32,
    /// Damage per pellet that connects
    pub damage: i32,
}

impl WeaponConfig {
    /// The shotgun: wide, short-ranged, five pellets a pull
    pub fn shotgun() -> Self {
        Self {
            magazine_size: 8,
            reload_time: 2.0,
            fire_cadence: 1.0,
            pellet_count: 5,
            spread_degrees: 2.5,
            max_range: 15.0,
            damage: 1,
        }
    }

    /// The rifle: one tight ray per pull
    pub fn rifle() -> Self {
        Self {
            magazine_size: 8,
            reload_time: 2.0,
            fire_cadence: 1.0,
            pellet_count: 1,
            spread_degrees: 0.0,
            max_range: 15.0,
            damage: 1,
        }
    }
}

/// A hitscan ray for the host physics to resolve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitscanRay {
    pub direction: Vec3,
    pub max_range: f32,
    pub damage: i32,
}

/// Result of a trigger pull
#[derive(Debug, Clone, PartialEq)]
pub enum FireOutcome {
    /// Rays to cast; the host applies damage for whatever they hit
    Fired(Vec<HitscanRay>),
    /// Empty magazine; play the dry click
    Dry,
    /// Cadence timer or reload still running
    NotReady,
}

/// One player weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub config: WeaponConfig,
    pub magazine: u32,
    next_shot_at: Seconds,
    reload_done_at: Option<Seconds>,
}

impl Weapon {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            magazine: config.magazine_size,
            next_shot_at: 0.0,
            reload_done_at: None,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_done_at.is_some()
    }

    /// Finish a reload whose timer has elapsed
    pub fn tick(&mut self, clock: Seconds) {
        if let Some(done_at) = self.reload_done_at {
            if clock >= done_at {
                self.magazine = self.config.magazine_size;
                self.reload_done_at = None;
                tracing::debug!("reload complete");
            }
        }
    }

    /// Pull the trigger toward `aim`
    pub fn try_fire(&mut self, aim: Vec3, clock: Seconds, rng: &mut ChaCha8Rng) -> FireOutcome {
        if self.is_reloading() || clock < self.next_shot_at {
            return FireOutcome::NotReady;
        }

        if self.magazine == 0 {
            return FireOutcome::Dry;
        }

        self.magazine -= 1;
        self.next_shot_at = clock + Seconds::from(self.config.fire_cadence);

        let rays = (0..self.config.pellet_count)
            .map(|_| HitscanRay {
                direction: jitter_direction(aim, self.config.spread_degrees, rng),
                max_range: self.config.max_range,
                damage: self.config.damage,
            })
            .collect();

        FireOutcome::Fired(rays)
    }

    /// Begin a reload; refused mid-reload or with a full magazine
    pub fn start_reload(&mut self, clock: Seconds) -> bool {
        if self.is_reloading() || self.magazine == self.config.magazine_size {
            return false;
        }
        self.reload_done_at = Some(clock + Seconds::from(self.config.reload_time));
        true
    }

    /// "n/m" ammo string for the HUD collaborator
    pub fn ammo_display(&self) -> String {
        format!("{}/{}", self.magazine, self.config.magazine_size)
    }
}

/// Jitter an aim direction inside a cone
fn jitter_direction(aim: Vec3, spread_degrees: f32, rng: &mut ChaCha8Rng) -> Vec3 {
    let direction = aim.normalize();
    if spread_degrees <= 0.0 || direction == Vec3::ZERO {
        return direction;
    }

    let max_offset = spread_degrees.to_radians().tan();
    let random = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    // Component of the random vector perpendicular to the aim
    let perpendicular = (random - direction * random.dot(&direction)).normalize();

    (direction + perpendicular * (max_offset * rng.gen_range(0.0f32..1.0))).normalize()
}

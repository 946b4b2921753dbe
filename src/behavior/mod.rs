//! Enemy behavior core
//!
//! Perception, the per-enemy state machine, and the population registry.
//! Everything here is host-agnostic: positions come in as readings, motion
//! and combat decisions go out as intents, effects go out as events.

pub mod attack;
pub mod config;
pub mod enemy;
pub mod events;
pub mod flee;
pub mod perception;
pub mod registry;
pub mod state;
pub mod update;
pub mod wander;

// Re-exports for convenient access
pub use attack::{approach_destination, try_ranged_attack, ShotIntent};
pub use config::{EnemyConfig, Gait, RangedAttack};
pub use enemy::Enemy;
pub use events::{BehaviorEvent, BehaviorEventKind, EventLog};
pub use flee::{enter_flee, flee_destination};
pub use perception::target_in_sight;
pub use registry::EnemyRegistry;
pub use state::BehaviorState;
pub use update::{update_enemy, MotionIntent, UpdateResult};
pub use wander::sample_wander_destination;

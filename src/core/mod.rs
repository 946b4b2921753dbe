//! Core types, errors, and configuration

pub mod config;
pub mod error;
pub mod types;

pub use config::SimConfig;
pub use error::{Result, WarrenError};
pub use types::{EnemyId, ProjectileId, Seconds, Tick, Vec3};

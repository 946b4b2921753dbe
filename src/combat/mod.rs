//! Combat support: enemy projectiles and the player weapon
//!
//! Both sides express time as clock comparisons and hand geometry to the
//! host: projectiles check proximity to the target, the weapon emits rays.

pub mod projectile;
pub mod weapon;

pub use projectile::{advance_projectile, Projectile, ProjectileFate};
pub use weapon::{FireOutcome, HitscanRay, Weapon, WeaponConfig};

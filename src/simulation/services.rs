//! Host service seams
//!
//! The behavior core never owns a transform and never walks a navmesh; it
//! reads the movement executor through `MotionProvider` and validates wander
//! candidates through `NavQuery`. Hosts implement both; tests stub them.

use serde::{Deserialize, Serialize};

use crate::core::types::{EnemyId, Vec3};

/// Per-enemy reading from the host movement executor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub position: Vec3,
    /// Facing direction; the sight cone opens around this
    pub forward: Vec3,
    /// Path distance left on the current leg
    pub distance_remaining: f32,
    /// A requested path is still being computed
    pub path_pending: bool,
}

/// Movement executor readings, one per enemy body
pub trait MotionProvider {
    /// Current reading for one enemy; `None` when the host has no body for
    /// it (despawned or never spawned), in which case the enemy is skipped
    /// that tick
    fn motion_state(&self, id: EnemyId) -> Option<MotionState>;
}

/// Reachability oracle for wander sampling
pub trait NavQuery {
    /// Snap `near` to the closest reachable point within `max_snap`, if any
    fn sample_reachable(&self, near: Vec3, max_snap: f32) -> Option<Vec3>;
}

//! Behavior states
//!
//! Exactly one state is active per enemy at any time. Fleeing is only ever
//! entered through the registry's flee broadcast; Dead is terminal.

use serde::{Deserialize, Serialize};

/// Behavior state for an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    Wandering, // No target known; roaming random reachable points
    Approaching, // Target in sight; closing in
    Fleeing,     // Forced away from a danger origin by a broadcast
    Dead,        // Terminal; entity is removed from the simulation
}

impl BehaviorState {
    /// Can this entity still act?
    pub fn is_live(&self) -> bool {
        !matches!(self, BehaviorState::Dead)
    }
}

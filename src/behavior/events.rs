//! Behavior event log
//!
//! Fire-and-forget effect requests and lifecycle notices for the host:
//! audio, particles, and HUD collaborators drain this once per tick. Nothing
//! in the core ever reads an event back.

use serde::{Deserialize, Serialize};

use crate::core::types::{EnemyId, Tick, Vec3};

/// Log entry for behavior events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorEvent {
    pub tick: Tick,
    pub kind: BehaviorEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BehaviorEventKind {
    EnemySpawned { enemy: EnemyId },
    EnemySlain { enemy: EnemyId },
    /// Play the death particle burst at this position
    DeathBurst { enemy: EnemyId, position: Vec3 },
    /// One-shot reaction played on flee entry
    FleeCry { enemy: EnemyId },
    /// Idle vocalization; the host picks the clip
    IdleCall { enemy: EnemyId },
    /// A ranged enemy released a projectile
    ShotFired { enemy: EnemyId },
    /// An enemy projectile reached the target
    TargetHit { damage: i32, position: Vec3 },
}

/// Accumulated events since the last drain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<BehaviorEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: BehaviorEventKind, description: String, tick: Tick) {
        self.events.push(BehaviorEvent {
            tick,
            kind,
            description,
        });
    }

    /// Hand everything accumulated so far to the host
    pub fn drain(&mut self) -> Vec<BehaviorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BehaviorEvent> {
        self.events.iter()
    }
}

//! Population registry
//!
//! Session-scoped collection of live enemies: aggregate count for the HUD
//! and win check, and the flee broadcast around a death. This is the only
//! shared mutable state in the core and the sole enemy-to-enemy coupling.
//! The broadcast snapshots the id set before mutating, so a mutation can
//! never invalidate the iteration driving it.

use ahash::AHashMap;

use crate::behavior::enemy::Enemy;
use crate::behavior::events::EventLog;
use crate::behavior::flee::enter_flee;
use crate::core::config::SimConfig;
use crate::core::types::{EnemyId, Tick, Vec3};

/// The live-enemy collection for one session
#[derive(Debug, Clone, Default)]
pub struct EnemyRegistry {
    enemies: AHashMap<EnemyId, Enemy>,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enemy; returns its id
    pub fn register(&mut self, enemy: Enemy) -> EnemyId {
        let id = enemy.id;
        self.enemies.insert(id, enemy);
        id
    }

    /// Remove an enemy; unknown or repeated ids are a safe no-op
    pub fn deregister(&mut self, id: EnemyId) -> Option<Enemy> {
        self.enemies.remove(&id)
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    /// Number of registered enemies; cannot underflow by construction
    pub fn count(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Snapshot of the current id set
    ///
    /// Iteration order is arbitrary and carries no semantic weight.
    pub fn ids(&self) -> Vec<EnemyId> {
        self.enemies.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    /// Force every live enemy within `radius` of `origin` to flee
    ///
    /// The origin enemy (the one dying) is excluded. Ids that vanished
    /// between snapshot and visit are skipped. Returns who fled.
    pub fn broadcast_flee_near(
        &mut self,
        origin: Vec3,
        radius: f32,
        excluding: Option<EnemyId>,
        config: &SimConfig,
        events: &mut EventLog,
        tick: Tick,
    ) -> Vec<EnemyId> {
        let snapshot = self.ids();
        let mut fled = Vec::new();

        for id in snapshot {
            if Some(id) == excluding {
                continue;
            }

            let Some(enemy) = self.enemies.get_mut(&id) else {
                continue;
            };

            if !enemy.is_live() {
                continue;
            }

            if enemy.last_position.distance(&origin) <= radius {
                enter_flee(enemy, origin, config, events, tick);
                fled.push(id);
            }
        }

        tracing::debug!(count = fled.len(), "flee broadcast resolved");
        fled
    }
}

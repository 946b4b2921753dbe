//! Slime Warren - Entry Point
//!
//! Headless demo loop for the enemy behavior core. A toy movement executor
//! and a flat nav plane stand in for the host engine, so the state machine
//! can be watched from a terminal: spawn slimes, walk the player around,
//! shoot, and step the simulation tick by tick.

use ahash::AHashMap;

use slime_warren::behavior::update::MotionIntent;
use slime_warren::combat::{FireOutcome, Weapon, WeaponConfig};
use slime_warren::core::config::SimConfig;
use slime_warren::core::error::Result;
use slime_warren::core::types::{EnemyId, Vec3};
use slime_warren::behavior::{BehaviorEventKind, EnemyConfig};
use slime_warren::simulation::{MotionProvider, MotionState, NavQuery, Session};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};

const DT: f32 = 0.1;

/// Toy movement executor: integrates intents straight toward destinations
#[derive(Default)]
struct DemoHost {
    bodies: AHashMap<EnemyId, MotionState>,
    destinations: AHashMap<EnemyId, Vec3>,
}

impl DemoHost {
    fn spawn_body(&mut self, id: EnemyId, position: Vec3) {
        self.bodies.insert(
            id,
            MotionState {
                position,
                forward: Vec3::new(0.0, 0.0, 1.0),
                distance_remaining: 0.0,
                path_pending: false,
            },
        );
    }

    fn despawn_body(&mut self, id: EnemyId) {
        self.bodies.remove(&id);
        self.destinations.remove(&id);
    }

    fn accept(&mut self, intents: &[MotionIntent]) {
        for intent in intents {
            self.destinations.insert(intent.enemy, intent.destination);
            if let Some(body) = self.bodies.get_mut(&intent.enemy) {
                body.distance_remaining = body.position.distance(&intent.destination);
            }
        }
    }

    fn integrate(&mut self, intents: &[MotionIntent], dt: f32) {
        for intent in intents {
            let Some(body) = self.bodies.get_mut(&intent.enemy) else {
                continue;
            };
            let Some(destination) = self.destinations.get(&intent.enemy) else {
                continue;
            };

            let to_destination = *destination - body.position;
            let distance = to_destination.length();
            let step = intent.speed * dt;

            if distance <= step {
                body.position = *destination;
                body.distance_remaining = 0.0;
            } else {
                let direction = to_destination.normalize();
                body.position = body.position + direction * step;
                body.forward = direction;
                body.distance_remaining = distance - step;
            }
        }
    }
}

impl MotionProvider for DemoHost {
    fn motion_state(&self, id: EnemyId) -> Option<MotionState> {
        self.bodies.get(&id).copied()
    }
}

/// Flat open plane: everywhere is reachable at ground level
struct FlatPlane;

impl NavQuery for FlatPlane {
    fn sample_reachable(&self, near: Vec3, _max_snap: f32) -> Option<Vec3> {
        Some(Vec3::new(near.x, 0.0, near.z))
    }
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("slime_warren=debug")
        .init();

    tracing::info!("Slime Warren starting...");

    let mut session = Session::new(SimConfig::default(), 0x5EED)?;
    let mut host = DemoHost::default();
    let mut weapon = Weapon::new(WeaponConfig::shotgun());
    let mut weapon_rng = ChaCha8Rng::seed_from_u64(99);
    let mut player = Vec3::new(0.0, 0.0, -15.0);

    // Starting population
    for (config, position) in [
        (EnemyConfig::basic_slime(), Vec3::new(5.0, 0.0, 5.0)),
        (EnemyConfig::basic_slime(), Vec3::new(-5.0, 0.0, 8.0)),
        (EnemyConfig::ranged_slime(), Vec3::new(0.0, 0.0, 12.0)),
    ] {
        let id = session.spawn_enemy(config, position)?;
        host.spawn_body(id, position);
    }

    println!("\n=== SLIME WARREN ===");
    println!("Headless enemy behavior demo");
    println!();
    println!("Commands:");
    println!("  tick / t          - Advance simulation by one tick");
    println!("  run <n>           - Run n simulation ticks");
    println!("  spawn basic|ranged <x> <z>");
    println!("  player <x> <z>    - Move the player");
    println!("  shoot             - Fire the shotgun at the nearest slime");
    println!("  reload / r        - Reload the shotgun");
    println!("  status / s        - Show detailed status");
    println!("  quit / q          - Exit");
    println!();

    loop {
        weapon.tick(session.clock);
        display_status(&session, &weapon, player);

        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["quit"] | ["q"] => break,

            ["tick"] | ["t"] => {
                step(&mut session, &mut host, player);
            }

            ["run", n] => {
                let count: u32 = n.parse().unwrap_or(1);
                for _ in 0..count {
                    step(&mut session, &mut host, player);
                }
            }

            ["spawn", kind, x, z] => {
                let config = match *kind {
                    "ranged" => EnemyConfig::ranged_slime(),
                    _ => EnemyConfig::basic_slime(),
                };
                let position = Vec3::new(
                    x.parse().unwrap_or(0.0),
                    0.0,
                    z.parse().unwrap_or(0.0),
                );
                match session.spawn_enemy(config, position) {
                    Ok(id) => host.spawn_body(id, position),
                    Err(e) => println!("spawn failed: {}", e),
                }
            }

            ["player", x, z] => {
                player = Vec3::new(x.parse().unwrap_or(0.0), 0.0, z.parse().unwrap_or(0.0));
            }

            ["shoot"] => {
                fire_at_nearest(&mut session, &mut weapon, &mut weapon_rng, player);
            }

            ["reload"] | ["r"] => {
                if weapon.start_reload(session.clock) {
                    println!("reloading...");
                } else {
                    println!("cannot reload now");
                }
            }

            ["status"] | ["s"] => {
                for enemy in session.registry.iter() {
                    println!(
                        "  {:?}: {:?} at ({:.1}, {:.1}), health {}",
                        enemy.id,
                        enemy.state,
                        enemy.last_position.x,
                        enemy.last_position.z,
                        enemy.health
                    );
                }
            }

            _ => println!("unknown command"),
        }

        if session.is_cleared() {
            println!("\nAll slimes defeated - the warren is cleared!");
            break;
        }
    }

    Ok(())
}

/// One simulation step: tick the session, run the toy executor, show events
fn step(session: &mut Session, host: &mut DemoHost, player: Vec3) {
    let output = session.tick(DT, Some(player), host, &FlatPlane);
    host.accept(&output.motions);
    host.integrate(&output.motions, DT);

    for event in &output.events {
        println!("  [{:>4}] {}", event.tick, event.description);
        if let BehaviorEventKind::EnemySlain { enemy } = event.kind {
            host.despawn_body(enemy);
        }
    }
}

/// Resolve the shotgun against the demo's point-sized slimes
fn fire_at_nearest(
    session: &mut Session,
    weapon: &mut Weapon,
    rng: &mut ChaCha8Rng,
    player: Vec3,
) {
    let Some(aim_at) = session
        .registry
        .iter()
        .map(|e| e.last_position)
        .min_by(|a, b| {
            player
                .distance(a)
                .partial_cmp(&player.distance(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        println!("nothing to shoot at");
        return;
    };

    match weapon.try_fire(aim_at - player, session.clock, rng) {
        FireOutcome::Fired(rays) => {
            println!("BLAM ({})", weapon.ammo_display());
            let targets: Vec<(EnemyId, Vec3)> = session
                .registry
                .iter()
                .map(|e| (e.id, e.last_position))
                .collect();
            for ray in rays {
                // Point-target hit test: perpendicular distance to the ray
                for (id, enemy_position) in &targets {
                    let to_enemy = *enemy_position - player;
                    let along = to_enemy.dot(&ray.direction);
                    if along < 0.0 || along > ray.max_range {
                        continue;
                    }
                    let closest = player + ray.direction * along;
                    if closest.distance(enemy_position) <= 1.0 {
                        session.apply_damage(*id, ray.damage);
                        break;
                    }
                }
            }
        }
        FireOutcome::Dry => println!("click (reload with 'r')"),
        FireOutcome::NotReady => println!("not ready"),
    }
}

/// Display current simulation status
fn display_status(session: &Session, weapon: &Weapon, player: Vec3) {
    println!(
        "\n[tick {} | clock {:.1}s] slimes: {} | projectiles: {} | ammo: {} | player at ({:.1}, {:.1})",
        session.tick,
        session.clock,
        session.enemy_count(),
        session.projectiles.len(),
        weapon.ammo_display(),
        player.x,
        player.z
    );
}

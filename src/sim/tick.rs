//! Per-frame simulation tick
//!
//! One call per rendered frame. Phases run in a fixed order so that later
//! phases see the results of earlier ones within the same tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{farthest_corner, projectile_hits};
use super::combatant::{Combatant, CombatantId, Control};
use super::intent::{Aim, EnemyAi, Intent, IntentContext, IntentProvider, PlayerInput};
use super::projectile::{Projectile, Side};
use super::state::{GameEvent, GamePhase, GameState};
use crate::Bounds;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys, -1/0/1 per axis
    pub movement: Vec2,
    /// Pointer position to aim at
    pub aim_target: Option<Vec2>,
    /// Trigger is held (aiming)
    pub trigger_held: bool,
    /// Trigger was released this tick (fires a burst)
    pub trigger_released: bool,
    /// Restart from the game-over screen
    pub restart: bool,
    /// Idle/demo mode - the player is driven by the AI policy
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            log::info!("Restarting round (seed {})", state.seed);
            state.restart();
        }
        return;
    }

    state.time_ticks += 1;
    state.player.begin_tick();
    state.enemy.begin_tick();

    let bounds = state.tuning.arena;

    // Input application
    let player_intent = {
        let target = resolve(state.autopilot.target, &state.player, &state.enemy);
        decide(&state.player, target, &mut state.autopilot, input)
    };
    if apply_intent(&mut state.player, &player_intent, &bounds, &mut state.rng) {
        state.events.push(GameEvent::BurstStarted { side: Side::Player });
    }

    // Bookkeeping
    state.player.tick_ammo();
    state.enemy.tick_ammo();
    state.enemy_ai.cool_down();
    state.autopilot.cool_down();
    state.hit_notification_ticks = state.hit_notification_ticks.saturating_sub(1);

    // AI decision
    let enemy_intent = {
        let target = resolve(state.enemy_ai.target, &state.player, &state.enemy);
        decide(&state.enemy, target, &mut state.enemy_ai, input)
    };
    if apply_intent(&mut state.enemy, &enemy_intent, &bounds, &mut state.rng) {
        state.events.push(GameEvent::BurstStarted { side: Side::Enemy });
    }

    // Scheduler draining
    let spawned = state.player.tick_weapon();
    state.player_projectiles.extend(spawned);
    let spawned = state.enemy.tick_weapon();
    state.enemy_projectiles.extend(spawned);

    // Projectile advancement
    let carrier = state.player.carrier_velocity();
    for p in &mut state.player_projectiles {
        p.advance(&bounds, carrier);
    }
    let carrier = state.enemy.carrier_velocity();
    for p in &mut state.enemy_projectiles {
        p.advance(&bounds, carrier);
    }

    // Collision resolution
    resolve_player_hits(state);
    resolve_enemy_hits(state);

    // Round-state transition and cleanup
    state.player_projectiles.retain(|p| p.active);
    state.enemy_projectiles.retain(|p| p.active);

    if state.player.is_dead() && state.phase == GamePhase::Playing {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDefeated);
        log::info!(
            "Game over at tick {} ({} enemies defeated)",
            state.time_ticks,
            state.enemies_defeated
        );
    }
}

/// Look up a target handle among the live combatants
fn resolve<'a>(
    id: Option<CombatantId>,
    player: &'a Combatant,
    enemy: &'a Combatant,
) -> Option<&'a Combatant> {
    let id = id?;
    [player, enemy].into_iter().find(|c| c.id == id)
}

/// Ask the combatant's intent source what to do
///
/// Player-controlled combatants read the platform input unless idle mode hands
/// them to their AI.
fn decide(
    me: &Combatant,
    target: Option<&Combatant>,
    ai: &mut EnemyAi,
    input: &TickInput,
) -> Intent {
    let ctx = IntentContext { me, target, input };
    match me.control {
        Control::PlayerControlled if !input.idle_mode => PlayerInput.intent(&ctx),
        Control::PlayerControlled | Control::AiControlled => ai.intent(&ctx),
    }
}

/// Move, aim and maybe fire; true if a burst started
fn apply_intent<R: Rng>(
    c: &mut Combatant,
    intent: &Intent,
    bounds: &Bounds,
    rng: &mut R,
) -> bool {
    if intent.movement != Vec2::ZERO {
        c.move_by(intent.movement, bounds);
    }
    match intent.aim {
        Aim::Keep => {}
        Aim::Point(p) => c.set_aim(p),
        Aim::Direction(d) => c.set_aim_direction(d),
    }
    c.aiming = intent.aiming;
    intent.fire && c.start_shooting(rng)
}

/// Player bullets against the enemy
fn resolve_player_hits(state: &mut GameState) {
    let damage = state.player.burst.weapon().damage;
    for i in 0..state.player_projectiles.len() {
        if !projectile_hits(&state.player_projectiles[i], &state.enemy) {
            continue;
        }
        state.player_projectiles[i].active = false;

        let dead = state.enemy.take_damage(damage);
        state.events.push(GameEvent::Hit {
            target: Side::Enemy,
            damage,
            remaining: state.enemy.health.current,
        });
        log::debug!("Enemy hit for {} ({} left)", damage, state.enemy.health.current);

        if dead {
            let respawn = respawn_point(state);
            state.enemy.respawn_at(respawn);
            state.enemies_defeated += 1;
            state.events.push(GameEvent::EnemyDefeated { respawn });
            log::info!(
                "Enemy defeated ({} total), respawning at ({:.0}, {:.0})",
                state.enemies_defeated,
                respawn.x,
                respawn.y
            );
        }
    }
}

/// Enemy bullets against the player
fn resolve_enemy_hits(state: &mut GameState) {
    let damage = state.enemy.burst.weapon().damage;
    for p in &mut state.enemy_projectiles {
        if state.player.is_dead() {
            break;
        }
        if !projectile_hits(p, &state.player) {
            continue;
        }
        p.active = false;

        state.player.take_damage(damage);
        state.hit_notification_ticks = state.tuning.round.hit_notification_ticks;
        state.events.push(GameEvent::Hit {
            target: Side::Player,
            damage,
            remaining: state.player.health.current,
        });
        log::debug!("Player hit for {} ({} left)", damage, state.player.health.current);
    }
}

/// Random in-bounds spot at least the configured distance from the player
///
/// Falls back to the corner farthest from the player when sampling fails.
fn respawn_point(state: &mut GameState) -> Vec2 {
    let bounds = state.tuning.arena;
    let round = state.tuning.round;
    let radius = state.enemy.radius();
    let avoid = state.player.pos;

    let max = Vec2::new(bounds.width - radius, bounds.height - radius);
    if max.x >= radius && max.y >= radius {
        for _ in 0..round.respawn_attempts {
            let candidate = Vec2::new(
                state.rng.random_range(radius..=max.x),
                state.rng.random_range(radius..=max.y),
            );
            if candidate.distance(avoid) >= round.respawn_min_distance {
                return candidate;
            }
        }
    }

    log::warn!("No random respawn point found, using far corner");
    farthest_corner(&bounds, radius, avoid)
}

/// Spawn a projectile directly (debug and test helper)
pub fn inject_projectile(state: &mut GameState, projectile: Projectile) {
    match projectile.owner {
        Side::Player => state.player_projectiles.push(projectile),
        Side::Enemy => state.enemy_projectiles.push(projectile),
    }
}

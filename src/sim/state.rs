//! Round state and core simulation types
//!
//! Everything a round needs lives in `GameState`; a restart rebuilds it from
//! the same seed and tuning.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, CombatantId, Control};
use super::intent::EnemyAi;
use super::projectile::{Projectile, Side};
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player died; waiting for restart
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BurstStarted { side: Side },
    Hit { target: Side, damage: u32, remaining: u32 },
    EnemyDefeated { respawn: Vec2 },
    PlayerDefeated,
    Restarted,
}

/// Complete round state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Combatant,
    pub enemy: Combatant,
    /// Drives the enemy
    pub enemy_ai: EnemyAi,
    /// Drives the player in idle/demo mode
    pub autopilot: EnemyAi,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    /// Ticks left on the "hit" notification
    pub hit_notification_ticks: u32,
    pub enemies_defeated: u32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new round with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let player_id = CombatantId(1);
        let enemy_id = CombatantId(2);

        let player = Combatant::new(
            player_id,
            Side::Player,
            Control::PlayerControlled,
            tuning.player,
        );
        let enemy = Combatant::new(enemy_id, Side::Enemy, Control::AiControlled, tuning.enemy);
        let enemy_ai = EnemyAi::new(Some(player_id), &tuning.ai);
        let autopilot = EnemyAi::new(Some(enemy_id), &tuning.ai);

        log::info!("New round with seed {}", seed);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            enemy,
            enemy_ai,
            autopilot,
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            hit_notification_ticks: 0,
            enemies_defeated: 0,
            events: Vec::new(),
        }
    }

    /// Rebuild the round exactly as it started
    pub fn restart(&mut self) {
        *self = Self::new(self.seed, self.tuning.clone());
        self.events.push(GameEvent::Restarted);
    }

    /// Resolve a handle; None once nothing answers to it
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        [&self.player, &self.enemy].into_iter().find(|c| c.id == id)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.player_projectiles.iter().chain(self.enemy_projectiles.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_layout() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, state.tuning.player.spawn);
        assert_eq!(state.enemy.pos, state.tuning.enemy.spawn);
        assert_eq!(state.enemy_ai.target, Some(state.player.id));
        assert_eq!(state.autopilot.target, Some(state.enemy.id));
        assert_ne!(state.player.id, state.enemy.id);
    }

    #[test]
    fn test_combatant_lookup() {
        let state = GameState::new(1, Tuning::default());
        let player_id = state.player.id;
        assert_eq!(state.combatant(player_id).map(|c| c.side), Some(Side::Player));
        assert!(state.combatant(CombatantId(99)).is_none());
    }
}

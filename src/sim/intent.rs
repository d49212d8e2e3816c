//! Intent sourcing for combatants
//!
//! Each tick a combatant asks its provider what to do: where to move, where
//! to aim and whether to pull the trigger. The player's provider reads the
//! platform input; the enemy's runs the AI policy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, CombatantId};
use super::tick::TickInput;
use crate::tuning::AiConfig;
use crate::{direction_to, distance};

/// Aim request for this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Aim {
    /// Leave the current aim untouched
    #[default]
    Keep,
    /// Aim at a point (pointer position, target center)
    Point(Vec2),
    /// Aim along a direction
    Direction(Vec2),
}

/// What a combatant wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Desired displacement (units this tick)
    pub movement: Vec2,
    pub aim: Aim,
    /// Trigger held (aim indicator shown)
    pub aiming: bool,
    /// Start a burst
    pub fire: bool,
}

/// Read-only view a provider decides from
pub struct IntentContext<'a> {
    pub me: &'a Combatant,
    /// Resolved target, None when the handle no longer resolves
    pub target: Option<&'a Combatant>,
    pub input: &'a TickInput,
}

pub trait IntentProvider {
    /// Per-tick countdowns, run before any decision
    fn cool_down(&mut self) {}

    fn intent(&mut self, ctx: &IntentContext<'_>) -> Intent;
}

/// Intent straight from platform input
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput;

impl IntentProvider for PlayerInput {
    fn intent(&mut self, ctx: &IntentContext<'_>) -> Intent {
        let input = ctx.input;
        Intent {
            // Held keys give -1/0/1 per axis; diagonals are not normalized
            movement: input.movement * ctx.me.speed(),
            aim: input.aim_target.map(Aim::Point).unwrap_or_default(),
            aiming: input.trigger_held,
            fire: input.trigger_released,
        }
    }
}

/// Kite-at-range enemy policy
///
/// Closes in until the target is inside attack range, then holds position
/// and fires whenever the weapon and cooldown allow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyAi {
    /// Handle only; resolved every tick
    pub target: Option<CombatantId>,
    pub attack_range: f32,
    pub min_attack_cooldown: u32,
    /// Ticks until the next attack attempt is allowed
    pub cooldown: u32,
}

impl EnemyAi {
    pub fn new(target: Option<CombatantId>, config: &AiConfig) -> Self {
        Self {
            target,
            attack_range: config.attack_range,
            min_attack_cooldown: config.min_attack_cooldown,
            cooldown: 0,
        }
    }

    /// Center distance at which the AI stops closing in
    pub fn engage_distance(&self, me: &Combatant, target: &Combatant) -> f32 {
        self.attack_range - me.radius() - target.radius()
    }

    pub fn in_range(&self, me: &Combatant, target: &Combatant) -> bool {
        distance(me.pos, target.pos) <= self.engage_distance(me, target)
    }

    /// Every gate for starting a burst this tick
    pub fn can_attack(&self, me: &Combatant, target: &Combatant) -> bool {
        !me.is_shooting() && me.ammo.has_charge() && self.cooldown == 0 && self.in_range(me, target)
    }

    /// Step toward the target when out of range, otherwise stay put
    pub fn seek(&self, me: &Combatant, target: &Combatant) -> Vec2 {
        if self.in_range(me, target) {
            return Vec2::ZERO;
        }
        direction_to(me.pos, target.pos)
            .map(|dir| dir * me.speed())
            .unwrap_or(Vec2::ZERO)
    }
}

impl IntentProvider for EnemyAi {
    fn cool_down(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    fn intent(&mut self, ctx: &IntentContext<'_>) -> Intent {
        let Some(target) = ctx.target else {
            return Intent::default();
        };
        let me = ctx.me;

        let fire = self.can_attack(me, target);
        if fire {
            self.cooldown = self.min_attack_cooldown;
        }

        Intent {
            movement: self.seek(me, target),
            aim: Aim::Point(target.pos),
            aiming: false,
            fire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::combatant::Control;
    use crate::sim::projectile::Side;
    use crate::tuning::CombatantConfig;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pair(enemy_pos: Vec2) -> (Combatant, Combatant) {
        let player = Combatant::new(
            CombatantId(1),
            Side::Player,
            Control::PlayerControlled,
            CombatantConfig::player(),
        );
        let mut enemy = Combatant::new(
            CombatantId(2),
            Side::Enemy,
            Control::AiControlled,
            CombatantConfig::enemy(),
        );
        enemy.pos = enemy_pos;
        (player, enemy)
    }

    fn ai() -> EnemyAi {
        EnemyAi::new(Some(CombatantId(1)), &AiConfig::default())
    }

    #[test]
    fn test_player_input_scales_by_speed() {
        let (player, _) = pair(Vec2::ZERO);
        let input = TickInput {
            movement: Vec2::new(1.0, -1.0),
            aim_target: Some(Vec2::new(10.0, 10.0)),
            trigger_held: true,
            ..Default::default()
        };
        let ctx = IntentContext {
            me: &player,
            target: None,
            input: &input,
        };
        let intent = PlayerInput.intent(&ctx);
        assert_eq!(intent.movement, Vec2::new(5.0, -5.0));
        assert_eq!(intent.aim, Aim::Point(Vec2::new(10.0, 10.0)));
        assert!(intent.aiming);
        assert!(!intent.fire);
    }

    #[test]
    fn test_seeks_when_out_of_range() {
        // 400 units away, engage distance is 300 - 30 - 30 = 240
        let (player, enemy) = pair(Vec2::new(800.0, 300.0));
        let mut ai = ai();
        let input = TickInput::default();
        let ctx = IntentContext {
            me: &enemy,
            target: Some(&player),
            input: &input,
        };

        let intent = ai.intent(&ctx);
        assert_eq!(intent.movement, Vec2::new(-3.0, 0.0));
        assert_eq!(intent.aim, Aim::Point(player.pos));
        assert!(!intent.fire);
    }

    #[test]
    fn test_holds_and_fires_in_range() {
        let (player, enemy) = pair(Vec2::new(600.0, 300.0));
        let mut ai = ai();
        let input = TickInput::default();
        let ctx = IntentContext {
            me: &enemy,
            target: Some(&player),
            input: &input,
        };

        let intent = ai.intent(&ctx);
        assert_eq!(intent.movement, Vec2::ZERO);
        assert!(intent.fire);
        assert_eq!(ai.cooldown, ai.min_attack_cooldown);

        // Cooldown blocks the next attempt
        let intent = ai.intent(&ctx);
        assert!(!intent.fire);
    }

    #[test]
    fn test_cooldown_counts_down_to_zero() {
        let mut ai = ai();
        ai.cooldown = 2;
        ai.cool_down();
        ai.cool_down();
        ai.cool_down();
        assert_eq!(ai.cooldown, 0);
    }

    #[test]
    fn test_no_attack_while_shooting_or_empty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let (player, mut enemy) = pair(Vec2::new(600.0, 300.0));
        let ai = ai();

        assert!(enemy.start_shooting(&mut rng));
        assert!(!ai.can_attack(&enemy, &player));

        let (player, mut enemy) = pair(Vec2::new(600.0, 300.0));
        enemy.ammo = crate::sim::ammo::AmmoReservoir::with_charges(&[0.9, 0.0, 0.0], 0.005);
        assert!(!ai.can_attack(&enemy, &player));
    }

    #[test]
    fn test_missing_target_is_idle() {
        let (_, enemy) = pair(Vec2::new(600.0, 300.0));
        let mut ai = EnemyAi::new(None, &AiConfig::default());
        let input = TickInput::default();
        let ctx = IntentContext {
            me: &enemy,
            target: None,
            input: &input,
        };
        assert_eq!(ai.intent(&ctx), Intent::default());
    }
}

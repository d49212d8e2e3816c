//! Player and enemy circles
//!
//! Both sides share one data aggregate; a control tag records who sources
//! their intent (platform input or the enemy AI policy).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ammo::AmmoReservoir;
use super::burst::BurstScheduler;
use super::projectile::{Projectile, Side};
use crate::tuning::CombatantConfig;
use crate::{Bounds, direction_to, normalize_or_keep};

/// Stable handle for a combatant (never owns it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

/// Who decides what a combatant does each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    PlayerControlled,
    AiControlled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub side: Side,
    pub control: Control,
    pub pos: Vec2,
    /// Unit aim direction
    pub aim: Vec2,
    /// Trigger held, aim indicator visible
    pub aiming: bool,
    pub health: Health,
    pub ammo: AmmoReservoir,
    pub burst: BurstScheduler,
    /// Movement actually applied this tick (after bounds checks)
    pub last_move: Vec2,
    pub config: CombatantConfig,
}

impl Combatant {
    pub fn new(id: CombatantId, side: Side, control: Control, config: CombatantConfig) -> Self {
        Self {
            id,
            side,
            control,
            pos: config.spawn,
            aim: Vec2::X,
            aiming: false,
            health: Health::full(config.max_health),
            ammo: AmmoReservoir::new(&config.ammo),
            burst: BurstScheduler::new(side, config.weapon),
            last_move: Vec2::ZERO,
            config,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.config.speed
    }

    /// Aim at a point; ignored when the point is our own center
    pub fn set_aim(&mut self, target: Vec2) {
        if let Some(dir) = direction_to(self.pos, target) {
            self.aim = dir;
        }
    }

    /// Aim along a direction; ignored for zero-length input
    pub fn set_aim_direction(&mut self, dir: Vec2) {
        self.aim = normalize_or_keep(dir, self.aim);
    }

    /// Move by `delta`, keeping the whole circle inside `bounds`
    ///
    /// Each axis is checked on its own: an axis that would cross a wall is
    /// dropped, the other still applies. Returns the delta actually applied.
    pub fn move_by(&mut self, delta: Vec2, bounds: &Bounds) -> Vec2 {
        let radius = self.radius();
        let mut applied = Vec2::ZERO;

        let new_x = self.pos.x + delta.x;
        if bounds.fits_x(new_x, radius) {
            applied.x = delta.x;
            self.pos.x = new_x;
        }
        let new_y = self.pos.y + delta.y;
        if bounds.fits_y(new_y, radius) {
            applied.y = delta.y;
            self.pos.y = new_y;
        }

        self.last_move += applied;
        applied
    }

    /// Forget last tick's movement
    pub fn begin_tick(&mut self) {
        self.last_move = Vec2::ZERO;
    }

    pub fn is_shooting(&self) -> bool {
        self.burst.is_active()
    }

    /// Fire a burst along the current aim
    pub fn start_shooting<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.burst.begin_burst(self.aim, &mut self.ammo, rng)
    }

    pub fn tick_ammo(&mut self) {
        self.ammo.recharge_tick();
    }

    /// Release due shots from the current position
    pub fn tick_weapon(&mut self) -> Vec<Projectile> {
        self.burst.tick(self.pos, &mut self.ammo)
    }

    /// Velocity passed on to this combatant's projectiles
    pub fn carrier_velocity(&self) -> Vec2 {
        if self.config.projectiles_follow_shooter {
            self.last_move
        } else {
            Vec2::ZERO
        }
    }

    /// Apply damage; true when this hit (or an earlier one) left us dead
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health.current = self.health.current.saturating_sub(amount);
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.health.current == 0
    }

    pub fn health_ratio(&self) -> f32 {
        self.health.ratio()
    }

    /// Reappear at `pos` with full health and no burst in flight
    pub fn respawn_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.health = Health::full(self.config.max_health);
        self.burst.cancel(&mut self.ammo);
        self.aiming = false;
        self.last_move = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> Combatant {
        Combatant::new(
            CombatantId(1),
            Side::Player,
            Control::PlayerControlled,
            CombatantConfig::player(),
        )
    }

    #[test]
    fn test_default_aim_points_right() {
        assert_eq!(player().aim, Vec2::X);
    }

    #[test]
    fn test_set_aim_ignores_own_position() {
        let mut c = player();
        c.set_aim(c.pos + Vec2::new(0.0, -50.0));
        assert_eq!(c.aim, Vec2::new(0.0, -1.0));

        c.set_aim(c.pos);
        assert_eq!(c.aim, Vec2::new(0.0, -1.0));

        c.set_aim_direction(Vec2::ZERO);
        assert_eq!(c.aim, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_move_drops_blocked_axis_only() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut c = player();
        c.pos = Vec2::new(32.0, 300.0);

        // x would cross the left wall, y is free
        let applied = c.move_by(Vec2::new(-5.0, 5.0), &bounds);
        assert_eq!(applied, Vec2::new(0.0, 5.0));
        assert_eq!(c.pos, Vec2::new(32.0, 305.0));

        // Exactly touching the wall is allowed
        let applied = c.move_by(Vec2::new(-2.0, 0.0), &bounds);
        assert_eq!(applied, Vec2::new(-2.0, 0.0));
        assert_eq!(c.pos.x, 30.0);
    }

    #[test]
    fn test_take_damage_reports_death() {
        let mut c = player();
        assert!(!c.take_damage(10));
        assert!(!c.take_damage(10));
        assert_eq!(c.health.current, 80);
        assert!(!c.take_damage(0));
        assert!(c.take_damage(80));
        assert_eq!(c.health.current, 0);
        // Overkill saturates
        assert!(c.take_damage(50));
        assert_eq!(c.health.current, 0);
    }

    #[test]
    fn test_respawn_restores_and_cancels_burst() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = player();
        assert!(c.start_shooting(&mut rng));
        c.take_damage(100);

        c.respawn_at(Vec2::new(100.0, 100.0));
        assert_eq!(c.health.current, c.health.max);
        assert!(!c.is_shooting());
        assert!(!c.ammo.is_suspended());
        assert_eq!(c.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_carrier_velocity_follows_flag() {
        let bounds = Bounds::default();
        let mut c = player();
        c.move_by(Vec2::new(5.0, 0.0), &bounds);
        assert_eq!(c.carrier_velocity(), Vec2::new(5.0, 0.0));

        c.config.projectiles_follow_shooter = false;
        assert_eq!(c.carrier_velocity(), Vec2::ZERO);
    }
}

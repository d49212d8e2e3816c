//! Burst scheduling
//!
//! A burst is precomputed when the trigger fires: every shot gets its own
//! direction (aim plus random spread), a lateral column offset and a delay.
//! Shots alternate between a left and a right column; the right column is
//! held back by half the inter-shot delay, which interleaves the two streams.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ammo::AmmoReservoir;
use super::projectile::{Projectile, Side};
use crate::perpendicular;
use crate::tuning::WeaponConfig;

/// Lateral column a shot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Left,
    Right,
}

/// A shot waiting in the fire queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueuedShot {
    pub dir: Vec2,
    /// Ticks until the shot is released
    pub delay: u32,
    /// Offset from the shooter's center, perpendicular to the aim
    pub offset: Vec2,
    pub column: Column,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstScheduler {
    owner: Side,
    weapon: WeaponConfig,
    queue: Vec<QueuedShot>,
}

impl BurstScheduler {
    pub fn new(owner: Side, weapon: WeaponConfig) -> Self {
        Self {
            owner,
            weapon,
            queue: Vec::with_capacity(weapon.bullet_count as usize),
        }
    }

    pub fn weapon(&self) -> &WeaponConfig {
        &self.weapon
    }

    /// A burst is in progress while shots are queued
    pub fn is_active(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn queue(&self) -> &[QueuedShot] {
        &self.queue
    }

    /// Start a burst along `aim` (unit vector)
    ///
    /// Rejected while a burst is already running or when the reservoir has no
    /// full segment. Consumes one unit and suspends recharging on success.
    pub fn begin_burst<R: Rng>(
        &mut self,
        aim: Vec2,
        ammo: &mut AmmoReservoir,
        rng: &mut R,
    ) -> bool {
        if self.is_active() || self.weapon.bullet_count == 0 || !ammo.has_charge() {
            return false;
        }
        if !ammo.consume() {
            return false;
        }

        ammo.suspend();

        let perp = perpendicular(aim);
        let spread = self.weapon.spread;
        let delay = self.weapon.bullet_delay;

        for i in 0..self.weapon.bullet_count {
            let jitter = if spread > 0.0 {
                Vec2::new(
                    rng.random_range(-spread..=spread),
                    rng.random_range(-spread..=spread),
                )
            } else {
                Vec2::ZERO
            };
            let dir = (aim + jitter).try_normalize().unwrap_or(aim);

            let column = if i % 2 == 0 { Column::Left } else { Column::Right };
            let (side_factor, column_delay) = match column {
                Column::Left => (-0.5, delay * (i / 2)),
                Column::Right => (0.5, delay * (i / 2) + delay / 2),
            };

            self.queue.push(QueuedShot {
                dir,
                delay: column_delay,
                offset: perp * self.weapon.column_offset * side_factor,
                column,
            });
        }

        true
    }

    /// Release every due shot from `origin` and count the rest down
    ///
    /// Resumes recharging on the reservoir once the queue runs dry.
    pub fn tick(&mut self, origin: Vec2, ammo: &mut AmmoReservoir) -> Vec<Projectile> {
        if self.queue.is_empty() {
            return Vec::new();
        }

        let mut released = Vec::new();
        let owner = self.owner;
        let weapon = self.weapon;
        self.queue.retain_mut(|shot| {
            if shot.delay == 0 {
                released.push(Projectile::new(owner, origin + shot.offset, shot.dir, &weapon));
                false
            } else {
                shot.delay -= 1;
                true
            }
        });

        if self.queue.is_empty() {
            ammo.resume();
        }
        released
    }

    /// Drop any pending shots and let the reservoir recharge again
    pub fn cancel(&mut self, ammo: &mut AmmoReservoir) {
        self.queue.clear();
        ammo.resume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::AmmoConfig;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy_weapon() -> WeaponConfig {
        WeaponConfig {
            bullet_count: 12,
            bullet_delay: 10,
            column_offset: 15.0,
            spread: 0.0,
            ..WeaponConfig::default()
        }
    }

    fn setup(weapon: WeaponConfig) -> (BurstScheduler, AmmoReservoir, Pcg32) {
        (
            BurstScheduler::new(Side::Enemy, weapon),
            AmmoReservoir::new(&AmmoConfig::default()),
            Pcg32::seed_from_u64(7),
        )
    }

    #[test]
    fn test_twin_column_stagger() {
        let (mut burst, mut ammo, mut rng) = setup(enemy_weapon());
        let origin = Vec2::new(400.0, 300.0);
        assert!(burst.begin_burst(Vec2::X, &mut ammo, &mut rng));

        let mut left_ticks = Vec::new();
        let mut right_ticks = Vec::new();
        let mut tick = 0;
        while burst.is_active() {
            for p in burst.tick(origin, &mut ammo) {
                // Aim is +x, so the left column (perp * -0.5) sits above
                if p.pos.y < origin.y {
                    left_ticks.push(tick);
                } else {
                    right_ticks.push(tick);
                }
            }
            tick += 1;
            assert!(tick < 1000, "burst never drained");
        }

        assert_eq!(left_ticks.len(), 6);
        assert_eq!(right_ticks.len(), 6);
        assert_eq!(right_ticks[0] - left_ticks[0], 5);
        assert_eq!(left_ticks, vec![0, 10, 20, 30, 40, 50]);
        assert_eq!(right_ticks, vec![5, 15, 25, 35, 45, 55]);
    }

    #[test]
    fn test_column_offsets_are_perpendicular() {
        let (mut burst, mut ammo, mut rng) = setup(enemy_weapon());
        let aim = Vec2::new(0.0, 1.0);
        assert!(burst.begin_burst(aim, &mut ammo, &mut rng));

        for shot in burst.queue() {
            assert!((shot.offset.length() - 7.5).abs() < 1e-5);
            assert!(shot.offset.dot(aim).abs() < 1e-5);
            assert_eq!(shot.dir, aim);
        }
    }

    #[test]
    fn test_spread_keeps_unit_directions() {
        let weapon = WeaponConfig {
            spread: 0.2,
            ..enemy_weapon()
        };
        let (mut burst, mut ammo, mut rng) = setup(weapon);
        assert!(burst.begin_burst(Vec2::X, &mut ammo, &mut rng));
        for shot in burst.queue() {
            assert!((shot.dir.length() - 1.0).abs() < 1e-5);
            assert!(shot.dir.x > 0.9);
        }
    }

    #[test]
    fn test_no_overlapping_bursts() {
        let (mut burst, mut ammo, mut rng) = setup(enemy_weapon());
        assert!(burst.begin_burst(Vec2::X, &mut ammo, &mut rng));
        assert!(!burst.begin_burst(Vec2::X, &mut ammo, &mut rng));
        // Only the first burst paid for ammo
        assert_eq!(ammo.segments(), &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rejected_without_full_segment() {
        let (mut burst, _, mut rng) = setup(enemy_weapon());
        let mut ammo = AmmoReservoir::with_charges(&[0.6, 0.5, 0.0], 0.005);
        assert!(!burst.begin_burst(Vec2::X, &mut ammo, &mut rng));
        assert!(!burst.is_active());
        assert!(!ammo.is_suspended());
    }

    #[test]
    fn test_recharge_suspended_for_burst_duration() {
        let (mut burst, mut ammo, mut rng) = setup(enemy_weapon());
        assert!(burst.begin_burst(Vec2::X, &mut ammo, &mut rng));
        assert!(ammo.is_suspended());

        while burst.is_active() {
            ammo.recharge_tick();
            assert_eq!(ammo.segments()[2], 0.0);
            burst.tick(Vec2::ZERO, &mut ammo);
        }
        assert!(!ammo.is_suspended());
        ammo.recharge_tick();
        assert!(ammo.segments()[2] > 0.0);
    }

    #[test]
    fn test_cancel_clears_queue() {
        let (mut burst, mut ammo, mut rng) = setup(enemy_weapon());
        assert!(burst.begin_burst(Vec2::X, &mut ammo, &mut rng));
        burst.cancel(&mut ammo);
        assert_eq!(burst.pending(), 0);
        assert!(!ammo.is_suspended());
    }
}

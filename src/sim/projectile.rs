//! Projectiles released by a burst
//!
//! A projectile flies in a straight line until it has covered its maximum
//! distance or leaves the arena (padded by its own size).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::DISTANCE_EPSILON;
use crate::tuning::{Rgb, WeaponConfig};

/// Which combatant fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Side,
    pub pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    /// Units per tick
    pub speed: f32,
    /// Length along `dir` and width across it
    pub size: Vec2,
    pub color: Rgb,
    /// Launch point, carried along with the shooter when projectiles follow it
    pub origin: Vec2,
    /// Own displacement from `origin`
    pub flight: Vec2,
    pub max_distance: f32,
    pub distance_traveled: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(owner: Side, pos: Vec2, dir: Vec2, weapon: &WeaponConfig) -> Self {
        Self {
            owner,
            pos,
            dir,
            speed: weapon.bullet_speed,
            size: weapon.bullet_size,
            color: weapon.bullet_color,
            origin: pos,
            flight: Vec2::ZERO,
            max_distance: weapon.max_distance,
            distance_traveled: 0.0,
            active: true,
        }
    }

    /// Move one tick
    ///
    /// `carrier_velocity` is the shooter's applied movement this tick (zero
    /// when projectiles do not follow the shooter). Origin moves with it so
    /// the travel distance only counts the projectile's own flight.
    ///
    /// Flight is accumulated apart from the origin so arena-sized coordinates
    /// do not leak rounding into the range check.
    pub fn advance(&mut self, bounds: &Bounds, carrier_velocity: Vec2) {
        if !self.active {
            return;
        }

        self.origin += carrier_velocity;
        self.flight += self.dir * self.speed;
        self.pos = self.origin + self.flight;

        self.distance_traveled = self.distance_traveled.max(self.flight.length());

        if self.distance_traveled + DISTANCE_EPSILON >= self.max_distance {
            self.active = false;
            return;
        }

        if !bounds.contains_padded(self.pos, self.size) {
            self.active = false;
        }
    }

    /// Orientation for renderers (degrees, screen y down)
    pub fn heading_degrees(&self) -> f32 {
        (-self.dir.y).atan2(self.dir.x).to_degrees()
    }
}

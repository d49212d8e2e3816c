//! Burst Arena - combat simulation core for a top-down dodge trainer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ammo, bursts, projectiles, AI, round state)
//! - `tuning`: Data-driven weapon and AI balance
//! - `ui`: HUD and overlay layout (bars, game-over menu regions)
//! - `snapshot`: Read-only drawable state handed to the platform layer

pub mod sim;
pub mod snapshot;
pub mod tuning;
pub mod ui;

pub use snapshot::FrameSnapshot;
pub use tuning::{Difficulty, Tuning};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Length of the aim indicator, also the projectile range
    pub const AIM_INDICATOR_LENGTH: f32 = 300.0;
    pub const AIM_INDICATOR_WIDTH: f32 = 30.0;

    /// Snap tolerance for ammo charge arithmetic
    pub const CHARGE_EPSILON: f32 = 1e-4;

    /// Smallest arena side a radius-1 circle fits in
    pub const MIN_ARENA_SIDE: f32 = 2.0;

    /// Widest per-axis aim jitter a weapon may use
    pub const MAX_SPREAD: f32 = 10.0;

    /// Slack on the projectile range check for f32 drift
    pub const DISTANCE_EPSILON: f32 = 1e-2;
}

/// Axis-aligned play area anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: consts::ARENA_WIDTH,
            height: consts::ARENA_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if x keeps a circle of `radius` fully inside [0, width]
    #[inline]
    pub fn fits_x(&self, x: f32, radius: f32) -> bool {
        x - radius >= 0.0 && x + radius <= self.width
    }

    /// True if y keeps a circle of `radius` fully inside [0, height]
    #[inline]
    pub fn fits_y(&self, y: f32, radius: f32) -> bool {
        y - radius >= 0.0 && y + radius <= self.height
    }

    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        self.fits_x(center.x, radius) && self.fits_y(center.y, radius)
    }

    /// Point test against the bounds grown by `pad` on each side
    pub fn contains_padded(&self, point: Vec2, pad: Vec2) -> bool {
        point.x >= -pad.x
            && point.x <= self.width + pad.x
            && point.y >= -pad.y
            && point.y <= self.height + pad.y
    }

    /// Clamp a circle center so the whole circle stays inside
    pub fn clamp_circle(&self, center: Vec2, radius: f32) -> Vec2 {
        let max = Vec2::new(self.width - radius, self.height - radius).max(Vec2::splat(radius));
        center.clamp(Vec2::splat(radius), max)
    }
}

/// Unit direction from `from` toward `to`, None when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Normalize `v`, keeping `previous` when `v` has no usable length
#[inline]
pub fn normalize_or_keep(v: Vec2, previous: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(previous)
}

/// Left-hand perpendicular (-y, x) of a direction
#[inline]
pub fn perpendicular(dir: Vec2) -> Vec2 {
    dir.perp()
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

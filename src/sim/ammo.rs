//! Segmented, partially rechargeable ammo bar
//!
//! Segments recharge left to right, one segment at a time, and a shot drains
//! one full unit right to left so partial segments can combine into a shot.

use serde::{Deserialize, Serialize};

use crate::consts::CHARGE_EPSILON;
use crate::tuning::AmmoConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoReservoir {
    /// Charge per segment, each in [0, 1]
    segments: Vec<f32>,
    /// Charge added per tick to the segment being filled
    recharge_rate: f32,
    /// Recharge paused (owner is mid-burst)
    suspended: bool,
}

impl AmmoReservoir {
    /// A full reservoir
    pub fn new(config: &AmmoConfig) -> Self {
        Self {
            segments: vec![1.0; config.segments.max(1)],
            recharge_rate: config.recharge_rate,
            suspended: false,
        }
    }

    /// Build from explicit charges (clamped to [0, 1])
    pub fn with_charges(charges: &[f32], recharge_rate: f32) -> Self {
        Self {
            segments: charges.iter().map(|c| c.clamp(0.0, 1.0)).collect(),
            recharge_rate,
            suspended: false,
        }
    }

    pub fn segments(&self) -> &[f32] {
        &self.segments
    }

    /// Aggregate charge
    pub fn total(&self) -> f32 {
        self.segments.iter().sum()
    }

    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    /// True if any segment is full
    pub fn has_charge(&self) -> bool {
        self.segments.iter().any(|&c| c >= 1.0)
    }

    /// Draw one full unit, rightmost charge first
    ///
    /// Returns false and leaves every segment untouched when the aggregate
    /// charge is below one unit.
    pub fn consume(&mut self) -> bool {
        if self.total() + CHARGE_EPSILON < 1.0 {
            return false;
        }

        let mut remaining = 1.0_f32;
        for charge in self.segments.iter_mut().rev() {
            if remaining <= CHARGE_EPSILON {
                break;
            }
            if *charge <= 0.0 {
                continue;
            }
            let take = charge.min(remaining);
            *charge -= take;
            remaining -= take;
            if *charge < CHARGE_EPSILON {
                *charge = 0.0;
            }
        }
        true
    }

    /// Charge the leftmost non-full segment
    pub fn recharge_tick(&mut self) {
        if self.suspended {
            return;
        }
        let rate = self.recharge_rate;
        if let Some(charge) = self.segments.iter_mut().find(|c| **c < 1.0) {
            *charge += rate;
            if *charge >= 1.0 - CHARGE_EPSILON {
                *charge = 1.0;
            }
        }
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Per-segment fill for the HUD
    pub fn fill_ratios(&self) -> Vec<f32> {
        self.segments.clone()
    }
}

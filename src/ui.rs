//! HUD and overlay layout
//!
//! Pure geometry: where bars and menu regions go for a given arena and
//! combatant. Drawing them is the platform's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::sim::ammo::AmmoReservoir;
use crate::sim::combatant::Combatant;
use crate::tuning::Rgb;

/// Ammo bar geometry (one bar per segment, below the player)
pub const AMMO_BAR_WIDTH: f32 = 30.0;
pub const AMMO_BAR_HEIGHT: f32 = 8.0;
pub const AMMO_BAR_SPACING: f32 = 5.0;
pub const AMMO_BAR_OFFSET: f32 = 20.0;

/// Health bar geometry (above the combatant)
pub const HEALTH_BAR_WIDTH: f32 = 60.0;
pub const HEALTH_BAR_HEIGHT: f32 = 8.0;
pub const HEALTH_BAR_OFFSET: f32 = 20.0;

pub const MENU_BUTTON_WIDTH: f32 = 200.0;
pub const MENU_BUTTON_HEIGHT: f32 = 50.0;
pub const MENU_BUTTON_GAP: f32 = 20.0;

pub const HIT_NOTIFICATION_TEXT: &str = "Hit!";

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

/// Partially filled bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub rect: Rect,
    /// 0.0..=1.0, drawn from the left edge
    pub fill: f32,
    pub fill_color: Rgb,
    pub empty_color: Rgb,
}

impl Bar {
    /// Width of the filled part
    pub fn fill_width(&self) -> f32 {
        self.rect.size.x * self.fill.clamp(0.0, 1.0)
    }
}

/// One bar per ammo segment, centered under the combatant
pub fn ammo_bars(center: Vec2, radius: f32, ammo: &AmmoReservoir) -> Vec<Bar> {
    let count = ammo.capacity();
    if count == 0 {
        return Vec::new();
    }
    let total_width = AMMO_BAR_WIDTH * count as f32 + AMMO_BAR_SPACING * (count - 1) as f32;
    let start_x = center.x - total_width / 2.0;
    let y = center.y + radius + AMMO_BAR_OFFSET;

    ammo.fill_ratios()
        .into_iter()
        .enumerate()
        .map(|(i, fill)| Bar {
            rect: Rect::new(
                Vec2::new(start_x + i as f32 * (AMMO_BAR_WIDTH + AMMO_BAR_SPACING), y),
                Vec2::new(AMMO_BAR_WIDTH, AMMO_BAR_HEIGHT),
            ),
            fill,
            fill_color: Rgb::ORANGE,
            empty_color: Rgb::GRAY,
        })
        .collect()
}

/// Health bar centered above the combatant
pub fn health_bar(combatant: &Combatant) -> Bar {
    let pos = combatant.pos;
    Bar {
        rect: Rect::new(
            Vec2::new(
                pos.x - HEALTH_BAR_WIDTH / 2.0,
                pos.y - combatant.radius() - HEALTH_BAR_OFFSET,
            ),
            Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        ),
        fill: combatant.health_ratio(),
        fill_color: Rgb::RED,
        empty_color: Rgb::DARK_GRAY,
    }
}

/// What a click on the game-over screen asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    Restart,
    Quit,
}

/// Game-over overlay: two stacked buttons in the middle of the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverMenu {
    pub restart: Rect,
    pub quit: Rect,
}

impl GameOverMenu {
    pub fn new(arena: &Bounds) -> Self {
        let center = arena.center();
        let size = Vec2::new(MENU_BUTTON_WIDTH, MENU_BUTTON_HEIGHT);
        let step = (MENU_BUTTON_HEIGHT + MENU_BUTTON_GAP) / 2.0;
        Self {
            restart: Rect::centered(center - Vec2::new(0.0, step), size),
            quit: Rect::centered(center + Vec2::new(0.0, step), size),
        }
    }

    /// Button under a pointer position, if any
    pub fn action_at(&self, point: Vec2) -> Option<MenuAction> {
        if self.restart.contains(point) {
            Some(MenuAction::Restart)
        } else if self.quit.contains(point) {
            Some(MenuAction::Quit)
        } else {
            None
        }
    }
}

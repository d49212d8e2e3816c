//! Read-only frame snapshot handed to the platform layer
//!
//! Everything a renderer needs to draw one frame, with no references back
//! into the simulation. Serializable so headless runs can dump it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{AIM_INDICATOR_LENGTH, AIM_INDICATOR_WIDTH};
use crate::sim::combatant::Combatant;
use crate::sim::projectile::{Projectile, Side};
use crate::sim::state::{GamePhase, GameState};
use crate::tuning::Rgb;
use crate::ui::{self, Bar, GameOverMenu};
use crate::{Bounds, perpendicular};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub side: Side,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Aim orientation in degrees (screen y down)
    pub heading_degrees: f32,
}

impl CombatantView {
    fn from_combatant(c: &Combatant) -> Self {
        Self {
            side: c.side,
            pos: c.pos,
            radius: c.radius(),
            color: c.config.color,
            heading_degrees: (-c.aim.y).atan2(c.aim.x).to_degrees(),
        }
    }
}

/// Oriented bullet rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    /// Length along the heading, width across it
    pub size: Vec2,
    pub color: Rgb,
    pub heading_degrees: f32,
}

impl ProjectileView {
    fn from_projectile(p: &Projectile) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            color: p.color,
            heading_degrees: p.heading_degrees(),
        }
    }
}

/// Translucent strip from the player along the aim, shown while the trigger is held
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimIndicator {
    pub origin: Vec2,
    pub dir: Vec2,
    pub length: f32,
    pub width: f32,
    pub color: Rgb,
}

impl AimIndicator {
    pub fn new(origin: Vec2, dir: Vec2) -> Self {
        Self {
            origin,
            dir,
            length: AIM_INDICATOR_LENGTH,
            width: AIM_INDICATOR_WIDTH,
            color: Rgb::YELLOW,
        }
    }

    /// Quad corners, winding around the strip
    pub fn corners(&self) -> [Vec2; 4] {
        let end = self.origin + self.dir * self.length;
        let half = perpendicular(self.dir) * (self.width / 2.0);
        [self.origin + half, end + half, end - half, self.origin - half]
    }
}

/// Short text shown near the top of the arena after the player is hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub anchor: Vec2,
    pub color: Rgb,
    /// Ticks until it disappears
    pub ticks_left: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub arena: Bounds,
    pub enemies_defeated: u32,
    /// Player first, then the enemy
    pub combatants: Vec<CombatantView>,
    pub projectiles: Vec<ProjectileView>,
    pub health_bars: Vec<Bar>,
    /// Player ammo, one bar per segment
    pub ammo_bars: Vec<Bar>,
    pub aim_indicator: Option<AimIndicator>,
    pub hit_notification: Option<Notification>,
    pub game_over_menu: Option<GameOverMenu>,
}

impl FrameSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

impl GameState {
    /// Drawable state for the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let arena = self.tuning.arena;
        let player = &self.player;

        let hit_notification = (self.hit_notification_ticks > 0).then(|| Notification {
            text: ui::HIT_NOTIFICATION_TEXT.to_string(),
            anchor: Vec2::new(arena.width / 2.0, 40.0),
            color: Rgb::RED,
            ticks_left: self.hit_notification_ticks,
        });

        FrameSnapshot {
            phase: self.phase,
            tick: self.time_ticks,
            arena,
            enemies_defeated: self.enemies_defeated,
            combatants: [player, &self.enemy]
                .into_iter()
                .map(CombatantView::from_combatant)
                .collect(),
            projectiles: self.projectiles().map(ProjectileView::from_projectile).collect(),
            health_bars: vec![ui::health_bar(player), ui::health_bar(&self.enemy)],
            ammo_bars: ui::ammo_bars(player.pos, player.radius(), &player.ammo),
            aim_indicator: (player.aiming && self.phase == GamePhase::Playing)
                .then(|| AimIndicator::new(player.pos, player.aim)),
            hit_notification,
            game_over_menu: self.is_game_over().then(|| GameOverMenu::new(&arena)),
        }
    }
}

//! Data-driven game balance
//!
//! Every weapon, ammo, AI and round constant lives here so that Player and
//! Enemy are built from one explicit configuration rather than literals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::*;

/// RGB colour handed through to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const PURPLE: Rgb = Rgb(128, 0, 128);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const DARK_GRAY: Rgb = Rgb(64, 64, 64);
}

/// Burst weapon constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Bullets per burst, across both columns
    pub bullet_count: u32,
    /// Ticks between bullets in the same column
    pub bullet_delay: u32,
    /// Units per tick
    pub bullet_speed: f32,
    /// Length (along travel) and width of the bullet rectangle
    pub bullet_size: Vec2,
    pub bullet_color: Rgb,
    /// Max random offset added to each aim axis (0 = perfectly straight)
    pub spread: f32,
    /// Lateral distance between the left and right columns
    pub column_offset: f32,
    /// Travel distance before a bullet expires
    pub max_distance: f32,
    /// Health removed from the opposing combatant per hit
    pub damage: u32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            bullet_count: 12,
            bullet_delay: 5,
            bullet_speed: 10.0,
            bullet_size: Vec2::new(20.0, 8.0),
            bullet_color: Rgb::BLUE,
            spread: 0.0,
            column_offset: 15.0,
            max_distance: AIM_INDICATOR_LENGTH,
            damage: 10,
        }
    }
}

/// Segmented ammo bar constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoConfig {
    pub segments: usize,
    /// Charge added to one segment per tick
    pub recharge_rate: f32,
}

impl Default for AmmoConfig {
    fn default() -> Self {
        Self {
            segments: 3,
            recharge_rate: 0.005,
        }
    }
}

/// Per-combatant configuration, shared by Player and Enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantConfig {
    pub radius: f32,
    /// Units per tick
    pub speed: f32,
    pub color: Rgb,
    pub max_health: u32,
    /// Start (and restart) position
    pub spawn: Vec2,
    /// Bullets are carried along by this combatant's own movement
    pub projectiles_follow_shooter: bool,
    pub weapon: WeaponConfig,
    pub ammo: AmmoConfig,
}

impl Default for CombatantConfig {
    fn default() -> Self {
        Self::player()
    }
}

impl CombatantConfig {
    /// Player defaults: fast twin-column burst, bullets ride with the player
    pub fn player() -> Self {
        Self {
            radius: 30.0,
            speed: 5.0,
            color: Rgb::RED,
            max_health: 100,
            spawn: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            projectiles_follow_shooter: true,
            weapon: WeaponConfig::default(),
            ammo: AmmoConfig::default(),
        }
    }

    /// Enemy defaults: slower stagger with a little spread
    pub fn enemy() -> Self {
        Self {
            radius: 30.0,
            speed: 3.0,
            color: Rgb::PURPLE,
            max_health: 100,
            spawn: Vec2::new(ARENA_WIDTH - 100.0, 150.0),
            projectiles_follow_shooter: false,
            weapon: WeaponConfig {
                bullet_delay: 10,
                bullet_color: Rgb::GREEN,
                spread: 0.05,
                ..WeaponConfig::default()
            },
            ammo: AmmoConfig::default(),
        }
    }
}

/// Enemy AI parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Distance (center to center, before radii) the AI holds and fires from
    pub attack_range: f32,
    /// Ticks between attack attempts
    pub min_attack_cooldown: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Difficulty::Normal.ai_config()
    }
}

/// Round lifecycle parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Ticks the "hit" notification stays on screen
    pub hit_notification_ticks: u32,
    /// Minimum distance from the player for an enemy respawn
    pub respawn_min_distance: f32,
    /// Random placements tried before falling back to the far corner
    pub respawn_attempts: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            hit_notification_ticks: TICK_RATE,
            respawn_min_distance: 300.0,
            respawn_attempts: 64,
        }
    }
}

/// AI difficulty presets (only AI parameters change)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn ai_config(&self) -> AiConfig {
        match self {
            Difficulty::Easy => AiConfig {
                attack_range: AIM_INDICATOR_LENGTH,
                min_attack_cooldown: 120,
            },
            Difficulty::Normal => AiConfig {
                attack_range: AIM_INDICATOR_LENGTH,
                min_attack_cooldown: 60,
            },
            Difficulty::Hard => AiConfig {
                attack_range: AIM_INDICATOR_LENGTH,
                min_attack_cooldown: 30,
            },
        }
    }
}

/// Complete set of tunables for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: Bounds,
    pub player: CombatantConfig,
    pub enemy: CombatantConfig,
    pub ai: AiConfig,
    pub round: RoundConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena: Bounds::default(),
            player: CombatantConfig::player(),
            enemy: CombatantConfig::enemy(),
            ai: AiConfig::default(),
            round: RoundConfig::default(),
        }
    }
}

impl Tuning {
    /// Defaults with the AI parameters of a preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut tuning = Self::default();
        tuning.apply_difficulty(difficulty);
        tuning
    }

    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.ai = difficulty.ai_config();
    }

    /// Parse tunables as overrides on top of the defaults
    ///
    /// Overrides are merged field by field, so a partial `enemy` object keeps
    /// the enemy defaults for everything it does not mention.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge_json(&mut merged, overrides);
        serde_json::from_value(merged)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse tunables, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Repair values the simulation cannot run with
    pub fn sanitized(mut self) -> Self {
        let Bounds { width, height } = self.arena;
        let usable = width.is_finite()
            && height.is_finite()
            && width >= MIN_ARENA_SIDE
            && height >= MIN_ARENA_SIDE;
        if !usable {
            log::warn!("Arena {:?} is degenerate, using default", self.arena);
            self.arena = Bounds::default();
        }
        let arena = self.arena;
        sanitize_combatant("player", &mut self.player, arena);
        sanitize_combatant("enemy", &mut self.enemy, arena);
        if !(self.ai.attack_range.is_finite() && self.ai.attack_range >= 0.0) {
            log::warn!("Attack range {} invalid, using default", self.ai.attack_range);
            self.ai.attack_range = AiConfig::default().attack_range;
        }
        let min_distance = self.round.respawn_min_distance;
        if !(min_distance.is_finite() && min_distance >= 0.0) {
            log::warn!("Respawn distance {} invalid, clamped to 0", min_distance);
            self.round.respawn_min_distance = 0.0;
        }
        if self.round.respawn_attempts == 0 {
            log::warn!("Respawn attempts 0, set to 1");
            self.round.respawn_attempts = 1;
        }
        self
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    use serde_json::Value;
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn sanitize_combatant(name: &str, config: &mut CombatantConfig, arena: Bounds) {
    let max_radius = (arena.width.min(arena.height) / 2.0).max(1.0);
    if !(config.radius.is_finite() && config.radius > 0.0 && config.radius <= max_radius) {
        log::warn!("{} radius {} out of range, clamped", name, config.radius);
        config.radius = if config.radius.is_nan() {
            1.0
        } else {
            config.radius.clamp(1.0, max_radius)
        };
    }
    if !(config.speed.is_finite() && config.speed >= 0.0) {
        log::warn!("{} speed {} invalid, set to 0", name, config.speed);
        config.speed = 0.0;
    }
    if config.max_health == 0 {
        log::warn!("{} max_health 0, set to 1", name);
        config.max_health = 1;
    }
    if !config.spawn.is_finite() {
        log::warn!("{} spawn {:?} invalid, using arena center", name, config.spawn);
        config.spawn = arena.center();
    }
    if !arena.contains_circle(config.spawn, config.radius) {
        log::warn!("{} spawn {:?} outside arena, clamped", name, config.spawn);
        config.spawn = arena.clamp_circle(config.spawn, config.radius);
    }
    if config.ammo.segments == 0 {
        log::warn!("{} ammo segments 0, set to 1", name);
        config.ammo.segments = 1;
    }
    if !(config.ammo.recharge_rate.is_finite() && config.ammo.recharge_rate >= 0.0) {
        log::warn!("{} recharge rate invalid, set to 0", name);
        config.ammo.recharge_rate = 0.0;
    }

    let weapon = &mut config.weapon;
    let defaults = WeaponConfig::default();
    if !(weapon.spread.is_finite() && weapon.spread >= 0.0) {
        log::warn!("{} spread {} invalid, set to 0", name, weapon.spread);
        weapon.spread = 0.0;
    } else if weapon.spread > MAX_SPREAD {
        log::warn!("{} spread {} too wide, clamped", name, weapon.spread);
        weapon.spread = MAX_SPREAD;
    }
    if !(weapon.bullet_speed.is_finite() && weapon.bullet_speed >= 0.0) {
        log::warn!("{} bullet speed {} invalid, using default", name, weapon.bullet_speed);
        weapon.bullet_speed = defaults.bullet_speed;
    }
    if !(weapon.max_distance.is_finite() && weapon.max_distance > 0.0) {
        log::warn!("{} max distance {} invalid, using default", name, weapon.max_distance);
        weapon.max_distance = AIM_INDICATOR_LENGTH;
    }
    if !(weapon.bullet_size.is_finite() && weapon.bullet_size.cmpge(Vec2::ZERO).all()) {
        log::warn!("{} bullet size {:?} invalid, using default", name, weapon.bullet_size);
        weapon.bullet_size = defaults.bullet_size;
    }
    if !weapon.column_offset.is_finite() {
        log::warn!("{} column offset {} invalid, using default", name, weapon.column_offset);
        weapon.column_offset = defaults.column_offset;
    }
}

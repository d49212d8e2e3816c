//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (player before enemy, projectiles in spawn order)
//! - No rendering or platform dependencies

pub mod ammo;
pub mod burst;
pub mod collision;
pub mod combatant;
pub mod intent;
pub mod projectile;
pub mod state;
pub mod tick;

pub use ammo::AmmoReservoir;
pub use burst::{BurstScheduler, Column, QueuedShot};
pub use collision::{farthest_corner, point_in_circle, projectile_hits};
pub use combatant::{Combatant, CombatantId, Control, Health};
pub use intent::{Aim, EnemyAi, Intent, IntentContext, IntentProvider, PlayerInput};
pub use projectile::{Projectile, Side};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, inject_projectile, tick};

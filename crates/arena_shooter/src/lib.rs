//! # Arena Shooter
//!
//! Third-person arena shooter on top of `arena_engine`: a physics-driven
//! avatar, seeking hostiles spawned in a ring around it, short-lived
//! projectiles and a chase camera, all advanced by a fixed-timestep loop.
//!
//! ```rust
//! use arena_engine::prelude::*;
//! use arena_shooter::{Game, GameConfig, LogHud};
//!
//! let mut game = Game::new(
//!     GameConfig::default(),
//!     InputManager::new(),
//!     LogHud::new(),
//!     HeadlessRenderer::new(),
//!     Viewport::new(1280, 720),
//! )?;
//! game.step(1.0 / 60.0);
//! assert!(game.is_running());
//! # Ok::<(), arena_shooter::GameError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chase_camera;
pub mod config;
pub mod enemy;
pub mod enemy_manager;
pub mod entity;
pub mod error;
pub mod game;
pub mod hud;
pub mod player;
pub mod projectile;

#[cfg(test)]
mod tests;

pub use chase_camera::ChaseCamera;
pub use config::GameConfig;
pub use enemy::Enemy;
pub use enemy_manager::EnemyManager;
pub use entity::{Arena, EntityHandles};
pub use error::{GameError, GameResult};
pub use game::Game;
pub use hud::{Hud, LogHud};
pub use player::Player;
pub use projectile::Projectile;

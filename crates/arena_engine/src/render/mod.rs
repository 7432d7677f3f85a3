//! Rendering abstractions
//!
//! Only the pieces the simulation touches live here: a perspective camera
//! and a [`Renderer`] trait that draws a [`SceneGraph`](crate::scene::SceneGraph)
//! from that camera. A windowed backend plugs in behind the same trait as
//! [`HeadlessRenderer`] does.

pub mod camera;
pub mod headless;

pub use camera::{Camera, Viewport};
pub use headless::{FrameStats, HeadlessRenderer, Renderer};

//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and heading helpers
//! - Frame timing and the fixed-timestep accumulator
//! - Logging setup

pub mod logging;
pub mod math;
pub mod time;

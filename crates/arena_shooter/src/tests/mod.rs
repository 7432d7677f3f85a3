//! Whole-session scenarios

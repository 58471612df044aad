//! Bracketed scalar root finding for psychroflow.
//!
//! This crate provides a Brent-method solver for 1-D transcendental equations.
//! Property correlations in px-air that have no closed-form inverse (saturation
//! pressure, wet-bulb temperature, dry-bulb recovery) and the cooling-coil
//! balance in px-process all solve through this crate.
//!
//! A [`Brent`] instance carries per-call iteration state (current bracket,
//! evaluation count). Construct a fresh instance, or call [`Brent::reset`],
//! for every independent solve; a shared instance must never be used across
//! concurrent or unrelated sequential solves.

pub mod bracket;
pub mod brent;
pub mod error;

pub use bracket::{expand_bracket, Bracket, BracketSearch};
pub use brent::{Brent, BrentConfig, RootResult};
pub use error::{SolverError, SolverResult};

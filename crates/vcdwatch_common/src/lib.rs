//! Shared four-state value types used by the vcdwatch crates.
//!
//! A VCD scalar value change is exactly an IEEE 1164 [`Logic`] value, and a
//! VCD binary vector change is exactly a [`LogicVec`] — both are defined here
//! so that `vcdwatch_core`'s value model and its consumers share one
//! representation instead of each re-deriving 4-state arithmetic.

#![warn(missing_docs)]

pub mod logic;
pub mod logic_vec;

pub use logic::Logic;
pub use logic_vec::LogicVec;

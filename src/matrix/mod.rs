//! Matrix container
//!
//! This module provides the [`Matrix`] type, its [`Shape`], and the pure
//! factory functions that build new matrices.

mod core;
mod display;
pub mod factory;
mod shape;

pub use core::Matrix;
pub use factory::{
    diag, horizontal_merge, identity, nan, ones, random, random_seeded, vertical_merge, zeros,
};
pub use shape::Shape;

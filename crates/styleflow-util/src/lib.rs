#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Shared utilities for styleflow.
//!
//! This crate provides pure helper functions with no logging/tracing dependencies.

pub mod fs;
pub mod hash;

//! Traits for option persistence
//!
//! This module contains the trait that every option backing store implements.

pub mod core;

pub use core::OptionStore;

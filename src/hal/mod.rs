//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits defined in
//! [`crate::traits`] and of `embedded_graphics::DrawTarget` for desktop
//! development.
//!
//! # Available Implementations
//!
//! - `mock`: Instrumented panel and host mocks for tests and the simulator

pub mod mock;

pub use mock::*;

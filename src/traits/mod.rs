//! Trait definitions for the host boundary, theming and compositing.
//!
//! This module defines the abstractions that allow tickface to:
//! - Run on different display technologies (buffered, layered, direct)
//! - Take time and status data from any host
//! - Take colors from an external settings store
//!
//! # Submodules
//!
//! - `compositor`: The [`Compositor`] trait and capability descriptors
//! - `host`: Clock readings, status indicators, and their sources
//! - `theme`: The [`ThemeSource`] trait
//!
//! # Compositors
//!
//! The built-in implementations live in [`crate::compositor`]:
//!
//! - [`BufferedCompositor`](crate::compositor::BufferedCompositor): one off-screen bitmap
//! - [`LayeredCompositor`](crate::compositor::LayeredCompositor): three layers
//! - [`DirectCompositor`](crate::compositor::DirectCompositor): no off-screen memory

pub mod compositor;
pub mod host;
pub mod theme;

pub use compositor::*;
pub use host::*;
pub use theme::*;

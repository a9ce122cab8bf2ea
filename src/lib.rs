//! # tickface
//!
//! Rendering core of an analog watch face for small round displays, built
//! to fit a tight per-second drawing budget.
//!
//! ## Features
//!
//! - **Precomputed geometry**: Shape table and a 60-entry second-hand cache
//!   built once at startup; the per-second path is an array lookup
//! - **Three compositors**: Off-screen bitmap, layer stack, or direct
//!   drawing, selected by type parameter
//! - **Power-aware dispatch**: Full redraw once per minute, incremental
//!   second hand when the device allows it, minute-only otherwise
//! - **Wire hands**: Outline-only hour/minute hands for a few ticks after a
//!   touch-and-hold
//! - **Status indicators**: Battery, connection, notifications, alarm, date
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `geometry`, `rotation`, `cache` - Shape table, rotation, second-hand cache
//! - `layout` - Everything derived from the screen size
//! - `painter` - What the face looks like, on any `DrawTarget`
//! - `compositor` - How the face reaches the display
//! - `state`, `face` - The tick dispatcher
//! - `traits` - Host boundary and compositor contract
//! - `hal` - Mock panel and host sources for tests and the simulator
//!
//! ## Example
//!
//! ```rust
//! use tickface::{
//!     compositor::BufferedCompositor,
//!     config::FaceConfig,
//!     frame::FrameInputs,
//!     hal::{MockClock, MockPanel, MockStatus},
//!     palette::StaticTheme,
//!     ClockReading, WatchFace,
//! };
//!
//! let config = FaceConfig::default();
//! let mut face = WatchFace::<BufferedCompositor>::new(&config).unwrap();
//! let mut panel = MockPanel::new(config.display.size());
//!
//! let theme = StaticTheme::new(&config.theme);
//! let status = MockStatus::new().with_battery(80).with_day(19);
//! let mut clock = MockClock::new(ClockReading::new(10, 8, 0));
//!
//! // Host loop: one call per second
//! for _ in 0..3 {
//!     let frame = FrameInputs::gather(&theme, &clock, &status, true);
//!     face.on_update(&mut panel, &frame).unwrap();
//!     clock.advance(1);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Per-second second-hand cache.
pub mod cache;
/// Built-in compositors.
pub mod compositor;
/// Face configuration and validation.
pub mod config;
/// The tick dispatcher.
pub mod face;
/// Per-tick input snapshot.
pub mod frame;
/// Shape definitions and the shape coordinate table.
pub mod geometry;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Screen layout computed once at startup.
pub mod layout;
/// Face painting shared by every compositor.
pub mod painter;
/// Color roles, palettes and the built-in theme.
pub mod palette;
/// Point rotation about the clock center.
pub mod rotation;
/// Dispatcher state carried between ticks.
pub mod state;
/// Off-screen bitmaps and layers.
pub mod surface;
/// Host boundary and compositor traits.
pub mod traits;

// Re-exports for convenience
pub use compositor::{BufferedCompositor, DirectCompositor, LayeredCompositor};
pub use config::{ConfigError, FaceConfig};
pub use face::{TickOutcome, WatchFace};
pub use frame::FrameInputs;
pub use layout::FaceLayout;
pub use palette::{ColorRole, Palette, StaticTheme};
pub use state::{PowerState, RenderState};
pub use traits::{
    ClockReading, Compositor, CompositorKind, HandStyle, Indicators, StatusSource, ThemeSource,
    WallClock,
};

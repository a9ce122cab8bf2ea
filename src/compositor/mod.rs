//! Built-in compositors.
//!
//! Each type implements [`Compositor`](crate::traits::Compositor) for one
//! device capability tier. Pick one as the type parameter of
//! [`WatchFace`](crate::WatchFace):
//!
//! ```rust
//! use tickface::compositor::{BufferedCompositor, DirectCompositor, LayeredCompositor};
//! use tickface::config::FaceConfig;
//! use tickface::traits::Compositor;
//! use tickface::WatchFace;
//!
//! let config = FaceConfig::default();
//! let buffered = WatchFace::<BufferedCompositor>::new(&config).unwrap();
//! let layered = WatchFace::<LayeredCompositor>::new(&config).unwrap();
//! let direct = WatchFace::<DirectCompositor>::new(&config).unwrap();
//!
//! assert!(BufferedCompositor::LOW_POWER_SECONDS);
//! assert!(LayeredCompositor::LOW_POWER_SECONDS);
//! assert!(!DirectCompositor::LOW_POWER_SECONDS);
//! # let _ = (buffered, layered, direct);
//! ```

mod buffered;
mod direct;
mod layered;

pub use buffered::BufferedCompositor;
pub use direct::DirectCompositor;
pub use layered::LayeredCompositor;

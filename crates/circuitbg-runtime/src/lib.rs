//! # circuitbg Runtime
//!
//! Keeps the background in step with the viewport. Resize notifications are
//! debounced (250ms by default, trailing edge); when the viewport settles the
//! surface is resized and the whole frame is replanned and repainted.
//!
//! [`Background`] is clock-agnostic and can be driven by hand with explicit
//! instants. [`driver`] runs it on tokio.

pub mod driver;
pub mod host;
pub mod orchestrator;
pub mod scheduler;

pub use driver::{run, spawn, ResizeNotifier};
pub use host::{HeadlessHost, HostAttachment, RasterProvider, SurfaceProvider, ViewportOracle};
pub use orchestrator::{Background, BackgroundOptions, RedrawOutcome};
pub use scheduler::{DebounceScheduler, RedrawState, DEFAULT_DEBOUNCE};

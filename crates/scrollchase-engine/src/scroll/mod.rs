//! Target-chasing scroll animation
//!
//! A cycle chases a target that an [`OffsetProvider`](crate::OffsetProvider)
//! recomputes on every frame. Each change of target opens an eased segment per
//! affected axis; segments are summed, so a late jump is absorbed smoothly
//! instead of snapping or restarting the clock.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (cosine in-out, cubic, quintic, exponential)
//! - `timing` - Time calculation utilities (clamped progress, segment budget)
//! - `segment` - One eased ramp contributing a delta to one axis
//! - `config` - Configuration types and defaults (re-exported from scrollchase-core)
//!
//! ## L3 Molecular Layer
//! - `accumulator` - Per-axis sum of segments
//! - `controller` - Cycle lifecycle, convergence and completion reporting
//!
//! # Usage
//!
//! ```ignore
//! use scrollchase_engine::{ManualFrameClock, ScrollController};
//!
//! let clock = ManualFrameClock::new();
//! let mut controller = ScrollController::with_defaults(Box::new(clock.clone()));
//!
//! controller.start_scrolling(&provider, &surface, true, None);
//!
//! // On every display refresh while the clock runs
//! controller.on_frame(frame_delta);
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod segment;
pub mod timing;

// L3 Molecular Layer
pub mod accumulator;
pub mod controller;

// Re-exports for convenient access
pub use accumulator::AxisAccumulator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use controller::{Completion, FrameStatus, Interruption, Phase, ScrollController, ScrollOutcome};
pub use easing::{EasingType, EasingTypeExt};
pub use segment::TargetSegment;

pub mod clock;
pub mod host;
pub mod scroll;
pub mod surface;

pub use clock::{FrameClock, ManualFrameClock};
pub use host::ScrollHost;
pub use scroll::{
    Completion, EasingType, FrameStatus, Interruption, Phase, ScrollConfig, ScrollController,
    ScrollOutcome,
};
pub use surface::{OffsetProvider, ScrollSurface, SurfaceHandle};

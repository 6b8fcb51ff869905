//! Display refresh scheduling
//!
//! A [`FrameClock`] only decides whether frames are being delivered. The host's
//! display-link glue forwards each refresh to
//! [`ScrollController::on_frame`](crate::scroll::ScrollController::on_frame)
//! with the time elapsed since the previous one while the clock runs.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::scroll::{FrameStatus, ScrollController};

pub trait FrameClock {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

#[derive(Debug, Default)]
struct ClockState {
    running: Cell<bool>,
    starts: Cell<u32>,
    stops: Cell<u32>,
}

/// Clock advanced explicitly by its owner, for tests and headless drivers
///
/// Clones share state, so a clone kept outside the controller observes
/// the controller's start/stop requests.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameClock {
    state: Rc<ClockState>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_count(&self) -> u32 {
        self.state.starts.get()
    }

    pub fn stop_count(&self) -> u32 {
        self.state.stops.get()
    }
}

impl FrameClock for ManualFrameClock {
    fn start(&mut self) {
        self.state.running.set(true);
        self.state.starts.set(self.state.starts.get() + 1);
    }

    fn stop(&mut self) {
        self.state.running.set(false);
        self.state.stops.set(self.state.stops.get() + 1);
    }

    fn is_running(&self) -> bool {
        self.state.running.get()
    }
}

/// Deliver fixed-length frames while `clock` runs, at most `max_frames`
///
/// Returns the number of frames delivered.
pub fn drive(
    controller: &mut ScrollController,
    clock: &ManualFrameClock,
    frame: Duration,
    max_frames: u32,
) -> u32 {
    let mut frames = 0;
    while clock.is_running() && frames < max_frames {
        frames += 1;
        if let FrameStatus::Finished(_) | FrameStatus::Idle = controller.on_frame(frame) {
            break;
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let observer = ManualFrameClock::new();
        let mut clock: Box<dyn FrameClock> = Box::new(observer.clone());

        assert!(!observer.is_running());
        clock.start();
        assert!(observer.is_running());
        clock.stop();
        assert!(!observer.is_running());
        assert_eq!(observer.start_count(), 1);
        assert_eq!(observer.stop_count(), 1);
    }

    #[test]
    fn test_drive_idle_controller() {
        let clock = ManualFrameClock::new();
        let mut controller = ScrollController::with_defaults(Box::new(clock.clone()));
        assert_eq!(drive(&mut controller, &clock, Duration::from_millis(16), 10), 0);
    }
}

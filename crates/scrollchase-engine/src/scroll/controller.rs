//! L3 Molecular Layer: Target-chasing scroll controller
//!
//! Combines segments, accumulators and the frame clock into one bounded
//! animation cycle per `start_scrolling` call.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use scrollchase_core::{Axis, Point};
use tracing::{debug, trace, warn};

use super::accumulator::AxisAccumulator;
use super::config::{ScrollConfig, ScrollConfigExt};
use crate::clock::FrameClock;
use crate::surface::{OffsetProvider, ScrollSurface, SurfaceHandle};

/// Why a cycle ended without reaching its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// The surface was dropped
    SurfaceDropped,
    /// The offset provider was dropped
    ProviderDropped,
    /// A touch or drag began on the surface
    UserInteraction,
    /// `stop_scrolling` was called
    Stopped,
    /// A newer `start_scrolling` call replaced the cycle
    Superseded,
    /// The non-animated path kept moving past its iteration cap
    SettleLimit,
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Interruption::SurfaceDropped => "surface dropped",
            Interruption::ProviderDropped => "provider dropped",
            Interruption::UserInteraction => "user interaction",
            Interruption::Stopped => "stopped",
            Interruption::Superseded => "superseded",
            Interruption::SettleLimit => "settle limit reached",
        };
        f.write_str(reason)
    }
}

/// Terminal result of a cycle, reported exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    Completed,
    Interrupted(Interruption),
}

impl ScrollOutcome {
    #[inline]
    pub fn completed(&self) -> bool {
        matches!(self, ScrollOutcome::Completed)
    }
}

impl fmt::Display for ScrollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollOutcome::Completed => f.write_str("completed"),
            ScrollOutcome::Interrupted(reason) => write!(f, "interrupted ({})", reason),
        }
    }
}

/// Called once when a cycle ends; the surface is `None` if it was dropped
pub type Completion = Box<dyn FnOnce(Option<SurfaceHandle>, ScrollOutcome)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scrolling,
    /// Terminal transition in progress
    ///
    /// Held only while `finish` stops the clock and clears the cycle. The
    /// phase is back to `Idle` before completion runs, so callers never see it.
    Completing,
}

/// Result of delivering one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// No animated cycle was active; the frame was ignored
    Idle,
    /// The cycle wrote an offset and wants another frame
    Continue,
    /// The cycle ended on this frame
    Finished(ScrollOutcome),
}

/// What a retarget check did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retarget {
    NoTarget,
    Unchanged,
    Appended,
}

/// State of the active cycle, dropped on any terminal transition
struct Cycle {
    provider: Weak<dyn OffsetProvider>,
    surface: Weak<RefCell<dyn ScrollSurface>>,
    start_offset: Point,
    current_target: Point,
    elapsed: Duration,
    horizontal: AxisAccumulator,
    vertical: AxisAccumulator,
    completion: Option<Completion>,
    /// The fully eased-in value has been written once
    settled_written: bool,
}

impl Cycle {
    fn accumulator(&self, axis: Axis) -> &AxisAccumulator {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn accumulator_mut(&mut self, axis: Axis) -> &mut AxisAccumulator {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    fn is_settled(&self) -> bool {
        self.horizontal.is_settled(self.elapsed) && self.vertical.is_settled(self.elapsed)
    }

    fn offset_now(&self, config: &ScrollConfig) -> Point {
        let value = Point::new(
            self.horizontal.value_at(self.elapsed, config.easing),
            self.vertical.value_at(self.elapsed, config.easing),
        );
        self.start_offset + value
    }

    /// Ask the provider for the target and open a segment per drifted axis
    fn retarget(&mut self, config: &ScrollConfig) -> Result<Retarget, Interruption> {
        let provider = self
            .provider
            .upgrade()
            .ok_or(Interruption::ProviderDropped)?;

        let Some(target) = provider.target_offset(self.start_offset) else {
            return Ok(Retarget::NoTarget);
        };

        let difference = target - self.current_target;
        let start = self.elapsed;
        let duration = config.segment_duration_at(start);
        let mut result = Retarget::Unchanged;

        for axis in Axis::ALL {
            let delta = difference.get(axis);
            if delta != 0.0 {
                self.accumulator_mut(axis).append(delta, start, duration);
                debug!(
                    "Retarget {} by {:.2} at {:?} over {:?}",
                    axis, delta, start, duration
                );
                result = Retarget::Appended;
            }
        }

        self.current_target = target;
        Ok(result)
    }
}

/// Scroll controller chasing a moving target
///
/// Owned by whoever owns the surface (see [`ScrollHost`](crate::ScrollHost)).
/// Holds the provider and surface weakly and treats their disappearance as an
/// interruption. Single-threaded: all calls come from the rendering thread.
pub struct ScrollController {
    config: ScrollConfig,
    clock: Box<dyn FrameClock>,
    phase: Phase,
    cycle: Option<Cycle>,
}

impl fmt::Debug for ScrollController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollController")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("elapsed", &self.elapsed())
            .field("current_target", &self.current_target())
            .finish()
    }
}

impl ScrollController {
    /// Create a controller; an invalid `config` is replaced by the defaults
    pub fn new(config: ScrollConfig, clock: Box<dyn FrameClock>) -> Self {
        Self {
            config: checked(config),
            clock,
            phase: Phase::Idle,
            cycle: None,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(clock: Box<dyn FrameClock>) -> Self {
        Self::new(ScrollConfig::default(), clock)
    }

    /// Update configuration; an active cycle uses it from the next segment on
    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = checked(config);
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if an animated cycle is in flight
    #[inline]
    pub fn is_scrolling(&self) -> bool {
        self.phase == Phase::Scrolling
    }

    /// Animation time since the active cycle started
    pub fn elapsed(&self) -> Option<Duration> {
        self.cycle.as_ref().map(|c| c.elapsed)
    }

    /// Last target reported by the provider
    pub fn current_target(&self) -> Option<Point> {
        self.cycle.as_ref().map(|c| c.current_target)
    }

    /// Offset the active cycle started from
    pub fn start_offset(&self) -> Option<Point> {
        self.cycle.as_ref().map(|c| c.start_offset)
    }

    /// Number of segments opened on `axis` in the active cycle
    pub fn segment_count(&self, axis: Axis) -> usize {
        self.cycle
            .as_ref()
            .map(|c| c.accumulator(axis).len())
            .unwrap_or(0)
    }

    /// Begin chasing `provider`'s target on `surface`
    ///
    /// Any cycle already in flight is interrupted first as `Superseded`. Its
    /// completion is told so unless `notify_superseded` is off.
    ///
    /// With `animated == false` the offset is applied synchronously, re-querying
    /// the provider until it stops moving, and `completion` runs before this
    /// returns. Otherwise the first retarget happens immediately and frames
    /// follow from the clock; a target that is already reached completes
    /// without starting the clock.
    pub fn start_scrolling<P, S>(
        &mut self,
        provider: &Rc<P>,
        surface: &Rc<RefCell<S>>,
        animated: bool,
        completion: Option<Completion>,
    ) where
        P: OffsetProvider + 'static,
        S: ScrollSurface + 'static,
    {
        let provider: Rc<dyn OffsetProvider> = provider.clone();
        let surface: SurfaceHandle = surface.clone();
        self.start_scrolling_dyn(&provider, &surface, animated, completion);
    }

    /// Type-erased form of [`start_scrolling`](Self::start_scrolling)
    pub fn start_scrolling_dyn(
        &mut self,
        provider: &Rc<dyn OffsetProvider>,
        surface: &SurfaceHandle,
        animated: bool,
        completion: Option<Completion>,
    ) {
        if self.cycle.is_some() {
            let notify = self.config.notify_superseded;
            self.finish(ScrollOutcome::Interrupted(Interruption::Superseded), notify);
        }

        let start_offset = surface.borrow().current_offset();
        debug!(
            "Start scrolling from {} (animated: {})",
            start_offset, animated
        );

        self.cycle = Some(Cycle {
            provider: Rc::downgrade(provider),
            surface: Rc::downgrade(surface),
            start_offset,
            current_target: start_offset,
            elapsed: Duration::ZERO,
            horizontal: AxisAccumulator::new(),
            vertical: AxisAccumulator::new(),
            completion,
            settled_written: false,
        });

        if animated {
            self.begin_animated();
        } else {
            self.settle_immediately();
        }
    }

    /// Cancel the active cycle, reporting `Interrupted(Stopped)`
    pub fn stop_scrolling(&mut self) {
        if self.cycle.is_some() {
            self.finish(ScrollOutcome::Interrupted(Interruption::Stopped), true);
        }
    }

    /// Advance the active cycle by one display refresh
    ///
    /// Reports `Completed` when the target is within tolerance of the surface,
    /// or once every segment has fully eased in, its final value has been
    /// written, and the following frame opens no new segment. The latter also
    /// ends cycles on surfaces that clamp writes short of the target, so
    /// `Completed` does not promise the surface reached it.
    pub fn on_frame(&mut self, frame_delta: Duration) -> FrameStatus {
        if self.phase != Phase::Scrolling {
            return FrameStatus::Idle;
        }
        let Some(cycle) = self.cycle.as_mut() else {
            return FrameStatus::Idle;
        };

        let Some(surface) = cycle.surface.upgrade() else {
            return self.finish_frame(ScrollOutcome::Interrupted(Interruption::SurfaceDropped));
        };
        if surface.borrow().is_user_interacting() {
            return self.finish_frame(ScrollOutcome::Interrupted(Interruption::UserInteraction));
        }

        cycle.elapsed += frame_delta;

        let retarget = match cycle.retarget(&self.config) {
            Ok(retarget) => retarget,
            Err(reason) => return self.finish_frame(ScrollOutcome::Interrupted(reason)),
        };

        let actual = surface.borrow().current_offset();
        if cycle.is_empty() || cycle.current_target.approx_eq(actual, self.config.tolerance()) {
            return self.finish_frame(ScrollOutcome::Completed);
        }

        // Everything committed has been delivered and nothing new arrived;
        // the surface will not move any further.
        let settled = cycle.is_settled();
        if settled && cycle.settled_written && retarget != Retarget::Appended {
            return self.finish_frame(ScrollOutcome::Completed);
        }

        let offset = cycle.offset_now(&self.config);
        surface.borrow_mut().set_offset(offset);
        cycle.settled_written = settled;
        trace!("Frame at {:?}: offset {}", cycle.elapsed, offset);

        FrameStatus::Continue
    }

    fn begin_animated(&mut self) {
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        self.phase = Phase::Scrolling;

        if let Err(reason) = cycle.retarget(&self.config) {
            self.finish(ScrollOutcome::Interrupted(reason), true);
            return;
        }

        let at_target = cycle
            .surface
            .upgrade()
            .map(|s| s.borrow().current_offset())
            .is_some_and(|actual| cycle.current_target.approx_eq(actual, self.config.tolerance()));

        if cycle.is_empty() || at_target {
            self.finish(ScrollOutcome::Completed, true);
        } else {
            self.clock.start();
        }
    }

    /// Non-animated path: jump to the target until the provider settles
    fn settle_immediately(&mut self) {
        let outcome = self.settle_loop();
        self.finish(outcome, true);
    }

    fn settle_loop(&mut self) -> ScrollOutcome {
        let tolerance = self.config.tolerance();
        let max_iterations = self.config.max_settle_iterations.max(1);
        let Some(cycle) = self.cycle.as_mut() else {
            return ScrollOutcome::Completed;
        };

        for _ in 0..max_iterations {
            let Some(surface) = cycle.surface.upgrade() else {
                return ScrollOutcome::Interrupted(Interruption::SurfaceDropped);
            };
            let Some(provider) = cycle.provider.upgrade() else {
                return ScrollOutcome::Interrupted(Interruption::ProviderDropped);
            };

            let Some(target) = provider.target_offset(cycle.start_offset) else {
                return ScrollOutcome::Completed;
            };
            if target.approx_eq(surface.borrow().current_offset(), tolerance) {
                return ScrollOutcome::Completed;
            }

            // Moving may reveal content that changes the provider's answer
            let mut surface = surface.borrow_mut();
            surface.set_offset(target);
            surface.layout_if_needed();
            cycle.current_target = target;
        }

        warn!(
            "Offset provider did not settle after {} iterations, giving up at {}",
            max_iterations, cycle.current_target
        );
        ScrollOutcome::Interrupted(Interruption::SettleLimit)
    }

    fn finish_frame(&mut self, outcome: ScrollOutcome) -> FrameStatus {
        self.finish(outcome, true);
        FrameStatus::Finished(outcome)
    }

    /// End the active cycle: stop the clock, drop its state, then report
    fn finish(&mut self, outcome: ScrollOutcome, notify: bool) {
        let Some(mut cycle) = self.cycle.take() else {
            return;
        };

        self.phase = Phase::Completing;
        if self.clock.is_running() {
            self.clock.stop();
        }
        cycle.horizontal.clear();
        cycle.vertical.clear();
        self.phase = Phase::Idle;

        debug!(
            "Scrolling {} at {:?}, target {}",
            outcome, cycle.elapsed, cycle.current_target
        );

        if !notify {
            return;
        }
        if let Some(completion) = cycle.completion.take() {
            completion(cycle.surface.upgrade(), outcome);
        }
    }
}

/// Fall back to the defaults for a config that would break convergence
fn checked(config: ScrollConfig) -> ScrollConfig {
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("Invalid scroll config ({}), using defaults", e);
            ScrollConfig::default()
        }
    }
}

//! Pairs a surface with the single controller that animates it

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::FrameClock;
use crate::scroll::{Completion, FrameStatus, ScrollConfig, ScrollController};
use crate::surface::{OffsetProvider, ScrollSurface};

type ClockFactory = Box<dyn Fn() -> Box<dyn FrameClock>>;

/// Owner of a surface and its scroll controller
///
/// The controller is created on first use and the same instance is reused
/// for every later cycle on this surface.
pub struct ScrollHost<S: ScrollSurface + 'static> {
    surface: Rc<RefCell<S>>,
    config: ScrollConfig,
    clock_factory: ClockFactory,
    controller: Option<ScrollController>,
}

impl<S: ScrollSurface + 'static> ScrollHost<S> {
    pub fn new<F>(surface: Rc<RefCell<S>>, config: ScrollConfig, clock_factory: F) -> Self
    where
        F: Fn() -> Box<dyn FrameClock> + 'static,
    {
        Self {
            surface,
            config,
            clock_factory: Box::new(clock_factory),
            controller: None,
        }
    }

    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    /// The surface's controller, created on first call
    pub fn controller(&mut self) -> &mut ScrollController {
        let config = &self.config;
        let factory = &self.clock_factory;
        self.controller
            .get_or_insert_with(|| ScrollController::new(config.clone(), factory()))
    }

    /// Start chasing `provider`'s target on the owned surface
    pub fn scroll_to<P>(&mut self, provider: &Rc<P>, animated: bool, completion: Option<Completion>)
    where
        P: OffsetProvider + 'static,
    {
        let surface = Rc::clone(&self.surface);
        self.controller()
            .start_scrolling(provider, &surface, animated, completion);
    }

    pub fn stop_scrolling(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.stop_scrolling();
        }
    }

    /// Forward a display refresh to the controller, if one exists
    pub fn on_frame(&mut self, frame_delta: Duration) -> FrameStatus {
        match self.controller.as_mut() {
            Some(controller) => controller.on_frame(frame_delta),
            None => FrameStatus::Idle,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.controller
            .as_ref()
            .map(ScrollController::is_scrolling)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualFrameClock;
    use scrollchase_core::Point;
    use std::cell::Cell;

    struct Surface {
        offset: Point,
    }

    impl ScrollSurface for Surface {
        fn current_offset(&self) -> Point {
            self.offset
        }

        fn set_offset(&mut self, offset: Point) {
            self.offset = offset;
        }

        fn is_user_interacting(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_controller_created_lazily_once() {
        let created = Rc::new(Cell::new(0));
        let counter = Rc::clone(&created);
        let surface = Rc::new(RefCell::new(Surface { offset: Point::ZERO }));
        let mut host = ScrollHost::new(surface, ScrollConfig::default(), move || {
            counter.set(counter.get() + 1);
            Box::new(ManualFrameClock::new()) as Box<dyn FrameClock>
        });

        assert!(!host.has_controller());
        assert_eq!(host.on_frame(Duration::from_millis(16)), FrameStatus::Idle);
        assert_eq!(created.get(), 0);

        let provider = Rc::new(|_: Point| Some(Point::new(0.0, 40.0)));
        host.scroll_to(&provider, false, None);
        host.scroll_to(&provider, true, None);
        host.controller();

        assert!(host.has_controller());
        assert_eq!(created.get(), 1);
    }

    #[test]
    fn test_scroll_to_animates_owned_surface() {
        let clock = ManualFrameClock::new();
        let observer = clock.clone();
        let surface = Rc::new(RefCell::new(Surface { offset: Point::ZERO }));
        let mut host = ScrollHost::new(Rc::clone(&surface), ScrollConfig::default(), move || {
            Box::new(clock.clone()) as Box<dyn FrameClock>
        });

        let provider = Rc::new(|_: Point| Some(Point::new(0.0, 120.0)));
        host.scroll_to(&provider, true, None);
        assert!(host.is_scrolling());

        let mut frames = 0;
        while observer.is_running() && frames < 100 {
            host.on_frame(Duration::from_millis(16));
            frames += 1;
        }

        assert!(!host.is_scrolling());
        assert!((surface.borrow().offset.y - 120.0).abs() < 0.1);
    }
}

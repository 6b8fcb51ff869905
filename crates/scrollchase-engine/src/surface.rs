//! Collaborators the scroll controller drives but does not own

use std::cell::RefCell;
use std::rc::Rc;

use scrollchase_core::Point;

/// Answers "where should the surface be now" for a cycle
///
/// Queried once per frame with the offset captured at cycle start. May answer
/// differently on every call; `None` means there is no target right now.
pub trait OffsetProvider {
    fn target_offset(&self, start: Point) -> Option<Point>;
}

impl<F> OffsetProvider for F
where
    F: Fn(Point) -> Option<Point>,
{
    fn target_offset(&self, start: Point) -> Option<Point> {
        self(start)
    }
}

/// A scrollable viewport
pub trait ScrollSurface {
    fn current_offset(&self) -> Point;

    /// Plain offset write. Must not start another animated scroll.
    fn set_offset(&mut self, offset: Point);

    /// True while a touch or drag is in progress
    fn is_user_interacting(&self) -> bool;

    /// Force pending layout so the next provider query sees revealed content
    fn layout_if_needed(&mut self) {}
}

/// Type-erased shared surface, as handed back to completion callbacks
pub type SurfaceHandle = Rc<RefCell<dyn ScrollSurface>>;

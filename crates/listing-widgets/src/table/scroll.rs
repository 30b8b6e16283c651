//! Horizontal scroll container and the sticky-column shadows derived from it.
//!
//! The container plays the part of a scrollable element: it tracks its
//! metrics and notifies registered listeners whenever they change.
//! Registrations are RAII guards, so a listener can never outlive the widget
//! state that attached it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Distance in cells a pinned group must be from the scroll edge before its
/// shadow shows.
pub const SHADOW_THRESHOLD: u16 = 20;

/// Geometry of a horizontally scrollable region, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Cells scrolled past the left edge
    pub scroll_left: u16,
    /// Full width of the content
    pub scroll_width: u16,
    /// Width of the visible viewport
    pub offset_width: u16,
}

impl ScrollMetrics {
    /// Largest valid `scroll_left`.
    pub fn max_scroll_left(&self) -> u16 {
        self.scroll_width.saturating_sub(self.offset_width)
    }

    /// Cells of content hidden past the right edge.
    ///
    /// Negative when the content is narrower than the viewport.
    pub fn distance_from_right(&self) -> i32 {
        self.scroll_width as i32 - self.offset_width as i32 - self.scroll_left as i32
    }
}

/// Which pinned groups currently occlude scrolled content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickyShadows {
    pub left: bool,
    pub right: bool,
}

impl StickyShadows {
    /// Derive shadows from scroll metrics.
    pub fn compute(metrics: &ScrollMetrics, has_left: bool, has_right: bool, threshold: u16) -> Self {
        Self {
            left: has_left && metrics.scroll_left > threshold,
            right: has_right && metrics.distance_from_right() > threshold as i32,
        }
    }
}

type Listener = Rc<dyn Fn(&ScrollMetrics)>;

#[derive(Default)]
struct Inner {
    metrics: ScrollMetrics,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Shared handle to a scrollable region.
///
/// Clones refer to the same region.
#[derive(Clone, Default)]
pub struct ScrollContainer {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for ScrollContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollContainer")
            .field("metrics", &inner.metrics)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ScrollContainer {
    /// Create a container with no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current metrics.
    pub fn metrics(&self) -> ScrollMetrics {
        self.inner.borrow().metrics
    }

    /// Scroll to an absolute position, clamped to the content.
    ///
    /// Returns whether the position changed; listeners only hear about
    /// actual movement.
    pub fn scroll_to(&self, left: u16) -> bool {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let clamped = left.min(inner.metrics.max_scroll_left());
            let changed = clamped != inner.metrics.scroll_left;
            inner.metrics.scroll_left = clamped;
            changed
        };
        if changed {
            self.dispatch();
        }
        changed
    }

    /// Scroll relative to the current position.
    pub fn scroll_by(&self, delta: i32) -> bool {
        let current = self.metrics().scroll_left as i32;
        let target = (current + delta).clamp(0, u16::MAX as i32) as u16;
        self.scroll_to(target)
    }

    /// Update content and viewport widths, e.g. after a resize.
    ///
    /// The scroll position is clamped to the new content. Listeners are
    /// notified if any metric changed.
    pub fn set_extent(&self, scroll_width: u16, offset_width: u16) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.metrics;
            inner.metrics.scroll_width = scroll_width;
            inner.metrics.offset_width = offset_width;
            inner.metrics.scroll_left = before.scroll_left.min(inner.metrics.max_scroll_left());
            before != inner.metrics
        };
        if changed {
            self.dispatch();
        }
    }

    /// Register a listener called after every metrics change.
    ///
    /// The listener stays attached until the returned guard is dropped.
    pub fn add_scroll_listener(&self, f: impl Fn(&ScrollMetrics) + 'static) -> ScrollSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(f)));
        ScrollSubscription {
            container: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn dispatch(&self) {
        // Listeners may touch the container, so call them without a borrow held
        let (metrics, listeners): (ScrollMetrics, Vec<Listener>) = {
            let inner = self.inner.borrow();
            (
                inner.metrics,
                inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect(),
            )
        };
        for listener in listeners {
            listener(&metrics);
        }
    }
}

/// Guard for a scroll listener; detaches it when dropped.
#[must_use = "the listener is detached as soon as the subscription is dropped"]
#[derive(Debug)]
pub struct ScrollSubscription {
    container: Weak<RefCell<Inner>>,
    id: u64,
}

impl ScrollSubscription {
    /// Detach now instead of at end of scope.
    pub fn detach(self) {}
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.container.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn container(scroll_width: u16, offset_width: u16) -> ScrollContainer {
        let c = ScrollContainer::new();
        c.set_extent(scroll_width, offset_width);
        c
    }

    #[test]
    fn test_scroll_clamps() {
        let c = container(100, 40);
        assert!(c.scroll_to(500));
        assert_eq!(c.metrics().scroll_left, 60);
        assert!(!c.scroll_to(60));

        assert!(c.scroll_by(-100));
        assert_eq!(c.metrics().scroll_left, 0);
    }

    #[test]
    fn test_listener_sees_changes() {
        let c = container(100, 40);
        let seen = Rc::new(Cell::new(0u16));
        let sink = Rc::clone(&seen);
        let _sub = c.add_scroll_listener(move |m| sink.set(m.scroll_left));

        c.scroll_to(25);
        assert_eq!(seen.get(), 25);

        // Shrinking the content drags the position back
        c.set_extent(50, 40);
        assert_eq!(seen.get(), 10);
    }

    #[test]
    fn test_subscription_detaches_on_drop() {
        let c = container(100, 40);
        let calls = Rc::new(Cell::new(0));
        let sink = Rc::clone(&calls);
        let sub = c.add_scroll_listener(move |_| sink.set(sink.get() + 1));
        assert_eq!(c.listener_count(), 1);

        c.scroll_to(5);
        sub.detach();
        assert_eq!(c.listener_count(), 0);

        c.scroll_to(10);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_subscription_outliving_container() {
        let c = container(10, 5);
        let sub = c.add_scroll_listener(|_| {});
        drop(c);
        drop(sub);
    }

    #[test]
    fn test_shadows() {
        let at = |left| ScrollMetrics {
            scroll_left: left,
            scroll_width: 200,
            offset_width: 100,
        };

        let s = StickyShadows::compute(&at(0), true, true, SHADOW_THRESHOLD);
        assert_eq!(s, StickyShadows { left: false, right: true });

        let s = StickyShadows::compute(&at(21), true, true, SHADOW_THRESHOLD);
        assert!(s.left);

        let s = StickyShadows::compute(&at(20), true, true, SHADOW_THRESHOLD);
        assert!(!s.left);

        // 200 - 100 - 80 = 20, not past the threshold
        let s = StickyShadows::compute(&at(80), true, true, SHADOW_THRESHOLD);
        assert!(!s.right);

        let s = StickyShadows::compute(&at(50), false, false, SHADOW_THRESHOLD);
        assert_eq!(s, StickyShadows::default());
    }
}

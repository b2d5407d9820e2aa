//! Scroll-spy section tracker.
//!
//! Given an ordered list of section ids and a pixel offset, the tracker
//! reports which section is currently in view so navigation can highlight
//! the matching entry. Geometry and scroll events are injected through the
//! [`ScrollSurface`] and [`ScrollEvents`] traits, which keeps the tracker
//! deterministic under test - no browser required.
//!
//! Two states exist: *detached* (empty section list, no listener, reports
//! the empty value) and *attached* (one listener registered, best-effort
//! active section). Listener teardown is guaranteed on every exit path via
//! an RAII guard.

use std::sync::{Arc, Mutex, PoisonError};

/// Scroll positions closer to the top than this are treated as belonging to
/// the first section, even before its measured range technically starts.
/// Avoids a flash of "no active section" on load.
pub const TOP_REGION_PX: f64 = 100.0;

/// Measured geometry for one section: its top edge and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    /// Distance from the document top to the section's top edge.
    pub top: f64,
    /// Rendered height of the section.
    pub height: f64,
}

impl SectionBounds {
    /// Whether `position` falls within `[top, top + height)`.
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Measurement provider for section geometry and the current scroll offset.
///
/// A real embedding backs this with DOM queries (`offsetTop`,
/// `offsetHeight`, `window.scrollY`); tests use a fake. A section that
/// cannot be measured returns `None` and simply contributes no information.
pub trait ScrollSurface {
    /// Current vertical scroll position of the viewport.
    fn scroll_position(&self) -> f64;

    /// Geometry for `section_id`, or `None` if it is not currently rendered.
    fn section_bounds(&self, section_id: &str) -> Option<SectionBounds>;
}

/// Pure active-section state machine.
///
/// [`recompute`](Self::recompute) runs the selection algorithm against a
/// [`ScrollSurface`]; nothing here registers listeners. Wrap a tracker in a
/// [`ScrollSpy`] to bind it to an event source.
#[derive(Debug)]
pub struct SectionTracker {
    sections: Vec<String>,
    offset: f64,
    active: String,
}

impl SectionTracker {
    /// Create a tracker over an ordered section list and a pixel offset.
    ///
    /// An empty list produces a detached tracker whose active section is
    /// always the empty string.
    #[must_use]
    pub fn new(sections: Vec<String>, offset: f64) -> Self {
        Self {
            sections,
            offset,
            active: String::new(),
        }
    }

    /// The currently active section id, or `""` when none qualifies.
    #[must_use]
    pub fn active_section(&self) -> &str {
        &self.active
    }

    /// Whether the tracker has sections to watch.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Replace the tracked section list. Supplying an empty list detaches
    /// the tracker and clears the active section.
    pub fn set_sections(&mut self, sections: Vec<String>) {
        self.sections = sections;
        if self.sections.is_empty() {
            self.active.clear();
        }
    }

    /// Recompute the active section from current viewport state.
    ///
    /// The effective position is `scroll_position + offset`. Sections are
    /// scanned last-to-first so the later section wins when ranges overlap
    /// or boundaries coincide; sections without measurable geometry are
    /// skipped. If no range contains the position and it is within
    /// [`TOP_REGION_PX`] of the top, the first section becomes active;
    /// otherwise the previous answer is kept.
    pub fn recompute(&mut self, surface: &dyn ScrollSurface) -> &str {
        if self.sections.is_empty() {
            self.active.clear();
            return &self.active;
        }

        let position = surface.scroll_position() + self.offset;

        for id in self.sections.iter().rev() {
            if surface
                .section_bounds(id)
                .is_some_and(|bounds| bounds.contains(position))
            {
                self.active.clone_from(id);
                return &self.active;
            }
        }

        if position < TOP_REGION_PX {
            if let Some(first) = self.sections.first() {
                self.active.clone_from(first);
            }
        }

        &self.active
    }
}

/// RAII guard for a scroll-listener registration.
///
/// Dropping the guard runs its teardown exactly once, detaching the
/// listener. This is the "scoped acquisition" half of the tracker's
/// lifecycle: however the owner exits, the listener comes off.
pub struct ListenerGuard(Option<Box<dyn FnOnce() + Send>>);

impl ListenerGuard {
    /// Wrap a teardown closure to run on drop.
    #[must_use]
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(teardown)))
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(teardown) = self.0.take() {
            teardown();
        }
    }
}

impl core::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ListenerGuard")
            .field(&self.0.is_some())
            .finish()
    }
}

/// Source of scroll events with explicit listener lifecycle.
///
/// Implementations must invoke `listener` on every scroll event until the
/// returned [`ListenerGuard`] is dropped.
pub trait ScrollEvents {
    /// Attach a listener; the guard detaches it when dropped.
    fn subscribe(&self, listener: Box<dyn FnMut() + Send>) -> ListenerGuard;
}

/// A [`SectionTracker`] bound to a scroll event source.
///
/// Attaching with a non-empty section list registers exactly one listener
/// and performs an initial measurement (so the first section highlights
/// before the user scrolls). Detaching - explicitly, by supplying an empty
/// section list, or by dropping the spy - deregisters the listener.
pub struct ScrollSpy<S> {
    tracker: Arc<Mutex<SectionTracker>>,
    surface: Arc<S>,
    guard: Option<ListenerGuard>,
}

impl<S> ScrollSpy<S>
where
    S: ScrollSurface + Send + Sync + 'static,
{
    /// Attach a tracker for `sections` to `events`, measuring immediately.
    ///
    /// An empty `sections` list yields a detached spy: no listener is
    /// registered and the active section stays empty.
    pub fn attach(
        sections: Vec<String>,
        offset: f64,
        surface: Arc<S>,
        events: &dyn ScrollEvents,
    ) -> Self {
        let tracker = Arc::new(Mutex::new(SectionTracker::new(sections, offset)));
        let mut spy = Self {
            tracker,
            surface,
            guard: None,
        };
        spy.bind(events);
        spy
    }

    /// The currently active section id, or `""`.
    #[must_use]
    pub fn active_section(&self) -> String {
        lock(&self.tracker).active_section().to_owned()
    }

    /// Whether a listener is currently registered.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.guard.is_some()
    }

    /// Replace the tracked section list, re-binding listeners as needed.
    ///
    /// A non-empty list on a detached spy registers the listener; an empty
    /// list drops it. Either way the active section is recomputed from the
    /// new set.
    pub fn set_sections(&mut self, sections: Vec<String>, events: &dyn ScrollEvents) {
        lock(&self.tracker).set_sections(sections);
        // Drop the stale registration before (possibly) creating a new one.
        self.guard = None;
        self.bind(events);
    }

    /// Detach from the event source. The active section is left as-is for
    /// callers that want the last answer; `active_section` on a detached
    /// empty tracker reports `""`.
    pub fn detach(&mut self) {
        self.guard = None;
    }

    fn bind(&mut self, events: &dyn ScrollEvents) {
        let attached = {
            let mut tracker = lock(&self.tracker);
            if tracker.is_attached() {
                // Initial measurement before any event fires.
                tracker.recompute(self.surface.as_ref());
                true
            } else {
                false
            }
        };

        if attached {
            let tracker = Arc::clone(&self.tracker);
            let surface = Arc::clone(&self.surface);
            self.guard = Some(events.subscribe(Box::new(move || {
                lock(&tracker).recompute(surface.as_ref());
            })));
        }
    }
}

impl<S> core::fmt::Debug for ScrollSpy<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("attached", &self.guard.is_some())
            .finish()
    }
}

/// Lock a tracker mutex, recovering from poisoning (a panicking subscriber
/// must not wedge every later scroll event).
fn lock(tracker: &Mutex<SectionTracker>) -> std::sync::MutexGuard<'_, SectionTracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    /// Deterministic stand-in for DOM geometry queries.
    #[derive(Default)]
    struct FakeSurface {
        scroll: Mutex<f64>,
        bounds: HashMap<String, SectionBounds>,
    }

    impl FakeSurface {
        fn with_sections(sections: &[(&str, f64, f64)]) -> Self {
            let bounds = sections
                .iter()
                .map(|(id, top, height)| {
                    ((*id).to_owned(), SectionBounds {
                        top: *top,
                        height: *height,
                    })
                })
                .collect();
            Self {
                scroll: Mutex::new(0.0),
                bounds,
            }
        }

        fn scroll_to(&self, position: f64) {
            *self.scroll.lock().unwrap() = position;
        }
    }

    impl ScrollSurface for FakeSurface {
        fn scroll_position(&self) -> f64 {
            *self.scroll.lock().unwrap()
        }

        fn section_bounds(&self, section_id: &str) -> Option<SectionBounds> {
            self.bounds.get(section_id).copied()
        }
    }

    /// Scroll event source that records registrations and can fire events.
    #[derive(Default)]
    struct FakeEvents {
        listeners: Arc<Mutex<HashMap<u64, Box<dyn FnMut() + Send>>>>,
        next_id: AtomicU64,
    }

    impl FakeEvents {
        fn listener_count(&self) -> usize {
            self.listeners.lock().unwrap().len()
        }

        fn fire(&self) {
            let mut listeners = self.listeners.lock().unwrap();
            for listener in listeners.values_mut() {
                listener();
            }
        }
    }

    impl ScrollEvents for FakeEvents {
        fn subscribe(&self, listener: Box<dyn FnMut() + Send>) -> ListenerGuard {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.listeners.lock().unwrap().insert(id, listener);
            let listeners = Arc::clone(&self.listeners);
            ListenerGuard::new(move || {
                listeners.lock().unwrap().remove(&id);
            })
        }
    }

    fn page() -> FakeSurface {
        // Disjoint, ordered ranges: hero, about, contact.
        FakeSurface::with_sections(&[
            ("hero", 0.0, 500.0),
            ("about", 500.0, 500.0),
            ("contact", 1000.0, 500.0),
        ])
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_position_inside_section_selects_it() {
        let surface = page();
        surface.scroll_to(600.0);

        let mut tracker = SectionTracker::new(ids(&["hero", "about", "contact"]), 100.0);
        assert_eq!(tracker.recompute(&surface), "about");
    }

    #[test]
    fn test_near_top_falls_back_to_first_section() {
        // First section starts below the measured top; position 0 matches
        // nothing but is inside the near-top region.
        let surface = FakeSurface::with_sections(&[
            ("hero", 200.0, 400.0),
            ("about", 600.0, 400.0),
        ]);

        let mut tracker = SectionTracker::new(ids(&["hero", "about"]), 0.0);
        assert_eq!(tracker.recompute(&surface), "hero");
    }

    #[test]
    fn test_overlap_tie_breaks_to_later_section() {
        let surface = FakeSurface::with_sections(&[
            ("hero", 0.0, 600.0),
            ("about", 500.0, 500.0),
        ]);
        surface.scroll_to(550.0);

        let mut tracker = SectionTracker::new(ids(&["hero", "about"]), 0.0);
        assert_eq!(tracker.recompute(&surface), "about");
    }

    #[test]
    fn test_boundary_belongs_to_later_section() {
        let surface = page();
        // Exactly on the hero/about boundary: [top, top + height) is
        // half-open, so 500 belongs to about.
        surface.scroll_to(500.0);

        let mut tracker = SectionTracker::new(ids(&["hero", "about", "contact"]), 0.0);
        assert_eq!(tracker.recompute(&surface), "about");
    }

    #[test]
    fn test_unmeasurable_section_is_skipped() {
        let surface = page();
        surface.scroll_to(600.0);

        // "phantom" has no geometry; it must never be selected and must not
        // prevent the others from matching.
        let mut tracker =
            SectionTracker::new(ids(&["hero", "about", "phantom", "contact"]), 0.0);
        assert_eq!(tracker.recompute(&surface), "about");
    }

    #[test]
    fn test_no_match_far_from_top_keeps_previous_answer() {
        let surface = page();
        surface.scroll_to(600.0);

        let mut tracker = SectionTracker::new(ids(&["hero", "about", "contact"]), 0.0);
        assert_eq!(tracker.recompute(&surface), "about");

        // Scroll into a gap past every section; not near the top, so the
        // previous answer sticks instead of flashing empty.
        surface.scroll_to(5000.0);
        assert_eq!(tracker.recompute(&surface), "about");
    }

    #[test]
    fn test_empty_tracker_reports_empty() {
        let surface = page();
        let mut tracker = SectionTracker::new(Vec::new(), 100.0);
        assert!(!tracker.is_attached());
        assert_eq!(tracker.recompute(&surface), "");
    }

    #[test]
    fn test_spy_empty_list_registers_no_listener() {
        let surface = Arc::new(page());
        let events = FakeEvents::default();

        let spy = ScrollSpy::attach(Vec::new(), 100.0, surface, &events);

        assert_eq!(events.listener_count(), 0);
        assert!(!spy.is_attached());
        assert_eq!(spy.active_section(), "");
    }

    #[test]
    fn test_spy_measures_on_attach_before_any_event() {
        let surface = Arc::new(page());
        surface.scroll_to(0.0);
        let events = FakeEvents::default();

        let spy = ScrollSpy::attach(ids(&["hero", "about", "contact"]), 100.0, surface, &events);

        assert_eq!(events.listener_count(), 1);
        assert_eq!(spy.active_section(), "hero");
    }

    #[test]
    fn test_spy_tracks_scroll_events() {
        let surface = Arc::new(page());
        let events = FakeEvents::default();
        let spy = ScrollSpy::attach(
            ids(&["hero", "about", "contact"]),
            100.0,
            Arc::clone(&surface),
            &events,
        );

        surface.scroll_to(600.0);
        events.fire();
        assert_eq!(spy.active_section(), "about");

        surface.scroll_to(1100.0);
        events.fire();
        assert_eq!(spy.active_section(), "contact");
    }

    #[test]
    fn test_spy_detach_removes_listener() {
        let surface = Arc::new(page());
        let events = FakeEvents::default();
        let mut spy = ScrollSpy::attach(ids(&["hero", "about"]), 0.0, surface, &events);
        assert_eq!(events.listener_count(), 1);

        spy.detach();
        assert_eq!(events.listener_count(), 0);
        assert!(!spy.is_attached());
    }

    #[test]
    fn test_spy_drop_removes_listener() {
        let surface = Arc::new(page());
        let events = FakeEvents::default();
        {
            let _spy = ScrollSpy::attach(ids(&["hero", "about"]), 0.0, surface, &events);
            assert_eq!(events.listener_count(), 1);
        }
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_spy_set_sections_empty_detaches() {
        let surface = Arc::new(page());
        let events = FakeEvents::default();
        let mut spy = ScrollSpy::attach(ids(&["hero", "about"]), 0.0, surface, &events);

        spy.set_sections(Vec::new(), &events);

        assert_eq!(events.listener_count(), 0);
        assert_eq!(spy.active_section(), "");
    }

    #[test]
    fn test_spy_set_sections_rebinds_once() {
        let surface = Arc::new(page());
        let events = FakeEvents::default();
        let mut spy = ScrollSpy::attach(Vec::new(), 0.0, Arc::clone(&surface), &events);
        assert_eq!(events.listener_count(), 0);

        surface.scroll_to(1100.0);
        spy.set_sections(ids(&["hero", "about", "contact"]), &events);

        assert_eq!(events.listener_count(), 1);
        assert_eq!(spy.active_section(), "contact");
    }
}

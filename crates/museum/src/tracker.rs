//! Tracks which timeline item is "active", i.e. most prominent in the viewport.
//!
//! The platform delivers visibility changes in batches. Each batch is folded into the
//! current state by [`apply_visibility_batch`], a pure reducer, so the policy can be tested
//! without a rendering surface. [`ActiveSectionTracker`] wraps the reducer together with the
//! region bookkeeping and the observer subscription.

use std::collections::HashMap;

/// Intersection ratios at which the observer reports visibility changes.
pub const THRESHOLDS: [f64; 3] = [0.25, 0.5, 0.75];

/// How the viewport is observed. The effective viewport is shrunk from the top and the
/// bottom so the active item is biased towards the vertical center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub thresholds: &'static [f64],
    /// Fraction of the viewport height excluded at the top.
    pub top_margin: f64,
    /// Fraction of the viewport height excluded at the bottom.
    pub bottom_margin: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            thresholds: &THRESHOLDS,
            top_margin: 0.2,
            bottom_margin: 0.3,
        }
    }
}

impl ObserverOptions {
    /// The band of a viewport of the given height in which items count as visible, as
    /// `(top, bottom)` offsets.
    pub fn effective_viewport(&self, height: f64) -> (f64, f64) {
        (height * self.top_margin, height * (1.0 - self.bottom_margin))
    }

    /// Root margin in CSS notation, as handed to the browser's observer.
    pub fn root_margin(&self) -> String {
        format!(
            "-{}% 0px -{}% 0px",
            (self.top_margin * 100.0).round(),
            (self.bottom_margin * 100.0).round()
        )
    }
}

/// One visibility report for a region.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityUpdate {
    pub id: String,
    pub intersecting: bool,
    /// Visible fraction of the region, in `[0, 1]`.
    pub ratio: f64,
}

impl VisibilityUpdate {
    pub fn new(id: impl Into<String>, intersecting: bool, ratio: f64) -> Self {
        Self {
            id: id.into(),
            intersecting,
            ratio,
        }
    }
}

/// Fold a batch of visibility updates into the active id.
///
/// The intersecting update with the highest ratio wins; on equal ratios the earliest update
/// in the batch wins. Returns the new active id only when it differs from `active`. When
/// nothing intersects the active id is kept, so the last active item stays highlighted.
pub fn apply_visibility_batch(
    active: Option<&str>,
    updates: &[VisibilityUpdate],
) -> Option<String> {
    let winner = updates
        .iter()
        .filter(|update| update.intersecting)
        .reduce(|best, update| {
            if update.ratio > best.ratio {
                update
            } else {
                best
            }
        })?;

    if active == Some(winner.id.as_str()) {
        return None;
    }

    Some(winner.id.clone())
}

/// Fill percentage of the timeline track for the active item among `ids` (in timeline
/// order). Unknown or missing active ids count as the first item.
pub fn track_progress(active: Option<&str>, ids: &[&str]) -> f64 {
    if ids.len() <= 1 {
        return 100.0;
    }

    let index = active
        .and_then(|active| ids.iter().position(|id| *id == active))
        .unwrap_or(0);

    index as f64 / (ids.len() - 1) as f64 * 100.0
}

/// Platform visibility observation, e.g. an intersection observer bound to the page.
pub trait VisibilityObserver<R> {
    /// Start delivering visibility updates for `region`.
    fn observe(&mut self, region: &R);

    /// Stop delivering visibility updates for `region`.
    fn unobserve(&mut self, region: &R);

    /// Release the observation subscription entirely.
    fn disconnect(&mut self);
}

/// Keeps the set of observed regions and the single active journey id.
///
/// Dropping the tracker disconnects its observer.
pub struct ActiveSectionTracker<R, O: VisibilityObserver<R>> {
    observer: O,
    registered: HashMap<String, R>,
    active: Option<String>,
}

impl<R, O: VisibilityObserver<R>> ActiveSectionTracker<R, O> {
    /// Create a tracker. `initial` is usually the first journey in the timeline.
    pub fn new(observer: O, initial: Option<String>) -> Self {
        Self {
            observer,
            registered: HashMap::new(),
            active: initial,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active() == Some(id)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.registered.contains_key(id)
    }

    /// Observe `region` as the timeline item `id`. Re-registering an id swaps its region,
    /// which may be the very same region again.
    pub fn register(&mut self, id: impl Into<String>, region: R) {
        let id = id.into();

        // NOTE: The previous region goes first, so re-registering the same region leaves it
        // observed.
        if let Some(previous) = self.registered.remove(&id) {
            self.observer.unobserve(&previous);
        }

        self.observer.observe(&region);
        self.registered.insert(id, region);
    }

    /// Stop observing the region registered as `id`. Unknown ids are ignored.
    pub fn unregister(&mut self, id: &str) {
        if let Some(region) = self.registered.remove(id) {
            self.observer.unobserve(&region);
        }
    }

    /// Apply a batch of visibility updates. Updates for regions that are no longer
    /// registered are dropped. Returns `true` when the active id changed.
    pub fn apply(&mut self, updates: &[VisibilityUpdate]) -> bool {
        let known: Vec<_> = updates
            .iter()
            .filter(|update| self.registered.contains_key(&update.id))
            .cloned()
            .collect();

        match apply_visibility_batch(self.active(), &known) {
            Some(id) => {
                tracing::debug!(from = ?self.active, to = %id, "active section changed");
                self.active = Some(id);
                true
            }
            None => false,
        }
    }

    /// Pointer-enter or focus on a region makes it active immediately. Returns `true` when
    /// the active id changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.is_registered(id) || self.is_active(id) {
            return false;
        }

        self.active = Some(String::from(id));
        true
    }

    /// Fill percentage of the timeline track, see [`track_progress`].
    pub fn track_progress(&self, ids: &[&str]) -> f64 {
        track_progress(self.active(), ids)
    }
}

impl<R, O: VisibilityObserver<R>> Drop for ActiveSectionTracker<R, O> {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{cell::RefCell, collections::HashSet, rc::Rc};

    #[derive(Debug, Default)]
    struct Log {
        observed: Vec<&'static str>,
        unobserved: Vec<&'static str>,
        disconnected: bool,
    }

    #[derive(Clone, Default)]
    struct TestObserver(Rc<RefCell<Log>>);

    impl VisibilityObserver<&'static str> for TestObserver {
        fn observe(&mut self, region: &&'static str) {
            self.0.borrow_mut().observed.push(*region);
        }

        fn unobserve(&mut self, region: &&'static str) {
            self.0.borrow_mut().unobserved.push(*region);
        }

        fn disconnect(&mut self) {
            self.0.borrow_mut().disconnected = true;
        }
    }

    fn tracker() -> (ActiveSectionTracker<&'static str, TestObserver>, TestObserver) {
        let observer = TestObserver::default();
        let mut tracker = ActiveSectionTracker::new(observer.clone(), None);
        tracker.register("a", "region-a");
        tracker.register("b", "region-b");

        (tracker, observer)
    }

    #[test]
    fn highest_ratio_wins() {
        let updates = [
            VisibilityUpdate::new("a", true, 0.25),
            VisibilityUpdate::new("b", true, 0.75),
            VisibilityUpdate::new("c", false, 1.0),
        ];

        assert_eq!(
            Some(String::from("b")),
            apply_visibility_batch(None, &updates)
        );
    }

    #[test]
    fn ties_keep_batch_order() {
        let updates = [
            VisibilityUpdate::new("b", true, 0.5),
            VisibilityUpdate::new("a", true, 0.5),
        ];

        assert_eq!(
            Some(String::from("b")),
            apply_visibility_batch(Some("c"), &updates)
        );
    }

    #[test]
    fn active_section_is_sticky() {
        let (mut tracker, _) = tracker();

        assert!(tracker.apply(&[VisibilityUpdate::new("a", true, 0.5)]));
        assert_eq!(Some("a"), tracker.active());

        assert!(!tracker.apply(&[VisibilityUpdate::new("a", false, 0.0)]));
        assert!(!tracker.apply(&[]));
        assert_eq!(Some("a"), tracker.active());
    }

    #[test]
    fn switches_exactly_once_for_repeated_batches() {
        let (mut tracker, _) = tracker();
        let batch = [
            VisibilityUpdate::new("a", false, 0.0),
            VisibilityUpdate::new("b", true, 0.8),
        ];

        let transitions = (0..3).filter(|_| tracker.apply(&batch)).count();

        assert_eq!(1, transitions);
        assert_eq!(Some("b"), tracker.active());
    }

    #[test]
    fn updates_for_unregistered_regions_are_ignored() {
        let (mut tracker, observer) = tracker();
        tracker.unregister("b");
        tracker.unregister("b");
        tracker.unregister("never-registered");

        assert!(!tracker.apply(&[VisibilityUpdate::new("b", true, 1.0)]));
        assert_eq!(None, tracker.active());
        assert_eq!(vec!["region-b"], observer.0.borrow().unobserved);
    }

    #[test]
    fn focus_overrides_visibility() {
        let (mut tracker, _) = tracker();
        tracker.apply(&[VisibilityUpdate::new("a", true, 0.75)]);

        assert!(tracker.focus("b"));
        assert!(!tracker.focus("b"));
        assert!(!tracker.focus("unknown"));
        assert_eq!(Some("b"), tracker.active());
    }

    #[test]
    fn re_registering_swaps_the_observed_region() {
        let (mut tracker, observer) = tracker();
        tracker.register("a", "region-a2");

        let log = observer.0.borrow();
        assert_eq!(vec!["region-a", "region-b", "region-a2"], log.observed);
        assert_eq!(vec!["region-a"], log.unobserved);
    }

    #[derive(Clone, Default)]
    struct SetObserver(Rc<RefCell<HashSet<&'static str>>>);

    impl VisibilityObserver<&'static str> for SetObserver {
        fn observe(&mut self, region: &&'static str) {
            self.0.borrow_mut().insert(*region);
        }

        fn unobserve(&mut self, region: &&'static str) {
            self.0.borrow_mut().remove(region);
        }

        fn disconnect(&mut self) {
            self.0.borrow_mut().clear();
        }
    }

    #[test]
    fn re_registering_the_same_region_keeps_it_observed() {
        let observer = SetObserver::default();
        let mut tracker = ActiveSectionTracker::new(observer.clone(), None);

        tracker.register("a", "node-a");
        tracker.register("a", "node-a");

        assert!(tracker.is_registered("a"));
        assert!(observer.0.borrow().contains("node-a"));

        tracker.unregister("a");
        assert!(observer.0.borrow().is_empty());
    }

    #[test]
    fn dropping_the_tracker_disconnects() {
        let (tracker, observer) = tracker();
        assert!(!observer.0.borrow().disconnected);

        drop(tracker);

        assert!(observer.0.borrow().disconnected);
    }

    #[test]
    fn track_progress_follows_the_active_index() {
        let ids = ["a", "b", "c"];

        assert_eq!(0.0, track_progress(Some("a"), &ids));
        assert_eq!(50.0, track_progress(Some("b"), &ids));
        assert_eq!(100.0, track_progress(Some("c"), &ids));
        assert_eq!(0.0, track_progress(Some("zzz"), &ids));
        assert_eq!(100.0, track_progress(None, &["only"]));
    }

    #[test]
    fn default_options_shrink_the_viewport() {
        let options = ObserverOptions::default();

        assert_eq!((200.0, 700.0), options.effective_viewport(1000.0));
        assert_eq!("-20% 0px -30% 0px", options.root_margin());
    }
}

//! One interactive map: the markers on it, which one is selected, how each is
//! presented, and the camera reads and writes that go through the host's
//! projection.
//!
//! The session never holds a timer. Every call that can start an icon
//! animation or throttle work takes the current time in milliseconds.

use crate::animation::icon::IconAnimator;
use crate::core::camera::{CameraPose, MovementReason, MovementState, ViewportSize};
use crate::core::config::{EngineConfig, EngineProfile};
use crate::core::geo::{GeoCoordinate, Point};
use crate::core::viewport::{MapBounds, Padding, ScaleStrategy};
use crate::input::selection::{SelectionDisambiguator, TouchCandidate};
use crate::layers::marker::{label_bounds, pin_bounds, MarkerSpec, MarkerViewState};
use crate::prelude::{HashMap, HashSet};
use crate::spatial::overlap::{resolve_visible_labels, LabelCandidate};
use crate::traits::Projection;
use std::hash::Hash;

/// Limits label recomputation while the camera is moving: a refresh happens
/// only when the interval has elapsed since the last one and the zoom changed.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRefreshThrottle {
    interval_ms: u64,
    last_refresh_ms: Option<u64>,
    last_zoom: Option<f64>,
}

impl LabelRefreshThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_refresh_ms: None,
            last_zoom: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns true, and records the refresh, if labels should be recomputed
    /// for a camera at `zoom` at time `now_ms`
    pub fn should_refresh(&mut self, now_ms: u64, zoom: f64) -> bool {
        let interval_elapsed = self
            .last_refresh_ms
            .map_or(true, |last| now_ms > last.saturating_add(self.interval_ms));
        let zoom_changed = self.last_zoom.map_or(true, |last| last != zoom);
        if interval_elapsed && zoom_changed {
            self.last_refresh_ms = Some(now_ms);
            self.last_zoom = Some(zoom);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_refresh_ms = None;
        self.last_zoom = None;
    }
}

/// A marker moved from one view state to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStateChange<K> {
    pub id: K,
    pub from: MarkerViewState,
    pub to: MarkerViewState,
}

/// Result of recomputing label visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRefresh<K> {
    /// Markers whose label is on screen, in marker order
    pub shown: Vec<K>,
    pub changes: Vec<ViewStateChange<K>>,
}

/// What a tap on the map resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome<K> {
    /// A marker was under the finger and is now selected
    MarkerSelected {
        id: K,
        changes: Vec<ViewStateChange<K>>,
    },
    /// No marker was close enough; `coordinate` is the ground point tapped
    MapTapped {
        coordinate: Option<GeoCoordinate>,
        changes: Vec<ViewStateChange<K>>,
    },
}

#[derive(Debug, Clone)]
struct MarkerEntry<K> {
    spec: MarkerSpec<K>,
    view_state: MarkerViewState,
    animator: Option<IconAnimator>,
}

/// Host-facing state of one map
#[derive(Debug, Clone)]
pub struct MapSession<K> {
    config: EngineConfig,
    viewport: ViewportSize,
    entries: Vec<MarkerEntry<K>>,
    slots: HashMap<K, usize>,
    selected: Option<K>,
    disambiguator: SelectionDisambiguator<K>,
    throttle: LabelRefreshThrottle,
    deselect_on_map_tap: bool,
    movement_reason: MovementReason,
}

impl<K> MapSession<K>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    pub fn new(config: EngineConfig) -> Self {
        Self {
            disambiguator: SelectionDisambiguator::with_config(config.selection.clone()),
            throttle: LabelRefreshThrottle::new(config.labels.refresh_throttle_ms),
            config,
            viewport: ViewportSize::new(1.0, 1.0),
            entries: Vec::new(),
            slots: HashMap::default(),
            selected: None,
            deselect_on_map_tap: false,
            movement_reason: MovementReason::Unknown,
        }
    }

    pub fn with_profile(profile: EngineProfile) -> Self {
        Self::new(profile.resolve())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Records the map's size in dp; degenerate sizes are clamped to 1 dp
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport.sanitized();
    }

    /// Whether a tap that hits no marker clears the selection
    pub fn set_deselect_on_map_tap(&mut self, enabled: bool) {
        self.deselect_on_map_tap = enabled;
    }

    pub fn deselect_on_map_tap(&self) -> bool {
        self.deselect_on_map_tap
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerSpec<K>> {
        self.entries.iter().map(|entry| &entry.spec)
    }

    pub fn marker(&self, id: &K) -> Option<&MarkerSpec<K>> {
        self.entry(id).map(|entry| &entry.spec)
    }

    pub fn view_state(&self, id: &K) -> Option<MarkerViewState> {
        self.entry(id).map(|entry| entry.view_state)
    }

    pub fn selected(&self) -> Option<&K> {
        self.selected.as_ref()
    }

    fn entry(&self, id: &K) -> Option<&MarkerEntry<K>> {
        self.slots.get(id).map(|&slot| &self.entries[slot])
    }

    /// Replaces the marker set.
    ///
    /// Markers that keep their id keep their view state. Repeated ids keep the
    /// first marker. The tap cycling history is cleared. If the selected marker
    /// is gone it is deselected and its id returned. Labels are not recomputed;
    /// call [`MapSession::refresh_labels`] afterwards.
    pub fn set_markers(&mut self, markers: impl IntoIterator<Item = MarkerSpec<K>>) -> Option<K> {
        let mut previous: HashMap<K, MarkerViewState> = self
            .entries
            .drain(..)
            .map(|entry| (entry.spec.id, entry.view_state))
            .collect();
        self.slots.clear();

        for spec in markers {
            if self.slots.contains_key(&spec.id) {
                log::warn!("ignoring marker with repeated id {:?}", spec.id);
                continue;
            }
            let view_state = previous.remove(&spec.id).unwrap_or_default();
            let animator = spec.icon.animator(&self.config.animation).map(|mut animator| {
                animator.settle(view_state.is_expanded());
                animator
            });
            self.slots.insert(spec.id.clone(), self.entries.len());
            self.entries.push(MarkerEntry {
                spec,
                view_state,
                animator,
            });
        }

        self.disambiguator.reset();
        log::debug!("marker set replaced, {} markers", self.entries.len());

        match self.selected.take() {
            Some(id) if self.slots.contains_key(&id) => {
                self.selected = Some(id);
                None
            }
            dropped => dropped,
        }
    }

    fn set_view_state(
        &mut self,
        slot: usize,
        to: MarkerViewState,
        now_ms: u64,
    ) -> Option<ViewStateChange<K>> {
        let entry = &mut self.entries[slot];
        let from = entry.view_state;
        if from == to {
            return None;
        }
        if let Some(animator) = entry.animator.as_mut() {
            animator.transition(from, to, now_ms);
        }
        entry.view_state = to;
        Some(ViewStateChange {
            id: entry.spec.id.clone(),
            from,
            to,
        })
    }

    /// Selects `id`, expanding it and collapsing the previous selection to a bare
    /// pin, then recomputes labels. Unknown ids change nothing.
    pub fn select<P: Projection>(
        &mut self,
        id: &K,
        projection: &P,
        now_ms: u64,
    ) -> Vec<ViewStateChange<K>> {
        let Some(&slot) = self.slots.get(id) else {
            log::debug!("select ignored, unknown marker {:?}", id);
            return Vec::new();
        };

        let mut changes = Vec::new();
        if self.selected.as_ref() != Some(id) {
            changes.extend(self.set_view_state(slot, MarkerViewState::ExpandedWithLabel, now_ms));
            if let Some(previous) = self.selected.take() {
                changes.extend(self.collapse(&previous, now_ms));
            }
            self.selected = Some(id.clone());
        }

        changes.extend(self.refresh_labels(projection, now_ms).changes);
        changes
    }

    /// Clears the selection, if any, and recomputes labels
    pub fn deselect<P: Projection>(&mut self, projection: &P, now_ms: u64) -> Vec<ViewStateChange<K>> {
        let Some(previous) = self.selected.take() else {
            return Vec::new();
        };
        let mut changes: Vec<ViewStateChange<K>> = self.collapse(&previous, now_ms).into_iter().collect();
        changes.extend(self.refresh_labels(projection, now_ms).changes);
        changes
    }

    /// Puts a formerly selected marker back to a bare pin; the next label pass
    /// brings its label back if there is room
    fn collapse(&mut self, id: &K, now_ms: u64) -> Option<ViewStateChange<K>> {
        let slot = *self.slots.get(id)?;
        self.set_view_state(slot, MarkerViewState::PinOnly, now_ms)
    }

    /// Recomputes which labels fit on screen and updates view states to match.
    ///
    /// Markers without a label, or that the projection cannot place, never get
    /// one. The selected marker keeps its expanded state.
    pub fn refresh_labels<P: Projection>(&mut self, projection: &P, now_ms: u64) -> LabelRefresh<K> {
        let pose = projection.current_camera_pose();
        let candidates: Vec<LabelCandidate<K>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let label = entry.spec.label_size?;
                let anchor = projection.screen_point_of(entry.spec.position, &pose, self.viewport)?;
                Some(LabelCandidate::new(
                    entry.spec.id.clone(),
                    label_bounds(anchor, label),
                ))
            })
            .collect();

        let shown = resolve_visible_labels(&candidates, self.selected.as_ref());
        let visible: HashSet<&K> = shown.iter().collect();

        let mut changes = Vec::new();
        for slot in 0..self.entries.len() {
            let id = &self.entries[slot].spec.id;
            if self.selected.as_ref() == Some(id) {
                continue;
            }
            let to = if visible.contains(id) {
                MarkerViewState::PinAndLabel
            } else {
                MarkerViewState::PinOnly
            };
            changes.extend(self.set_view_state(slot, to, now_ms));
        }

        log::trace!(
            "labels refreshed: {} of {} candidates shown, {} view state changes",
            shown.len(),
            candidates.len(),
            changes.len()
        );
        LabelRefresh { shown, changes }
    }

    /// Pin rectangles under the current camera as tap candidates. Expanded
    /// markers use their expanded icon size.
    pub fn touch_candidates<P: Projection>(&self, projection: &P) -> Vec<TouchCandidate<K>> {
        let pose = projection.current_camera_pose();
        self.entries
            .iter()
            .filter_map(|entry| {
                let anchor = projection.screen_point_of(entry.spec.position, &pose, self.viewport)?;
                let icon = entry.spec.icon.size(entry.view_state.is_expanded());
                Some(TouchCandidate::new(
                    entry.spec.id.clone(),
                    pin_bounds(anchor, icon),
                    anchor,
                ))
            })
            .collect()
    }

    /// Handles a tap at `tap` (dp). A tap near pins selects one of them, cycling
    /// through stacked pins on repeated taps. Any other tap reports the ground
    /// coordinate and, if enabled, clears the selection.
    pub fn handle_tap<P: Projection>(&mut self, tap: Point, projection: &P, now_ms: u64) -> TapOutcome<K> {
        let candidates = self.touch_candidates(projection);
        match self.disambiguator.select_marker(tap, &candidates) {
            Some(id) => {
                log::debug!("tap at ({:.1}, {:.1}) selects {:?}", tap.x, tap.y, id);
                let changes = self.select(&id, projection, now_ms);
                TapOutcome::MarkerSelected { id, changes }
            }
            None => {
                let changes = if self.deselect_on_map_tap {
                    self.deselect(projection, now_ms)
                } else {
                    Vec::new()
                };
                let pose = projection.current_camera_pose();
                let coordinate = projection.geo_coordinate_of(tap, &pose, self.viewport);
                TapOutcome::MapTapped {
                    coordinate,
                    changes,
                }
            }
        }
    }

    /// Records why the camera started moving
    pub fn on_camera_move_started(&mut self, reason: MovementReason) -> (MovementState, MovementReason) {
        self.movement_reason = reason;
        (MovementState::Started, reason)
    }

    /// Reports the end of a camera movement with the reason it started with
    pub fn on_camera_idle(&self) -> (MovementState, MovementReason) {
        (MovementState::Idle, self.movement_reason)
    }

    /// Called on every camera frame; recomputes labels when the throttle allows
    pub fn on_camera_move<P: Projection>(&mut self, projection: &P, now_ms: u64) -> Option<LabelRefresh<K>> {
        let zoom = projection.current_camera_pose().zoom;
        if self.throttle.should_refresh(now_ms, zoom) {
            Some(self.refresh_labels(projection, now_ms))
        } else {
            None
        }
    }

    /// Icon frame to draw for `id` at `now_ms`; finished animations are dropped
    pub fn poll_icon_frame(&mut self, id: &K, now_ms: u64) -> Option<usize> {
        let slot = *self.slots.get(id)?;
        Some(
            self.entries[slot]
                .animator
                .as_mut()
                .map_or(0, |animator| animator.poll(now_ms)),
        )
    }

    /// Icon growth for `id` at `now_ms` on the configured curve, see
    /// [`IconAnimator::progress_at`]. Static icons report 1.0.
    pub fn icon_progress(&self, id: &K, now_ms: u64) -> Option<f64> {
        let slot = *self.slots.get(id)?;
        Some(
            self.entries[slot]
                .animator
                .as_ref()
                .map_or(1.0, |animator| animator.progress_at(now_ms)),
        )
    }

    /// Whether any icon is still playing at `now_ms`
    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.entries.iter().any(|entry| {
            entry
                .animator
                .as_ref()
                .map_or(false, |animator| animator.is_animating(now_ms))
        })
    }

    /// Region the camera currently shows
    pub fn camera_bounds<P: Projection>(&self, projection: &P) -> MapBounds {
        MapBounds::from_camera_pose(&projection.current_camera_pose(), self.viewport)
    }

    /// Region visible outside of `padding`
    pub fn camera_bounds_excluding_padding<P: Projection>(
        &self,
        projection: &P,
        padding: Padding,
        scale_strategy: ScaleStrategy,
    ) -> MapBounds {
        MapBounds::from_camera_pose_excluding_padding(
            &projection.current_camera_pose(),
            scale_strategy,
            padding,
            self.viewport,
        )
    }

    /// Pose the host should apply to show `bounds`, within the configured zoom limits
    pub fn camera_pose_for(&self, bounds: &MapBounds) -> CameraPose {
        bounds.to_camera_pose_within(self.viewport, &self.config.zoom)
    }
}

impl<K> Default for MapSession<K>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::marker::{MarkerIcon, Size};

    /// 100 dp per degree, north up, no tilt
    struct FlatProjection {
        pose: CameraPose,
    }

    impl Projection for FlatProjection {
        fn screen_point_of(
            &self,
            coordinate: GeoCoordinate,
            pose: &CameraPose,
            viewport: ViewportSize,
        ) -> Option<Point> {
            Some(Point::new(
                (coordinate.longitude - pose.target.longitude) * 100.0 + viewport.width / 2.0,
                (pose.target.latitude - coordinate.latitude) * 100.0 + viewport.height / 2.0,
            ))
        }

        fn geo_coordinate_of(
            &self,
            point: Point,
            pose: &CameraPose,
            viewport: ViewportSize,
        ) -> Option<GeoCoordinate> {
            Some(GeoCoordinate::new(
                pose.target.latitude - (point.y - viewport.height / 2.0) / 100.0,
                pose.target.longitude + (point.x - viewport.width / 2.0) / 100.0,
            ))
        }

        fn current_camera_pose(&self) -> CameraPose {
            self.pose
        }
    }

    fn projection() -> FlatProjection {
        FlatProjection {
            pose: CameraPose::new(GeoCoordinate::new(0.0, 0.0), 10.0, 0.0, 0.0),
        }
    }

    fn marker(id: u32, latitude: f64, longitude: f64) -> MarkerSpec<u32> {
        MarkerSpec::new(
            id,
            GeoCoordinate::new(latitude, longitude),
            MarkerIcon::Static {
                size: Size::new(20.0, 30.0),
            },
        )
        .with_label(Size::new(60.0, 20.0))
    }

    fn session() -> MapSession<u32> {
        let mut session = MapSession::default();
        session.set_viewport(ViewportSize::new(400.0, 400.0));
        session
    }

    #[test]
    fn test_throttle_needs_time_and_zoom_change() {
        let mut throttle = LabelRefreshThrottle::new(100);
        assert!(throttle.should_refresh(0, 10.0));
        assert!(!throttle.should_refresh(50, 11.0));
        assert!(!throttle.should_refresh(100, 11.0));
        assert!(!throttle.should_refresh(500, 10.0));
        assert!(throttle.should_refresh(101, 11.0));
        throttle.reset();
        assert!(throttle.should_refresh(101, 11.0));
    }

    #[test]
    fn test_overlapping_labels_hide_one() {
        let mut session = session();
        // 0.1 degree apart = 10 dp, labels are 60 dp wide
        session.set_markers(vec![marker(1, 0.0, 0.0), marker(2, 0.0, 0.1), marker(3, 1.0, 1.0)]);
        let refresh = session.refresh_labels(&projection(), 0);
        assert_eq!(refresh.shown, vec![1, 3]);
        assert_eq!(session.view_state(&2), Some(MarkerViewState::PinOnly));
        assert_eq!(
            refresh.changes,
            vec![ViewStateChange {
                id: 2,
                from: MarkerViewState::PinAndLabel,
                to: MarkerViewState::PinOnly,
            }]
        );
    }

    #[test]
    fn test_select_prioritizes_label_and_collapses_previous() {
        let mut session = session();
        let projection = projection();
        session.set_markers(vec![marker(1, 0.0, 0.0), marker(2, 0.0, 0.1)]);

        session.select(&2, &projection, 0);
        assert_eq!(session.selected(), Some(&2));
        assert_eq!(session.view_state(&2), Some(MarkerViewState::ExpandedWithLabel));
        assert_eq!(session.view_state(&1), Some(MarkerViewState::PinOnly));

        session.select(&1, &projection, 10);
        assert_eq!(session.view_state(&1), Some(MarkerViewState::ExpandedWithLabel));
        assert_eq!(session.view_state(&2), Some(MarkerViewState::PinOnly));

        assert!(session.select(&99, &projection, 20).is_empty());
        assert_eq!(session.selected(), Some(&1));
    }

    #[test]
    fn test_tap_cycles_and_map_tap_deselects() {
        let mut session = session();
        let projection = projection();
        session.set_markers(vec![marker(1, 0.0, 0.0), marker(2, 0.0, 0.05)]);
        let tap = Point::new(200.0, 190.0);

        let first = session.handle_tap(tap, &projection, 0);
        assert!(matches!(first, TapOutcome::MarkerSelected { id: 1, .. }));
        let second = session.handle_tap(tap, &projection, 10);
        assert!(matches!(second, TapOutcome::MarkerSelected { id: 2, .. }));

        let miss = session.handle_tap(Point::new(20.0, 20.0), &projection, 20);
        assert!(matches!(miss, TapOutcome::MapTapped { coordinate: Some(_), .. }));
        assert_eq!(session.selected(), Some(&2));

        session.set_deselect_on_map_tap(true);
        session.handle_tap(Point::new(20.0, 20.0), &projection, 30);
        assert_eq!(session.selected(), None);
        assert_eq!(session.view_state(&2), Some(MarkerViewState::PinOnly));
    }

    #[test]
    fn test_set_markers_drops_vanished_selection() {
        let mut session = session();
        let projection = projection();
        session.set_markers(vec![marker(1, 0.0, 0.0), marker(2, 1.0, 1.0)]);
        session.select(&1, &projection, 0);

        assert_eq!(session.set_markers(vec![marker(1, 0.0, 0.0)]), None);
        assert_eq!(session.view_state(&1), Some(MarkerViewState::ExpandedWithLabel));

        assert_eq!(session.set_markers(vec![marker(2, 1.0, 1.0), marker(2, 3.0, 3.0)]), Some(1));
        assert_eq!(session.selected(), None);
        assert_eq!(session.markers().count(), 1);
    }

    #[test]
    fn test_camera_reads_use_viewport() {
        let session = session();
        let projection = projection();
        let bounds = session.camera_bounds(&projection);
        let pose = session.camera_pose_for(&bounds);
        assert!((pose.zoom - 10.0).abs() < 1e-9);
        assert_eq!(
            session.on_camera_idle(),
            (MovementState::Idle, MovementReason::Unknown)
        );
    }
}

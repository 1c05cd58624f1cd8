//! Turns a tap near several stacked pins into a single marker choice.
//!
//! Tapping the same cluster again walks through its pins nearest-first, wrapping
//! around once every pin was picked. Tapping a visibly different cluster starts
//! over with its nearest pin.

use crate::core::bounds::ScreenRect;
use crate::core::config::SelectionConfig;
use crate::core::geo::Point;
use crate::prelude::HashSet;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// A marker whose pin may be under the finger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchCandidate<K> {
    pub id: K,
    /// Pin rectangle in dp
    pub hit_rect: ScreenRect,
    /// Marker anchor in dp, used to rank candidates by distance to the tap
    pub screen_position: Point,
}

impl<K> TouchCandidate<K> {
    pub fn new(id: K, hit_rect: ScreenRect, screen_position: Point) -> Self {
        Self {
            id,
            hit_rect,
            screen_position,
        }
    }
}

/// Stateful tap disambiguation for one map session
#[derive(Debug, Clone)]
pub struct SelectionDisambiguator<K> {
    config: SelectionConfig,
    previous_touched: Vec<K>,
    toggled: HashSet<K>,
}

impl<K> SelectionDisambiguator<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_config(SelectionConfig::default())
    }

    pub fn with_config(config: SelectionConfig) -> Self {
        Self {
            config,
            previous_touched: Vec::new(),
            toggled: HashSet::default(),
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Forgets the cycling history; call when the marker set changes
    pub fn reset(&mut self) {
        self.previous_touched.clear();
        self.toggled.clear();
    }

    /// Square around the tap that counts as touching a pin
    pub fn touch_region(&self, tap: Point) -> ScreenRect {
        ScreenRect::around(tap, self.config.touch_threshold_dp)
    }

    /// Candidates whose pin overlaps the touch region, nearest first. Ties keep
    /// their input order and repeated ids keep their first occurrence.
    pub fn touched<'a>(&self, tap: Point, candidates: &'a [TouchCandidate<K>]) -> Vec<&'a TouchCandidate<K>> {
        let region = self.touch_region(tap);
        let mut seen: HashSet<&K> = HashSet::default();
        let mut touched: Vec<&TouchCandidate<K>> = Vec::new();
        for candidate in candidates {
            if candidate.hit_rect.intersects(&region) && seen.insert(&candidate.id) {
                touched.push(candidate);
            }
        }
        touched.sort_by(|a, b| {
            tap.distance_to(&a.screen_position)
                .total_cmp(&tap.distance_to(&b.screen_position))
        });
        touched
    }

    /// Picks the marker to select for a tap at `tap`, or `None` when no pin is
    /// close enough. A miss leaves the cycling history untouched.
    pub fn select_marker(&mut self, tap: Point, candidates: &[TouchCandidate<K>]) -> Option<K> {
        let current: Vec<K> = self
            .touched(tap, candidates)
            .into_iter()
            .map(|candidate| candidate.id.clone())
            .collect();
        let nearest = current.first()?.clone();

        let repeated = current
            .iter()
            .filter(|id| self.previous_touched.contains(id))
            .count();
        let similarity = repeated as f64 / current.len() as f64;

        let selected = if similarity > self.config.similarity_threshold {
            match current.iter().find(|id| !self.toggled.contains(*id)) {
                Some(next) => {
                    log::trace!("cycling to next marker ({} touched)", current.len());
                    self.toggled.insert(next.clone());
                    next.clone()
                }
                None => {
                    log::trace!("cycle exhausted, restarting from nearest");
                    self.toggled.clear();
                    self.toggled.insert(nearest.clone());
                    nearest
                }
            }
        } else {
            log::trace!(
                "new cluster (similarity {:.2}), selecting nearest",
                similarity
            );
            self.toggled.clear();
            self.toggled.insert(nearest.clone());
            nearest
        };

        self.previous_touched = current;
        Some(selected)
    }
}

impl<K> Default for SelectionDisambiguator<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

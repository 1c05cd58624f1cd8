//! Picks which marker labels to show so that no two shown labels overlap.
//!
//! Labels form an undirected graph with an edge between every pair of
//! intersecting rectangles. Each connected component is 2-colored with a
//! breadth-first walk and the larger color class is shown, which gives a large
//! independent set without solving the exact (NP-hard) problem. Overlap graphs
//! of map labels are usually bipartite or close to it; a node that meets a
//! neighbor of its own color is evicted from both classes.
//!
//! The selected marker's label, when given, is always shown and every label it
//! overlaps is hidden.

use crate::core::bounds::ScreenRect;
use crate::prelude::HashMap;
use crate::spatial::index::RectIndex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::hash::Hash;

/// One marker label competing for screen space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCandidate<K> {
    pub id: K,
    pub rect: ScreenRect,
    pub is_priority: bool,
}

impl<K> LabelCandidate<K> {
    pub fn new(id: K, rect: ScreenRect) -> Self {
        Self {
            id,
            rect,
            is_priority: false,
        }
    }

    pub fn priority(id: K, rect: ScreenRect) -> Self {
        Self {
            id,
            rect,
            is_priority: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Class of the first node reached in a component, wins ties
    Primary,
    Secondary,
}

impl Color {
    fn opposite(self) -> Color {
        match self {
            Color::Primary => Color::Secondary,
            Color::Secondary => Color::Primary,
        }
    }
}

/// Ids of the labels to show, in candidate order.
///
/// `priority` names the selected marker; when it is `None` the first candidate
/// flagged `is_priority` is used instead. A priority id that is not among the
/// candidates is ignored. Candidates repeating an earlier id are ignored.
pub fn resolve_visible_labels<K>(candidates: &[LabelCandidate<K>], priority: Option<&K>) -> Vec<K>
where
    K: Clone + Eq + Hash,
{
    let mut slot_of: HashMap<&K, usize> = HashMap::default();
    let mut nodes: Vec<&LabelCandidate<K>> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !slot_of.contains_key(&candidate.id) {
            slot_of.insert(&candidate.id, nodes.len());
            nodes.push(candidate);
        }
    }
    if nodes.is_empty() {
        return Vec::new();
    }

    let priority_slot = match priority {
        Some(id) => slot_of.get(id).copied(),
        None => nodes.iter().position(|node| node.is_priority),
    };

    let rects: Vec<ScreenRect> = nodes.iter().map(|node| node.rect).collect();
    let adjacency = RectIndex::new(rects.iter().copied()).overlap_graph(&rects);

    let shown = find_nodes_to_show(&adjacency, priority_slot);
    log::trace!(
        "showing {} of {} labels (priority slot {:?})",
        shown.iter().filter(|&&show| show).count(),
        nodes.len(),
        priority_slot
    );

    nodes
        .iter()
        .zip(shown)
        .filter(|(_, show)| *show)
        .map(|(node, _)| node.id.clone())
        .collect()
}

/// Marks, per slot, whether its label is shown
fn find_nodes_to_show(adjacency: &[Vec<usize>], priority: Option<usize>) -> Vec<bool> {
    let node_count = adjacency.len();
    let mut colors: Vec<Option<Color>> = vec![None; node_count];
    let mut evicted = vec![false; node_count];
    let mut shown = vec![false; node_count];

    for start in 0..node_count {
        if colors[start].is_some() {
            continue;
        }

        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        colors[start] = Some(Color::Primary);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.push(current);
            let Some(color) = colors[current] else {
                continue;
            };
            for &neighbor in &adjacency[current] {
                match colors[neighbor] {
                    None => {
                        colors[neighbor] = Some(color.opposite());
                        queue.push_back(neighbor);
                    }
                    // Odd cycle: this node cannot join either class
                    Some(neighbor_color) if neighbor_color == color => evicted[current] = true,
                    Some(_) => {}
                }
            }
        }

        let mut primary: Vec<usize> = Vec::new();
        let mut secondary: Vec<usize> = Vec::new();
        for &node in &component {
            if evicted[node] {
                continue;
            }
            match colors[node] {
                Some(Color::Primary) => primary.push(node),
                Some(Color::Secondary) => secondary.push(node),
                None => {}
            }
        }

        if let Some(selected) = priority.filter(|slot| component.contains(slot)) {
            let contested = &adjacency[selected];
            for class in [&mut primary, &mut secondary] {
                class.retain(|node| *node != selected && !contested.contains(node));
                class.push(selected);
            }
        }

        let chosen = if secondary.len() > primary.len() {
            secondary
        } else {
            primary
        };
        for node in chosen {
            shown[node] = true;
        }
    }

    shown
}

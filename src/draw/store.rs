//! Bounded history of committed strokes.

use std::collections::VecDeque;

use super::stroke::{Stroke, StrokeId};
use crate::engine::GeometryHandle;

/// Default bound on committed strokes.
pub const DEFAULT_MAX_STROKES: usize = 100;

/// Container for all committed strokes, oldest first.
///
/// The store never holds more than `max_strokes` entries. Removal hands the
/// stroke back to the caller, which releases its physics and geometry.
#[derive(Debug)]
pub struct StrokeStore {
    strokes: VecDeque<Stroke>,
    max_strokes: usize,
}

impl Default for StrokeStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STROKES)
    }
}

impl StrokeStore {
    /// Creates an empty store. A bound of zero is raised to one.
    pub fn new(max_strokes: usize) -> Self {
        Self {
            strokes: VecDeque::new(),
            max_strokes: max_strokes.max(1),
        }
    }

    pub fn max_strokes(&self) -> usize {
        self.max_strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Appends a stroke, evicting and returning the oldest when over the bound.
    #[must_use = "evicted strokes must be released"]
    pub fn commit(&mut self, stroke: Stroke) -> Option<Stroke> {
        self.strokes.push_back(stroke);
        if self.strokes.len() > self.max_strokes {
            self.strokes.pop_front()
        } else {
            None
        }
    }

    /// Removes and returns the newest stroke, if any.
    #[must_use = "undone strokes must be released"]
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop_back()
    }

    /// Removes every stroke, oldest first.
    #[must_use = "cleared strokes must be released"]
    pub fn drain(&mut self) -> Vec<Stroke> {
        self.strokes.drain(..).collect()
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|stroke| stroke.id == id)
    }

    pub fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|stroke| stroke.id == id)
    }

    /// Finds the stroke that owns `geometry`.
    pub fn find_by_geometry(&self, geometry: GeometryHandle) -> Option<StrokeId> {
        self.strokes
            .iter()
            .find(|stroke| stroke.geometry() == Some(geometry))
            .map(|stroke| stroke.id)
    }

    pub fn contains_geometry(&self, geometry: GeometryHandle) -> bool {
        self.find_by_geometry(geometry).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Stroke> {
        self.strokes.iter_mut()
    }

    /// Ids in store order (oldest first).
    pub fn ids(&self) -> Vec<StrokeId> {
        self.strokes.iter().map(|stroke| stroke.id).collect()
    }
}

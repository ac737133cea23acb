//! Undo history: one `StackItem` per completed slide.

use crate::engine::Element;
use crate::position::Position;

/// Everything needed to reverse one completed slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackItem {
    origin_position: Position,
    origin_element: Element,
    collected_lives: Vec<Position>,
    collected_gems: Vec<Position>,
}

impl StackItem {
    pub fn new(
        origin_position: Position,
        origin_element: Element,
        collected_lives: Vec<Position>,
        collected_gems: Vec<Position>,
    ) -> Self {
        StackItem {
            origin_position,
            origin_element,
            collected_lives,
            collected_gems,
        }
    }

    /// Where the player was before the slide started.
    pub fn origin_position(&self) -> Position {
        self.origin_position
    }

    /// What the origin cell held before the slide (`Player` or `PlayerStop`).
    pub fn origin_element(&self) -> Element {
        self.origin_element
    }

    /// Extra-life tiles crossed during the slide, in the order they were taken.
    pub fn collected_lives(&self) -> &[Position] {
        &self.collected_lives
    }

    /// Gem tiles crossed during the slide, in the order they were taken.
    pub fn collected_gems(&self) -> &[Position] {
        &self.collected_gems
    }
}

/// Last-in-first-out store of `StackItem`s.
///
/// Besides the items, it counts how many times an item has been popped. That
/// counter only grows and feeds the level's score penalty.
#[derive(Clone, Debug, Default)]
pub struct UndoStack {
    items: Vec<StackItem>,
    num_pops: u32,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: StackItem) {
        self.items.push(item);
    }

    /// Removes the most recent item. Only a successful pop is counted.
    pub fn pop(&mut self) -> Option<StackItem> {
        let item = self.items.pop()?;
        self.num_pops += 1;
        Some(item)
    }

    pub fn peek(&self) -> Option<&StackItem> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of successful pops since the stack was created.
    pub fn num_pops(&self) -> u32 {
        self.num_pops
    }
}

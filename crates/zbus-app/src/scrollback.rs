//! History windowing.
//!
//! Maps the append-only history onto a viewport of `rows x columns` cells.
//! The newest visible entry sits at the top edge (`top`) and older entries
//! stack below it; an entry that would not fit completely is not drawn.
//!
//! Both functions take per-entry heights rather than entries so the algorithm
//! stays independent of how entries are rendered.
//!
//! # Invariants
//!
//! - [`next_top`] returns an index inside the history (0 for an empty one).
//! - With a selection, the returned top is never older than the selection,
//!   and the selection is drawn unless its own height exceeds the viewport.

use crate::HistoryEntry;

/// Where an entry is drawn inside the history viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// History index.
    pub index: usize,
    /// First viewport row.
    pub row: usize,
    /// Rows occupied.
    pub height: usize,
}

/// Rows `entry` occupies when wrapped at `columns`. At least 1.
pub fn rendered_height(entry: &HistoryEntry, columns: usize) -> usize {
    entry.line().chars().count().div_ceil(columns.max(1)).max(1)
}

/// Heights of every entry wrapped at `columns`, oldest first.
pub fn heights(history: &[HistoryEntry], columns: usize) -> Vec<usize> {
    history.iter().map(|entry| rendered_height(entry, columns)).collect()
}

/// Top index that keeps `selection` visible, moving as little as possible.
///
/// - No selection: the newest entry.
/// - Selection at or above `prev_top`: the selection itself.
/// - Selection below: `prev_top` if everything from it down to the selection
///   fits in `rows`, otherwise the newest index that makes it fit, falling
///   back to the selection when the selected entry alone is too tall.
pub fn next_top(heights: &[usize], rows: usize, prev_top: usize, selection: Option<usize>) -> usize {
    let Some(last) = heights.len().checked_sub(1) else {
        return 0;
    };
    let Some(selection) = selection else {
        return last;
    };

    let selection = selection.min(last);
    let prev_top = prev_top.min(last);
    if selection >= prev_top {
        return selection;
    }

    let span = &heights[selection..=prev_top];
    let mut distance: usize = span.iter().sum();
    for (index, height) in (selection..=prev_top).rev().zip(span.iter().rev()) {
        if distance <= rows {
            return index;
        }
        distance -= height;
    }

    selection
}

/// Entries drawn for `top`, newest first, stopping at the first that does
/// not fit.
pub fn layout(heights: &[usize], rows: usize, top: usize) -> Vec<Placement> {
    let Some(last) = heights.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut placements = Vec::new();
    let mut row = 0;
    for index in (0..=top.min(last)).rev() {
        let height = heights[index];
        if row + height > rows {
            break;
        }
        placements.push(Placement { index, row, height });
        row += height;
    }
    placements
}

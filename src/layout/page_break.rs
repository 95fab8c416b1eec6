//! # Page Break Decisions
//!
//! Every block the document draws (a field row, a section header, a
//! photo) is unbreakable: it either fits below the cursor or moves whole
//! to the next page.

/// What to do with a block at the current cursor position.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakDecision {
    /// Draw the block on the current page.
    Place,
    /// Start a new page and draw the block at its top.
    MoveToNextPage,
}

/// Decide whether a block of `block_height` starting at `cursor_y` fits
/// above `bottom_limit`.
///
/// A block that would not fit even on a fresh page is placed where the
/// cursor is when the cursor already sits at `page_top`; moving it would
/// only leave an empty page behind.
pub fn decide_break(
    cursor_y: f64,
    block_height: f64,
    page_top: f64,
    bottom_limit: f64,
) -> BreakDecision {
    if cursor_y + block_height <= bottom_limit {
        return BreakDecision::Place;
    }

    if cursor_y <= page_top {
        return BreakDecision::Place;
    }

    BreakDecision::MoveToNextPage
}

//! Bundle aggregation: benefits and difficulty.
//!
//! Both functions are pure and order-independent over their inputs (ties in
//! difficulty go to the first item attaining the maximum).

use crate::domain::{Benefits, ContentItem, Difficulty};

/// Sum benefits across items. Missing fields count as zero.
pub fn aggregate_benefits<'a, I>(items: I) -> Benefits
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    items.into_iter().fold(Benefits::default(), |acc, item| {
        let b = item.benefits();
        Benefits {
            hours: acc.hours + b.hours,
            lines_of_code: acc.lines_of_code + b.lines_of_code,
        }
    })
}

/// Highest difficulty across items.
///
/// Items without a declared difficulty count as beginner; an empty input
/// yields beginner. Strictly-greater comparison keeps the first item
/// attaining the maximum.
pub fn aggregate_difficulty<'a, I>(items: I) -> Difficulty
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let mut max = Difficulty::Beginner;
    for item in items {
        let level = item.difficulty.unwrap_or_default();
        if level > max {
            max = level;
        }
    }
    max
}

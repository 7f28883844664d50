//! Legality check for a [`Layout`].
//!
//! A layout is legal when every line of its bounding box, scanned once row by
//! row and once column by column, can be explained by at most one running
//! word and at most one word crossing it. Scanning both axes with the same
//! state machine catches overlaps a single direction cannot see: two parallel
//! words touching side by side only show up as a foreign owner on the
//! perpendicular scan.

use crate::layout::{BoundingBox, Cover, Layout};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Rows,
    Columns,
}

/// Returns whether `layout` is a legal arrangement: words meet only at single
/// perpendicular crossings that agree on the letter, and never touch
/// otherwise.
pub fn is_valid(layout: &Layout) -> bool {
    check(layout, [Axis::Rows, Axis::Columns])
}

/// Same verdict as [`is_valid`], scanning columns before rows.
pub fn is_valid_columns_first(layout: &Layout) -> bool {
    check(layout, [Axis::Columns, Axis::Rows])
}

fn check(layout: &Layout, order: [Axis; 2]) -> bool {
    match layout.bounding_box() {
        Some(bounds) => order.into_iter().all(|axis| scan(layout, bounds, axis)),
        None => true,
    }
}

fn scan(layout: &Layout, bounds: BoundingBox, axis: Axis) -> bool {
    let (lines, cells) = match axis {
        Axis::Rows => (bounds.min_y..bounds.max_y, bounds.min_x..bounds.max_x),
        Axis::Columns => (bounds.min_x..bounds.max_x, bounds.min_y..bounds.max_y),
    };

    for line in lines {
        let mut state = LineState::default();
        for cell in cells.clone() {
            let (x, y) = match axis {
                Axis::Rows => (cell, line),
                Axis::Columns => (line, cell),
            };
            if !state.step(layout, &layout.characters_at(x, y)) {
                return false;
            }
        }
    }
    true
}

/// Placements active on the current line. `owner` is the word running along
/// the line, `partner` a word crossing it at the current cell. While
/// `resolved` is false the two were first seen together and it is not yet
/// known which of them continues along the line.
#[derive(Default, Debug)]
struct LineState {
    owner: Option<usize>,
    partner: Option<usize>,
    resolved: bool,
}

impl LineState {
    fn step(&mut self, layout: &Layout, covers: &[Cover]) -> bool {
        match *covers {
            [] => {
                self.owner = None;
                self.partner = None;
                true
            }
            [single] => self.single(single.placement),
            [a, b] => {
                if a.letter != b.letter {
                    return false;
                }
                if layout.get(a.placement).direction() == layout.get(b.placement).direction() {
                    return false;
                }
                self.pair(a.placement, b.placement)
            }
            _ => false,
        }
    }

    fn single(&mut self, placement: usize) -> bool {
        match (self.owner, self.partner) {
            (None, _) => {
                self.owner = Some(placement);
                self.resolved = true;
                true
            }
            (Some(owner), None) => placement == owner,
            (Some(owner), Some(partner)) => {
                self.partner = None;
                if self.resolved {
                    return placement == owner;
                }
                if placement == partner {
                    self.owner = Some(partner);
                } else if placement != owner {
                    return false;
                }
                self.resolved = true;
                true
            }
        }
    }

    fn pair(&mut self, a: usize, b: usize) -> bool {
        match (self.owner, self.partner) {
            (None, _) => {
                self.owner = Some(a);
                self.partner = Some(b);
                self.resolved = false;
                true
            }
            (Some(owner), None) => {
                if a == owner {
                    self.partner = Some(b);
                } else if b == owner {
                    self.partner = Some(a);
                } else {
                    return false;
                }
                true
            }
            (Some(_), Some(_)) => false,
        }
    }
}

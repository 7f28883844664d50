use std::fmt;

use smallvec::SmallVec;

use crate::{placement::Placement, validator};

/// Rendered for a cell whose covering placements disagree.
pub const CONFLICT: char = '*';

/// A placement covering a cell: the letter it puts there and its index in the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cover {
    pub letter: u8,
    pub placement: usize,
}

pub type Covers = SmallVec<[Cover; 3]>;

/// Half-open extent of a layout, `max_*` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y) as usize
    }
}

/// An ordered collection of placements. Overlaps are not checked here, see
/// [`validator::is_valid`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layout {
    placements: Vec<Placement>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn get(&self, index: usize) -> &Placement {
        &self.placements[index]
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// A copy of this layout extended by one placement. The receiver is left
    /// untouched so sibling branches of a search never alias.
    pub fn with(&self, placement: Placement) -> Self {
        let mut placements = Vec::with_capacity(self.placements.len() + 1);
        placements.extend_from_slice(&self.placements);
        placements.push(placement);
        Self { placements }
    }

    /// Every placement covering `(x, y)`, in layout order.
    pub fn characters_at(&self, x: i32, y: i32) -> Covers {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(placement, p)| p.char_at(x, y).map(|letter| Cover { letter, placement }))
            .collect()
    }

    /// `None` for an empty layout.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.placements.first()?;
        let init = BoundingBox {
            min_x: first.x(),
            min_y: first.y(),
            max_x: first.end_x(),
            max_y: first.end_y(),
        };
        Some(self.placements.iter().fold(init, |b, p| BoundingBox {
            min_x: b.min_x.min(p.x()),
            min_y: b.min_y.min(p.y()),
            max_x: b.max_x.max(p.end_x()),
            max_y: b.max_y.max(p.end_y()),
        }))
    }

    pub fn width(&self) -> usize {
        self.bounding_box().map_or(0, |b| b.width())
    }

    pub fn height(&self) -> usize {
        self.bounding_box().map_or(0, |b| b.height())
    }

    /// Number of cells covered by more than one placement.
    pub fn crossing_count(&self) -> usize {
        let Some(b) = self.bounding_box() else {
            return 0;
        };
        (b.min_y..b.max_y)
            .flat_map(|y| (b.min_x..b.max_x).map(move |x| (x, y)))
            .filter(|&(x, y)| self.characters_at(x, y).len() > 1)
            .count()
    }

    pub fn is_valid(&self) -> bool {
        validator::is_valid(self)
    }

    /// One line per grid row, each terminated by a line break. Uncovered cells
    /// are blank, disagreeing cells show [`CONFLICT`].
    pub fn render(&self) -> String {
        let Some(b) = self.bounding_box() else {
            return String::new();
        };
        let mut out = String::with_capacity((b.width() + 1) * b.height());

        for y in b.min_y..b.max_y {
            for x in b.min_x..b.max_x {
                let mut c = ' ';
                for cover in self.characters_at(x, y) {
                    let letter = cover.letter as char;
                    if c == ' ' {
                        c = letter;
                    } else if c != letter {
                        c = CONFLICT;
                    }
                }
                out.push(c);
            }
            out.push('\n');
        }
        out
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        self.placements.iter().map(|p| p.translated(dx, dy)).collect()
    }

    /// Canonical form: moved so the bounding box starts at the origin and
    /// placements sorted. Equal for layouts that differ only by translation or
    /// insertion order.
    pub fn normalized(&self) -> Self {
        let mut normalized = match self.bounding_box() {
            Some(b) => self.translated(-b.min_x, -b.min_y),
            None => Self::new(),
        };
        normalized.placements.sort();
        normalized
    }

    /// Placements sorted without moving them.
    pub fn canonical(&self) -> Self {
        let mut canonical = self.clone();
        canonical.placements.sort();
        canonical
    }
}

impl FromIterator<Placement> for Layout {
    fn from_iter<I: IntoIterator<Item = Placement>>(iter: I) -> Self {
        Self {
            placements: iter.into_iter().collect(),
        }
    }
}

impl From<Placement> for Layout {
    fn from(placement: Placement) -> Self {
        Self {
            placements: vec![placement],
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

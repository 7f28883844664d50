use std::cmp::Ordering;

use ustr::Ustr;

/// Horizontal words run towards +x, vertical words towards +y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    pub fn other(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Maps an odometer digit onto a direction, 0 being horizontal.
    pub(crate) fn from_digit(digit: usize) -> Self {
        if digit == 0 {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }
}

/// The text of a word together with the direction it runs in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word {
    text: Ustr,
    direction: Direction,
}

impl Word {
    pub fn new(text: Ustr, direction: Direction) -> Self {
        Self { text, direction }
    }

    pub fn text(&self) -> Ustr {
        self.text
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A word anchored at the cell of its first character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    word: Word,
    x: i32,
    y: i32,
}

impl Placement {
    pub fn new(text: &str, x: i32, y: i32, direction: Direction) -> Self {
        Self::of(Word::new(Ustr::from(text), direction), x, y)
    }

    pub fn of(word: Word, x: i32, y: i32) -> Self {
        Self { word, x, y }
    }

    /// Anchors `word` so that its character at `index` lands on `(x, y)`.
    pub fn through(word: Word, index: usize, x: i32, y: i32) -> Self {
        let index = index as i32;
        match word.direction {
            Direction::Horizontal => Self::of(word, x - index, y),
            Direction::Vertical => Self::of(word, x, y - index),
        }
    }

    pub fn word(&self) -> Word {
        self.word
    }

    pub fn text(&self) -> Ustr {
        self.word.text
    }

    pub fn direction(&self) -> Direction {
        self.word.direction
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Exclusive end column.
    pub fn end_x(&self) -> i32 {
        match self.word.direction {
            Direction::Horizontal => self.x + self.word.len() as i32,
            Direction::Vertical => self.x + 1,
        }
    }

    /// Exclusive end row.
    pub fn end_y(&self) -> i32 {
        match self.word.direction {
            Direction::Horizontal => self.y + 1,
            Direction::Vertical => self.y + self.word.len() as i32,
        }
    }

    /// The character this placement puts on `(x, y)`, if it covers that cell.
    pub fn char_at(&self, x: i32, y: i32) -> Option<u8> {
        let offset = match self.word.direction {
            Direction::Horizontal if y == self.y && x >= self.x => x - self.x,
            Direction::Vertical if x == self.x && y >= self.y => y - self.y,
            _ => return None,
        };
        self.word.text.as_bytes().get(offset as usize).copied()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::of(self.word, self.x + dx, self.y + dy)
    }

    /// Iterates over the (x, y) index of each cell of this placement
    pub fn cells(self) -> Cells {
        Cells::new(self)
    }
}

impl PartialOrd for Placement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Placement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.direction()
            .cmp(&other.direction())
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
            .then_with(|| self.text().as_str().cmp(other.text().as_str()))
    }
}

pub struct Cells {
    placement: Placement,
    current: usize,
}

impl Cells {
    fn new(placement: Placement) -> Self {
        Self {
            placement,
            current: 0,
        }
    }
}

impl Iterator for Cells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.placement.word.len() {
            return None;
        }
        let (x, y) = (self.placement.x, self.placement.y);
        let step = self.current as i32;
        self.current += 1;

        match self.placement.word.direction {
            Direction::Horizontal => Some((x + step, y)),
            Direction::Vertical => Some((x, y + step)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.placement.word.len().saturating_sub(self.current);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_direction() {
        let across = Placement::new("SUN", 2, -1, Direction::Horizontal);
        let down = Placement::new("SUN", 2, -1, Direction::Vertical);

        assert_eq!(across.cells().collect::<Vec<_>>(), vec![(2, -1), (3, -1), (4, -1)]);
        assert_eq!(down.cells().collect::<Vec<_>>(), vec![(2, -1), (2, 0), (2, 1)]);
        assert_eq!(down.cells().len(), 3);
    }

    #[test]
    fn char_at_covers_only_the_word() {
        let across = Placement::new("NEUN", 10, 4, Direction::Horizontal);

        assert_eq!(across.char_at(10, 4), Some(b'N'));
        assert_eq!(across.char_at(12, 4), Some(b'U'));
        assert_eq!(across.char_at(13, 4), Some(b'N'));
        assert_eq!(across.char_at(14, 4), None);
        assert_eq!(across.char_at(9, 4), None);
        assert_eq!(across.char_at(11, 5), None);

        let down = Placement::new("NEUN", 10, 4, Direction::Vertical);
        assert_eq!(down.char_at(10, 5), Some(b'E'));
        assert_eq!(down.char_at(10, 8), None);
        assert_eq!(down.char_at(11, 5), None);
    }

    #[test]
    fn extents_are_exclusive() {
        let across = Placement::new("RADWEG", 1, 6, Direction::Horizontal);
        assert_eq!((across.end_x(), across.end_y()), (7, 7));

        let down = Placement::new("BAZAR", 8, 0, Direction::Vertical);
        assert_eq!((down.end_x(), down.end_y()), (9, 5));
    }

    #[test]
    fn through_lands_the_index_on_the_cell() {
        let word = Word::new(Ustr::from("SONNE"), Direction::Vertical);
        let placement = Placement::through(word, 2, 5, 4);

        assert_eq!((placement.x(), placement.y()), (5, 2));
        assert_eq!(placement.char_at(5, 4), Some(b'N'));

        let word = Word::new(Ustr::from("RADWEG"), Direction::Horizontal);
        let placement = Placement::through(word, 4, 5, 6);
        assert_eq!((placement.x(), placement.y()), (1, 6));
    }

    #[test]
    fn ordering_is_direction_then_row_then_column_then_text() {
        let mut placements = vec![
            Placement::new("B", 0, 0, Direction::Vertical),
            Placement::new("B", 1, 0, Direction::Horizontal),
            Placement::new("A", 1, 0, Direction::Horizontal),
            Placement::new("C", 0, 1, Direction::Horizontal),
            Placement::new("D", 5, 0, Direction::Horizontal),
        ];
        placements.sort();

        let order = placements
            .iter()
            .map(|p| (p.text().as_str(), p.direction()))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                ("A", Direction::Horizontal),
                ("B", Direction::Horizontal),
                ("D", Direction::Horizontal),
                ("C", Direction::Horizontal),
                ("B", Direction::Vertical),
            ]
        );
    }

    #[test]
    fn other_direction() {
        assert_eq!(Direction::Horizontal.other(), Direction::Vertical);
        assert_eq!(Direction::Vertical.other(), Direction::Horizontal);
        assert_eq!(Direction::from_digit(0), Direction::Horizontal);
        assert_eq!(Direction::from_digit(1), Direction::Vertical);
    }
}

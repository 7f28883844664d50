use std::cmp::Ordering;

use byte_set::ByteSet;
use ustr::Ustr;

use crate::{
    error::CrosswordError,
    placement::{Direction, Word},
};

/// A word of the input list with the set of letters it contains.
#[derive(Clone, Debug)]
pub struct Entry {
    text: Ustr,
    letters: ByteSet,
}

impl Entry {
    fn new(text: Ustr) -> Self {
        let mut letters = ByteSet::new();
        for byte in text.bytes() {
            letters.insert(byte);
        }
        Self { text, letters }
    }

    pub fn text(&self) -> Ustr {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn with_direction(&self, direction: Direction) -> Word {
        Word::new(self.text, direction)
    }

    /// Indexes of every occurrence of `letter` in this word.
    pub fn positions_of(&self, letter: u8) -> impl Iterator<Item = usize> + '_ {
        let bytes: &[u8] = if self.letters.contains(letter) {
            self.text.as_bytes()
        } else {
            &[]
        };
        bytes
            .iter()
            .enumerate()
            .filter(move |(_, b)| **b == letter)
            .map(|(i, _)| i)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Alphabetical by text.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.as_str().cmp(other.text.as_str())
    }
}

/// The validated, ordered list of words to arrange. Duplicates are kept.
#[derive(Clone, Debug)]
pub struct WordList {
    entries: Vec<Entry>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Result<Self, CrosswordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (index, word) in words.into_iter().enumerate() {
            let word = word.as_ref();
            if word.is_empty() {
                return Err(CrosswordError::EmptyWord { index });
            }
            if let Some(character) = word.chars().find(|c| !c.is_ascii_graphic()) {
                return Err(CrosswordError::InvalidCharacter {
                    word: word.to_owned(),
                    character,
                });
            }
            entries.push(Entry::new(Ustr::from(word)));
        }

        if entries.is_empty() {
            return Err(CrosswordError::EmptyWordList);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> &Entry {
        &self.entries[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Length of the longest word, which bounds the brute force coordinates.
    pub fn longest(&self) -> usize {
        self.entries.iter().map(Entry::len).max().unwrap_or(0)
    }
}

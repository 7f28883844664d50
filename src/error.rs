use thiserror::Error;

/// Rejections of an input word list, raised before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrosswordError {
    #[error("the word list is empty")]
    EmptyWordList,
    #[error("word {index} is empty")]
    EmptyWord { index: usize },
    #[error("word {word:?} contains {character:?}, only printable non-space ASCII is allowed")]
    InvalidCharacter { word: String, character: char },
}

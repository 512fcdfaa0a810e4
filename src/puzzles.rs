use crate::board::Board;
use std::fmt;
use std::fs;
use std::io;

/// Error type for puzzle-corpus loading.
#[derive(Debug)]
pub enum PuzzleError {
    /// IO error when reading from file
    Io(io::Error),
    /// A line that is not a valid board
    InvalidBoard(String),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Io(err) => write!(f, "IO error: {}", err),
            PuzzleError::InvalidBoard(msg) => write!(f, "Invalid board: {}", msg),
        }
    }
}

impl From<io::Error> for PuzzleError {
    fn from(err: io::Error) -> Self {
        PuzzleError::Io(err)
    }
}

impl From<String> for PuzzleError {
    fn from(err: String) -> Self {
        PuzzleError::InvalidBoard(err)
    }
}

/// A collection of eight-puzzle boards, one digit string per line.
#[derive(Debug)]
pub struct Puzzles {
    boards: Vec<Board>,
}

impl Puzzles {
    /// Parse boards from text with one nine-digit configuration per line.
    /// Blank lines are skipped; any other invalid line fails the whole load.
    pub fn from_text(contents: &str) -> Result<Self, PuzzleError> {
        let mut boards = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            boards.push(Board::from_digits(line)?);
        }
        Ok(Puzzles { boards })
    }

    /// Load boards from a text file.
    pub fn from_file(path: &str) -> Result<Self, PuzzleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the nth board (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// Get the number of boards.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Iterate over the boards in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Board> {
        self.boards.iter()
    }
}

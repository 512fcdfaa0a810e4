use std::fmt;

pub const SIZE: usize = 3;

/// Tile layout of the goal configuration, row-major.
const GOAL_TILES: [[u8; SIZE]; SIZE] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed expansion order for successor generation. Changing this order
/// changes the traversal of the random, BFS, and DFS strategies.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// (row, col) delta applied to the blank cell.
    fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// An eight-puzzle board: a 3x3 grid holding the tiles 1..=8 and a blank
/// (stored as 0). The blank position is cached so moves are O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [[u8; SIZE]; SIZE],
    blank: (u8, u8),
}

impl Board {
    /// Parse a board from a row-major string of nine digits, e.g.
    /// `"142358607"`. Each of the digits 0-8 must appear exactly once;
    /// 0 marks the blank.
    pub fn from_digits(digits: &str) -> Result<Self, String> {
        if digits.chars().count() != SIZE * SIZE {
            return Err(format!(
                "expected {} digits, got {:?}",
                SIZE * SIZE,
                digits
            ));
        }

        let mut tiles = [[0u8; SIZE]; SIZE];
        let mut seen = [false; SIZE * SIZE];
        let mut blank = None;

        for (i, ch) in digits.chars().enumerate() {
            let value = match ch.to_digit(10) {
                Some(d) if (d as usize) < SIZE * SIZE => d as u8,
                _ => return Err(format!("invalid tile character '{}'", ch)),
            };
            if seen[value as usize] {
                return Err(format!("duplicate tile '{}'", value));
            }
            seen[value as usize] = true;

            let (r, c) = (i / SIZE, i % SIZE);
            tiles[r][c] = value;
            if value == 0 {
                blank = Some((r as u8, c as u8));
            }
        }

        // All nine digits are distinct and in range, so the blank was seen.
        let blank = blank.ok_or_else(|| "no blank tile found".to_string())?;

        Ok(Board { tiles, blank })
    }

    /// Attempt to slide the blank one cell in the given direction. Returns
    /// false (leaving the board untouched) when the target cell is outside
    /// the grid.
    pub fn move_blank(&mut self, direction: Direction) -> bool {
        let (dr, dc) = direction.delta();
        let row = self.blank.0 as i8 + dr;
        let col = self.blank.1 as i8 + dc;

        if row < 0 || row >= SIZE as i8 || col < 0 || col >= SIZE as i8 {
            return false;
        }

        let (br, bc) = (self.blank.0 as usize, self.blank.1 as usize);
        let (row, col) = (row as usize, col as usize);
        self.tiles[br][bc] = self.tiles[row][col];
        self.tiles[row][col] = 0;
        self.blank = (row as u8, col as u8);
        true
    }

    /// Canonical row-major flat representation, e.g. `"012345678"`.
    pub fn digit_string(&self) -> String {
        let mut s = String::with_capacity(SIZE * SIZE);
        for row in &self.tiles {
            for &tile in row {
                s.push((b'0' + tile) as char);
            }
        }
        s
    }

    /// Check whether the tiles match the goal layout (win condition).
    pub fn is_solved(&self) -> bool {
        self.tiles == GOAL_TILES
    }

    /// Number of non-blank tiles that are not on their goal cell.
    pub fn num_misplaced(&self) -> u32 {
        let mut count = 0;
        for r in 0..SIZE {
            for c in 0..SIZE {
                if self.tiles[r][c] != 0 && self.tiles[r][c] != GOAL_TILES[r][c] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Sum over all nine cells (blank included) of the absolute difference
    /// between the tile value and the value the goal layout fixes at that
    /// cell. This is a value-difference proxy, not positional Manhattan
    /// distance between tile locations; the distinction is intentional and
    /// pinned by tests.
    pub fn value_distance(&self) -> u32 {
        let mut total = 0;
        for r in 0..SIZE {
            for c in 0..SIZE {
                total += (self.tiles[r][c] as i32 - GOAL_TILES[r][c] as i32).unsigned_abs();
            }
        }
        total
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for &tile in row {
                if tile == 0 {
                    write!(f, "_ ")?;
                } else {
                    write!(f, "{} ", tile)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_board() {
        let board = Board::from_digits("142358607").unwrap();
        assert_eq!(board.digit_string(), "142358607");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(Board::from_digits("").is_err());
        assert!(Board::from_digits("01234567").is_err());
        assert!(Board::from_digits("0123456789").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_tiles() {
        assert!(Board::from_digits("112345678").is_err());
        assert!(Board::from_digits("912345678").is_err());
        assert!(Board::from_digits("01234567x").is_err());
        // No blank at all
        assert!(Board::from_digits("123456788").is_err());
    }

    #[test]
    fn test_move_blank_legal() {
        let mut board = Board::from_digits("142358607").unwrap();
        assert!(board.move_blank(Direction::Right));
        assert_eq!(board.digit_string(), "142358670");
    }

    #[test]
    fn test_move_blank_out_of_bounds() {
        let mut board = Board::from_digits("142358607").unwrap();
        // Blank is on the bottom row; down must be a no-op failure.
        assert!(!board.move_blank(Direction::Down));
        assert_eq!(board.digit_string(), "142358607");
    }

    #[test]
    fn test_move_legality_all_positions() {
        // Exhaustive: every blank position against every direction. A move is
        // legal exactly when the target cell stays on the grid.
        for blank in 0..SIZE * SIZE {
            let mut digits: Vec<u8> = Vec::new();
            let mut next = 1u8;
            for i in 0..SIZE * SIZE {
                if i == blank {
                    digits.push(b'0');
                } else {
                    digits.push(b'0' + next);
                    next += 1;
                }
            }
            let digits = String::from_utf8(digits).unwrap();
            let (r, c) = (blank / SIZE, blank % SIZE);

            for direction in ALL_DIRECTIONS {
                let mut board = Board::from_digits(&digits).unwrap();
                let legal = match direction {
                    Direction::Up => r > 0,
                    Direction::Down => r < SIZE - 1,
                    Direction::Left => c > 0,
                    Direction::Right => c < SIZE - 1,
                };
                assert_eq!(board.move_blank(direction), legal);
                if !legal {
                    assert_eq!(board.digit_string(), digits);
                }
            }
        }
    }

    #[test]
    fn test_move_then_reverse_restores_board() {
        let mut board = Board::from_digits("142358607").unwrap();
        assert!(board.move_blank(Direction::Up));
        assert!(board.move_blank(Direction::Down));
        assert_eq!(board.digit_string(), "142358607");
    }

    #[test]
    fn test_is_solved() {
        assert!(Board::from_digits("012345678").unwrap().is_solved());
        assert!(!Board::from_digits("102345678").unwrap().is_solved());
    }

    #[test]
    fn test_num_misplaced() {
        // Tiles 1, 4, 5, 8, and 7 are off their goal cells; the blank never
        // counts.
        let board = Board::from_digits("142358607").unwrap();
        assert_eq!(board.num_misplaced(), 5);

        assert_eq!(Board::from_digits("012345678").unwrap().num_misplaced(), 0);
    }

    #[test]
    fn test_value_distance() {
        // |1-0|+|4-1|+|2-2| + |3-3|+|5-4|+|8-5| + |6-6|+|0-7|+|7-8| = 16
        let board = Board::from_digits("142358607").unwrap();
        assert_eq!(board.value_distance(), 16);

        assert_eq!(Board::from_digits("012345678").unwrap().value_distance(), 0);
    }

    #[test]
    fn test_display() {
        let board = Board::from_digits("142358607").unwrap();
        assert_eq!(board.to_string(), "1 4 2 \n3 5 8 \n6 _ 7 \n");
    }
}

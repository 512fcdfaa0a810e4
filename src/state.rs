use crate::board::{ALL_DIRECTIONS, Board, Direction};
use arrayvec::ArrayVec;

/// Index of a state within a `SearchTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateId(u32);

/// A node in the state-space search tree: a board configuration plus the
/// move that produced it and a back-reference to its predecessor.
#[derive(Debug)]
pub struct State {
    board: Board,
    predecessor: Option<StateId>,
    last_move: Option<Direction>,
    depth: u32,
}

impl State {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn predecessor(&self) -> Option<StateId> {
        self.predecessor
    }

    /// The move that produced this state, or `None` for the root.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Number of moves from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_solved()
    }
}

/// Arena holding every state generated during one search run. Predecessor
/// links are indices into the arena rather than owning pointers, so ancestor
/// chains stay alive for cycle checks and path reconstruction until the whole
/// run is dropped at once.
#[derive(Debug, Default)]
pub struct SearchTree {
    states: Vec<State>,
}

impl SearchTree {
    pub fn new() -> Self {
        SearchTree { states: Vec::new() }
    }

    /// Allocate the root state at depth 0.
    pub fn add_root(&mut self, board: Board) -> StateId {
        self.add(board, None, None)
    }

    pub fn get(&self, id: StateId) -> &State {
        &self.states[id.0 as usize]
    }

    fn add(
        &mut self,
        board: Board,
        predecessor: Option<StateId>,
        last_move: Option<Direction>,
    ) -> StateId {
        let depth = match predecessor {
            Some(pred) => self.get(pred).depth() + 1,
            None => 0,
        };
        let id = StateId(self.states.len() as u32);
        self.states.push(State {
            board,
            predecessor,
            last_move,
            depth,
        });
        id
    }

    /// Generate the successors of a state by trying all four moves against a
    /// copy of its board, in `ALL_DIRECTIONS` order. Yields between 1 and 4
    /// states on a 3x3 grid (the blank always has at least two legal moves).
    pub fn expand(&mut self, id: StateId) -> ArrayVec<StateId, 4> {
        let mut successors = ArrayVec::new();
        for direction in ALL_DIRECTIONS {
            let mut board = self.get(id).board().clone();
            if board.move_blank(direction) {
                successors.push(self.add(board, Some(id), Some(direction)));
            }
        }
        successors
    }

    /// Walk the predecessor chain and report whether any ancestor holds a
    /// board equal to this state's board. O(depth) per call.
    pub fn creates_cycle(&self, id: StateId) -> bool {
        let board = self.get(id).board();
        let mut cursor = self.get(id).predecessor();
        while let Some(ancestor) = cursor {
            let state = self.get(ancestor);
            if state.board() == board {
                return true;
            }
            cursor = state.predecessor();
        }
        false
    }

    /// The chain of states from the root to `id`, in move order. Iterative,
    /// so deep solutions cannot overflow the stack.
    pub fn path_from_root(&self, id: StateId) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.get(id).depth() as usize + 1);
        let mut cursor = Some(id);
        while let Some(state) = cursor {
            path.push(state);
            cursor = self.get(state).predecessor();
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_root(digits: &str) -> (SearchTree, StateId) {
        let mut tree = SearchTree::new();
        let root = tree.add_root(Board::from_digits(digits).unwrap());
        (tree, root)
    }

    #[test]
    fn test_root_state() {
        let (tree, root) = tree_with_root("142358607");
        let state = tree.get(root);
        assert_eq!(state.depth(), 0);
        assert_eq!(state.predecessor(), None);
        assert_eq!(state.last_move(), None);
        assert!(!state.is_goal());
    }

    #[test]
    fn test_is_goal() {
        let (tree, root) = tree_with_root("012345678");
        assert!(tree.get(root).is_goal());
    }

    #[test]
    fn test_expand_center_blank() {
        // Blank in the center: all four moves are legal.
        let (mut tree, root) = tree_with_root("142305678");
        let successors = tree.expand(root);
        assert_eq!(successors.len(), 4);

        // Fixed direction order: up, down, left, right.
        let moves: Vec<Direction> = successors
            .iter()
            .map(|&id| tree.get(id).last_move().unwrap())
            .collect();
        assert_eq!(
            moves,
            vec![
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );

        for &id in &successors {
            let state = tree.get(id);
            assert_eq!(state.depth(), 1);
            assert_eq!(state.predecessor(), Some(root));
        }
    }

    #[test]
    fn test_expand_corner_blank() {
        let (mut tree, root) = tree_with_root("012345678");
        let successors = tree.expand(root);
        assert_eq!(successors.len(), 2);
        assert_eq!(
            tree.get(successors[0]).last_move(),
            Some(Direction::Down)
        );
        assert_eq!(
            tree.get(successors[1]).last_move(),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_expand_edge_blank() {
        // Blank at the middle of the top row.
        let (mut tree, root) = tree_with_root("102345678");
        assert_eq!(tree.expand(root).len(), 3);
    }

    #[test]
    fn test_depth_increments_along_chain() {
        let (mut tree, root) = tree_with_root("142305678");
        let first = tree.expand(root)[0];
        let second = tree.expand(first)[0];
        assert_eq!(tree.get(first).depth(), 1);
        assert_eq!(tree.get(second).depth(), 2);
    }

    #[test]
    fn test_reversing_a_move_creates_cycle() {
        let (mut tree, root) = tree_with_root("142358607");
        let successors = tree.expand(root);
        // Expanding any successor regenerates the root board via the reverse
        // move; that grandchild must report a cycle.
        for &child in &successors {
            let grandchildren = tree.expand(child);
            let cycled: Vec<bool> = grandchildren
                .iter()
                .map(|&id| tree.creates_cycle(id))
                .collect();
            assert!(cycled.contains(&true));
        }
    }

    #[test]
    fn test_no_cycle_on_fresh_boards() {
        let (mut tree, root) = tree_with_root("142358607");
        assert!(!tree.creates_cycle(root));
        for &id in &tree.expand(root) {
            assert!(!tree.creates_cycle(id));
        }
    }

    #[test]
    fn test_cycle_detected_beyond_immediate_parent() {
        // up, up, down, down restores the root board four levels down.
        let (mut tree, root) = tree_with_root("142358607");
        let mut id = root;
        for direction in [
            Direction::Up,
            Direction::Up,
            Direction::Down,
            Direction::Down,
        ] {
            let next = tree
                .expand(id)
                .iter()
                .copied()
                .find(|&s| tree.get(s).last_move() == Some(direction))
                .unwrap();
            id = next;
        }
        assert_eq!(
            tree.get(id).board().digit_string(),
            tree.get(root).board().digit_string()
        );
        assert!(tree.creates_cycle(id));
    }

    #[test]
    fn test_path_from_root() {
        let (mut tree, root) = tree_with_root("142305678");
        let first = tree.expand(root)[0];
        let second = tree.expand(first)[0];

        let path = tree.path_from_root(second);
        assert_eq!(path, vec![root, first, second]);
        assert_eq!(tree.path_from_root(root), vec![root]);
    }
}

use crate::board::Board;
use crate::state::{SearchTree, StateId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default seed for the random strategy's PRNG, so repeated runs are
/// reproducible unless the caller supplies a seed.
pub const DEFAULT_SEED: u64 = 0x123456789abcdef0;

/// Heuristic estimate of the remaining distance from a board to the goal.
/// All variants are pure; `Misplaced` and `ValueDistance` are zero exactly
/// at the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Always returns 0.
    Zero,
    /// Number of non-blank tiles off their goal cell.
    Misplaced,
    /// Per-cell value difference against the goal layout (see
    /// `Board::value_distance`).
    ValueDistance,
}

impl Heuristic {
    pub fn estimate(&self, board: &Board) -> u32 {
        match self {
            Heuristic::Zero => 0,
            Heuristic::Misplaced => board.num_misplaced(),
            Heuristic::ValueDistance => board.value_distance(),
        }
    }
}

/// Frontier-selection policy. The informed variants carry the heuristic used
/// to rank frontier entries; the engine performs no admissibility check, so
/// an inadmissible heuristic yields a suboptimal but still terminating A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform random removal from an unordered frontier.
    Random,
    /// FIFO removal; finds a minimum-move solution when one exists within
    /// the depth limit.
    BreadthFirst,
    /// LIFO removal; no optimality guarantee.
    DepthFirst,
    /// Best-first on -heuristic alone.
    Greedy(Heuristic),
    /// Best-first on -(heuristic + depth).
    AStar(Heuristic),
}

impl Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::BreadthFirst => "BFS",
            Strategy::DepthFirst => "DFS",
            Strategy::Greedy(_) => "Greedy",
            Strategy::AStar(_) => "A*",
        }
    }
}

/// Create a searcher for the named algorithm (`"random"`, `"BFS"`, `"DFS"`,
/// `"Greedy"`, or `"A*"`). Unknown names yield `None` so the caller can
/// react gracefully. The heuristic only matters for the informed variants.
pub fn create_searcher(
    algorithm: &str,
    depth_limit: Option<u32>,
    heuristic: Heuristic,
) -> Option<Searcher> {
    let strategy = match algorithm {
        "random" => Strategy::Random,
        "BFS" => Strategy::BreadthFirst,
        "DFS" => Strategy::DepthFirst,
        "Greedy" => Strategy::Greedy(heuristic),
        "A*" => Strategy::AStar(heuristic),
        _ => return None,
    };
    Some(Searcher::new(strategy, depth_limit))
}

/// Untested states awaiting expansion. The representation fixes the removal
/// order: `Ranked` entries are tagged with their priority at insertion time.
enum Frontier {
    Unordered(Vec<StateId>),
    Queue(VecDeque<StateId>),
    Stack(Vec<StateId>),
    Ranked(Vec<(i64, StateId)>),
}

impl Frontier {
    fn len(&self) -> usize {
        match self {
            Frontier::Unordered(states) => states.len(),
            Frontier::Queue(states) => states.len(),
            Frontier::Stack(states) => states.len(),
            Frontier::Ranked(states) => states.len(),
        }
    }
}

/// A single-run state-space searcher. One instance drives exactly one call
/// to `find_solution`; its counters and frontier are run-scoped.
pub struct Searcher {
    strategy: Strategy,
    frontier: Frontier,
    num_tested: usize,
    depth_limit: Option<u32>,
    rng: ChaCha8Rng,
}

impl Searcher {
    pub fn new(strategy: Strategy, depth_limit: Option<u32>) -> Self {
        Self::with_seed(strategy, depth_limit, DEFAULT_SEED)
    }

    /// Like `new`, but seeds the PRNG used by the random strategy.
    pub fn with_seed(strategy: Strategy, depth_limit: Option<u32>, seed: u64) -> Self {
        let frontier = match strategy {
            Strategy::Random => Frontier::Unordered(Vec::new()),
            Strategy::BreadthFirst => Frontier::Queue(VecDeque::new()),
            Strategy::DepthFirst => Frontier::Stack(Vec::new()),
            Strategy::Greedy(_) | Strategy::AStar(_) => Frontier::Ranked(Vec::new()),
        };
        Searcher {
            strategy,
            frontier,
            num_tested: 0,
            depth_limit,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Reseed the PRNG used by the random strategy. Only meaningful before
    /// the search starts.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// States popped and evaluated for goal status so far.
    pub fn num_tested(&self) -> usize {
        self.num_tested
    }

    /// States remaining untested in the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The depth limit this searcher was built with (`None` = unlimited).
    pub fn depth_limit(&self) -> Option<u32> {
        self.depth_limit
    }

    /// Admission gate shared by every strategy: reject candidates beyond the
    /// depth limit and candidates that revisit an ancestor board.
    pub fn should_add(&self, tree: &SearchTree, id: StateId) -> bool {
        if let Some(limit) = self.depth_limit {
            if tree.get(id).depth() > limit {
                return false;
            }
        }
        !tree.creates_cycle(id)
    }

    /// Ranking for the informed strategies. Negated so that "largest wins"
    /// selection favors the smallest estimate.
    fn priority(&self, tree: &SearchTree, id: StateId) -> i64 {
        let state = tree.get(id);
        match self.strategy {
            Strategy::Greedy(h) => -(h.estimate(state.board()) as i64),
            Strategy::AStar(h) => -((h.estimate(state.board()) + state.depth()) as i64),
            _ => 0,
        }
    }

    /// Insert a single state into the frontier without validation.
    pub fn add_state(&mut self, tree: &SearchTree, id: StateId) {
        let priority = self.priority(tree, id);
        match &mut self.frontier {
            Frontier::Unordered(states) | Frontier::Stack(states) => states.push(id),
            Frontier::Queue(states) => states.push_back(id),
            Frontier::Ranked(states) => states.push((priority, id)),
        }
    }

    /// Filter a batch of candidates through `should_add` and insert the
    /// survivors.
    pub fn add_states(&mut self, tree: &SearchTree, ids: impl IntoIterator<Item = StateId>) {
        for id in ids {
            if self.should_add(tree, id) {
                self.add_state(tree, id);
            }
        }
    }

    /// Remove and return the next state to test, or `None` when the frontier
    /// is empty. This is the only point where the strategies differ.
    pub fn next_state(&mut self) -> Option<StateId> {
        match &mut self.frontier {
            Frontier::Unordered(states) => {
                if states.is_empty() {
                    return None;
                }
                let index = self.rng.gen_range(0..states.len());
                Some(states.swap_remove(index))
            }
            Frontier::Queue(states) => states.pop_front(),
            Frontier::Stack(states) => states.pop(),
            Frontier::Ranked(states) => {
                if states.is_empty() {
                    return None;
                }
                // Ties resolve to the earliest-inserted maximal entry.
                let mut best = 0;
                for index in 1..states.len() {
                    if states[index].0 > states[best].0 {
                        best = index;
                    }
                }
                Some(states.remove(best).1)
            }
        }
    }

    /// Run the search from `root` to completion: pop, test for goal, expand.
    /// Returns the goal state, or `None` once the reachable depth-bounded
    /// acyclic state space is exhausted.
    pub fn find_solution(&mut self, tree: &mut SearchTree, root: StateId) -> Option<StateId> {
        let stop = AtomicBool::new(false);
        self.find_solution_interruptible(tree, root, &stop)
    }

    /// Like `find_solution`, but polls `stop` once per iteration before
    /// popping. A set flag terminates the search immediately with `None`,
    /// leaving the frontier as it stood after the last completed iteration.
    pub fn find_solution_interruptible(
        &mut self,
        tree: &mut SearchTree,
        root: StateId,
        stop: &AtomicBool,
    ) -> Option<StateId> {
        // The root is admitted unconditionally: it can be neither a cycle
        // nor beyond the depth limit.
        self.add_state(tree, root);
        loop {
            if stop.load(Ordering::Relaxed) {
                return None;
            }
            let id = self.next_state()?;
            self.num_tested += 1;
            if tree.get(id).is_goal() {
                return Some(id);
            }
            let successors = tree.expand(id);
            self.add_states(tree, successors);
        }
    }
}

impl fmt::Display for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} untested, {} tested, ",
            self.strategy.name(),
            self.frontier_len(),
            self.num_tested()
        )?;
        match self.depth_limit() {
            Some(limit) => write!(f, "depth limit = {}", limit),
            None => write!(f, "no depth limit"),
        }
    }
}

mod board;
mod puzzles;
mod searcher;
mod state;

use board::Board;
use clap::{Parser, ValueEnum};
use puzzles::Puzzles;
use searcher::{DEFAULT_SEED, Heuristic, create_searcher};
use state::{SearchTree, StateId};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Random,
    Bfs,
    Dfs,
    Greedy,
    AStar,
}

impl Algorithm {
    /// Name understood by the searcher factory.
    fn name(self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Greedy => "Greedy",
            Algorithm::AStar => "A*",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    Zero,
    Misplaced,
    ValueDistance,
}

impl From<HeuristicType> for Heuristic {
    fn from(h: HeuristicType) -> Self {
        match h {
            HeuristicType::Zero => Heuristic::Zero,
            HeuristicType::Misplaced => Heuristic::Misplaced,
            HeuristicType::ValueDistance => Heuristic::ValueDistance,
        }
    }
}

struct PuzzleStats {
    moves: Option<u32>,
    states_tested: usize,
    elapsed_ms: u128,
}

fn print_solution(tree: &SearchTree, solution: StateId) {
    for &id in &tree.path_from_root(solution) {
        let state = tree.get(id);
        match state.last_move() {
            None => println!("Initial state:"),
            Some(direction) => println!("{}", direction),
        }
        println!("{}", state.board());
    }
}

fn solve_board(
    init_board: Board,
    algorithm: Algorithm,
    heuristic: Heuristic,
    depth_limit: Option<u32>,
    seed: u64,
    show_steps: bool,
) -> Result<PuzzleStats, String> {
    let mut tree = SearchTree::new();
    let root = tree.add_root(init_board);

    let mut searcher = create_searcher(algorithm.name(), depth_limit, heuristic)
        .ok_or_else(|| format!("unknown algorithm: {}", algorithm.name()))?;
    searcher.set_seed(seed);

    let start = Instant::now();
    let solution = searcher.find_solution(&mut tree, root);
    let elapsed_ms = start.elapsed().as_millis();

    if show_steps {
        if let Some(id) = solution {
            print_solution(&tree, id);
        }
    }

    Ok(PuzzleStats {
        moves: solution.map(|id| tree.get(id).depth()),
        states_tested: searcher.num_tested(),
        elapsed_ms,
    })
}

fn solve_corpus(
    puzzles: &Puzzles,
    algorithm: Algorithm,
    heuristic: Heuristic,
    depth_limit: Option<u32>,
    seed: u64,
) -> (usize, usize, usize) {
    let mut num_solved = 0;
    let mut total_moves = 0;
    let mut total_tested = 0;

    for init_board in puzzles.iter() {
        let digits = init_board.digit_string();
        let stats =
            match solve_board(init_board.clone(), algorithm, heuristic, depth_limit, seed, false) {
                Ok(stats) => stats,
                Err(e) => {
                    eprintln!("{}: {}", digits, e);
                    continue;
                }
            };
        match stats.moves {
            Some(moves) => {
                num_solved += 1;
                total_moves += moves as usize;
                total_tested += stats.states_tested;
                println!(
                    "{}: {} moves, {} states tested",
                    digits, moves, stats.states_tested
                );
            }
            None => println!("{}: no solution", digits),
        }
    }

    (num_solved, total_moves, total_tested)
}

#[derive(Parser)]
#[command(name = "taquin")]
#[command(about = "An eight-puzzle solver", long_about = None)]
struct Args {
    /// Initial board as nine digits (e.g. 142358607), or a path with --file
    #[arg(value_name = "BOARD")]
    board: String,

    /// Treat BOARD as a path to a file with one puzzle per line
    #[arg(short, long)]
    file: bool,

    /// Search algorithm
    #[arg(short, long, value_enum, default_value = "a-star")]
    algorithm: Algorithm,

    /// Heuristic for the informed algorithms
    #[arg(short = 'H', long, value_enum, default_value = "misplaced")]
    heuristic: HeuristicType,

    /// Maximum solution depth to explore (unlimited if omitted)
    #[arg(short, long)]
    depth_limit: Option<u32>,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Seed for the random algorithm
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();
    let heuristic: Heuristic = args.heuristic.into();
    let seed = args.seed.unwrap_or(DEFAULT_SEED);

    if args.file {
        if args.print_solution {
            eprintln!("Error: solution printing only supported when solving a single puzzle");
            std::process::exit(1);
        }

        let puzzles = match Puzzles::from_file(&args.board) {
            Ok(puzzles) => puzzles,
            Err(e) => {
                eprintln!("Error loading puzzles: {}", e);
                std::process::exit(1);
            }
        };

        let (num_solved, total_moves, total_tested) =
            solve_corpus(&puzzles, args.algorithm, heuristic, args.depth_limit, seed);

        println!();
        if num_solved > 0 {
            println!("solved {}/{} puzzles", num_solved, puzzles.len());
            println!(
                "averages: {:.1} moves, {:.1} states tested",
                total_moves as f64 / num_solved as f64,
                total_tested as f64 / num_solved as f64
            );
        } else {
            println!("solved 0 puzzles");
        }
        return;
    }

    let init_board = match Board::from_digits(&args.board) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let stats = match solve_board(
        init_board,
        args.algorithm,
        heuristic,
        args.depth_limit,
        seed,
        args.print_solution,
    ) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{} states tested in {} ms",
        stats.states_tested, stats.elapsed_ms
    );
    match stats.moves {
        Some(moves) => println!("Found a solution requiring {} moves.", moves),
        None => println!("Failed to find a solution."),
    }
}

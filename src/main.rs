use clap::Parser;
use std::process;

use chess960_moves::chess960;
use chess960_moves::utils::bitboard_to_string;
use chess960_moves::{Game, GameOptions, GameStatus, MatchPolicy, Move, MoveTag, Perft};

/// Replays UCI moves from a classical, FEN or Chess960 start and prints the
/// resulting position with its legal moves, or perft counts.
///
/// ## Usage Examples:
/// ```bash
/// # Legal moves after 1. e4 e5
/// ./chess960-moves e2e4 e7e5
///
/// # Chess960 setup 0, castles written king-onto-rook
/// ./chess960-moves --chess960 0 --chess960-notation
///
/// # Perft from a FEN
/// ./chess960-moves --fen "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1" --perft 3
/// ```
#[derive(Parser)]
#[command(name = "chess960-moves")]
#[command(about = "Replay chess and Chess960 moves and list legal replies")]
#[command(version)]
struct Args {
    /// Start from this FEN (classical KQkq or Shredder castling field)
    #[arg(long, value_name = "FEN", conflicts_with_all = ["chess960", "random960"])]
    fen: Option<String>,

    /// Start from Chess960 setup N (0-959, 518 is classical)
    #[arg(long, value_name = "N", conflicts_with = "random960")]
    chess960: Option<u16>,

    /// Start from a random Chess960 setup
    #[arg(long)]
    random960: bool,

    /// Reject a castle request when no legal castle has the same text
    #[arg(long)]
    strict: bool,

    /// Print castles king-onto-rook (e1h1) instead of e1g1
    #[arg(long)]
    chess960_notation: bool,

    /// Count leaf nodes to this depth instead of listing moves
    #[arg(long, value_name = "DEPTH")]
    perft: Option<u32>,

    /// Print progress and board diagrams to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Moves to play, in UCI notation
    #[arg(value_name = "MOVES")]
    moves: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let options = GameOptions {
        chess960: args.chess960_notation,
        match_policy: if args.strict {
            MatchPolicy::Strict
        } else {
            MatchPolicy::Lenient
        },
    };

    let mut game = match start_game(&args, options) {
        Ok(game) => game,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    if args.verbose {
        eprintln!("Start: {}", game.position());
    }

    for text in &args.moves {
        match game.move_str(text) {
            Ok(mv) => {
                if args.verbose {
                    eprintln!("Played {} {}", game.move_text(&mv), tag_names(&mv));
                }
            }
            Err(e) => {
                eprintln!("Error: move {} ({}): {}", game.moves().len() + 1, text, e);
                process::exit(1);
            }
        }
    }

    if args.verbose {
        eprintln!("{}", game.position().diagram());
        eprintln!("Occupancy:\n{}", bitboard_to_string(game.position().board().occupancy()));
    }

    if let Some(depth) = args.perft {
        run_perft(&game, depth, args.verbose);
        return;
    }

    println!("{}", game.position());
    match game.status() {
        GameStatus::Ongoing => {
            for mv in game.valid_moves() {
                println!("{} {}", game.move_text(mv), tag_names(mv));
            }
        }
        GameStatus::Checkmate => println!("checkmate"),
        GameStatus::Stalemate => println!("stalemate"),
    }
}

fn start_game(args: &Args, options: GameOptions) -> Result<Game, String> {
    if let Some(fen) = &args.fen {
        return Game::from_fen(fen, options).map_err(|e| format!("invalid FEN: {}", e));
    }
    let index = if args.random960 {
        Some(chess960::random_index(&mut rand::thread_rng()))
    } else {
        args.chess960
    };
    match index {
        Some(index) => {
            if args.verbose {
                eprintln!("Chess960 setup {}", index);
            }
            Game::chess960(index, options).map_err(|e| e.to_string())
        }
        None => Ok(Game::new(options)),
    }
}

fn run_perft(game: &Game, depth: u32, verbose: bool) {
    let mut perft = Perft::new();
    let mut total = 0;
    for (mv, count) in perft.divide(game.position(), depth) {
        println!("{}: {}", game.move_text(&mv), count);
        total += count;
    }
    if depth == 0 {
        total = 1;
    }
    println!();
    println!("Nodes: {}", total);
    if verbose {
        eprintln!(
            "captures {} en passant {} castles {} promotions {} checks {}",
            perft.captures, perft.en_passants, perft.castles, perft.promotions, perft.checks
        );
    }
}

fn tag_names(mv: &Move) -> String {
    let names: Vec<&str> = [
        (MoveTag::KING_SIDE_CASTLE, "O-O"),
        (MoveTag::QUEEN_SIDE_CASTLE, "O-O-O"),
        (MoveTag::CAPTURE, "capture"),
        (MoveTag::EN_PASSANT, "en-passant"),
        (MoveTag::CHECK, "check"),
    ]
    .iter()
    .filter(|(tag, _)| mv.has_tag(*tag))
    .map(|(_, name)| *name)
    .collect();
    if names.is_empty() {
        String::new()
    } else {
        format!("[{}]", names.join(" "))
    }
}

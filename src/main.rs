//! Command-line front end for the rules engine.
//!
//! Usage: cargo run --release -- [--layout FILE] [--side home|away] <COMMAND>
//!
//!   show               draw the board and report check / terminal status
//!   moves e7           legal and warning destinations of one piece
//!   perft 3            count legal move paths
//!   playout --seed 1   play random legal moves

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use itertools::Itertools;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use xiangqi_rules::board::Board;
use xiangqi_rules::engine::Engine;
use xiangqi_rules::game::Game;
use xiangqi_rules::perft::{perft, perft_parallel};
use xiangqi_rules::types::{Cell, Side};

#[derive(Parser, Debug)]
#[command(name = "xiangqi")]
#[command(about = "Move legality for a 10x9 board with palace rules")]
struct Args {
    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    /// Board layout file (10 rows of 9 symbols); the opening position if omitted
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// Side to move
    #[arg(long, global = true, value_enum, default_value_t = SideArg::Home)]
    side: SideArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the board and report check, checkmate or stalemate
    Show,
    /// List the destinations of the piece on CELL (e.g. `b10`)
    Moves { cell: String },
    /// Count legal move paths of length DEPTH
    Perft {
        depth: u8,
        /// Split the first ply across threads
        #[arg(long)]
        parallel: bool,
    },
    /// Play uniformly random legal moves
    Playout {
        #[arg(long, default_value_t = 100)]
        plies: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SideArg {
    Home,
    Away,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Home => Side::Home,
            SideArg::Away => Side::Away,
        }
    }
}

fn setup_logger(level: LevelFilter) -> color_eyre::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn load_board(layout: Option<&PathBuf>) -> color_eyre::Result<Board> {
    match layout {
        None => Ok(Board::new()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("cannot read layout file {}", path.display()))?;
            Board::from_layout(&text)
                .wrap_err_with(|| format!("invalid layout in {}", path.display()))
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    setup_logger(args.log_level)?;

    let board = load_board(args.layout.as_ref())?;
    let side: Side = args.side.into();

    match args.command {
        Command::Show => show(&board, side),
        Command::Moves { cell } => moves(&board, &cell)?,
        Command::Perft { depth, parallel } => {
            info!("perft {depth} with {} to move", side.to_human());
            let now = Instant::now();
            let nodes = if parallel {
                perft_parallel(&board, side, depth)
            } else {
                perft(&board, side, depth)
            };
            println!(
                "perft {}: {} nodes ({:.3}s)",
                depth,
                nodes,
                now.elapsed().as_secs_f32()
            );
        }
        Command::Playout { plies, seed } => {
            let mut game = Game::from_board(board, side);
            let mut rng = StdRng::seed_from_u64(seed);
            let status = game.playout(plies, &mut rng);
            println!("{}", game.moves().iter().map(|m| m.to_human()).join(" "));
            game.board().draw_to_terminal();
            match status {
                Some(status) => println!("{}", status.to_human()),
                None => println!(
                    "{} plies played, {} to move",
                    game.moves().len(),
                    game.side_to_move().to_human()
                ),
            }
        }
    }
    Ok(())
}

fn show(board: &Board, side: Side) {
    let mut engine = Engine::new();
    engine.recompute_all(board);
    board.draw_to_terminal();

    println!(
        "{} to move, {} legal moves",
        side.to_human(),
        engine.legal_move_count(side)
    );
    for s in [Side::Home, Side::Away] {
        if engine.is_in_check(s) {
            println!("{} is in check", s.to_human());
        }
    }
    if let Some(status) = engine.status(side) {
        println!("{}", status.to_human());
    }
}

fn moves(board: &Board, cell: &str) -> color_eyre::Result<()> {
    let origin = Cell::from_algebraic(cell)?;
    let piece = board
        .piece_at(origin)
        .ok_or_else(|| eyre!("no piece on {origin}"))?;

    let mut engine = Engine::new();
    engine.recompute_all(board);

    println!(
        "{} {} on {}",
        piece.side.to_human(),
        piece.kind.to_human(),
        origin
    );
    println!("legal:   {}", engine.legal_moves(origin).iter().join(" "));
    println!("warning: {}", engine.warning_moves(origin).iter().join(" "));
    Ok(())
}

//! Standalone engine-vs-engine game runner.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --verbose`
//!
//! Plays a single game between two searches of the default depth under the
//! default time control and prints the final position and result.

use std::thread;
use std::time::Duration;

use chrono::Local;

use pawnstorm::clock::{ChessClock, DEFAULT_TIME_CONTROL};
use pawnstorm::game_state::chessboard::Chessboard;
use pawnstorm::game_state::chess_types::{Color, GameResult};
use pawnstorm::search::engine::SearchEngine;
use pawnstorm::utils::render_board::render_board;

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    let mut board = Chessboard::new();
    let mut engine = SearchEngine::new();
    let mut clock = ChessClock::new(DEFAULT_TIME_CONTROL).map_err(|e| e.to_string())?;

    println!(
        "self-play game started {} ({DEFAULT_TIME_CONTROL})",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    clock.start(board.to_move());

    while !board.has_ended() {
        clock.update();
        if clock.has_timed_out() {
            board.raise_timeout();
            break;
        }

        let Some(mv) = engine.poll_for_move(&board) else {
            thread::sleep(Duration::from_millis(1));
            continue;
        };

        if !board.execute_move(&mv, true) {
            return Err("engine produced an illegal move".to_owned());
        }
        clock.press();

        if verbose {
            println!(
                "move {:>3}  {:?} to play  eval {:+}  clocks {} / {}",
                board.fullmove_number(),
                board.to_move(),
                board.evaluation(),
                clock.display_time(Color::Light),
                clock.display_time(Color::Dark),
            );
            println!("{}\n", render_board(board.board_state()));
        }
    }
    clock.pause();
    engine.stop();

    println!("{}", render_board(board.board_state()));
    println!("result: {}", describe_result(board.result()));
    Ok(())
}

fn describe_result(result: GameResult) -> &'static str {
    match result {
        GameResult::InProgress => "game still in progress",
        GameResult::DrawByInsufficientMaterial => "draw by insufficient material",
        GameResult::DrawByThreefoldRepetition => "draw by threefold repetition",
        GameResult::DrawByFiftyMoveRule => "draw by the 50-move rule",
        GameResult::DrawByStalemate => "draw by stalemate",
        GameResult::LightVictoryByCheckmate => "light wins by checkmate",
        GameResult::DarkVictoryByCheckmate => "dark wins by checkmate",
        GameResult::LightVictoryByTimeout => "light wins on time",
        GameResult::DarkVictoryByTimeout => "dark wins on time",
        GameResult::DrawByTimeoutAgainstInsufficientMaterial => {
            "draw: flag fell against insufficient material"
        }
    }
}

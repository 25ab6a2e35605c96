//! Non-blocking search driver.
//!
//! `SearchEngine` runs one minimax search at a time on a worker thread and
//! hands the result back through a channel. Callers poll once per frame or
//! loop iteration; the first poll with no result pending kicks off a search
//! on a snapshot of the position.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::game_state::chessboard::Chessboard;
use crate::moves::chess_move::Move;
use crate::search::minimax::{search_best_move, DEFAULT_SEARCH_DEPTH};

pub struct SearchEngine {
    depth: u8,
    running: bool,
    pending: Option<Receiver<Option<Move>>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine::with_depth(DEFAULT_SEARCH_DEPTH)
    }

    pub fn with_depth(depth: u8) -> Self {
        SearchEngine {
            depth,
            running: true,
            pending: None,
        }
    }

    /// True while a worker thread is searching.
    pub fn is_calculating(&self) -> bool {
        self.pending.is_some()
    }

    /// Return the finished search result if one is ready.
    ///
    /// If nothing is pending, start a search for the position in `board` and
    /// return `None`; later polls pick up the result. A finished search for
    /// an already-ended game yields no move, and a stopped engine never
    /// returns or starts anything.
    pub fn poll_for_move(&mut self, board: &Chessboard) -> Option<Move> {
        if !self.running {
            return None;
        }

        if let Some(receiver) = &self.pending {
            return match receiver.try_recv() {
                Ok(result) => {
                    self.pending = None;
                    result
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.pending = None;
                    None
                }
            };
        }

        self.start_search(board);
        None
    }

    /// Disallow any further searching; pending results are discarded.
    pub fn stop(&mut self) {
        self.running = false;
        self.pending = None;
    }

    fn start_search(&mut self, board: &Chessboard) {
        if self.pending.is_some() {
            return;
        }

        let (sender, receiver) = mpsc::channel();
        let snapshot = board.clone();
        let depth = self.depth;

        thread::spawn(move || {
            let (_, mut best) =
                search_best_move(snapshot.board_state(), snapshot.to_move(), depth);
            // The pruned search can come back empty-handed when every line
            // scores at the initial window bound; any legal move will do.
            if best.is_none() && !snapshot.has_ended() {
                best = snapshot.all_legal_moves().into_iter().next();
            }
            // The receiver may have been dropped by `stop`.
            let _ = sender.send(best);
        });

        self.pending = Some(receiver);
    }
}

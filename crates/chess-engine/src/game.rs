//! Game management with history tracking.
//!
//! The [`Game`] struct wraps one [`Position`] for the life of a game:
//! - Executes moves under a fixed [`RulesConfig`]
//! - Records the move history in long algebraic notation
//! - Forwards [`MoveEvent`]s to subscribers

use crate::config::RulesConfig;
use crate::events::MoveEvent;
use crate::promotion::PromotionChoice;
use crate::{GameError, MoveReport, Position, SquareSet};
use chess_core::{Color, Move, Piece, Square};
use std::fmt;

type Subscriber = Box<dyn FnMut(&MoveEvent)>;

/// A single game: its position, rules, history and event subscribers.
pub struct Game {
    position: Position,
    config: RulesConfig,
    moves: Vec<Move>,
    notation: Vec<String>,
    /// Index into `notation` of the move whose promotion is still pending.
    pending_entry: Option<usize>,
    subscribers: Vec<Subscriber>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        Self::with_config(Position::startpos(), RulesConfig::default())
    }

    /// Creates a game from any position under the given rules.
    pub fn with_config(position: Position, config: RulesConfig) -> Self {
        Game {
            position,
            config,
            moves: Vec::new(),
            notation: Vec::new(),
            pending_entry: None,
            subscribers: Vec::new(),
        }
    }

    /// Reconstructs a game from stored FEN and move history.
    ///
    /// `history` is replayed from the FEN, so it must be the moves played
    /// *after* that position; pass an empty string for none. A promotion is
    /// resolved from the trailing letter of the promoting move. Without a
    /// letter it stays pending when gating is off and becomes a queen
    /// otherwise.
    pub fn from_fen(fen: &str, history: &str, config: RulesConfig) -> Result<Self, GameError> {
        let mut game = Self::with_config(Position::from_fen(fen)?, config);
        for token in history.split_whitespace() {
            let report = game.make_move_uci(token)?;
            if !report.is_promotion_pending() {
                continue;
            }
            let letter = token.get(4..).filter(|letter| !letter.is_empty());
            let choice = match letter {
                Some(letter) => letter.parse::<PromotionChoice>()?,
                None if game.config.promotion_gating => PromotionChoice::Queen,
                None => continue,
            };
            game.resolve_promotion(choice)?;
        }
        Ok(game)
    }

    /// Registers a callback invoked for every event of every later move.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&MoveEvent) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.piece_at(sq)
    }

    /// Destinations for the piece on `from` under this game's legality.
    pub fn candidate_moves(&self, from: Square) -> SquareSet {
        crate::movegen::generate_legal_moves(&self.position, from, self.config.legality)
    }

    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        self.position.is_valid_move_with(from, to, &self.config)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.position.is_in_check(self.position.turn())
    }

    /// Executes a move and notifies subscribers.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveReport, GameError> {
        let report = self.position.make_move_with(from, to, &self.config)?;
        self.moves.push(report.mov);
        self.notation.push(report.mov.to_uci());
        if report.is_promotion_pending() {
            self.pending_entry = Some(self.notation.len() - 1);
        } else if self.position.pending_promotion().is_none() {
            self.pending_entry = None;
        }
        self.publish(&report.events);
        Ok(report)
    }

    /// Executes a move given in long algebraic notation ("e2e4").
    pub fn make_move_uci(&mut self, text: &str) -> Result<MoveReport, GameError> {
        let mov = Move::from_uci(text).ok_or_else(|| GameError::InvalidNotation(text.to_string()))?;
        self.make_move(mov.from(), mov.to())
    }

    /// Resolves the pending promotion and notifies subscribers.
    pub fn resolve_promotion(&mut self, choice: PromotionChoice) -> Result<Piece, GameError> {
        let square = self.position.pending_promotion();
        let piece = self.position.resolve_promotion(choice)?;
        if let Some(entry) = self
            .pending_entry
            .take()
            .and_then(|index| self.notation.get_mut(index))
        {
            entry.push(piece.kind.letter());
        }
        if let Some(square) = square {
            self.publish(&[MoveEvent::Promoted { square, piece }]);
        }
        Ok(piece)
    }

    fn publish(&mut self, events: &[MoveEvent]) {
        for event in events {
            for subscriber in &mut self.subscribers {
                subscriber(event);
            }
        }
    }

    /// Returns the moves played so far.
    pub fn move_history(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the history as space separated long algebraic moves.
    ///
    /// Resolved promotions carry their piece letter ("e7e8q").
    pub fn history_string(&self) -> String {
        self.notation.join(" ")
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("position", &self.position)
            .field("config", &self.config)
            .field("moves", &self.moves)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

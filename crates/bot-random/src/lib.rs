//! Random move bot.
//!
//! The simplest possible search component: it asks the rules engine for
//! every candidate move of its color and picks one at random. Useful as a
//! sparring partner and as a template for stronger bots.

use chess_core::{Color, Move, PieceKind, Square};
use chess_engine::{all_moves, Legality, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Number of recorded plies after which a bot leaves its opening phase.
pub const OPENING_PLIES: usize = 8;

/// The contract between a move-choosing component and the rules engine.
///
/// A searcher only reads positions; the caller executes the chosen move.
pub trait Searcher {
    /// Picks a move for this searcher's color, or `None` if it has none.
    fn choose_move(&mut self, position: &Position) -> Option<(Square, Square)>;

    /// Records a move played from `before` and returns its notation.
    ///
    /// `was_actual_player_move` is true for moves made by the opponent.
    fn record(&mut self, mov: Move, before: &Position, was_actual_player_move: bool) -> String;
}

/// Plays uniformly random candidate moves.
#[derive(Debug, Clone)]
pub struct RandomBot {
    color: Color,
    opening_phase: bool,
    legality: Legality,
    rng: StdRng,
    history: Vec<String>,
}

impl RandomBot {
    pub fn new(color: Color, opening_phase: bool) -> Self {
        RandomBot {
            color,
            opening_phase,
            legality: Legality::default(),
            rng: StdRng::from_entropy(),
            history: Vec::new(),
        }
    }

    /// Makes the bot's choices reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_legality(mut self, legality: Legality) -> Self {
        self.legality = legality;
        self
    }

    /// Resumes from moves already played, e.g. a stored game.
    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self.update_phase();
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn in_opening(&self) -> bool {
        self.opening_phase
    }

    /// Notation of every move recorded so far.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn update_phase(&mut self) {
        if self.opening_phase && self.history.len() >= OPENING_PLIES {
            tracing::debug!(color = %self.color, "leaving opening phase");
            self.opening_phase = false;
        }
    }
}

impl Searcher for RandomBot {
    fn choose_move(&mut self, position: &Position) -> Option<(Square, Square)> {
        let moves = all_moves(position, self.color, self.legality);

        let developing: Vec<Move> = if self.opening_phase {
            moves
                .iter()
                .copied()
                .filter(|m| {
                    position
                        .piece_at(m.from())
                        .is_some_and(|p| matches!(p.kind, PieceKind::Pawn | PieceKind::Knight))
                })
                .collect()
        } else {
            Vec::new()
        };

        let pool = if developing.is_empty() {
            &moves
        } else {
            &developing
        };
        let choice = pool.choose(&mut self.rng).copied()?;
        tracing::debug!(
            color = %self.color,
            candidates = pool.len(),
            chosen = %choice,
            "bot chose move"
        );
        Some((choice.from(), choice.to()))
    }

    fn record(&mut self, mov: Move, before: &Position, was_actual_player_move: bool) -> String {
        let text = notation(mov, before);
        tracing::trace!(
            move_text = %text,
            by_player = was_actual_player_move,
            "recorded move"
        );
        self.history.push(text.clone());
        self.update_phase();
        text
    }
}

/// Renders long algebraic notation: "Ng1-f3", "e4xd5", "O-O".
///
/// `before` is the position the move is played from.
pub fn notation(mov: Move, before: &Position) -> String {
    let (from, to) = (mov.from(), mov.to());
    let Some(piece) = before.piece_at(from) else {
        return mov.to_uci();
    };

    if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
        return if to.col() > from.col() { "O-O" } else { "O-O-O" }.to_string();
    }

    let en_passant =
        piece.kind == PieceKind::Pawn && from.col() != to.col() && before.en_passant_target() == Some(to);
    let capture = before.piece_at(to).is_some() || en_passant;

    let mut text = String::with_capacity(7);
    if piece.kind != PieceKind::Pawn {
        text.push(piece.kind.letter().to_ascii_uppercase());
    }
    text.push_str(&from.to_algebraic());
    text.push(if capture { 'x' } else { '-' });
    text.push_str(&to.to_algebraic());
    text
}

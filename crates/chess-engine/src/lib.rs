//! Chess rules engine on a mailbox board.
//!
//! This crate provides:
//! - [`Position`] - the 8x8 grid plus turn, castling rights, en passant
//!   target and pending promotion
//! - Move generation per piece kind ([`generate_moves`]), pseudo-legal by
//!   default and optionally filtered for king safety
//! - Attack and check detection ([`is_attacked`], [`is_in_check`])
//! - Move execution with special-move side effects ([`Position::make_move`])
//! - Promotion resolution ([`Position::resolve_promotion`])
//! - [`Game`] - a position with rules config, history and event subscribers
//!
//! # Architecture
//!
//! Pieces are plain values in a `[Option<Piece>; 64]` grid; a capture is an
//! overwrite of the slot. Move generation dispatches on the piece kind with an
//! exhaustive `match`. Everything is synchronous and single-owner: to explore
//! hypothetical lines, clone the position.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::Position;
//!
//! let mut position = Position::startpos();
//! let e2 = Square::new(6, 4).unwrap();
//! let e4 = Square::new(4, 4).unwrap();
//! assert!(position.generate_moves(e2).contains(e4));
//!
//! position.make_move(e2, e4).unwrap();
//! assert_eq!(position.en_passant_target(), Square::new(5, 4).ok());
//! println!("Position after 1.e4: {}", position.to_fen());
//! ```

pub mod config;
mod error;
mod events;
mod execute;
mod game;
pub mod movegen;
mod position;
mod promotion;
mod square_set;

pub use config::{ConfigError, Legality, RulesConfig};
pub use error::{GameError, MoveError};
pub use events::MoveEvent;
pub use execute::MoveReport;
pub use game::Game;
pub use movegen::{all_moves, generate_legal_moves, generate_moves, is_attacked, is_in_check};
pub use position::{CastleSide, CastlingRights, Position};
pub use promotion::PromotionChoice;
pub use square_set::{SquareSet, SquareSetIter};

//! # holdem-engine: Texas Hold'em Table Engine
//!
//! A multi-player (2 to 6 seats) Texas Hold'em engine with seedable
//! shuffling, five-card hand scoring, best-of-seven selection, betting-round
//! bookkeeping, and JSONL hand records.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and display forms
//! - [`deck`] - Shuffled 52-card deck on a ChaCha20 RNG
//! - [`hand`] - Five-card scoring and comparison
//! - [`best`] - Best five of up to seven cards
//! - [`player`] - Seat state and player actions
//! - [`rules`] - Turn and action validation
//! - [`betting`] - Stages, blinds, pot movement and round completion
//! - [`config`] - Table stakes and seating limits
//! - [`session`] - Game orchestration for a single table
//! - [`logger`] - HandRecord serialization and the JSONL writer
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::best::best_of;
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::HandCategory;
//!
//! let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let best = best_of(&cards).unwrap();
//! assert_eq!(best.score.category, HandCategory::RoyalFlush);
//! ```
//!
//! ## Deterministic Shuffles
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! assert_eq!(a.draw(), b.draw());
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::player::PlayerAction;
//! use holdem_engine::session::GameSession;
//!
//! let mut game = GameSession::default();
//! game.add_player("ann").unwrap();
//! game.add_player("bob").unwrap();
//! game.start().unwrap();
//! assert_eq!(game.pot(), 30);
//!
//! game.act(0, PlayerAction::Call).unwrap();
//! assert_eq!(game.community_cards().len(), 3);
//! ```

pub mod best;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod session;

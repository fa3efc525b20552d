pub mod health;
pub mod table;

pub use health::health;
pub use table::{game_state, join, reset, start, submit_action};

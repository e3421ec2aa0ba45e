pub(crate) mod state;
pub(crate) mod state_chance;
mod state_play;
mod state_terminal;

pub mod action;
pub mod card;
pub mod observation;
pub mod player;
pub mod state_data;
pub mod table;
pub mod trajectory;
pub mod tree;

pub use state_data::{MAX_BOARD_CARDS, STREET_COUNT};

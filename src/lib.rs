pub mod board;

pub use board::{Board, BoardError, Move};

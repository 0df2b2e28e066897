//! Terminal snake on a walled square board.
//!
//! The binary wires these pieces together in [`game::SnakeGame`]; the library
//! split exists so the board, scheduler and movement rules can be driven from
//! tests without a terminal.

pub mod board;
pub mod clock;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod snake;
pub mod state;
pub mod term;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

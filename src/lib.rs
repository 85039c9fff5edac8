pub mod types;
pub mod rules;
pub mod cellset;
pub mod celllist;
pub mod board;
pub mod legality;
pub mod movegen;
pub mod safety;
pub mod engine;
pub mod game;
pub mod perft;

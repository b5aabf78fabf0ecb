pub mod backgammon;
pub mod engine;
pub mod misc;
pub mod simulation;

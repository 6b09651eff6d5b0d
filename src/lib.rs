pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod logging;
pub mod logic;
pub mod player;
pub mod storage;
pub mod ui;

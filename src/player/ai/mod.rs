pub mod config;
pub mod eval;
pub mod strategy;
pub mod weighted;

pub use config::AiConfig;
pub use strategy::ComputerStrategy;
pub use weighted::choose_move;

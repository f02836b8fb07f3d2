pub mod commands;
pub mod state;

pub mod commands;
pub mod extract;
pub mod logs;

pub mod cli;
pub mod input;
pub mod meta;
pub mod render;
pub mod runtime;
pub mod ui;

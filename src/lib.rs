pub mod cli;
pub mod modules;
pub mod shared;

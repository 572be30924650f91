pub mod cli;
pub mod commands;
pub mod config;
pub mod icon;
pub mod opacify;
pub mod report;

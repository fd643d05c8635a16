pub mod classify;
pub mod cli;
pub mod commands;
pub mod common;
pub mod document;
pub mod fetch;
pub mod profile;

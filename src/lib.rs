pub mod classify;
pub mod client;
pub mod commands;
pub mod config;
pub mod models;
pub mod parse;
pub mod report;
pub mod schema;

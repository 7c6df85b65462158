// lib.rs
// Library modules for the game-over notification relay and its game client

pub mod defs;
pub mod logging;
pub mod config;
pub mod error;
pub mod user;
pub mod message;
pub mod line;
pub mod relay;
pub mod api_handlers;
pub mod server;
pub mod game;
pub mod clients;

#[cfg(test)]
mod test_support;

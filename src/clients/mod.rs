// src/clients/mod.rs
// Client-side pieces of the game: outcome reporting and end-of-round screens.
//
// - notifier: posts the round outcome to the relay server
// - screen: draws the game-over / clear screens

pub mod notifier;
pub mod screen;

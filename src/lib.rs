//! Pokemon catch-and-battle client - tui-dispatch app over the Game Service
//!
//! The library holds every piece of logic so it can be tested without a
//! terminal; `main.rs` only wires the terminal, logging and HTTP effects.

pub mod action;
pub mod affordance;
pub mod api;
pub mod components;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod view;

//! Kantodex - a terminal browser for the first-generation Pokedex
//!
//! This library exposes the crate's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod reducer;
pub mod state;

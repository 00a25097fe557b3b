//! Recolor - Library for recoloring player sprites with team uniform colors
//!
//! This library provides functionality to:
//! - Parse palette documents describing each team's uniform colors
//! - Swap a sprite's base uniform colors for a team's colors by exact RGB match
//! - Recolor a roster of players in parallel and write the results
//! - Support both lenient and strict palette validation

pub mod build;
pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod models;
pub mod output;
pub mod palette_parser;
pub mod recolor;
pub mod roster;

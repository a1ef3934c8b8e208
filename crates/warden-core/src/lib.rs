//! Core types and definitions for the WARDEN boss encounter.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, intents, frame results, events, configuration, arena geometry
//! and constants. It has no dependency on any host or runtime framework.

pub mod arena;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

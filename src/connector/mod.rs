//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Remote text generation (Gemini over HTTP, plus an offline mock)
//! - History storage (JSON file, in-memory)
//! - Authentication against a static user table
//! - The HTTP API and CLI entry points

pub mod adapter;
pub mod api;

pub use adapter::*;

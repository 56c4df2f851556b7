//! Playlist generation module
//!
//! This module turns a portal's channel list into M3U-family playlist
//! content:
//! - Name normalization (routing tags, control characters, whitespace)
//! - Placeholder rejection and per-run deduplication
//! - EXTINF entry encoding for the PLAIN / M3U8 / M3U8_PLUS dialects
//! - Single-pass rendering plus persistence and permission handling

pub mod encode;
pub mod name;
pub mod writer;

pub use encode::Dialect;
pub use writer::{persist_playlist, relax_permissions, render_playlist};

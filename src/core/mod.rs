//! Core terminal simulation components.
//!
//! This module contains the rendering-independent logic:
//!
//! - **session**: login state, history, input buffer, command dispatch
//! - **commands**: the static command table with the portfolio handlers
//! - **ansi**: SGR markup formatter turning output lines into styled segments
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── CommandSet (name -> handler, injected at construction)
//! └── Vec<HistoryEntry>
//!         │ output lines with SGR markers
//!         ▼
//! ansi::format_line -> Vec<Segment>   (consumed by the renderer)
//! ```

pub mod ansi;
pub mod commands;
pub mod session;

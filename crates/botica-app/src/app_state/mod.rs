//! Top-level application state.
//!
//! Drives the interactive chat loop: reads input lines, dispatches commands,
//! and prints session events. Completion requests and voice captures run on
//! background tasks so the loop keeps accepting input.

mod core;
mod dispatch;
mod event_loop;
mod files;
mod init;
mod render;
mod shutdown;
mod speech;
mod turn;
mod voice;


pub use core::ChatApp;

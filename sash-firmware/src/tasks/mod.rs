//! Embassy async tasks
//!
//! Each window runs in its own task and receives commands via signals.

pub mod window;

pub use window::window_task;

//! Time subsystem.
//!
//! Frame-rate accounting decoupled from the window session: the session calls
//! `FrameCounter::tick` once per presented frame and logs the reports.

mod frame_counter;

pub use frame_counter::{FrameCounter, FrameReport};

//! Session orchestration
//!
//! The host loop owns a `Session`, implements the service seams, and calls
//! `tick` once per frame: readings in, intents and effect requests out.

pub mod services;
pub mod session;

pub use services::{MotionProvider, MotionState, NavQuery};
pub use session::{Session, TickOutput};

//! Animation state machine
//!
//! Scroll a line across the canvas, fade it out, move to the next line, fade
//! back in. The cycle is fixed and has no terminal state.

pub mod animator;
pub mod phase;

pub use animator::{AnimationState, Animator, Tick, FADE_DWELL_MS, FADE_STEP_DELAY_MS, LOOP_DELAY_MS};
pub use phase::Phase;

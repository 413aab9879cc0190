//! Scroll and cross-fade driver
//!
//! The animator is evaluated once per control-loop iteration. It never
//! sleeps: every decision is an elapsed-time comparison against the `now_ms`
//! it is handed, and each tick reports how long the caller should pause
//! before the next one.

use crate::config::{DisplayConfig, NUM_LINES};
use crate::panel::{FrameRenderer, PanelGeometry};
use crate::text::text_width;
use crate::traits::{DisplayDriver, DisplayError};

use super::phase::Phase;

/// A fade phase ends once this much time has passed since it began, even if
/// the brightness ramp has not converged
pub const FADE_DWELL_MS: u64 = 2;

/// Pause after each fade step so the ramp stays visible
pub const FADE_STEP_DELAY_MS: u32 = 2;

/// Pause after every control-loop iteration
pub const LOOP_DELAY_MS: u32 = 1;

/// Columns of blank canvas scrolled after the text leaves
const TRAILING_GAP: i32 = 2;

/// Mutable animation state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationState {
    line_index: usize,
    scroll_offset: i32,
    phase: Phase,
    level: u8,
    last_scroll_ms: u64,
    last_change_ms: u64,
}

impl AnimationState {
    /// Index of the line being shown (0..10)
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Columns the text has moved left from the canvas origin
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Brightness currently applied to the driver
    pub fn level(&self) -> u8 {
        self.level
    }
}

/// Outcome of one animator tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Phase that was evaluated
    pub phase: Phase,
    /// Phase the next tick will evaluate
    pub next: Phase,
    /// Suggested pause before the next tick
    pub delay_ms: u32,
}

impl Tick {
    pub fn transitioned(&self) -> bool {
        self.phase != self.next
    }
}

/// Scroll/fade state machine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animator {
    renderer: FrameRenderer,
    state: AnimationState,
}

impl Animator {
    /// Start on line 0, text fully off-screen, at full target brightness
    pub fn new(geometry: PanelGeometry, brightness: u8, now_ms: u64) -> Self {
        Self {
            renderer: FrameRenderer::new(geometry),
            state: AnimationState {
                line_index: 0,
                scroll_offset: -geometry.canvas_width(),
                phase: Phase::Scrolling,
                level: brightness,
                last_scroll_ms: now_ms,
                last_change_ms: now_ms,
            },
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    /// Restart the current line after a settings change
    ///
    /// Moves the text fully off-screen and snaps the brightness ramp to the
    /// configured target. Both land before the next frame is composed.
    pub fn restart<D: DisplayDriver>(&mut self, config: &DisplayConfig, display: &mut D) {
        self.state.scroll_offset = -self.renderer.geometry().canvas_width();
        self.state.level = config.brightness;
        display.set_brightness(self.state.level);
    }

    /// Evaluate the current phase once
    pub fn tick<D: DisplayDriver>(
        &mut self,
        now_ms: u64,
        config: &DisplayConfig,
        display: &mut D,
    ) -> Result<Tick, DisplayError> {
        let phase = self.state.phase;

        match phase {
            Phase::Scrolling => self.scroll(now_ms, config, display)?,
            Phase::FadeOut => self.fade_out(now_ms, display)?,
            Phase::ChangeLine => self.change_line(now_ms),
            Phase::FadeIn => self.fade_in(now_ms, config, display)?,
        }

        let delay_ms = if phase.is_fading() {
            FADE_STEP_DELAY_MS + LOOP_DELAY_MS
        } else {
            LOOP_DELAY_MS
        };

        Ok(Tick {
            phase,
            next: self.state.phase,
            delay_ms,
        })
    }

    fn advance_phase(&mut self) {
        self.state.phase = self.state.phase.next();
    }

    fn scroll<D: DisplayDriver>(
        &mut self,
        now_ms: u64,
        config: &DisplayConfig,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        let elapsed = now_ms.saturating_sub(self.state.last_scroll_ms);
        if elapsed < u64::from(config.scroll_delay_ms()) {
            return Ok(());
        }

        let line = &config.lines()[self.state.line_index];
        self.renderer
            .render(display, line, self.state.scroll_offset)?;
        self.state.scroll_offset += 1;

        if self.state.scroll_offset > text_width(line.text()) + TRAILING_GAP {
            self.advance_phase();
            self.state.last_change_ms = now_ms;
        }
        self.state.last_scroll_ms = now_ms;
        Ok(())
    }

    fn fade_out<D: DisplayDriver>(&mut self, now_ms: u64, display: &mut D) -> Result<(), DisplayError> {
        if self.state.level > 0 {
            self.state.level -= 1;
            display.set_brightness(self.state.level);
            display.show()?;
        }

        if self.state.level == 0 || self.dwell_expired(now_ms) {
            self.advance_phase();
            self.state.last_change_ms = now_ms;
        }
        Ok(())
    }

    fn change_line(&mut self, now_ms: u64) {
        self.state.line_index = (self.state.line_index + 1) % NUM_LINES;
        self.state.scroll_offset = -self.renderer.geometry().canvas_width();
        self.advance_phase();
        self.state.last_change_ms = now_ms;
    }

    fn fade_in<D: DisplayDriver>(
        &mut self,
        now_ms: u64,
        config: &DisplayConfig,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        if self.state.level < config.brightness {
            self.state.level += 1;
            display.set_brightness(self.state.level);
            display.show()?;
        }

        if self.state.level >= config.brightness || self.dwell_expired(now_ms) {
            self.advance_phase();
            self.state.last_scroll_ms = now_ms;
        }
        Ok(())
    }

    fn dwell_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.state.last_change_ms) > FADE_DWELL_MS
    }
}

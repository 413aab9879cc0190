//! Banner controller
//!
//! Owns the display driver, the settings store, the clock and the two pieces
//! of mutable state (display settings and animation state). The firmware
//! drives it from a single loop: service pending updates, then [`Banner::poll`].

use marquee_hal::ByteStore;

use crate::config::{ConfigError, ConfigStore, Credentials, DisplayConfig, SettingsUpdate};
use crate::panel::PanelGeometry;
use crate::state::{AnimationState, Animator, Tick};
use crate::traits::{Clock, DisplayDriver, DisplayError};

/// Errors surfaced by the banner controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BannerError {
    Display(DisplayError),
    Config(ConfigError),
}

impl From<DisplayError> for BannerError {
    fn from(e: DisplayError) -> Self {
        BannerError::Display(e)
    }
}

impl From<ConfigError> for BannerError {
    fn from(e: ConfigError) -> Self {
        BannerError::Config(e)
    }
}

/// What happened while loading settings at boot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    pub seeded_defaults: bool,
    /// Seeded lines could not be persisted
    pub seed_error: Option<ConfigError>,
    pub regenerated_colors: bool,
}

pub struct Banner<D: DisplayDriver, S: ByteStore, C: Clock> {
    display: D,
    store: ConfigStore<S>,
    clock: C,
    config: DisplayConfig,
    animator: Animator,
    boot: BootReport,
}

impl<D: DisplayDriver, S: ByteStore, C: Clock> Banner<D, S, C> {
    /// Load settings and prepare the first line
    ///
    /// The driver brightness is set to the loaded target before any frame
    /// is drawn. A store that cannot be written still starts; see
    /// [`BootReport::seed_error`].
    pub fn start(mut display: D, store: S, clock: C, geometry: PanelGeometry) -> Self {
        let mut store = ConfigStore::new(store);
        let loaded = store.load();
        let config = loaded.config;

        display.set_brightness(config.brightness);
        let animator = Animator::new(geometry, config.brightness, clock.now_ms());

        Self {
            display,
            store,
            clock,
            config,
            animator,
            boot: BootReport {
                seeded_defaults: loaded.seeded_defaults,
                seed_error: loaded.seed_error,
                regenerated_colors: loaded.regenerated_colors,
            },
        }
    }

    pub fn boot_report(&self) -> BootReport {
        self.boot
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn animation(&self) -> &AnimationState {
        self.animator.state()
    }

    pub fn geometry(&self) -> &PanelGeometry {
        self.animator.renderer().geometry()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &S {
        self.store.store()
    }

    /// Apply a settings update and persist it
    ///
    /// The update only takes effect once saved: on a failed save the
    /// running settings and animation are left alone. Otherwise the current
    /// line restarts off-screen and the brightness ramp snaps to the new
    /// target before the next frame. A live brightness of 0 is honored as-is.
    pub fn apply_settings(&mut self, update: &SettingsUpdate) -> Result<(), BannerError> {
        let mut config = self.config.clone();
        update.apply(&mut config);
        self.store.save(&config)?;

        self.config = config;
        self.animator.restart(&self.config, &mut self.display);
        Ok(())
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.store.load_credentials()
    }

    pub fn save_credentials(&mut self, credentials: &Credentials) -> Result<(), BannerError> {
        self.store.save_credentials(credentials)?;
        Ok(())
    }

    /// Run one animation tick at the current clock time
    pub fn poll(&mut self) -> Result<Tick, BannerError> {
        let now = self.clock.now_ms();
        let tick = self.animator.tick(now, &self.config, &mut self.display)?;
        Ok(tick)
    }

    /// Draw one step of the startup sweep
    pub fn sweep(&mut self, column: i32) -> Result<(), BannerError> {
        self.animator
            .renderer()
            .render_sweep(&mut self.display, column)?;
        Ok(())
    }

    /// Present a blank frame
    pub fn blank(&mut self) -> Result<(), BannerError> {
        self.display.clear();
        self.display.show()?;
        Ok(())
    }
}

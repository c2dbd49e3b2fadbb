//! Responsible for creating and managing the global rasterizer settings
//!
//! Settings start out with their defaults, are then overridden by `DIBRAST_*`
//! environment variables and finally (for binaries only) by command line arguments.

pub mod cli;

use std::{env, str::FromStr, sync::OnceLock, time::Duration};

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Holds all the configurable information for the rasterizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Number of fonts without users that stay cached before the least
    /// recently used one is evicted
    pub retained_unused_fonts: usize,

    /// Initial capacity of the font cache
    pub font_cache_capacity: usize,

    /// Drawing to a window surface is flushed once it has been going on for longer than this
    pub flush_period: Duration,

    /// Gamma applied to subpixel text, in thousandths (`1000` is linear)
    pub font_gamma: u32,

    /// Whether solid brushes on palette surfaces are dithered
    pub dither_brushes: bool,
}

impl Settings {
    /// Default settings overridden by whatever `DIBRAST_*` variables are set
    #[must_use]
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        read_var("DIBRAST_RETAINED_FONTS", &mut settings.retained_unused_fonts);
        read_var(
            "DIBRAST_FONT_CACHE_CAPACITY",
            &mut settings.font_cache_capacity,
        );
        read_var("DIBRAST_FONT_GAMMA", &mut settings.font_gamma);
        read_var("DIBRAST_DITHER_BRUSHES", &mut settings.dither_brushes);

        let mut flush_period_ms = settings.flush_period.as_millis() as u64;
        read_var("DIBRAST_FLUSH_PERIOD_MS", &mut flush_period_ms);
        settings.flush_period = Duration::from_millis(flush_period_ms);

        settings
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            retained_unused_fonts: 5,
            font_cache_capacity: 64,
            flush_period: Duration::from_millis(50),
            font_gamma: 1000,
            dither_brushes: true,
        }
    }
}

fn read_var<T: FromStr>(name: &str, target: &mut T) {
    let Ok(value) = env::var(name) else {
        return;
    };

    match value.trim().parse() {
        Ok(parsed) => *target = parsed,
        Err(_) => log::warn!("Ignoring invalid value {value:?} for {name}"),
    }
}

/// The global settings singleton
///
/// Initialized from the environment on first use unless [install] was called before.
pub fn get() -> &'static Settings {
    SETTINGS.get_or_init(Settings::from_env)
}

/// Replace the settings that [get] will return
///
/// This only succeeds if the settings have not been read yet, otherwise the
/// rejected settings are handed back.
pub fn install(settings: Settings) -> Result<(), Settings> {
    SETTINGS.set(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.retained_unused_fonts, 5);
        assert_eq!(settings.flush_period, Duration::from_millis(50));
        assert_eq!(settings.font_gamma, 1000);
    }

    #[test]
    fn invalid_variables_are_ignored() {
        let mut value = 3_usize;
        env::set_var("DIBRAST_TEST_INVALID_VALUE", "three");
        read_var("DIBRAST_TEST_INVALID_VALUE", &mut value);
        assert_eq!(value, 3);

        env::set_var("DIBRAST_TEST_VALID_VALUE", " 7 ");
        read_var("DIBRAST_TEST_VALID_VALUE", &mut value);
        assert_eq!(value, 7);
    }
}

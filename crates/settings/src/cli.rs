use std::time::Duration;

use crate::Settings;

/// Command line overrides shared by the rasterizer binaries
///
/// Binaries flatten this into their own argument struct.
#[derive(clap::Args, Debug, Default)]
pub struct Arguments {
    /// Number of unused fonts to keep cached
    #[arg(long)]
    retained_fonts: Option<usize>,

    /// Flush window surfaces after this many milliseconds of drawing
    #[arg(long)]
    flush_period_ms: Option<u64>,

    /// Gamma for subpixel text, in thousandths
    #[arg(long)]
    font_gamma: Option<u32>,

    /// Draw solid brushes without dithering
    #[clap(
        long,
        action = clap::ArgAction::SetTrue,
    )]
    no_dither: bool,
}

impl Arguments {
    pub fn update_settings(self, settings: &mut Settings) {
        if let Some(retained_fonts) = self.retained_fonts {
            settings.retained_unused_fonts = retained_fonts;
        }

        if let Some(flush_period_ms) = self.flush_period_ms {
            settings.flush_period = Duration::from_millis(flush_period_ms);
        }

        if let Some(font_gamma) = self.font_gamma {
            settings.font_gamma = font_gamma;
        }

        if self.no_dither {
            settings.dither_brushes = false;
        }
    }
}

//! Renders a fixed scene into a bitmap of the requested depth, for comparing the
//! output of the rasterizer by eye or against reference images

use std::{fs, io, path::PathBuf, sync::Arc};

use clap::{Parser, ValueEnum};
use dib::{
    brush::{BackgroundMode, BrushStyle, HatchStyle},
    device::DibDevice,
    pen::{Pen, PenStyle},
    primitives::{BlendFunction, GradientMode, TriVertex},
    rop::Rop3,
    text::TextOptions,
    BitmapInfo, BlitError, ColorRef, DibInfo, Rgbquad,
};
use font::{
    AntialiasMode, FontAttributes, FontCache, FontError, GlyphBitmap, GlyphFormat, GlyphId,
    GlyphMetrics, OutlineSource,
};
use math::{Point, Rectangle};

const WIDTH: i32 = 256;
const HEIGHT: i32 = 192;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scene {
    Shapes,
    Gradients,
    Blending,
    Text,
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// The scene to render
    #[arg(short = 's', long = "scene", value_enum)]
    scene: Scene,

    /// Bits per pixel of the target bitmap
    #[arg(short = 'b', long = "bpp", default_value_t = 32)]
    bit_count: u16,

    /// Where to write the rendered bitmap
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    #[command(flatten)]
    settings: settings::cli::Arguments,
}

#[derive(Debug)]
// Dead code analysis ignores debug impls (which are called when the error is returned from main)
#[allow(dead_code)]
enum Error {
    IO(io::Error),
    Blit(BlitError),
    UnsupportedDepth(u16),
}

impl From<BlitError> for Error {
    fn from(value: BlitError) -> Self {
        Self::Blit(value)
    }
}

/// A grayscale palette, so indexed targets can show every scene
fn gray_ramp(bit_count: u16) -> Vec<Rgbquad> {
    let entries = 1_u32 << bit_count;
    (0..entries)
        .map(|index| {
            let level = (index * 255 / (entries - 1)) as u8;
            Rgbquad::new(level, level, level)
        })
        .collect()
}

fn target(bit_count: u16) -> Result<DibInfo<'static>, Error> {
    let info = match bit_count {
        1 | 4 | 8 => BitmapInfo::new(WIDTH, HEIGHT, bit_count).with_color_table(gray_ramp(bit_count)),
        16 | 24 | 32 => BitmapInfo::new(WIDTH, HEIGHT, bit_count),
        other => return Err(Error::UnsupportedDepth(other)),
    };
    Ok(DibInfo::allocate(&info)?)
}

fn draw_shapes(device: &mut DibDevice<'_>) -> Result<(), BlitError> {
    device.select_brush(BrushStyle::Solid(ColorRef::rgb(0x20, 0x60, 0xc0)));
    device.select_pen(Pen::new(PenStyle::Solid, 1, ColorRef::BLACK));
    device.rectangle(&Rectangle::new(8, 8, 88, 64))?;

    device.select_brush(BrushStyle::Hatched(HatchStyle::DiagonalCross, ColorRef::rgb(0xc0, 0, 0)));
    device.set_background_mode(BackgroundMode::Transparent);
    device.ellipse(&Rectangle::new(96, 8, 176, 88))?;

    device.select_pen(Pen::new(PenStyle::Solid, 5, ColorRef::rgb(0, 0x80, 0)));
    device.pie(
        &Rectangle::new(184, 8, 248, 72),
        Point::new(248, 40),
        Point::new(216, 8),
    )?;

    device.select_pen(Pen::new(PenStyle::DashDot, 1, ColorRef::BLACK));
    device.set_background_mode(BackgroundMode::Opaque);
    device.polyline(&[
        Point::new(8, 180),
        Point::new(60, 100),
        Point::new(120, 170),
        Point::new(248, 110),
    ])?;
    Ok(())
}

fn draw_gradients(device: &mut DibDevice<'_>) -> Result<(), BlitError> {
    let corner = |x, y, red: u16, green: u16, blue: u16| TriVertex {
        x,
        y,
        red,
        green,
        blue,
        alpha: 0,
    };

    let rect = [
        corner(0, 0, 0xff00, 0, 0),
        corner(WIDTH, HEIGHT / 2, 0, 0, 0xff00),
    ];
    device.gradient_fill(&rect, &[0, 1], GradientMode::RectH)?;

    let triangle = [
        corner(0, HEIGHT, 0xff00, 0xff00, 0),
        corner(WIDTH / 2, HEIGHT / 2, 0, 0xff00, 0xff00),
        corner(WIDTH, HEIGHT, 0xff00, 0, 0xff00),
    ];
    device.gradient_fill(&triangle, &[0, 1, 2], GradientMode::Triangle)?;
    Ok(())
}

fn draw_blending(device: &mut DibDevice<'_>) -> Result<(), BlitError> {
    device.pat_blt(&Rectangle::new(0, 0, WIDTH, HEIGHT), Rop3::WHITENESS)?;
    device.select_brush(BrushStyle::Hatched(HatchStyle::Cross, ColorRef::BLACK));
    device.pat_blt(&Rectangle::new(0, 0, WIDTH, HEIGHT), Rop3::PATCOPY)?;

    let mut overlay = DibInfo::allocate(&BitmapInfo::new(16, 16, 32))?;
    for y in 0..16 {
        for x in 0..16 {
            overlay.write_pixel(x, y, (x as u32 * 16) << 16 | (y as u32 * 16));
        }
    }

    let overlay_bounds = overlay.bounds();
    for (index, alpha) in [0x40_u8, 0x80, 0xc0, 0xff].into_iter().enumerate() {
        let left = 8 + index as i32 * 62;
        let blend = BlendFunction {
            source_constant_alpha: alpha,
            has_src_alpha: false,
        };
        device.alpha_blend(
            &Rectangle::new(left, 48, left + 56, 144),
            &overlay,
            &overlay_bounds,
            blend,
        )?;
    }
    Ok(())
}

/// Renders every glyph as a hollow box, big enough to exercise clipping and advances
struct BoxOutlines;

impl OutlineSource for BoxOutlines {
    fn render(
        &self,
        attributes: &FontAttributes,
        glyph: GlyphId,
        _mode: AntialiasMode,
    ) -> Result<GlyphBitmap, FontError> {
        let size = attributes.height.max(3);
        let metrics = GlyphMetrics {
            left: 1,
            top: size,
            advance_x: size + 2,
            advance_y: 0,
        };
        match glyph.value() {
            0x20 => return Ok(GlyphBitmap::empty(GlyphFormat::Gray, metrics)),
            0x21..=0x7e => {},
            _ => return Err(FontError::NoSuchGlyph),
        }

        let stride = GlyphBitmap::stride_for(GlyphFormat::Gray, size);
        let mut bits = vec![0; stride * size as usize];
        for y in 0..size {
            for x in 0..size {
                let edge = x == 0 || y == 0 || x == size - 1 || y == size - 1;
                bits[y as usize * stride + x as usize] = if edge { 16 } else { 4 };
            }
        }

        Ok(GlyphBitmap {
            format: GlyphFormat::Gray,
            width: size,
            height: size,
            stride,
            bits,
            metrics,
        })
    }
}

fn draw_text(device: &mut DibDevice<'_>) -> Result<(), BlitError> {
    let settings = settings::get();
    let cache = FontCache::with_limits(
        Arc::new(BoxOutlines),
        settings.retained_unused_fonts,
        settings.font_cache_capacity,
    );
    device.select_font(Some(cache.acquire(&FontAttributes::new("Boxes", 12))));
    device.set_text_color(ColorRef::rgb(0, 0, 0x80));

    let text: Vec<u16> = "Hello, rasterizer!".encode_utf16().collect();
    device.ext_text_out(Point::new(8, 32), &text, &TextOptions::default());

    let options = TextOptions {
        opaque: Some((Rectangle::new(0, 48, WIDTH, 80), ColorRef::rgb(0xff, 0xff, 0xc0))),
        clip_rect: Some(Rectangle::new(0, 48, WIDTH / 2, 80)),
        ..TextOptions::default()
    };
    device.ext_text_out(Point::new(8, 72), &text, &options);
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();
    let mut settings = settings::Settings::from_env();
    args.settings.update_settings(&mut settings);
    if settings::install(settings).is_err() {
        log::warn!("Settings were read before they could be installed");
    }

    let mut device = DibDevice::new(target(args.bit_count)?);
    device.pat_blt(&Rectangle::new(0, 0, WIDTH, HEIGHT), Rop3::WHITENESS)?;
    device.bounds_mut().set_enabled(true);

    match args.scene {
        Scene::Shapes => draw_shapes(&mut device)?,
        Scene::Gradients => draw_gradients(&mut device)?,
        Scene::Blending => draw_blending(&mut device)?,
        Scene::Text => draw_text(&mut device)?,
    }

    if let Some(bounds) = device.bounds().bounds() {
        log::info!("{:?} touched {bounds:?}", args.scene);
    }

    let bytes = dib::bmp::encode(device.dib())?;
    fs::write(&args.output, bytes).map_err(Error::IO)?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}

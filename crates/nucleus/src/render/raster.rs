#![forbid(unsafe_code)]

//! PNG export for orbital SVGs (`--format png`).

use crate::render::HeadlessError;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG: {0}")]
    SvgParse(#[from] usvg::Error),
    #[error("invalid background color `{0}` (expected #rgb, #rrggbb, white, black or transparent)")]
    Background(String),
    #[error("cannot allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill painted under the SVG; `None` leaves the canvas transparent.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = options
        .background
        .as_deref()
        .map(|text| background_color(text).ok_or_else(|| RasterError::Background(text.to_string())))
        .transpose()?;

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &opt)?;

    let scale = if options.scale.is_finite() && options.scale > 0.0 {
        options.scale
    } else {
        1.0
    };
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;
    if let Some(color) = background {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

/// Colors accepted by `--background`.
fn background_color(text: &str) -> Option<tiny_skia::Color> {
    let text = text.trim();
    match text.to_ascii_lowercase().as_str() {
        "transparent" => return Some(tiny_skia::Color::TRANSPARENT),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }
    let hex = text.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    let (r, g, b) = match hex.len() {
        3 => {
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            (short(0)?, short(1)?, short(2)?)
        }
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
}

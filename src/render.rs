// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering a line of sample text into a tightly cropped, transparent PNG.
//!
//! Text is shaped with Swash, each glyph is rasterized with Swash's scaler,
//! and the union of the glyph pixel rectangles gives the tight bounding box.
//! The canvas is sized from that box alone, so the ink always starts exactly
//! `padding` pixels from the top-left corner.

use std::fmt;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{Pixel, Rgba, RgbaImage};
use log::debug;
use swash::scale::image::{Content, Image as SwashImage};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::shape::ShapeContext;
use swash::zeno::{Format, Vector};
use swash::{tag_from_bytes, CacheKey, FontRef, GlyphId};

use crate::error::PreviewError;
use crate::sample;

/// Font size used when none is given, in pixels per em.
pub const DEFAULT_FONT_SIZE: f32 = 48.0;

/// Color used for glyph coverage.
pub const FOREGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Canvas background: fully transparent.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Oxipng preset used for the lossless optimization pass.
const OPTIMIZATION_LEVEL: u8 = 2;

/// Largest canvas allocated for a preview, in bytes of RGBA data.
///
/// Matches the allocation limit `image` applies when decoding.
pub const MAX_CANVAS_BYTES: u64 = 512 * 1024 * 1024;

/// Glyph sources in order of preference.
const SOURCES: &[Source] = &[
    Source::ColorOutline(0),
    Source::ColorBitmap(StrikeWith::BestFit),
    Source::Outline,
];

/// Options controlling a single preview.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Text to render. `None` selects a sample from the font's file name.
    pub text: Option<String>,
    /// Font size in pixels per em.
    pub font_size: f32,
    /// Empty margin added on every side of the text.
    pub padding: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text: None,
            font_size: DEFAULT_FONT_SIZE,
            padding: 0,
        }
    }
}

/// Tight bounds of rendered text relative to a left-top anchor.
///
/// The anchor sits at the pen start on the ascender line, so `top` is negative
/// when glyphs rise above the ascender (accents, tall scripts).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// Horizontal offset of the leftmost ink from the anchor.
    pub left: i32,
    /// Vertical offset of the topmost ink from the anchor.
    pub top: i32,
    /// Width of the inked area.
    pub width: u32,
    /// Height of the inked area.
    pub height: u32,
}

impl BoundingBox {
    /// Canvas size for this box with `padding` on every side.
    ///
    /// Returns `None` when the canvas would need more than [`MAX_CANVAS_BYTES`].
    pub fn canvas_size(&self, padding: u32) -> Option<(u32, u32)> {
        let (width, height) = self.padded_size(padding);
        if width.checked_mul(height)?.checked_mul(4)? > MAX_CANVAS_BYTES {
            return None;
        }
        Some((u32::try_from(width).ok()?, u32::try_from(height).ok()?))
    }

    fn padded_size(&self, padding: u32) -> (u64, u64) {
        let margin = 2 * u64::from(padding);
        (u64::from(self.width) + margin, u64::from(self.height) + margin)
    }

    /// Where the anchor must be placed so the ink starts at `padding`.
    pub fn draw_origin(&self, padding: u32) -> (i64, i64) {
        let padding = i64::from(padding);
        (padding - i64::from(self.left), padding - i64::from(self.top))
    }
}

/// A font file loaded into memory.
///
/// Collections are opened at their first face.
pub struct FontFile {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
}

impl FontFile {
    /// Reads and parses the font at `path`.
    pub fn open(path: &Path) -> Result<Self, PreviewError> {
        let data = std::fs::read(path).map_err(|source| PreviewError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_data(data).ok_or_else(|| PreviewError::FontLoad(path.to_path_buf()))
    }

    /// Parses font data, returning `None` when it is not a usable font.
    ///
    /// Besides the table directory, this checks that every table lies inside
    /// the data and that the horizontal metrics cover the glyph count, so a
    /// truncated file is refused here rather than failing during shaping.
    pub fn from_data(data: Vec<u8>) -> Option<Self> {
        let font = FontRef::from_index(&data, 0)?;
        validate(&font)?;
        let (offset, key) = (font.offset, font.key);
        Some(Self { data, offset, key })
    }

    /// Borrows the font for shaping and scaling.
    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }
}

impl fmt::Debug for FontFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFile")
            .field("len", &self.data.len())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

fn validate(font: &FontRef<'_>) -> Option<()> {
    let data = font.data;
    let directory = usize::try_from(font.offset).ok()?;
    let num_tables = read_u16(data, directory.checked_add(4)?)?;
    for index in 0..usize::from(num_tables) {
        let record = directory.checked_add(12)?.checked_add(index * 16)?;
        let start = read_u32(data, record.checked_add(8)?)?;
        let len = read_u32(data, record.checked_add(12)?)?;
        let end = usize::try_from(start.checked_add(len)?).ok()?;
        if end > data.len() {
            debug!("table record {index} ends at {end}, past {} bytes", data.len());
            return None;
        }
    }

    // Read by the shaper and the scaler for every glyph.
    let table = |tag: &[u8; 4]| font.table(tag_from_bytes(tag));
    let (Some(_), Some(head), Some(hhea), Some(hmtx), Some(maxp)) = (
        table(b"cmap"),
        table(b"head"),
        table(b"hhea"),
        table(b"hmtx"),
        table(b"maxp"),
    ) else {
        debug!("missing one of the cmap, head, hhea, hmtx and maxp tables");
        return None;
    };
    if head.len() < 54 {
        return None;
    }
    let long_metrics = read_u16(hhea, 34)?;
    let num_glyphs = read_u16(maxp, 4)?;
    if long_metrics == 0 || num_glyphs == 0 {
        return None;
    }
    let long_metrics = usize::from(long_metrics.min(num_glyphs));
    let side_bearings = usize::from(num_glyphs) - long_metrics;
    (hmtx.len() >= long_metrics * 4 + side_bearings * 2).then_some(())
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at.checked_add(2)?)?;
    Some(u16::from_be_bytes(bytes.try_into().ok()?))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at.checked_add(4)?)?;
    Some(u32::from_be_bytes(bytes.try_into().ok()?))
}

/// A rasterized glyph and the position of its top-left pixel relative to the anchor.
struct PlacedGlyph {
    x: i32,
    y: i32,
    image: SwashImage,
}

impl PlacedGlyph {
    fn width(&self) -> u32 {
        self.image.placement.width
    }

    fn height(&self) -> u32 {
        self.image.placement.height
    }
}

/// Shaped and rasterized text, ready to be measured and drawn.
pub struct RasterizedText {
    glyphs: Vec<PlacedGlyph>,
}

impl fmt::Debug for RasterizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterizedText")
            .field("glyphs", &self.glyphs.len())
            .finish()
    }
}

impl RasterizedText {
    /// The tight bounding box of every rendered pixel, or `None` if nothing was inked.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut glyphs = self.glyphs.iter();
        let first = glyphs.next()?;
        let mut left = first.x;
        let mut top = first.y;
        let mut right = first.x.saturating_add_unsigned(first.width());
        let mut bottom = first.y.saturating_add_unsigned(first.height());
        for glyph in glyphs {
            left = left.min(glyph.x);
            top = top.min(glyph.y);
            right = right.max(glyph.x.saturating_add_unsigned(glyph.width()));
            bottom = bottom.max(glyph.y.saturating_add_unsigned(glyph.height()));
        }
        Some(BoundingBox {
            left,
            top,
            width: right.abs_diff(left),
            height: bottom.abs_diff(top),
        })
    }

    /// Draws the text onto a new transparent canvas sized to its bounds plus `padding`.
    pub fn draw(&self, padding: u32) -> Result<(RgbaImage, BoundingBox), PreviewError> {
        let bounds = self
            .bounds()
            .ok_or_else(|| PreviewError::EmptyRender(String::new()))?;
        let Some((width, height)) = bounds.canvas_size(padding) else {
            let (width, height) = bounds.padded_size(padding);
            return Err(PreviewError::Canvas { width, height });
        };

        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
        let (origin_x, origin_y) = bounds.draw_origin(padding);
        for glyph in &self.glyphs {
            draw_glyph(
                &mut canvas,
                glyph,
                origin_x + i64::from(glyph.x),
                origin_y + i64::from(glyph.y),
            );
        }
        Ok((canvas, bounds))
    }
}

/// A rendered preview held in memory.
#[derive(Debug)]
pub struct Preview {
    /// The text that was rendered.
    pub text: String,
    /// Tight bounds of the text, before padding.
    pub bounds: BoundingBox,
    /// The finished canvas.
    pub image: RgbaImage,
}

/// Dimensions of a preview written to disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderedPreview {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Tight bounds of the text, before padding.
    pub bounds: BoundingBox,
}

/// Shapes, rasterizes and encodes previews.
///
/// The contexts hold caches and scratch space, so one renderer should be
/// reused for a whole batch.
pub struct Renderer {
    shape_cx: ShapeContext,
    scale_cx: ScaleContext,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// Creates a renderer with empty caches.
    pub fn new() -> Self {
        Self {
            shape_cx: ShapeContext::new(),
            scale_cx: ScaleContext::new(),
        }
    }

    /// Shapes `text` and rasterizes every glyph at `font_size` pixels per em.
    pub fn rasterize(&mut self, font: &FontFile, text: &str, font_size: f32) -> RasterizedText {
        let font = font.font_ref();

        let mut positioned: Vec<(GlyphId, f32, f32)> = Vec::new();
        let mut shaper = self.shape_cx.builder(font).size(font_size).build();
        shaper.add_str(text);
        let mut pen_x = 0.0;
        shaper.shape_with(|cluster| {
            for glyph in cluster.glyphs {
                positioned.push((glyph.id, pen_x + glyph.x, glyph.y));
                pen_x += glyph.advance;
            }
        });

        // Left-top anchor: the baseline sits one ascent below the anchor.
        let baseline = font.metrics(&[]).scale(font_size).ascent;

        let mut scaler = self
            .scale_cx
            .builder(font)
            .size(font_size)
            .hint(false)
            .build();
        let mut glyphs = Vec::with_capacity(positioned.len());
        for (id, x, y) in positioned {
            let y = baseline - y;
            let (x_px, x_frac) = split_position(x);
            let (y_px, y_frac) = split_position(y);
            let Some(image) = Render::new(SOURCES)
                .format(Format::Alpha)
                .offset(Vector::new(x_frac, y_frac))
                .render(&mut scaler, id)
            else {
                debug!("glyph {id} has no image");
                continue;
            };
            if image.placement.width == 0 || image.placement.height == 0 {
                continue;
            }
            glyphs.push(PlacedGlyph {
                x: x_px.saturating_add(image.placement.left),
                y: y_px.saturating_sub(image.placement.top),
                image,
            });
        }
        RasterizedText { glyphs }
    }

    /// Renders the preview for the font at `font_path` into memory.
    pub fn render(
        &mut self,
        font_path: &Path,
        options: &RenderOptions,
    ) -> Result<Preview, PreviewError> {
        let text = match &options.text {
            Some(text) => text.clone(),
            None => {
                let name = font_path
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                sample::select(&name).text().to_owned()
            }
        };

        let font = FontFile::open(font_path)?;
        let raster = self.rasterize(&font, &text, options.font_size);
        let (image, bounds) = match raster.draw(options.padding) {
            Err(PreviewError::EmptyRender(_)) => return Err(PreviewError::EmptyRender(text)),
            result => result?,
        };
        debug!(
            "{}: text box {}x{} at ({}, {})",
            font_path.display(),
            bounds.width,
            bounds.height,
            bounds.left,
            bounds.top
        );
        Ok(Preview {
            text,
            bounds,
            image,
        })
    }

    /// Renders the preview for `font_path` and writes it to `output_path` as an optimized PNG.
    ///
    /// An existing file at `output_path` is overwritten.
    pub fn render_to_file(
        &mut self,
        font_path: &Path,
        output_path: &Path,
        options: &RenderOptions,
    ) -> Result<RenderedPreview, PreviewError> {
        let preview = self.render(font_path, options)?;
        let png = encode_png(&preview.image)?;
        std::fs::write(output_path, png).map_err(|source| PreviewError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;
        Ok(RenderedPreview {
            width: preview.image.width(),
            height: preview.image.height(),
            bounds: preview.bounds,
        })
    }
}

/// Encodes `image` as PNG and runs a lossless optimization pass over it.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, PreviewError> {
    let mut raw = Vec::new();
    image.write_with_encoder(PngEncoder::new(&mut raw))?;
    let optimized =
        oxipng::optimize_from_memory(&raw, &oxipng::Options::from_preset(OPTIMIZATION_LEVEL))?;
    Ok(optimized)
}

/// Splits a position into whole pixels and a fractional offset in `[0, 1)`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "glyph positions are far inside the i32 range"
)]
fn split_position(value: f32) -> (i32, f32) {
    let whole = value.floor();
    (whole as i32, value - whole)
}

fn draw_glyph(canvas: &mut RgbaImage, glyph: &PlacedGlyph, origin_x: i64, origin_y: i64) {
    let Ok(width) = usize::try_from(glyph.width()) else {
        return;
    };
    match glyph.image.content {
        Content::Mask => {
            for (off_y, row) in glyph.image.data.chunks_exact(width).enumerate() {
                for (off_x, &alpha) in row.iter().enumerate() {
                    let mut color = FOREGROUND;
                    color.0[3] = alpha;
                    blend_at(canvas, origin_x, off_x, origin_y, off_y, color);
                }
            }
        }
        // Only requested for subpixel formats.
        Content::SubpixelMask => {}
        Content::Color => {
            for (off_y, row) in glyph.image.data.chunks_exact(width * 4).enumerate() {
                for (off_x, pixel) in row.chunks_exact(4).enumerate() {
                    let &[r, g, b, a] = pixel else {
                        continue;
                    };
                    blend_at(canvas, origin_x, off_x, origin_y, off_y, Rgba([r, g, b, a]));
                }
            }
        }
    }
}

fn blend_at(
    canvas: &mut RgbaImage,
    origin_x: i64,
    off_x: usize,
    origin_y: i64,
    off_y: usize,
    color: Rgba<u8>,
) {
    let (Ok(off_x), Ok(off_y)) = (i64::try_from(off_x), i64::try_from(off_y)) else {
        return;
    };
    let (Ok(x), Ok(y)) = (u32::try_from(origin_x + off_x), u32::try_from(origin_y + off_y)) else {
        return;
    };
    if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
        pixel.blend(&color);
    }
}

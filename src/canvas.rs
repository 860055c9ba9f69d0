use crate::colour::Colour;
use crate::font::{GlyphRun, Typeface};
use crate::layout::PositionedLine;
use crate::{CardError, Px};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::io::Write;

/// The tallest (or widest) canvas that will be allocated, the same limit browsers put
/// on a 2D canvas
pub const MAX_CANVAS_DIMENSION: u32 = 32_767;

/// An RGBA drawing surface. Each render allocates its own canvas and drops it once
/// the image has been encoded, so renders never share pixels.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocate a canvas filled with `background`. Fails instead of allocating when
    /// either dimension is zero or over [`MAX_CANVAS_DIMENSION`].
    pub fn new(width: u32, height: u32, background: Colour) -> Result<Canvas, CardError> {
        let too_large = CardError::CanvasTooLarge { width, height };
        if width == 0 || height == 0 {
            return Err(too_large);
        }
        if width > MAX_CANVAS_DIMENSION || height > MAX_CANVAS_DIMENSION {
            return Err(too_large);
        }

        Ok(Canvas {
            image: RgbaImage::from_pixel(width, height, background.into()),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The colour at a pixel, or [None] outside of the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.width() && y < self.height() {
            Some((*self.image.get_pixel(x, y)).into())
        } else {
            None
        }
    }

    /// Paint a full-width, 1px band on every `spacing`-th row starting with the first,
    /// giving the background a ruled-paper finish. A spacing of 0 paints nothing.
    pub fn rule_rows(&mut self, spacing: u32, colour: Colour) {
        if spacing == 0 {
            return;
        }
        let colour: image::Rgba<u8> = colour.into();
        for y in (0..self.height()).step_by(spacing as usize) {
            for x in 0..self.width() {
                self.image.put_pixel(x, y, colour);
            }
        }
    }

    /// Composite one glyph pixel of `colour` at the given coverage. Pixels outside of
    /// the canvas are dropped.
    pub fn blend(&mut self, x: i32, y: i32, colour: Colour, coverage: f32) {
        if x < 0 || y < 0 || coverage <= 0.0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }
        let below: Colour = (*self.image.get_pixel(x, y)).into();
        self.image
            .put_pixel(x, y, colour.blend_over(below, coverage).into());
    }

    /// Rasterise a positioned line with `face` at `size`
    pub fn draw_line<F: Typeface + ?Sized>(
        &mut self,
        face: &F,
        size: Px,
        line: &PositionedLine<'_>,
        colour: Colour,
    ) -> Result<(), CardError> {
        self.draw_lines(face, size, std::iter::once(line), colour)
    }

    /// Rasterise a block of positioned lines that share `face` and `size`, such as the
    /// title or the body
    pub fn draw_lines<'l, 't: 'l, F, I>(
        &mut self,
        face: &F,
        size: Px,
        lines: I,
        colour: Colour,
    ) -> Result<(), CardError>
    where
        F: Typeface + ?Sized,
        I: IntoIterator<Item = &'l PositionedLine<'t>>,
    {
        let runs: Vec<GlyphRun<'t>> = lines
            .into_iter()
            .filter(|line| !line.line.is_empty())
            .map(|line| GlyphRun {
                clusters: line.clusters(),
                baseline: line.baseline,
            })
            .collect();
        if runs.is_empty() {
            return Ok(());
        }
        face.draw_runs(&runs, size, &mut |x, y, coverage| {
            self.blend(x, y, colour, coverage)
        })
    }

    /// Encode the canvas as a PNG, streaming it to `w`
    pub fn write_png<W: Write>(&self, w: W) -> Result<(), CardError> {
        PngEncoder::new(w).write_image(
            self.image.as_raw(),
            self.width(),
            self.height(),
            ColorType::Rgba8,
        )?;
        Ok(())
    }

    /// Encode the canvas as an in-memory PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, CardError> {
        let mut bytes = Vec::new();
        self.write_png(&mut bytes)?;
        Ok(bytes)
    }

    /// Hand the pixels over, e.g. for further processing with [image]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

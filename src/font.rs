use crate::{CardError, Px};
use ab_glyph::Font as _;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use unicode_segmentation::UnicodeSegmentation;

/// A glyph-cluster placed on a line: its text and the x coordinate of its pen
/// position
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCluster<'a> {
    pub text: &'a str,
    pub x: Px,
}

/// The clusters of one line together with the baseline they sit on
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun<'a> {
    pub clusters: Vec<PlacedCluster<'a>>,
    pub baseline: Px,
}

/// Anything that can measure and rasterise glyph-clusters. Layout only ever asks
/// for widths, painting only ever asks for coverage, so both sides of the renderer
/// agree on positions as long as they go through the same typeface and size.
pub trait Typeface {
    /// The horizontal advance of a single glyph-cluster at the given size
    fn cluster_width(&self, cluster: &str, size: Px) -> Px;

    /// Rasterise a run of glyph-clusters sitting on `baseline`. `plot` is called with
    /// absolute canvas coordinates and a coverage value between 0.0 and 1.0; it may be
    /// called with coordinates outside of the canvas.
    fn draw_clusters(
        &self,
        clusters: &[PlacedCluster<'_>],
        size: Px,
        baseline: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> Result<(), CardError>;

    /// Rasterise several runs at the same size, e.g. every line of one block. Faces that
    /// have per-call set-up can override this to do it once for the whole block.
    fn draw_runs(
        &self,
        runs: &[GlyphRun<'_>],
        size: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> Result<(), CardError> {
        for run in runs {
            self.draw_clusters(&run.clusters, size, run.baseline, plot)?;
        }
        Ok(())
    }

    /// The width of a whole string, measured cluster by cluster exactly as the line
    /// wrapper measures it
    fn text_width(&self, text: &str, size: Px) -> Px {
        text.graphemes(true)
            .map(|cluster| self.cluster_width(cluster, size))
            .sum()
    }
}

impl<T: Typeface + ?Sized> Typeface for &T {
    fn cluster_width(&self, cluster: &str, size: Px) -> Px {
        (**self).cluster_width(cluster, size)
    }

    fn draw_clusters(
        &self,
        clusters: &[PlacedCluster<'_>],
        size: Px,
        baseline: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> Result<(), CardError> {
        (**self).draw_clusters(clusters, size, baseline, plot)
    }

    fn draw_runs(
        &self,
        runs: &[GlyphRun<'_>],
        size: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> Result<(), CardError> {
        (**self).draw_runs(runs, size, plot)
    }
}

/// A parsed font object. Fonts can be TTF or OTF fonts. CJK faces are large, so a
/// font is loaded once and shared by every render; nothing in it is mutated while
/// drawing.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, CardError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        ab_glyph::FontRef::try_from_slice(face.as_slice()).map_err(|_| CardError::InvalidFont)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Px) -> Px {
        let scaling = size / self.face.as_face_ref().units_per_em() as f32;
        scaling * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Px) -> Px {
        let scaling = size / self.face.as_face_ref().units_per_em() as f32;
        scaling * self.face.as_face_ref().descender() as f32
    }

    /// Obtain the weight of the font. Numerical values generally map as follows:
    ///
    /// * 100: Thin (Hairline)
    /// * 400: Normal
    /// * 700: Bold
    /// * 900: Black (Heavy)
    pub fn weight(&self) -> u16 {
        self.face.as_face_ref().weight().to_number()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    /// The glyph drawn for `ch`, falling back to the replacement character, then a
    /// question mark, then `.notdef`. ASCII whitespace controls are drawn as spaces.
    fn glyph_for(&self, ch: char) -> GlyphId {
        let ch = drawn_as(ch);
        if let Some(id) = self.glyph_id(ch) {
            return GlyphId(id);
        }
        log::debug!("font has no glyph for {ch:?}, using a replacement");
        self.replacement_glyph_id()
            .or_else(|| self.glyph_id('?'))
            .map(GlyphId)
            .unwrap_or(GlyphId(0))
    }

    fn advance(&self, glyph: GlyphId, size: Px) -> Px {
        let scaling = size / self.face.as_face_ref().units_per_em() as f32;
        scaling
            * self
                .face
                .as_face_ref()
                .glyph_hor_advance(glyph)
                .unwrap_or_default() as f32
    }
}

/// The character actually looked up in the font for `ch`
fn drawn_as(ch: char) -> char {
    match ch {
        '\t' | '\n' | '\r' | '\x0C' => ' ',
        ch => ch,
    }
}

impl Font {
    fn outlines(&self) -> Result<ab_glyph::FontRef<'_>, CardError> {
        ab_glyph::FontRef::try_from_slice(self.face.as_slice()).map_err(|_| CardError::InvalidFont)
    }

    /// ab_glyph scales by ascent - descent rather than by the em square
    fn outline_scale(&self, size: Px) -> ab_glyph::PxScale {
        ab_glyph::PxScale::from((self.ascent(size) - self.descent(size)).0)
    }

    fn rasterise(
        &self,
        outlines: &ab_glyph::FontRef<'_>,
        clusters: &[PlacedCluster<'_>],
        size: Px,
        baseline: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        let scale = self.outline_scale(size);
        for placed in clusters {
            let mut x = placed.x;
            for ch in placed.text.chars() {
                let glyph = self.glyph_for(ch);
                let positioned = ab_glyph::GlyphId(glyph.0)
                    .with_scale_and_position(scale, ab_glyph::point(x.0, baseline.0));
                if let Some(outlined) = outlines.outline_glyph(positioned) {
                    let bounds = outlined.px_bounds();
                    let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                    outlined.draw(|gx, gy, coverage| {
                        plot(left + gx as i32, top + gy as i32, coverage)
                    });
                }
                x += self.advance(glyph, size);
            }
        }
    }
}

impl Typeface for Font {
    fn cluster_width(&self, cluster: &str, size: Px) -> Px {
        cluster
            .chars()
            .map(|ch| self.advance(self.glyph_for(ch), size))
            .sum()
    }

    fn draw_clusters(
        &self,
        clusters: &[PlacedCluster<'_>],
        size: Px,
        baseline: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> Result<(), CardError> {
        let outlines = self.outlines()?;
        self.rasterise(&outlines, clusters, size, baseline, plot);
        Ok(())
    }

    fn draw_runs(
        &self,
        runs: &[GlyphRun<'_>],
        size: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> Result<(), CardError> {
        let outlines = self.outlines()?;
        for run in runs {
            self.rasterise(&outlines, &run.clusters, size, run.baseline, plot);
        }
        Ok(())
    }
}

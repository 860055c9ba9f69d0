use crate::colour::{colours, Colour};
use crate::layout::{Margins, PunctuationRule};
use crate::units::Px;

/// The colours a story card is painted with
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: Colour,
    /// Colour of the 1px bands laid over the background
    pub texture: Colour,
    pub title: Colour,
    pub body: Colour,
    pub watermark: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: colours::PAPER,
            texture: colours::PAPER_TEXTURE,
            title: colours::TITLE,
            body: colours::BODY,
            watermark: colours::WATERMARK,
        }
    }
}

/// Every fixed constant that goes into laying out and painting a story card. The
/// [`Default`] is the 1080px wide card shared from dailythriller.com.
#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// The canvas is never shorter than this, however little text there is
    pub min_height: u32,
    pub title_size: Px,
    pub body_size: Px,
    pub watermark_size: Px,
    pub margins: Margins,
    /// Title line advance, as a multiple of the title size
    pub title_line_height: f32,
    /// Body line advance, as a multiple of the body size
    pub body_line_height: f32,
    /// Gap between paragraphs, as a multiple of the body size
    pub paragraph_spacing: f32,
    /// Extra offset of the first line of the first paragraph
    pub first_line_indent: Px,
    /// Spread full body lines so they end on the right margin
    pub justify: bool,
    pub punctuation: PunctuationRule,
    /// A texture band is drawn on every n-th row, starting at the top. 0 disables it.
    pub texture_spacing: u32,
    pub palette: Palette,
    /// Caption drawn centred under the story
    pub watermark: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        CardConfig {
            width: 1080,
            min_height: 2000,
            title_size: Px(64.0),
            body_size: Px(42.0),
            watermark_size: Px(28.0),
            margins: Margins::trbl(Px(160.0), Px(80.0), Px(80.0), Px(80.0))
                .with_title_gap(Px(80.0))
                .with_watermark_gap(Px(80.0)),
            title_line_height: 1.75,
            body_line_height: 1.8,
            paragraph_spacing: 0.8,
            first_line_indent: Px(80.0),
            justify: true,
            punctuation: PunctuationRule::Trailing,
            texture_spacing: 4,
            palette: Palette::default(),
            watermark: "dailythriller.com".to_string(),
        }
    }
}

impl CardConfig {
    /// Create a configuration with the default card settings
    pub fn new() -> CardConfig {
        CardConfig::default()
    }

    /// Set the canvas width, modifying `self`
    pub fn width(&mut self, width: u32) -> &mut Self {
        self.width = width;
        self
    }

    /// Set the minimum canvas height, modifying `self`
    pub fn min_height(&mut self, min_height: u32) -> &mut Self {
        self.min_height = min_height;
        self
    }

    /// Set the title, body, and watermark font sizes, modifying `self`
    pub fn font_sizes(&mut self, title: Px, body: Px, watermark: Px) -> &mut Self {
        self.title_size = title;
        self.body_size = body;
        self.watermark_size = watermark;
        self
    }

    /// Set the margins, modifying `self`
    pub fn margins(&mut self, margins: Margins) -> &mut Self {
        self.margins = margins;
        self
    }

    /// Set the title and body line height factors, modifying `self`
    pub fn line_heights(&mut self, title: f32, body: f32) -> &mut Self {
        self.title_line_height = title;
        self.body_line_height = body;
        self
    }

    /// Set the paragraph gap as a multiple of the body size, modifying `self`
    pub fn paragraph_spacing(&mut self, factor: f32) -> &mut Self {
        self.paragraph_spacing = factor;
        self
    }

    /// Set the first line indent, modifying `self`
    pub fn first_line_indent(&mut self, indent: Px) -> &mut Self {
        self.first_line_indent = indent;
        self
    }

    /// Turn justification of body lines on or off, modifying `self`
    pub fn justify(&mut self, justify: bool) -> &mut Self {
        self.justify = justify;
        self
    }

    /// Set the line breaking rule for punctuation, modifying `self`
    pub fn punctuation(&mut self, rule: PunctuationRule) -> &mut Self {
        self.punctuation = rule;
        self
    }

    /// Set the distance between texture bands (0 for a flat background), modifying `self`
    pub fn texture_spacing(&mut self, spacing: u32) -> &mut Self {
        self.texture_spacing = spacing;
        self
    }

    /// Set the colours, modifying `self`
    pub fn palette(&mut self, palette: Palette) -> &mut Self {
        self.palette = palette;
        self
    }

    /// Set the watermark caption, modifying `self`
    pub fn watermark<S: ToString>(&mut self, watermark: S) -> &mut Self {
        self.watermark = watermark.to_string();
        self
    }

    /// Distance between two title baselines
    pub fn title_advance(&self) -> Px {
        self.title_size * self.title_line_height
    }

    /// Distance between two body baselines
    pub fn body_advance(&self) -> Px {
        self.body_size * self.body_line_height
    }

    /// Gap inserted between two paragraphs
    pub fn paragraph_gap(&self) -> Px {
        self.body_size * self.paragraph_spacing
    }

    /// Width available to every line of text
    pub fn text_width(&self) -> Px {
        self.margins.content_width(Px::from(self.width))
    }
}

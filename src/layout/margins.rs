use crate::units::Px;

/// Margins are used when laying out a story card. Besides the four edges of the
/// canvas they carry the two vertical gaps of the card: between the title block and
/// the body, and between the body and the watermark.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
    /// Space between the last title line and the first body line
    pub title_bottom: Px,
    /// Space between the last body line and the watermark
    pub watermark_top: Px,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins). Both gaps start at zero.
    pub fn trbl(top: Px, right: Px, bottom: Px, left: Px) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
            ..Margins::empty()
        }
    }

    /// Create margins where all values, gaps included, are equal
    pub fn all<D: Into<Px>>(value: D) -> Margins {
        let value: Px = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
            title_bottom: value,
            watermark_top: value,
        }
    }

    /// Create margins by specifying different values for vertical (top, bottom, and
    /// both gaps) and horizontal (left and right) margins
    pub fn symmetric(vertical: Px, horizontal: Px) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
            title_bottom: vertical,
            watermark_top: vertical,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins {
            top: Px::ZERO,
            right: Px::ZERO,
            bottom: Px::ZERO,
            left: Px::ZERO,
            title_bottom: Px::ZERO,
            watermark_top: Px::ZERO,
        }
    }

    /// Set the gap below the title block
    pub fn with_title_gap(&self, gap: Px) -> Margins {
        Margins {
            title_bottom: gap,
            ..self.clone()
        }
    }

    /// Set the gap above the watermark
    pub fn with_watermark_gap(&self, gap: Px) -> Margins {
        Margins {
            watermark_top: gap,
            ..self.clone()
        }
    }

    /// The horizontal space left between the left and right margins of a canvas
    pub fn content_width(&self, canvas_width: Px) -> Px {
        (canvas_width - self.left - self.right).max(Px::ZERO)
    }

    /// Everything vertical that does not depend on the text: both edges and both gaps
    pub fn vertical_chrome(&self) -> Px {
        self.top + self.title_bottom + self.watermark_top + self.bottom
    }
}

use super::text::{justify, paragraphs, wrap, Alignment, Line, WrapOptions};
use crate::config::CardConfig;
use crate::font::{PlacedCluster, Typeface};
use crate::units::Px;

/// A line of text with its final position on the canvas
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedLine<'a> {
    pub line: Line<'a>,
    /// Pen position of the first cluster
    pub x: Px,
    pub baseline: Px,
    pub alignment: Alignment,
}

impl<'a> PositionedLine<'a> {
    /// Every cluster of the line at its final x coordinate
    pub fn clusters(&self) -> Vec<PlacedCluster<'a>> {
        self.line.place(self.x, self.alignment)
    }

    /// Where the right edge of the last cluster ends up
    pub fn right_edge(&self) -> Px {
        let gaps = match self.alignment {
            Alignment::Left => Px::ZERO,
            Alignment::Justified { gap } => gap * self.line.len().saturating_sub(1) as f32,
        };
        self.x + self.line.width() + gaps
    }
}

/// The complete geometry of a story card, computed before anything is painted. Every
/// height is summed up front, so the canvas can be allocated once at its final size.
#[derive(Clone, Debug, PartialEq)]
pub struct StoryLayout<'a> {
    pub width: u32,
    pub height: u32,
    pub title: Vec<PositionedLine<'a>>,
    /// Body lines, grouped by paragraph. Blank paragraphs never appear here.
    pub paragraphs: Vec<Vec<PositionedLine<'a>>>,
    pub watermark: PositionedLine<'a>,
    pub title_height: Px,
    pub body_height: Px,
}

impl<'a> StoryLayout<'a> {
    /// Lay out a story: wrap the title with `bold` and the body with `regular`, sum the
    /// block heights to size the canvas, then assign every line its baseline.
    pub fn compute<F: Typeface + ?Sized>(
        regular: &F,
        bold: &F,
        config: &'a CardConfig,
        title: &'a str,
        body: &'a str,
    ) -> StoryLayout<'a> {
        let margins = &config.margins;
        let text_width = config.text_width();
        let wrap_options = WrapOptions::new(text_width).punctuation(config.punctuation);

        // pass 1: wrap everything and add up the heights
        let title_lines = wrap(bold, config.title_size, title, &wrap_options);
        let title_height = config.title_advance() * title_lines.len() as f32;

        let wrapped: Vec<Vec<Line<'a>>> = paragraphs(body)
            .enumerate()
            .map(|(i, paragraph)| {
                let indent = if i == 0 {
                    config.first_line_indent
                } else {
                    Px::ZERO
                };
                wrap(
                    regular,
                    config.body_size,
                    paragraph,
                    &wrap_options.indent(indent),
                )
            })
            .collect();

        let body_lines: usize = wrapped.iter().map(Vec::len).sum();
        let body_height = config.body_advance() * body_lines as f32
            + config.paragraph_gap() * wrapped.len().saturating_sub(1) as f32;

        let content_height = margins.vertical_chrome() + title_height + body_height;
        let height = content_height.ceil().max(config.min_height);

        log::debug!(
            "story card: {} title lines, {} paragraphs, {} body lines, {}x{}",
            title_lines.len(),
            wrapped.len(),
            body_lines,
            config.width,
            height
        );

        // pass 2: baselines and alignment
        let title = title_lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| PositionedLine {
                line,
                x: margins.left,
                baseline: margins.top + config.title_advance() * i as f32,
                alignment: Alignment::Left,
            })
            .collect();

        let mut cursor = margins.top + title_height + margins.title_bottom;
        let mut positioned = Vec::with_capacity(wrapped.len());
        for (pi, lines) in wrapped.into_iter().enumerate() {
            if pi > 0 {
                cursor += config.paragraph_gap();
            }
            let count = lines.len();
            let mut paragraph = Vec::with_capacity(count);
            for (li, line) in lines.into_iter().enumerate() {
                let indented = pi == 0 && li == 0;
                let (x, available) = if indented {
                    (
                        margins.left + config.first_line_indent,
                        text_width - config.first_line_indent,
                    )
                } else {
                    (margins.left, text_width)
                };
                let alignment = if config.justify {
                    justify(&line, available, li + 1 == count)
                } else {
                    Alignment::Left
                };
                paragraph.push(PositionedLine {
                    line,
                    x,
                    baseline: cursor,
                    alignment,
                });
                cursor += config.body_advance();
            }
            positioned.push(paragraph);
        }

        let watermark = watermark_line(regular, config, height);

        StoryLayout {
            width: config.width,
            height,
            title,
            paragraphs: positioned,
            watermark,
            title_height,
            body_height,
        }
    }

    /// Every body line, in reading order
    pub fn body_lines(&self) -> impl Iterator<Item = &PositionedLine<'a>> {
        self.paragraphs.iter().flatten()
    }
}

fn watermark_line<'a, F: Typeface + ?Sized>(
    face: &F,
    config: &'a CardConfig,
    height: u32,
) -> PositionedLine<'a> {
    // a single unwrapped line, however wide the caption is
    let line = wrap(
        face,
        config.watermark_size,
        &config.watermark,
        &WrapOptions::new(Px(f32::INFINITY)),
    )
    .into_iter()
    .next()
    .unwrap_or_default();
    let width = line.width();

    PositionedLine {
        line,
        x: (Px::from(config.width) - width) / 2.0,
        baseline: Px::from(height) - config.margins.bottom,
        alignment: Alignment::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BoxFace;

    fn layout<'a>(config: &'a CardConfig, title: &'a str, body: &'a str) -> StoryLayout<'a> {
        StoryLayout::compute(&BoxFace, &BoxFace, config, title, body)
    }

    #[test]
    fn haunted_house_scenario() {
        let config = CardConfig::default();
        let layout = layout(&config, "鬼屋", "他走进了那间鬼屋。\n门在身后关上了。");

        assert!(!layout.title.is_empty() && layout.title.len() <= 2);
        assert_eq!(layout.title[0].x, Px(80.0));
        assert_eq!(layout.title[0].baseline, Px(160.0));

        assert_eq!(layout.paragraphs.len(), 2);
        let first = &layout.paragraphs[0][0];
        let second = &layout.paragraphs[1][0];
        assert_eq!(first.x, Px(160.0));
        assert_eq!(second.x, Px(80.0));

        let body_top = Px(160.0) + Px(112.0) + Px(80.0);
        assert_eq!(first.baseline, body_top);
        assert_eq!(
            second.baseline,
            body_top + config.body_advance() + config.paragraph_gap()
        );

        // both paragraphs fit a single short line, which stays left aligned
        assert_eq!(first.alignment, Alignment::Left);
        assert_eq!(second.alignment, Alignment::Left);

        assert_eq!(layout.watermark.line.text(), "dailythriller.com");
        assert_eq!(layout.watermark.baseline, Px::from(layout.height) - Px(80.0));
        let centre = layout.watermark.x + layout.watermark.line.width() / 2.0;
        assert_eq!(centre, Px(540.0));
    }

    #[test]
    fn short_stories_use_the_minimum_height() {
        let config = CardConfig::default();
        assert_eq!(layout(&config, "鬼屋", "一").height, 2000);
        assert_eq!(layout(&config, "", "").height, 2000);
    }

    #[test]
    fn empty_blocks_contribute_nothing() {
        let config = CardConfig::default();
        let empty = layout(&config, "", "\n  \n");
        assert!(empty.title.is_empty());
        assert!(empty.paragraphs.is_empty());
        assert_eq!(empty.title_height, Px::ZERO);
        assert_eq!(empty.body_height, Px::ZERO);
        assert_eq!(empty.watermark.line.text(), "dailythriller.com");
    }

    #[test]
    fn height_is_additive_once_past_the_minimum() {
        let mut config = CardConfig::default();
        config.min_height(0).line_heights(1.75, 2.0).paragraph_spacing(0.5);
        let layout = layout(&config, "鬼屋", "一\n二\n三");
        // chrome + one title line + three 84px lines + two 21px gaps
        assert_eq!(layout.height, 400 + 112 + 3 * 84 + 2 * 21);
    }

    #[test]
    fn blank_paragraphs_add_no_spacing() {
        let mut config = CardConfig::default();
        config.min_height(0);
        let tight = layout(&config, "鬼屋", "一\n二");
        let loose = layout(&config, "鬼屋", "一\n\n   \n二\n");
        assert_eq!(tight.height, loose.height);
        assert_eq!(tight.body_height, loose.body_height);
    }

    #[test]
    fn height_grows_with_paragraphs() {
        let mut config = CardConfig::default();
        config.min_height(0);
        let paragraph = "门在身后关上了，屋里一片漆黑，只有窗外的月光照进来。".repeat(2);
        let mut body = String::new();
        let mut previous = 0;
        for _ in 0..8 {
            body.push_str(&paragraph);
            body.push('\n');
            let height = layout(&config, "鬼屋", &body).height;
            assert!(height >= previous);
            previous = height;
        }
    }

    #[test]
    fn full_lines_end_on_the_right_margin() {
        let config = CardConfig::default();
        let body = "他走进了那间鬼屋四周寂静无声他听见楼上传来脚步声一步两步三步".repeat(3);
        let layout = layout(&config, "鬼屋", &body);
        let right = Px(1080.0 - 80.0);
        let lines: Vec<_> = layout.body_lines().collect();
        assert!(lines.len() > 2);
        for line in &lines[..lines.len() - 1] {
            assert!((line.right_edge() - right).0.abs() < 0.01);
        }
        let last = lines[lines.len() - 1];
        assert_eq!(last.alignment, Alignment::Left);
    }

    #[test]
    fn indented_line_is_justified_against_its_narrower_width() {
        let config = CardConfig::default();
        let body = "他走进了那间鬼屋四周寂静无声他听见楼上传来脚步声".repeat(2);
        let layout = layout(&config, "", &body);
        let first = &layout.paragraphs[0][0];
        // 840px of room after the indent, 42px per cluster
        assert_eq!(first.line.len(), 20);
        assert_eq!(first.alignment, Alignment::Justified { gap: Px::ZERO });
        assert_eq!(first.right_edge(), Px(1000.0));
    }

    #[test]
    fn justification_can_be_disabled() {
        let mut config = CardConfig::default();
        config.justify(false);
        let body = "他走进了那间鬼屋四周寂静无声他听见楼上传来脚步声".repeat(3);
        let layout = layout(&config, "", &body);
        assert!(layout
            .body_lines()
            .all(|line| line.alignment == Alignment::Left));
    }

    #[test]
    fn title_wraps_in_its_own_size() {
        let config = CardConfig::default();
        // 64px clusters, 920px wide: 14 per line
        let title = "一".repeat(20);
        let layout = layout(&config, &title, "");
        assert_eq!(layout.title.len(), 2);
        assert_eq!(layout.title[0].line.len(), 14);
        assert_eq!(layout.title[1].baseline, Px(160.0) + Px(112.0));
        assert_eq!(layout.title_height, Px(224.0));
    }
}

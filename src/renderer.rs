use crate::canvas::Canvas;
use crate::config::CardConfig;
use crate::font::Typeface;
use crate::layout::StoryLayout;
use crate::CardError;
use base64::Engine as _;
use std::io::Write;

/// Renders stories into shareable PNG cards.
///
/// A renderer owns its two faces (regular for the body and watermark, bold for the
/// title) and its configuration, and never mutates them: every call lays the story out,
/// allocates a fresh canvas, paints it, and encodes it. A renderer can therefore be
/// shared between threads as long as its faces can.
///
/// # Example
///
/// ```no_run
/// use story_card::{CardConfig, Font, StoryRenderer};
///
/// let regular = Font::load(std::fs::read("NotoSansSC-Regular.otf")?)?;
/// let bold = Font::load(std::fs::read("NotoSansSC-Bold.otf")?)?;
/// let renderer = StoryRenderer::new(regular, bold, CardConfig::default());
///
/// let png = renderer.render("鬼屋", "他走进了那间鬼屋。\n门在身后关上了。")?;
/// std::fs::write("story.png", png)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StoryRenderer<F> {
    regular: F,
    bold: F,
    config: CardConfig,
}

impl<F: Typeface> StoryRenderer<F> {
    pub fn new(regular: F, bold: F, config: CardConfig) -> StoryRenderer<F> {
        StoryRenderer {
            regular,
            bold,
            config,
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Compute where every line of the story goes, without painting anything
    pub fn layout<'a>(&'a self, title: &'a str, body: &'a str) -> StoryLayout<'a> {
        StoryLayout::compute(&self.regular, &self.bold, &self.config, title, body)
    }

    /// Paint a computed layout onto a new canvas: background, paper texture, title,
    /// body, and finally the watermark
    pub fn paint(&self, layout: &StoryLayout<'_>) -> Result<Canvas, CardError> {
        let palette = &self.config.palette;
        let mut canvas = Canvas::new(layout.width, layout.height, palette.background)?;
        canvas.rule_rows(self.config.texture_spacing, palette.texture);

        canvas.draw_lines(
            &self.bold,
            self.config.title_size,
            &layout.title,
            palette.title,
        )?;
        canvas.draw_lines(
            &self.regular,
            self.config.body_size,
            layout.body_lines(),
            palette.body,
        )?;
        canvas.draw_line(
            &self.regular,
            self.config.watermark_size,
            &layout.watermark,
            palette.watermark,
        )?;

        Ok(canvas)
    }

    /// Render a story to an in-memory PNG
    pub fn render(&self, title: &str, body: &str) -> Result<Vec<u8>, CardError> {
        let layout = self.layout(title, body);
        self.paint(&layout)?.encode_png()
    }

    /// Render a story, streaming the PNG to `w`. The whole canvas is painted in memory
    /// before the first byte is written.
    pub fn write<W: Write>(&self, title: &str, body: &str, w: W) -> Result<(), CardError> {
        let layout = self.layout(title, body);
        self.paint(&layout)?.write_png(w)
    }

    /// Render a story to a `data:image/png;base64,...` URL
    pub fn render_data_url(&self, title: &str, body: &str) -> Result<String, CardError> {
        let png = self.render(title, body)?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::{colours, Colour};
    use crate::testing::BoxFace;
    use base64::Engine as _;

    fn renderer() -> StoryRenderer<BoxFace> {
        StoryRenderer::new(BoxFace, BoxFace, CardConfig::default())
    }

    fn column_has(canvas: &Canvas, x: u32, rows: std::ops::Range<u32>, colour: Colour) -> bool {
        rows.into_iter().any(|y| canvas.pixel(x, y) == Some(colour))
    }

    #[test]
    fn paints_every_block_in_its_colour() {
        let renderer = renderer();
        let layout = renderer.layout("鬼屋", "他走进了那间鬼屋。\n门在身后关上了。");
        let canvas = renderer.paint(&layout).expect("can paint");
        assert_eq!((canvas.width(), canvas.height()), (1080, 2000));

        // title glyph boxes run from the margin, body starts at the indent
        assert!(column_has(&canvas, 100, 100..161, colours::TITLE));
        assert!(column_has(&canvas, 180, 320..353, colours::BODY));
        assert!(!column_has(&canvas, 120, 320..353, colours::BODY));

        let second = &layout.paragraphs[1][0];
        let baseline = second.baseline.0 as u32;
        assert!(column_has(&canvas, 100, baseline - 30..baseline, colours::BODY));

        assert!(column_has(&canvas, 540, 1890..1920, colours::WATERMARK));
    }

    /// Forwards to [BoxFace], counting how often a block is set up and how many lines
    /// are drawn
    #[derive(Default)]
    struct Counting {
        blocks: std::cell::Cell<usize>,
        lines: std::cell::Cell<usize>,
    }

    impl Typeface for Counting {
        fn cluster_width(&self, cluster: &str, size: crate::Px) -> crate::Px {
            BoxFace.cluster_width(cluster, size)
        }

        fn draw_clusters(
            &self,
            clusters: &[crate::PlacedCluster<'_>],
            size: crate::Px,
            baseline: crate::Px,
            plot: &mut dyn FnMut(i32, i32, f32),
        ) -> Result<(), CardError> {
            self.lines.set(self.lines.get() + 1);
            BoxFace.draw_clusters(clusters, size, baseline, plot)
        }

        fn draw_runs(
            &self,
            runs: &[crate::GlyphRun<'_>],
            size: crate::Px,
            plot: &mut dyn FnMut(i32, i32, f32),
        ) -> Result<(), CardError> {
            self.blocks.set(self.blocks.get() + 1);
            for run in runs {
                self.draw_clusters(&run.clusters, size, run.baseline, plot)?;
            }
            Ok(())
        }
    }

    #[test]
    fn paints_each_block_in_one_batch() {
        let face = Counting::default();
        let renderer = StoryRenderer::new(&face, &face, CardConfig::default());
        let body = "他走进了那间鬼屋。\n门在身后关上了，屋里一片漆黑，只有窗外的月光照进来。\n他听见楼上传来脚步声。";
        let layout = renderer.layout("鬼屋", body);
        let lines = layout.title.len() + layout.body_lines().count() + 1;
        assert!(lines > 4);

        renderer.paint(&layout).expect("can paint");
        // title, body, and watermark
        assert_eq!(face.blocks.get(), 3);
        assert_eq!(face.lines.get(), lines);
    }

    #[test]
    fn background_is_ruled_paper() {
        let renderer = renderer();
        let canvas = renderer.paint(&renderer.layout("", "")).expect("can paint");
        assert_eq!(canvas.pixel(1000, 0), Some(colours::PAPER_TEXTURE));
        assert_eq!(canvas.pixel(1000, 1), Some(colours::PAPER));
        assert_eq!(canvas.pixel(1000, 4), Some(colours::PAPER_TEXTURE));
        assert_eq!(canvas.pixel(1000, 1999), Some(colours::PAPER));
    }

    #[test]
    fn empty_story_still_carries_the_watermark() {
        let renderer = renderer();
        let png = renderer.render("", "").expect("can render");
        let image = image::load_from_memory(&png).expect("is a png").to_rgba8();
        assert_eq!(image.dimensions(), (1080, 2000));
        let watermark = (1890..1920)
            .any(|y| Colour::from(*image.get_pixel(540, y)) == colours::WATERMARK);
        assert!(watermark);
    }

    #[test]
    fn write_matches_render() {
        let renderer = renderer();
        let mut streamed = Vec::new();
        renderer
            .write("鬼屋", "门在身后关上了。", &mut streamed)
            .expect("can write");
        let rendered = renderer.render("鬼屋", "门在身后关上了。").expect("can render");
        assert_eq!(streamed, rendered);
    }

    #[test]
    fn data_url_wraps_the_png() {
        let url = renderer().render_data_url("鬼屋", "").expect("can render");
        let payload = url
            .strip_prefix("data:image/png;base64,")
            .expect("has the png prefix");
        let png = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .expect("is base64");
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn oversized_stories_fail_instead_of_truncating() {
        let renderer = renderer();
        let body = "鬼\n".repeat(500);
        assert!(matches!(
            renderer.render("", &body),
            Err(CardError::CanvasTooLarge { width: 1080, .. })
        ));
    }

    #[test]
    fn renders_concurrently() {
        let renderer = renderer();
        let outputs: Vec<Vec<u8>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| renderer.render("鬼屋", "门在身后关上了。")))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("thread finished").expect("can render"))
                .collect()
        });
        assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}

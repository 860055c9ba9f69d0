use crate::font::{PlacedCluster, Typeface};
use crate::units::Px;
use unicode_segmentation::UnicodeSegmentation;

/// Closing punctuation that is allowed to hang past the right margin instead of
/// starting a new line on its own
pub const TRAILING_PUNCTUATION: &[char] = &['，', '。', '！', '？', '；', '：', '、'];

/// Marks that must never start a line under [`PunctuationRule::Strict`]
pub const NO_BREAK_BEFORE: &[char] = &[
    '，', '。', '！', '？', '；', '：', '、', '》', '］', '｝', '】', '」', '』', ')',
];

/// Marks that must never end a line under [`PunctuationRule::Strict`]
pub const NO_BREAK_AFTER: &[char] = &['《', '［', '｛', '【', '「', '『', '('];

/// How punctuation influences where lines are broken
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PunctuationRule {
    /// Trailing punctuation that would overflow the line is kept on it anyway, so no
    /// line ever starts with a comma or full stop
    #[default]
    Trailing,
    /// As [`PunctuationRule::Trailing`], but closing brackets and quotes hang too, and
    /// an opening bracket or quote left at the end of a full line is carried down to
    /// the start of the next one
    Strict,
}

fn is_one_of(cluster: &str, set: &[char]) -> bool {
    let mut chars = cluster.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => set.contains(&ch),
        _ => false,
    }
}

impl PunctuationRule {
    /// Whether `cluster` may overflow the end of a line rather than being pushed to the
    /// next one
    pub fn hangs(self, cluster: &str) -> bool {
        match self {
            PunctuationRule::Trailing => is_one_of(cluster, TRAILING_PUNCTUATION),
            PunctuationRule::Strict => is_one_of(cluster, NO_BREAK_BEFORE),
        }
    }

    /// Whether `cluster` must not be the last thing on a line that is being broken
    pub fn binds_forward(self, cluster: &str) -> bool {
        match self {
            PunctuationRule::Trailing => false,
            PunctuationRule::Strict => is_one_of(cluster, NO_BREAK_AFTER),
        }
    }
}

/// One wrapped line: the glyph-clusters it holds, in order, with the width each was
/// measured at
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line<'a> {
    pub clusters: Vec<&'a str>,
    pub widths: Vec<Px>,
}

impl<'a> Line<'a> {
    fn push(&mut self, cluster: &'a str, width: Px) {
        self.clusters.push(cluster);
        self.widths.push(width);
    }

    fn pop(&mut self) -> Option<(&'a str, Px)> {
        let cluster = self.clusters.pop()?;
        let width = self.widths.pop().unwrap_or_default();
        Some((cluster, width))
    }

    /// The natural width of the line, without any justification
    pub fn width(&self) -> Px {
        self.widths.iter().copied().sum()
    }

    /// Number of glyph-clusters on the line
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The line's text, exactly as it appeared in the input
    pub fn text(&self) -> String {
        self.clusters.concat()
    }

    /// Position every cluster of the line, starting at `x` and spreading the clusters
    /// apart according to `alignment`
    pub fn place(&self, x: Px, alignment: Alignment) -> Vec<PlacedCluster<'a>> {
        let gap = match alignment {
            Alignment::Left => Px::ZERO,
            Alignment::Justified { gap } => gap,
        };
        let mut pen = x;
        self.clusters
            .iter()
            .zip(self.widths.iter())
            .map(|(&text, &width)| {
                let placed = PlacedCluster { text, x: pen };
                pen += width + gap;
                placed
            })
            .collect()
    }
}

/// Parameters for a single call to [`wrap`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WrapOptions {
    /// The width available to every line, indent included
    pub max_width: Px,
    /// Space reserved at the start of the first line only
    pub indent: Px,
    pub punctuation: PunctuationRule,
}

impl WrapOptions {
    pub fn new(max_width: Px) -> WrapOptions {
        WrapOptions {
            max_width,
            indent: Px::ZERO,
            punctuation: PunctuationRule::default(),
        }
    }

    pub fn indent(self, indent: Px) -> WrapOptions {
        WrapOptions { indent, ..self }
    }

    pub fn punctuation(self, punctuation: PunctuationRule) -> WrapOptions {
        WrapOptions {
            punctuation,
            ..self
        }
    }
}

/// Split a body of text into paragraphs on literal newlines, dropping every paragraph
/// that is blank once whitespace is trimmed. A `\r` left over from a `\r\n` line ending
/// is not part of the paragraph.
pub fn paragraphs(body: &str) -> impl Iterator<Item = &str> {
    body.split('\n')
        .map(|p| p.strip_suffix('\r').unwrap_or(p))
        .filter(|p| !p.trim().is_empty())
}

/// Greedily wraps `text` into lines one glyph-cluster at a time, measuring each cluster
/// with `face` at `size`. Widths accumulate from the indent on the first line and from
/// zero on every following line.
///
/// When the next cluster does not fit:
///
/// * if the punctuation rule lets it hang, it is appended to the full line anyway and
///   the line is closed, so a line may overflow by exactly one punctuation glyph;
/// * otherwise the line is closed and the cluster starts the next one (under the strict
///   rule an opening mark at the end of the closed line moves down with it).
///
/// A cluster wider than an empty line is placed on that line regardless, so every step
/// consumes at least one cluster and no empty line is ever produced. Text in scripts
/// that separate words with spaces is still broken per cluster.
pub fn wrap<'a, F: Typeface + ?Sized>(
    face: &F,
    size: Px,
    text: &'a str,
    options: &WrapOptions,
) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::new();
    let mut current = Line::default();
    let mut running = options.indent;

    for cluster in text.graphemes(true) {
        let width = face.cluster_width(cluster, size);

        if running + width > options.max_width && !current.is_empty() {
            if options.punctuation.hangs(cluster) {
                log::trace!("hanging {cluster:?} past the end of line {}", lines.len());
                current.push(cluster, width);
                lines.push(std::mem::take(&mut current));
                running = Px::ZERO;
                continue;
            }

            let last = current.clusters.last().copied();
            let carried = match last {
                Some(last)
                    if current.len() > 1
                        && options.punctuation.binds_forward(last)
                        && current.widths.last().copied().unwrap_or_default() + width
                            <= options.max_width =>
                {
                    current.pop()
                }
                _ => None,
            };

            lines.push(std::mem::take(&mut current));
            running = Px::ZERO;

            if let Some((mark, mark_width)) = carried {
                log::trace!("carrying {mark:?} onto line {}", lines.len());
                current.push(mark, mark_width);
                running += mark_width;
            }
        }

        current.push(cluster, width);
        running += width;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// How a laid out line is spread across its width
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Alignment {
    /// Clusters sit at their natural advances
    Left,
    /// `gap` extra space is inserted between every pair of adjacent clusters. The gap is
    /// negative when a hanging punctuation mark pushed the line past its width.
    Justified { gap: Px },
}

/// Decide how to align a body line so that its right edge meets the right margin.
/// `available` is the width the line was wrapped into (narrower for an indented line).
///
/// The last line of a paragraph stays left aligned unless it already fills the width,
/// and a line of fewer than two clusters has nothing to distribute space between.
pub fn justify(line: &Line<'_>, available: Px, last_in_paragraph: bool) -> Alignment {
    let width = line.width();
    if last_in_paragraph && width < available {
        return Alignment::Left;
    }
    if line.len() < 2 {
        return Alignment::Left;
    }
    Alignment::Justified {
        gap: (available - width) / (line.len() - 1) as f32,
    }
}

use crate::font::{PlacedCluster, Typeface};
use crate::{CardError, Px};

/// A typeface where every ASCII cluster is half an em wide and everything else a full
/// em, and every glyph paints as a solid block sitting on the baseline
pub(crate) struct BoxFace;

impl Typeface for BoxFace {
    fn cluster_width(&self, cluster: &str, size: Px) -> Px {
        if cluster.is_ascii() {
            size * 0.5
        } else {
            size
        }
    }

    fn draw_clusters(
        &self,
        clusters: &[PlacedCluster<'_>],
        size: Px,
        baseline: Px,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> Result<(), CardError> {
        for placed in clusters {
            let width = self.cluster_width(placed.text, size);
            let left = placed.x.0.round() as i32 + 1;
            let right = (placed.x + width).0.round() as i32 - 1;
            let top = (baseline - size * 0.8).0.round() as i32;
            for y in top..baseline.0.round() as i32 {
                for x in left..right {
                    plot(x, y, 1.0);
                }
            }
        }
        Ok(())
    }
}

//! Text layout for story cards.
//!
//! Layout happens in two passes. [`wrap`] breaks the title and every body
//! paragraph into lines one glyph-cluster at a time, and [`StoryLayout::compute`]
//! adds up the height of every block so the canvas can be sized before anything
//! is drawn. The same pass assigns each line its baseline, x position, and
//! [`Alignment`], which is all the painter needs.
//!
//! # Example
//!
//! ```
//! use story_card::layout::{wrap, WrapOptions};
//! use story_card::{PlacedCluster, Px, Typeface, CardError};
//!
//! // a face where every glyph is exactly one em wide
//! struct Monospace;
//!
//! impl Typeface for Monospace {
//!     fn cluster_width(&self, _cluster: &str, size: Px) -> Px {
//!         size
//!     }
//!
//!     fn draw_clusters(
//!         &self,
//!         _clusters: &[PlacedCluster<'_>],
//!         _size: Px,
//!         _baseline: Px,
//!         _plot: &mut dyn FnMut(i32, i32, f32),
//!     ) -> Result<(), CardError> {
//!         Ok(())
//!     }
//! }
//!
//! let lines = wrap(&Monospace, Px(10.0), "门在身后关上了。", &WrapOptions::new(Px(70.0)));
//! let lines: Vec<String> = lines.iter().map(|line| line.text()).collect();
//! assert_eq!(lines, vec!["门在身后关上了。"]);
//! ```

mod margins;
mod story;
mod text;

pub use margins::*;
pub use story::*;
pub use text::*;

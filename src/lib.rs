mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// Line wrapping, justification, and the two-pass story card layout
pub mod layout;

mod renderer;
pub use renderer::*;

mod story;
pub use story::*;

mod units;
pub use units::*;

#[cfg(test)]
pub(crate) mod testing;

/// Re-export of the font parser, for callers inspecting faces beyond what [Font] exposes
pub use owned_ttf_parser;

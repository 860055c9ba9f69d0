use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum CardError {
    #[error(transparent)]
    /// An I/O error occurred while writing the encoded image
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("font data could not be rasterised")]
    /// [ab_glyph] refused the font data that [ttf_parser] accepted
    InvalidFont,

    #[error(transparent)]
    /// [image] failed to encode the canvas
    Image(#[from] image::ImageError),

    #[error("a {width}x{height} canvas cannot be allocated")]
    /// The drawing surface would exceed the maximum canvas size
    CanvasTooLarge { width: u32, height: u32 },

    #[error(transparent)]
    /// A story record could not be parsed
    Json(#[from] serde_json::Error),
}

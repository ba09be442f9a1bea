use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unsupported source type: {0}")]
    UnsupportedSourceType(String),
    #[error("Palette {0} was not supplied")]
    MissingPalette(u32),
    #[error("Cutter returned no pieces for frame {frame}")]
    EmptyCutResult { frame: usize },
    #[error(
        "Subtexture {id} ({width}x{height}) exceeds the maximum page size {max_width}x{max_height}"
    )]
    OversizedSubtexture {
        id: usize,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
    #[error("Incomplete metadata: {0}")]
    IncompleteMetadata(String),
    #[error("Invalid page dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Nothing to pack")]
    Empty,
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;

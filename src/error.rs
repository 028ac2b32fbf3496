use thiserror::Error;

/// Failures surfaced at the API boundary. Configuration errors fail at
/// construction of the offending value and are never silently corrected;
/// arithmetic degeneracies inside a render are handled in place and do not
/// appear here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("screen dimensions must be positive, got {width}x{height}")]
    ScreenSize { width: u32, height: u32 },

    #[error("render quality must lie in (0, 1], got {0}")]
    Quality(f64),

    #[error("direction vector must be finite and non-zero")]
    Direction,

    #[error("focal length must be positive and finite, got {0}")]
    FocalLength(f64),

    #[error("cell height must be positive and finite, got {0}")]
    CellHeight(f64),

    #[error("world map data length {len} does not match {width}x{height}")]
    MapSize { width: u32, height: u32, len: usize },

    #[error("texture dimensions must be positive, got {width}x{height}")]
    TextureDimensions { width: u32, height: u32 },

    #[error("texture raster length {len} does not match 4 * {width} * {height}")]
    TextureRaster { width: u32, height: u32, len: usize },

    #[error("texture {0} is already loaded")]
    AlreadyLoaded(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

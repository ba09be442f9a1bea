use crate::model::RasterImage;

/// Strategy for subdividing one frame raster into pieces, e.g. frames too
/// large for a single atlas region.
///
/// Implementations must return at least one raster; the extractor rejects an
/// empty result. When no cutter is configured the extractor keeps the frame
/// whole.
pub trait Cutter {
    fn cut(&self, image: &RasterImage) -> Vec<RasterImage>;
}

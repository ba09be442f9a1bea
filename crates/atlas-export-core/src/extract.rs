use std::collections::BTreeMap;

use tracing::trace;

use crate::cutter::Cutter;
use crate::error::{AtlasError, Result};
use crate::frame::SourceFrame;
use crate::model::Subtexture;
use crate::palette::Palette;

/// Turns normalized frames into a flat, order-preserving list of subtextures.
///
/// Each frame is rendered with its resolved palette and forwarded through the
/// configured cutter; the extractor does not interpret cutting policy, only
/// tags each piece with the frame it came from.
pub struct SubtextureExtractor<'a> {
    palettes: &'a BTreeMap<u32, Palette>,
    cutter: Option<&'a dyn Cutter>,
}

impl<'a> SubtextureExtractor<'a> {
    pub fn new(palettes: &'a BTreeMap<u32, Palette>, cutter: Option<&'a dyn Cutter>) -> Self {
        Self { palettes, cutter }
    }

    pub fn extract(&self, frames: &[SourceFrame]) -> Result<Vec<Subtexture>> {
        let mut subtextures = Vec::with_capacity(frames.len());
        for (frame_idx, frame) in frames.iter().enumerate() {
            let palette = match frame.palette_number() {
                Some(num) => Some(
                    self.palettes
                        .get(&num)
                        .ok_or(AtlasError::MissingPalette(num))?,
                ),
                None => None,
            };
            let raster = frame.picture_data(palette)?;
            trace!(
                "frame {}: raster {} x {}",
                frame_idx,
                raster.width(),
                raster.height()
            );

            let pieces = match self.cutter {
                Some(cutter) => {
                    let pieces = cutter.cut(&raster);
                    if pieces.is_empty() {
                        return Err(AtlasError::EmptyCutResult { frame: frame_idx });
                    }
                    pieces
                }
                None => vec![raster],
            };

            for image in pieces {
                subtextures.push(Subtexture {
                    id: subtextures.len(),
                    image,
                    parent_frame: Some(frame_idx),
                    placement: None,
                });
            }
        }
        Ok(subtextures)
    }
}

use std::collections::BTreeMap;

use image::RgbaImage;
use tracing::{debug, instrument};

use crate::compositing::blit_rgba;
use crate::compression::{CompressionChoice, DEFAULT_CANDIDATES, PngParams, select_compression};
use crate::config::ExportConfig;
use crate::cutter::Cutter;
use crate::error::Result;
use crate::extract::SubtextureExtractor;
use crate::frame::{FrameAdapter, MediaSource};
use crate::model::{AtlasPage, Subtexture};
use crate::packer::pack_subtextures;
use crate::palette::Palette;

/// Composited RGBA page and its logical page record.
pub struct OutputPage {
    pub page: AtlasPage,
    pub rgba: RgbaImage,
}

/// Result of one atlas build: placed subtextures plus frozen pages.
pub struct AtlasBuild {
    pub subtextures: Vec<Subtexture>,
    pub pages: Vec<OutputPage>,
}

impl AtlasBuild {
    /// Positions of sprites in the final texture: (subtexture id, (x, y)).
    pub fn packer_hints(&self) -> Vec<(usize, (u32, u32))> {
        self.subtextures
            .iter()
            .filter_map(|s| s.placement.map(|p| (s.id, (p.x, p.y))))
            .collect()
    }

    /// Parameters used for packing and saving the texture: the packer hints
    /// and the chosen PNG compression parameters per page.
    pub fn cache_params(&self) -> (Vec<(usize, (u32, u32))>, Vec<Option<CompressionChoice>>) {
        (
            self.packer_hints(),
            self.pages.iter().map(|p| p.page.compression).collect(),
        )
    }
}

/// Builds packed atlas pages from one decoded media container.
///
/// Runs the full export chain: normalize frames, extract subtextures (cutting
/// where configured), pack, composite each page and select its PNG
/// compression parameters. Uses the default compression candidate list.
pub fn build_atlas(
    source: &MediaSource,
    palettes: &BTreeMap<u32, Palette>,
    cutter: Option<&dyn Cutter>,
    cfg: &ExportConfig,
) -> Result<AtlasBuild> {
    build_atlas_with_candidates(source, palettes, cutter, cfg, &DEFAULT_CANDIDATES)
}

#[instrument(skip_all)]
pub fn build_atlas_with_candidates(
    source: &MediaSource,
    palettes: &BTreeMap<u32, Palette>,
    cutter: Option<&dyn Cutter>,
    cfg: &ExportConfig,
    candidates: &[PngParams],
) -> Result<AtlasBuild> {
    cfg.validate()?;

    let frames = FrameAdapter::new(palettes).adapt(source)?;
    let mut subtextures = SubtextureExtractor::new(palettes, cutter).extract(&frames)?;
    debug!(
        "extracted {} subtexture(s) from {} frame(s)",
        subtextures.len(),
        frames.len()
    );

    let mut atlas_pages = pack_subtextures(&mut subtextures, cfg)?;
    debug!("packed into {} page(s)", atlas_pages.len());

    let mut pages = Vec::with_capacity(atlas_pages.len());
    for mut page in atlas_pages.drain(..) {
        let mut canvas = RgbaImage::new(page.width, page.height);
        for s in &subtextures {
            if let Some(p) = s.placement {
                if p.page == page.id {
                    blit_rgba(s.image.data(), &mut canvas, p.x, p.y);
                }
            }
        }
        let choice = select_compression(&canvas, candidates, cfg.parallel)?;
        debug!(
            "page {}: {:?} -> {} bytes",
            page.id, choice.params, choice.size
        );
        page.compression = Some(choice);
        pages.push(OutputPage { page, rgba: canvas });
    }

    Ok(AtlasBuild { subtextures, pages })
}

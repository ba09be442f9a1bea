use tracing::debug;

pub mod shelf;

use crate::config::ExportConfig;
use crate::error::{AtlasError, Result};
use crate::model::{AtlasPage, Placement, Subtexture};
use shelf::ShelfPacker;

/// A packer places rectangles into one page.
///
/// Implementations must ensure no overlaps and stay within the page bounds.
/// `pack` may return `None` if the rectangle cannot be placed on this page.
pub trait PagePacker {
    fn can_pack(&self, w: u32, h: u32) -> bool;
    fn pack(&mut self, w: u32, h: u32) -> Option<(u32, u32)>;
}

/// Assigns a placement to every subtexture, opening pages as needed.
///
/// Candidates are visited by height desc, then width desc, then insertion
/// index, and each goes to the first page that can take it; a new page is
/// opened only when no earlier page fits. The outcome depends only on the
/// rectangle sizes and this comparator.
///
/// Fails with `OversizedSubtexture` if a single rectangle exceeds the
/// configured maximum page dimensions.
pub fn pack_subtextures(
    subtextures: &mut [Subtexture],
    cfg: &ExportConfig,
) -> Result<Vec<AtlasPage>> {
    cfg.validate()?;
    if subtextures.is_empty() {
        return Err(AtlasError::Empty);
    }

    for s in subtextures.iter() {
        if s.width() > cfg.max_width || s.height() > cfg.max_height {
            return Err(AtlasError::OversizedSubtexture {
                id: s.id,
                width: s.width(),
                height: s.height(),
                max_width: cfg.max_width,
                max_height: cfg.max_height,
            });
        }
    }

    let mut order: Vec<usize> = (0..subtextures.len()).collect();
    order.sort_by(|&a, &b| {
        subtextures[b]
            .height()
            .cmp(&subtextures[a].height())
            .then_with(|| subtextures[b].width().cmp(&subtextures[a].width()))
            .then_with(|| a.cmp(&b))
    });

    let mut packers: Vec<ShelfPacker> = Vec::new();
    let mut pages: Vec<AtlasPage> = Vec::new();

    for idx in order {
        let (w, h) = (subtextures[idx].width(), subtextures[idx].height());
        let mut target = None;
        for (page_idx, packer) in packers.iter_mut().enumerate() {
            if let Some(pos) = packer.pack(w, h) {
                target = Some((page_idx, pos));
                break;
            }
        }
        let (page_idx, (x, y)) = match target {
            Some(t) => t,
            None => {
                debug!("opening atlas page {}", packers.len());
                let mut packer = ShelfPacker::new(cfg.max_width, cfg.max_height);
                let pos = packer.pack(w, h).ok_or(AtlasError::OversizedSubtexture {
                    id: subtextures[idx].id,
                    width: w,
                    height: h,
                    max_width: cfg.max_width,
                    max_height: cfg.max_height,
                })?;
                packers.push(packer);
                pages.push(AtlasPage {
                    id: pages.len(),
                    width: cfg.max_width,
                    height: cfg.max_height,
                    subtextures: Vec::new(),
                    compression: None,
                });
                (pages.len() - 1, pos)
            }
        };
        subtextures[idx].placement = Some(Placement {
            page: page_idx,
            x,
            y,
        });
        pages[page_idx].subtextures.push(subtextures[idx].id);
    }

    if !cfg.force_max_dimensions {
        for page in pages.iter_mut() {
            let mut used_w = 0u32;
            let mut used_h = 0u32;
            for s in subtextures.iter() {
                if let Some(p) = s.placement {
                    if p.page == page.id {
                        used_w = used_w.max(p.x + s.width());
                        used_h = used_h.max(p.y + s.height());
                    }
                }
            }
            page.width = used_w.max(1);
            page.height = used_h.max(1);
        }
    }

    Ok(pages)
}

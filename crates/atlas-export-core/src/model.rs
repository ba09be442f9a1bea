use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::compression::CompressionChoice;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
}

/// An RGBA raster produced from a decoded frame, plus the hotspot marking its
/// logical anchor point at render time. Immutable once created.
#[derive(Debug, Clone)]
pub struct RasterImage {
    data: RgbaImage,
    hotspot: (i32, i32),
}

impl RasterImage {
    pub fn new(data: RgbaImage, hotspot: (i32, i32)) -> Self {
        Self { data, hotspot }
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    pub fn hotspot(&self) -> (i32, i32) {
        self.hotspot
    }

    pub fn data(&self) -> &RgbaImage {
        &self.data
    }
}

/// Final location of a subtexture: page index plus top-left position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub page: usize,
    pub x: u32,
    pub y: u32,
}

/// One sprite as part of a texture atlas. The placement is written exactly
/// once by the packer; everything else is frozen at extraction time.
#[derive(Debug, Clone)]
pub struct Subtexture {
    /// Unique within one build, assigned in extraction order.
    pub id: usize,
    pub image: RasterImage,
    /// Index of the source frame this piece was cut from.
    pub parent_frame: Option<usize>,
    pub placement: Option<Placement>,
}

impl Subtexture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Placement rectangle on its page, if packed.
    pub fn rect(&self) -> Option<Rect> {
        self.placement
            .map(|p| Rect::new(p.x, p.y, self.width(), self.height()))
    }
}

/// A single atlas page: final dimensions, the ids of the subtextures placed
/// on it (in placement order) and, once selected, the PNG parameters to save
/// it with.
#[derive(Debug, Clone)]
pub struct AtlasPage {
    pub id: usize,
    pub width: u32,
    pub height: u32,
    pub subtextures: Vec<usize>,
    pub compression: Option<CompressionChoice>,
}

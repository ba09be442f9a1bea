use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use tracing::trace;

use crate::error::{AtlasError, Result};
use crate::model::RasterImage;
use crate::palette::Palette;

/// Half a terrain tile in pixels. Blend masks anchor at the west corner of a
/// tile, so their hotspot is `(0, TILE_HALFSIZE.1)`.
pub const TILE_HALFSIZE: (i32, i32) = (48, 24);

/// Palette index that marks a pixel as not drawn. Decoders emit it for pixels
/// outside a frame's outline; layer compositing skips it.
pub const TRANSPARENT_INDEX: u16 = u16::MAX;

/// Recognized decoded-container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Single layer of palette indices per frame.
    Indexed,
    /// Multiple stacked index layers per frame.
    Layered,
    /// Stacked index layers plus an 8-bit alpha plane.
    LayeredAlpha,
    /// Precomputed terrain blending alpha masks.
    BlendMask,
}

impl FromStr for SourceKind {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indexed" => Ok(Self::Indexed),
            "layered" => Ok(Self::Layered),
            "layered_alpha" | "layeredalpha" => Ok(Self::LayeredAlpha),
            "blendmask" | "blend_mask" => Ok(Self::BlendMask),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Indexed => "indexed",
            Self::Layered => "layered",
            Self::LayeredAlpha => "layered_alpha",
            Self::BlendMask => "blendmask",
        };
        f.write_str(s)
    }
}

/// Decoded per-frame pixel data handed over by the container decoders.
///
/// Index buffers are row-major with `width * height` entries; layer lists are
/// ordered back-to-front.
#[derive(Debug, Clone)]
pub enum FramePayload {
    Indexed {
        width: u32,
        height: u32,
        indices: Vec<u16>,
        palette: u32,
        hotspot: (i32, i32),
    },
    Layered {
        width: u32,
        height: u32,
        layers: Vec<Vec<u16>>,
        palette: u32,
        hotspot: (i32, i32),
    },
    LayeredAlpha {
        width: u32,
        height: u32,
        layers: Vec<Vec<u16>>,
        alpha: Vec<u8>,
        palette: u32,
        hotspot: (i32, i32),
    },
    BlendMask {
        width: u32,
        height: u32,
        alpha: Vec<u8>,
    },
}

impl FramePayload {
    fn kind(&self) -> SourceKind {
        match self {
            Self::Indexed { .. } => SourceKind::Indexed,
            Self::Layered { .. } => SourceKind::Layered,
            Self::LayeredAlpha { .. } => SourceKind::LayeredAlpha,
            Self::BlendMask { .. } => SourceKind::BlendMask,
        }
    }
}

/// One decoded media container: the kind its decoder declared plus the frames
/// it produced, in declaration order.
#[derive(Debug, Clone)]
pub struct MediaSource {
    pub kind: String,
    pub frames: Vec<FramePayload>,
}

impl MediaSource {
    pub fn new(kind: impl Into<String>, frames: Vec<FramePayload>) -> Self {
        Self {
            kind: kind.into(),
            frames,
        }
    }
}

/// A normalized frame handle with a uniform raster-producing capability.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    payload: FramePayload,
}

impl SourceFrame {
    /// Palette this frame renders with, or `None` for self-contained frames.
    pub fn palette_number(&self) -> Option<u32> {
        match &self.payload {
            FramePayload::Indexed { palette, .. }
            | FramePayload::Layered { palette, .. }
            | FramePayload::LayeredAlpha { palette, .. } => Some(*palette),
            FramePayload::BlendMask { .. } => None,
        }
    }

    pub fn hotspot(&self) -> (i32, i32) {
        match &self.payload {
            FramePayload::Indexed { hotspot, .. }
            | FramePayload::Layered { hotspot, .. }
            | FramePayload::LayeredAlpha { hotspot, .. } => *hotspot,
            FramePayload::BlendMask { .. } => (0, TILE_HALFSIZE.1),
        }
    }

    /// Renders this frame into an RGBA raster, resolving palette indices
    /// through `palette` where the variant requires one.
    pub fn picture_data(&self, palette: Option<&Palette>) -> Result<RasterImage> {
        match &self.payload {
            FramePayload::Indexed {
                width,
                height,
                indices,
                palette: pal_num,
                hotspot,
            } => {
                let pal = palette.ok_or(AtlasError::MissingPalette(*pal_num))?;
                let rgba = render_indices(*width, *height, indices, pal);
                Ok(RasterImage::new(rgba, *hotspot))
            }
            FramePayload::Layered {
                width,
                height,
                layers,
                palette: pal_num,
                hotspot,
            } => {
                let pal = palette.ok_or(AtlasError::MissingPalette(*pal_num))?;
                let rgba = render_layers(*width, *height, layers, pal);
                Ok(RasterImage::new(rgba, *hotspot))
            }
            FramePayload::LayeredAlpha {
                width,
                height,
                layers,
                alpha,
                palette: pal_num,
                hotspot,
            } => {
                let pal = palette.ok_or(AtlasError::MissingPalette(*pal_num))?;
                let mut rgba = render_layers(*width, *height, layers, pal);
                for (i, px) in rgba.pixels_mut().enumerate() {
                    px[3] = alpha.get(i).copied().unwrap_or(0);
                }
                Ok(RasterImage::new(rgba, *hotspot))
            }
            FramePayload::BlendMask {
                width,
                height,
                alpha,
            } => {
                let mut rgba = RgbaImage::new(*width, *height);
                for (i, px) in rgba.pixels_mut().enumerate() {
                    let a = alpha.get(i).copied().unwrap_or(0);
                    *px = image::Rgba([255, 255, 255, a]);
                }
                Ok(RasterImage::new(rgba, (0, TILE_HALFSIZE.1)))
            }
        }
    }
}

fn render_indices(width: u32, height: u32, indices: &[u16], palette: &Palette) -> RgbaImage {
    let mut rgba = RgbaImage::new(width, height);
    for (i, px) in rgba.pixels_mut().enumerate() {
        let idx = indices.get(i).copied().unwrap_or(TRANSPARENT_INDEX);
        let color = if idx == TRANSPARENT_INDEX {
            [0, 0, 0, 0]
        } else {
            palette.color(idx)
        };
        *px = image::Rgba(color);
    }
    rgba
}

fn render_layers(width: u32, height: u32, layers: &[Vec<u16>], palette: &Palette) -> RgbaImage {
    let mut rgba = RgbaImage::new(width, height);
    for layer in layers {
        for (i, px) in rgba.pixels_mut().enumerate() {
            let idx = layer.get(i).copied().unwrap_or(TRANSPARENT_INDEX);
            if idx != TRANSPARENT_INDEX {
                *px = image::Rgba(palette.color(idx));
            }
        }
    }
    rgba
}

/// Normalizes decoded containers into ordered `SourceFrame` handles.
pub struct FrameAdapter<'a> {
    palettes: &'a BTreeMap<u32, Palette>,
}

impl<'a> FrameAdapter<'a> {
    pub fn new(palettes: &'a BTreeMap<u32, Palette>) -> Self {
        Self { palettes }
    }

    /// Validates `source` and returns its frames in declaration order.
    ///
    /// Fails with `UnsupportedSourceType` when the declared kind is unknown
    /// or a frame payload does not belong to it, and with `MissingPalette`
    /// when a frame references a palette that was not supplied.
    pub fn adapt(&self, source: &MediaSource) -> Result<Vec<SourceFrame>> {
        let kind = source
            .kind
            .parse::<SourceKind>()
            .map_err(|_| AtlasError::UnsupportedSourceType(source.kind.clone()))?;

        let mut frames = Vec::with_capacity(source.frames.len());
        for payload in &source.frames {
            if payload.kind() != kind {
                return Err(AtlasError::UnsupportedSourceType(format!(
                    "{} frame inside a {} container",
                    payload.kind(),
                    kind
                )));
            }
            let frame = SourceFrame {
                payload: payload.clone(),
            };
            if let Some(num) = frame.palette_number() {
                if !self.palettes.contains_key(&num) {
                    return Err(AtlasError::MissingPalette(num));
                }
            }
            frames.push(frame);
        }
        trace!("adapted {} {} frame(s)", frames.len(), kind);
        Ok(frames)
    }
}

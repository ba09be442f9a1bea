//! Asset-export stage for legacy game sprites and terrains.
//!
//! Takes already-decoded frame pixel data (produced elsewhere from the
//! proprietary container formats) and turns it into packed texture atlas
//! pages plus the text metadata a runtime renderer needs to locate and
//! animate every sprite.
//!
//! - Pipeline: `build_atlas` normalizes frames, packs them into pages and
//!   picks PNG compression parameters per page
//! - Packing: deterministic shelf packing, first-fit across pages
//! - Metadata: placement records (`x y w h cx cy`) and the versioned
//!   `.terrain` definition format
//!
//! Quick example:
//! ```ignore
//! use atlas_export_core::prelude::*;
//! # fn main() -> atlas_export_core::error::Result<()> {
//! let source = MediaSource::new("indexed", frames);
//! let cfg = ExportConfig::builder().with_max_dimensions(1024, 1024).build();
//! let build = build_atlas(&source, &palettes, None, &cfg)?;
//! let records = subtex_records(&build.subtextures);
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod compression;
pub mod config;
pub mod cutter;
pub mod error;
pub mod export;
pub mod export_terrain;
pub mod extract;
pub mod frame;
pub mod model;
pub mod packer;
pub mod palette;
pub mod pipeline;

pub use compression::*;
pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `atlas_export_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::compression::{CompressionChoice, DEFAULT_CANDIDATES, PngParams};
    pub use crate::config::{ExportConfig, ExportConfigBuilder};
    pub use crate::cutter::Cutter;
    pub use crate::error::{AtlasError, Result};
    pub use crate::export::{SubtexRecord, dump_records, subtex_records};
    pub use crate::export_terrain::{FrameRecord, LayerMode, TerrainMetadata};
    pub use crate::frame::{FrameAdapter, FramePayload, MediaSource, SourceFrame, SourceKind};
    pub use crate::model::{AtlasPage, Placement, RasterImage, Rect, Subtexture};
    pub use crate::palette::Palette;
    pub use crate::pipeline::{AtlasBuild, OutputPage, build_atlas, build_atlas_with_candidates};
}

use std::fmt;

use crate::error::{AtlasError, Result};

/// Version literal of the terrain definition format.
pub const FORMAT_VERSION: &str = "1";

/// Animation mode of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMode {
    /// Layer is not animated.
    Off,
    /// Animation loops indefinitely.
    Loop,
}

impl fmt::Display for LayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Loop => f.write_str("loop"),
        }
    }
}

#[derive(Debug, Clone)]
struct ImageFileRef {
    id: u32,
    filename: String,
}

#[derive(Debug, Clone)]
struct BlendTableRef {
    id: u32,
    filename: String,
}

#[derive(Debug, Clone)]
struct Layer {
    id: u32,
    mode: Option<LayerMode>,
    position: Option<i32>,
    time_per_frame: Option<f64>,
    replay_delay: Option<f64>,
}

/// One frame record: where a frame sits on its image and how it blends.
#[derive(Debug, Clone, Copy)]
pub struct FrameRecord {
    /// Index of the frame in the animation.
    pub frame_idx: u32,
    /// Layer the frame belongs to.
    pub layer_id: u32,
    /// Image the frame is sliced from.
    pub img_id: u32,
    pub xpos: i32,
    pub ypos: i32,
    pub xsize: u32,
    pub ysize: u32,
    /// Priority for blending.
    pub priority: i32,
    /// Index of the blending pattern in the blend table.
    pub blend_mode: u32,
}

/// Collects terrain metadata and formats it as the `.terrain` custom format.
///
/// Insertion order of images and layers is preserved and emitted as-is;
/// adding an id a second time replaces the earlier entry in place.
#[derive(Debug, Clone)]
pub struct TerrainMetadata {
    scalefactor: f64,
    image_files: Vec<ImageFileRef>,
    blendtable: Option<BlendTableRef>,
    layers: Vec<Layer>,
    frames: Vec<FrameRecord>,
}

impl Default for TerrainMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainMetadata {
    pub fn new() -> Self {
        Self {
            scalefactor: 1.0,
            image_files: Vec::new(),
            blendtable: None,
            layers: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Add an image and its relative file name.
    pub fn add_image(&mut self, img_id: u32, filename: impl Into<String>) {
        let entry = ImageFileRef {
            id: img_id,
            filename: filename.into(),
        };
        match self.image_files.iter_mut().find(|i| i.id == img_id) {
            Some(existing) => *existing = entry,
            None => self.image_files.push(entry),
        }
    }

    /// Define a layer for the rendered texture. Optional attributes are
    /// emitted only when set and non-default.
    pub fn add_layer(
        &mut self,
        layer_id: u32,
        mode: Option<LayerMode>,
        position: Option<i32>,
        time_per_frame: Option<f64>,
        replay_delay: Option<f64>,
    ) {
        let entry = Layer {
            id: layer_id,
            mode,
            position,
            time_per_frame,
            replay_delay,
        };
        match self.layers.iter_mut().find(|l| l.id == layer_id) {
            Some(existing) => *existing = entry,
            None => self.layers.push(entry),
        }
    }

    /// Add a frame with all its spatial information.
    pub fn add_frame(&mut self, frame: FrameRecord) {
        self.frames.push(frame);
    }

    /// Set the blend table reference. Required before serialization.
    pub fn set_blendtable(&mut self, table_id: u32, filename: impl Into<String>) {
        self.blendtable = Some(BlendTableRef {
            id: table_id,
            filename: filename.into(),
        });
    }

    /// Set the factor by which sprite images are scaled down at default zoom.
    /// Stored and emitted as a float even when set from an integer value.
    pub fn set_scalefactor(&mut self, factor: impl Into<f64>) {
        self.scalefactor = factor.into();
    }

    /// Formats the collected metadata as the versioned terrain definition
    /// text.
    ///
    /// Fails with `IncompleteMetadata` if the blend table reference is unset
    /// or a frame references a layer or image that was never added.
    pub fn dump(&self) -> Result<String> {
        let blendtable = self.blendtable.as_ref().ok_or_else(|| {
            AtlasError::IncompleteMetadata("blendtable reference is unset".into())
        })?;
        for frame in &self.frames {
            if !self.layers.iter().any(|l| l.id == frame.layer_id) {
                return Err(AtlasError::IncompleteMetadata(format!(
                    "frame {} references unknown layer {}",
                    frame.frame_idx, frame.layer_id
                )));
            }
            if !self.image_files.iter().any(|i| i.id == frame.img_id) {
                return Err(AtlasError::IncompleteMetadata(format!(
                    "frame {} references unknown image {}",
                    frame.frame_idx, frame.img_id
                )));
            }
        }

        let mut out = String::new();

        // header
        out.push_str("# openage terrain definition file\n\n");

        // version
        out.push_str(&format!("version {FORMAT_VERSION}\n\n"));

        // image files
        for image in &self.image_files {
            out.push_str(&format!("imagefile {} {}\n", image.id, image.filename));
        }
        out.push('\n');

        // blendtable reference
        out.push_str(&format!(
            "blendtable {} {}\n\n",
            blendtable.id, blendtable.filename
        ));

        // scale factor
        out.push_str(&format!("scalefactor {:?}\n\n", self.scalefactor));

        // layer definitions
        for layer in &self.layers {
            out.push_str(&format!("layer {}", layer.id));
            if let Some(mode) = layer.mode {
                out.push_str(&format!(" mode={mode}"));
            }
            if let Some(position) = layer.position {
                if position != 0 {
                    out.push_str(&format!(" position={position}"));
                }
            }
            if let Some(time_per_frame) = layer.time_per_frame {
                if time_per_frame != 0.0 {
                    out.push_str(&format!(" time_per_frame={time_per_frame:?}"));
                }
            }
            if let Some(replay_delay) = layer.replay_delay {
                if replay_delay != 0.0 {
                    out.push_str(&format!(" replay_delay={replay_delay:?}"));
                }
            }
            out.push('\n');
        }
        out.push('\n');

        // frame definitions
        for f in &self.frames {
            out.push_str(&format!(
                "frame {} {} {} {} {} {} {} {} {}\n",
                f.frame_idx,
                f.layer_id,
                f.img_id,
                f.xpos,
                f.ypos,
                f.xsize,
                f.ysize,
                f.priority,
                f.blend_mode
            ));
        }

        Ok(out)
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::model::Subtexture;

/// Format version stamped into the placement record dump.
pub const FORMAT_VERSION: &str = "1";

/// One sprite as part of a texture atlas.
///
/// Stores position and size of the sprite within the 'big texture' plus its
/// hotspot, six signed 32-bit fields in fixed order, consumed by the renderer
/// to slice the packed page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubtexRecord {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub cx: i32,
    pub cy: i32,
}

/// Placement records for all packed subtextures, in id order. Subtextures
/// without a placement (not yet packed) are not represented.
pub fn subtex_records(subtextures: &[Subtexture]) -> Vec<SubtexRecord> {
    subtextures
        .iter()
        .filter_map(|s| {
            s.placement.map(|p| {
                let (cx, cy) = s.image.hotspot();
                SubtexRecord {
                    x: p.x as i32,
                    y: p.y as i32,
                    w: s.width() as i32,
                    h: s.height() as i32,
                    cx,
                    cy,
                }
            })
        })
        .collect()
}

/// Serializes placement records as versioned plain text, one `subtex` line
/// per record.
pub fn dump_records(records: &[SubtexRecord]) -> String {
    let mut out = String::new();
    out.push_str("# openage texture atlas file\n\n");
    out.push_str(&format!("version {FORMAT_VERSION}\n\n"));
    for r in records {
        out.push_str(&format!(
            "subtex {} {} {} {} {} {}\n",
            r.x, r.y, r.w, r.h, r.cx, r.cy
        ));
    }
    out
}

/// JSON view of the placement records (array of objects), for tooling that
/// prefers structured metadata over the text dump.
pub fn to_json(records: &[SubtexRecord]) -> Value {
    let records_val: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "x": r.x,
                "y": r.y,
                "w": r.w,
                "h": r.h,
                "cx": r.cx,
                "cy": r.cy,
            })
        })
        .collect();
    json!({ "version": FORMAT_VERSION, "subtextures": records_val })
}

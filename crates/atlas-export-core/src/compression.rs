use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{AtlasError, Result};

/// One lossless-encoder parameter set: compression level x filter strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngParams {
    pub compression: CompressionType,
    pub filter: FilterType,
}

/// Candidate parameter sets, ordered fastest-first. On equal encoded sizes
/// the earliest candidate wins.
pub const DEFAULT_CANDIDATES: [PngParams; 6] = [
    PngParams {
        compression: CompressionType::Fast,
        filter: FilterType::NoFilter,
    },
    PngParams {
        compression: CompressionType::Fast,
        filter: FilterType::Adaptive,
    },
    PngParams {
        compression: CompressionType::Default,
        filter: FilterType::Adaptive,
    },
    PngParams {
        compression: CompressionType::Default,
        filter: FilterType::Paeth,
    },
    PngParams {
        compression: CompressionType::Best,
        filter: FilterType::Adaptive,
    },
    PngParams {
        compression: CompressionType::Best,
        filter: FilterType::Paeth,
    },
];

/// Winning parameter set and the encoded byte size it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionChoice {
    pub params: PngParams,
    pub size: usize,
}

/// Encodes `rgba` as PNG with the given parameters, returning the bytes.
pub fn encode_page(rgba: &RgbaImage, params: PngParams) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, params.compression, params.filter);
    encoder.write_image(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Picks the smallest outcome; ties go to the earliest-listed candidate.
///
/// The complete outcome set is consumed before anything is committed, so the
/// result is independent of evaluation order.
pub fn pick_best<P: Copy>(outcomes: impl IntoIterator<Item = (P, usize)>) -> Option<(P, usize)> {
    outcomes
        .into_iter()
        .enumerate()
        .min_by(|(ia, (_, sa)), (ib, (_, sb))| sa.cmp(sb).then_with(|| ia.cmp(ib)))
        .map(|(_, outcome)| outcome)
}

/// Searches `candidates` for the parameter set producing the smallest PNG.
///
/// A candidate whose encode fails simply drops out of the set; if every
/// candidate fails the search is an encoding error.
pub fn select_compression(
    rgba: &RgbaImage,
    candidates: &[PngParams],
    parallel: bool,
) -> Result<CompressionChoice> {
    if candidates.is_empty() {
        return Err(AtlasError::Encode("no compression candidates".into()));
    }

    #[cfg(feature = "parallel")]
    let outcomes: Vec<(PngParams, usize)> = if parallel {
        let mut indexed: Vec<(usize, PngParams, usize)> = candidates
            .par_iter()
            .enumerate()
            .filter_map(|(i, &params)| {
                encode_page(rgba, params).ok().map(|buf| (i, params, buf.len()))
            })
            .collect();
        indexed.sort_by_key(|&(i, _, _)| i);
        indexed.into_iter().map(|(_, p, s)| (p, s)).collect()
    } else {
        sequential_outcomes(rgba, candidates)
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<(PngParams, usize)> = {
        let _ = parallel;
        sequential_outcomes(rgba, candidates)
    };

    for (params, size) in &outcomes {
        debug!("candidate {:?}: {} bytes", params, size);
    }

    pick_best(outcomes)
        .map(|(params, size)| CompressionChoice { params, size })
        .ok_or_else(|| AtlasError::Encode("all compression candidates failed".into()))
}

fn sequential_outcomes(rgba: &RgbaImage, candidates: &[PngParams]) -> Vec<(PngParams, usize)> {
    candidates
        .iter()
        .filter_map(|&params| encode_page(rgba, params).ok().map(|buf| (params, buf.len())))
        .collect()
}

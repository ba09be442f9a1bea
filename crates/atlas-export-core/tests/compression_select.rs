use atlas_export_core::compression::{
    DEFAULT_CANDIDATES, encode_page, pick_best, select_compression,
};
use atlas_export_core::error::AtlasError;
use image::{Rgba, RgbaImage};

fn sample_page() -> RgbaImage {
    let mut img = RgbaImage::new(64, 64);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgba([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255]);
    }
    img
}

#[test]
fn smallest_size_wins_earliest_on_ties() {
    // Levels 6 and 9 tie on size; level 6 is listed earlier and wins.
    let outcomes = vec![(1u32, 900usize), (6, 850), (9, 850)];
    assert_eq!(pick_best(outcomes), Some((6, 850)));
}

#[test]
fn single_candidate_is_kept() {
    assert_eq!(pick_best(vec![(9u32, 1234usize)]), Some((9, 1234)));
    assert_eq!(pick_best(Vec::<(u32, usize)>::new()), None);
}

#[test]
fn selection_returns_the_minimum_over_real_encodes() {
    let page = sample_page();
    let choice = select_compression(&page, &DEFAULT_CANDIDATES, false).expect("select");

    assert!(choice.size > 0);
    assert!(DEFAULT_CANDIDATES.contains(&choice.params));

    // No candidate encodes smaller than the winner.
    for params in DEFAULT_CANDIDATES {
        let size = encode_page(&page, params).expect("encode").len();
        assert!(size >= choice.size);
    }
}

#[test]
fn selection_is_deterministic() {
    let page = sample_page();
    let a = select_compression(&page, &DEFAULT_CANDIDATES, false).expect("select");
    let b = select_compression(&page, &DEFAULT_CANDIDATES, false).expect("select");
    assert_eq!(a, b);
}

#[test]
fn no_candidates_is_an_encode_error() {
    let page = sample_page();
    assert!(matches!(
        select_compression(&page, &[], false),
        Err(AtlasError::Encode(_))
    ));
}

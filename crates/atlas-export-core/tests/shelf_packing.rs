use atlas_export_core::config::ExportConfig;
use atlas_export_core::error::AtlasError;
use atlas_export_core::model::{Rect, RasterImage, Subtexture};
use atlas_export_core::packer::pack_subtextures;
use image::RgbaImage;

fn subtex(id: usize, w: u32, h: u32) -> Subtexture {
    Subtexture {
        id,
        image: RasterImage::new(RgbaImage::new(w, h), (0, 0)),
        parent_frame: None,
        placement: None,
    }
}

fn subtex_set(sizes: &[(u32, u32)]) -> Vec<Subtexture> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| subtex(i, w, h))
        .collect()
}

fn disjoint(subtextures: &[Subtexture]) -> bool {
    for i in 0..subtextures.len() {
        for j in (i + 1)..subtextures.len() {
            let (pa, pb) = (
                subtextures[i].placement.unwrap(),
                subtextures[j].placement.unwrap(),
            );
            if pa.page != pb.page {
                continue;
            }
            let a = subtextures[i].rect().unwrap();
            let b = subtextures[j].rect().unwrap();
            let overlap = !(a.x >= b.x + b.w || b.x >= a.x + a.w || a.y >= b.y + b.h || b.y >= a.y + a.h);
            if overlap {
                return false;
            }
        }
    }
    true
}

fn cfg(w: u32, h: u32) -> ExportConfig {
    ExportConfig::builder().with_max_dimensions(w, h).build()
}

#[test]
fn placements_disjoint_and_in_bounds() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    let mut sizes: Vec<(u32, u32)> = Vec::new();
    for _ in 0..120 {
        sizes.push((rng.gen_range(4..=64), rng.gen_range(4..=64)));
    }
    let mut subs = subtex_set(&sizes);
    let pages = pack_subtextures(&mut subs, &cfg(512, 512)).expect("pack");

    assert!(subs.iter().all(|s| s.placement.is_some()));
    assert!(disjoint(&subs));
    for s in &subs {
        let p = s.placement.unwrap();
        let page = &pages[p.page];
        assert!(p.x + s.width() <= page.width);
        assert!(p.y + s.height() <= page.height);
    }
    let total: usize = pages.iter().map(|p| p.subtextures.len()).sum();
    assert_eq!(total, subs.len());
}

#[test]
fn repeated_runs_are_identical() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    let mut sizes: Vec<(u32, u32)> = Vec::new();
    for _ in 0..200 {
        sizes.push((rng.gen_range(1..=48), rng.gen_range(1..=48)));
    }

    let mut a = subtex_set(&sizes);
    let mut b = subtex_set(&sizes);
    let pages_a = pack_subtextures(&mut a, &cfg(256, 256)).expect("pack a");
    let pages_b = pack_subtextures(&mut b, &cfg(256, 256)).expect("pack b");

    assert_eq!(pages_a.len(), pages_b.len());
    for (pa, pb) in pages_a.iter().zip(pages_b.iter()) {
        assert_eq!(pa.width, pb.width);
        assert_eq!(pa.height, pb.height);
        assert_eq!(pa.subtextures, pb.subtextures);
    }
    for (sa, sb) in a.iter().zip(b.iter()) {
        assert_eq!(sa.placement, sb.placement);
    }
}

#[test]
fn fitting_set_stays_on_one_page() {
    // 16 tiles of 32x32 fit a 128x128 page exactly.
    let mut subs = subtex_set(&vec![(32, 32); 16]);
    let pages = pack_subtextures(&mut subs, &cfg(128, 128)).expect("pack");
    assert_eq!(pages.len(), 1);
}

#[test]
fn new_page_only_when_no_earlier_page_fits() {
    // Three full-page rectangles force one page each.
    let mut subs = subtex_set(&[(64, 64), (64, 64), (64, 64)]);
    let pages = pack_subtextures(&mut subs, &cfg(64, 64)).expect("pack");
    assert_eq!(pages.len(), 3);
    for s in &subs {
        let p = s.placement.unwrap();
        assert_eq!((p.x, p.y), (0, 0));
    }

    // A small rectangle arriving after page overflow must back-fill the
    // first page instead of opening a third.
    let mut subs = subtex_set(&[(64, 40), (64, 40), (64, 20)]);
    let pages = pack_subtextures(&mut subs, &cfg(64, 64)).expect("pack");
    assert_eq!(pages.len(), 2);
    let small = &subs[2];
    assert_eq!(small.placement.unwrap().page, 0);
}

#[test]
fn sorted_by_height_then_width_then_index() {
    // Tallest first: the 8x50 rectangle opens the first shelf even though it
    // was inserted last.
    let mut subs = subtex_set(&[(10, 10), (20, 10), (8, 50)]);
    pack_subtextures(&mut subs, &cfg(128, 128)).expect("pack");
    assert_eq!(subs[2].placement.unwrap(), atlas_export_core::model::Placement { page: 0, x: 0, y: 0 });
    // Equal heights tie-break on width: the 20-wide one precedes the 10-wide.
    let pa = subs[1].placement.unwrap();
    let pb = subs[0].placement.unwrap();
    assert_eq!(pa.y, pb.y);
    assert!(pa.x < pb.x);
}

#[test]
fn pages_shrink_to_used_extent() {
    let mut subs = subtex_set(&[(10, 20)]);
    let pages = pack_subtextures(&mut subs, &cfg(256, 256)).expect("pack");
    assert_eq!((pages[0].width, pages[0].height), (10, 20));

    let mut subs = subtex_set(&[(10, 20)]);
    let forced = ExportConfig::builder()
        .with_max_dimensions(256, 256)
        .force_max_dimensions(true)
        .build();
    let pages = pack_subtextures(&mut subs, &forced).expect("pack");
    assert_eq!((pages[0].width, pages[0].height), (256, 256));
}

#[test]
fn oversized_rectangle_is_rejected() {
    let mut subs = subtex_set(&[(32, 32), (300, 10)]);
    let err = pack_subtextures(&mut subs, &cfg(256, 256)).unwrap_err();
    assert!(matches!(
        err,
        AtlasError::OversizedSubtexture { id: 1, width: 300, .. }
    ));
    // Nothing is placed when the build fails.
    assert!(subs.iter().all(|s| s.placement.is_none()));
}

#[test]
fn empty_input_is_an_error() {
    let mut subs: Vec<Subtexture> = Vec::new();
    assert!(matches!(
        pack_subtextures(&mut subs, &cfg(256, 256)),
        Err(AtlasError::Empty)
    ));
}

#[test]
fn zero_page_dimensions_are_rejected() {
    let mut subs = subtex_set(&[(4, 4)]);
    assert!(matches!(
        pack_subtextures(&mut subs, &cfg(0, 256)),
        Err(AtlasError::InvalidDimensions { .. })
    ));
}

#[test]
fn can_pack_agrees_with_pack() {
    use atlas_export_core::packer::PagePacker;
    use atlas_export_core::packer::shelf::ShelfPacker;

    let mut packer = ShelfPacker::new(64, 64);
    assert!(packer.can_pack(64, 64));
    assert!(!packer.can_pack(65, 64));
    assert_eq!(packer.pack(64, 40), Some((0, 0)));
    // Full-width shelf taken; only 24 rows remain.
    assert!(packer.can_pack(10, 24));
    assert!(!packer.can_pack(10, 25));
    assert_eq!(packer.pack(10, 24), Some((0, 40)));
    assert_eq!(packer.pack(60, 24), None);
}

#[test]
fn rect_containment_helper() {
    let page = Rect::new(0, 0, 64, 64);
    assert!(page.contains(&Rect::new(32, 32, 32, 32)));
    assert!(!page.contains(&Rect::new(33, 32, 32, 32)));
}

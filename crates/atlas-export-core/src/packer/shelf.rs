use super::PagePacker;

#[derive(Clone, Copy, Debug)]
struct Shelf {
    y: u32,
    height: u32,
    used: u32,
}

/// Shelf packer for a single page: rectangles go left-to-right along
/// horizontal strips, a new strip opens below the last one when none fits.
///
/// Callers feed rectangles tallest-first, so shelf heights are set by the
/// first rectangle placed on each shelf.
pub struct ShelfPacker {
    width: u32,
    height: u32,
    shelves: Vec<Shelf>,
    next_y: u32,
}

impl ShelfPacker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shelves: Vec::new(),
            next_y: 0,
        }
    }

    fn fitting_shelf(&self, w: u32, h: u32) -> Option<usize> {
        self.shelves
            .iter()
            .position(|s| s.height >= h && self.width - s.used >= w)
    }

    fn can_open_shelf(&self, w: u32, h: u32) -> bool {
        w <= self.width && self.next_y + h <= self.height
    }
}

impl PagePacker for ShelfPacker {
    fn can_pack(&self, w: u32, h: u32) -> bool {
        self.fitting_shelf(w, h).is_some() || self.can_open_shelf(w, h)
    }

    fn pack(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w == 0 || h == 0 {
            return None;
        }
        if let Some(i) = self.fitting_shelf(w, h) {
            let shelf = &mut self.shelves[i];
            let x = shelf.used;
            shelf.used += w;
            return Some((x, shelf.y));
        }
        if self.can_open_shelf(w, h) {
            let y = self.next_y;
            self.shelves.push(Shelf { y, height: h, used: w });
            self.next_y += h;
            return Some((0, y));
        }
        None
    }
}

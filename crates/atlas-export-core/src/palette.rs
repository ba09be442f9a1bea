/// A color table mapping palette indices to RGBA colors.
///
/// Palettes are produced by the container decoders and are read-only for the
/// duration of a build.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Palette {
    pub fn new(colors: Vec<[u8; 4]>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for `index`; fully transparent black for out-of-range indices.
    pub fn color(&self, index: u16) -> [u8; 4] {
        self.colors
            .get(index as usize)
            .copied()
            .unwrap_or([0, 0, 0, 0])
    }
}

impl From<Vec<[u8; 4]>> for Palette {
    fn from(colors: Vec<[u8; 4]>) -> Self {
        Self::new(colors)
    }
}

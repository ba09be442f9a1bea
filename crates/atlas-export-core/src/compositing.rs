use image::RgbaImage;

/// Copy `src` into `canvas` with its top-left corner at (dx, dy).
/// Pixels falling outside the canvas are dropped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    for (x, y, px) in src.enumerate_pixels() {
        if dx + x < cw && dy + y < ch {
            canvas.put_pixel(dx + x, dy + y, *px);
        }
    }
}

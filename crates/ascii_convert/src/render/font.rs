use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// Draws one glyph into the canvas with its top-left corner at
/// `origin`, scaling the 8x8 bitmap to a `cell_size` square. Pixels
/// outside the canvas are clipped; glyphs without a bitmap draw
/// nothing.
pub(crate) fn draw_glyph(
    canvas: &mut RgbaImage,
    glyph: char,
    origin: (u32, u32),
    cell_size: u32,
    color: Rgba<u8>,
) {
    let Some(bitmap) = BASIC_FONTS.get(glyph) else {
        return;
    };

    for dy in 0..cell_size {
        let row_bits = bitmap[(dy * 8 / cell_size) as usize];
        if row_bits == 0 {
            continue;
        }
        for dx in 0..cell_size {
            if row_bits >> (dx * 8 / cell_size) & 1 == 0 {
                continue;
            }
            let (x, y) = (origin.0 + dx, origin.1 + dy);
            if x >= canvas.width() || y >= canvas.height() {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x, y);
            *pixel = blend_over(color, *pixel);
        }
    }
}

/// Source-over compositing of two straight-alpha RGBA pixels.
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src.0[3] as f32 / 255.0;
    if src_a >= 1.0 {
        return src;
    }

    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let s = src.0[channel] as f32 / 255.0;
        let d = dst.0[channel] as f32 / 255.0;
        out[channel] = ((s * src_a + d * dst_a * (1.0 - src_a)) / out_a * 255.0 + 0.5) as u8;
    }
    out[3] = (out_a * 255.0 + 0.5) as u8;
    Rgba(out)
}

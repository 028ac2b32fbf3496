use crate::color::Color;
use crate::screen::Screen;
use crate::texture::Texture;

/// Writes a solid-color span into one screen column. Rows are clipped to the
/// screen; each surviving pixel is depth-tested against the buffer and, when
/// it wins, written with its channels scaled by the lighting factors and its
/// depth recorded.
pub(crate) fn draw_colored_column(
    screen: &mut Screen,
    x: usize,
    color: Color,
    depth: f64,
    start_y: i64,
    end_y: i64,
    light: (f64, f64, f64),
) {
    let w = screen.render_width();
    let h = screen.render_height() as i64;
    let y0 = start_y.clamp(0, h) as usize;
    let y1 = end_y.clamp(0, h) as usize;
    if y0 >= y1 {
        return;
    }

    let [r, g, b] = color.scaled(light);
    let (pixels, depth_buffer) = screen.buffers_mut();
    for y in y0..y1 {
        let index = y * w + x;
        if depth < depth_buffer[index] {
            pixels[4 * index..4 * index + 4].copy_from_slice(&[r, g, b, 255]);
            depth_buffer[index] = depth;
        }
    }
}

/// Writes a textured span into one screen column.
///
/// `line_height` is the unclipped projected extent of the surface, which may
/// be larger than the clipped row range `[start_y, end_y)`: the texture step
/// is derived from the full extent so that spans clipped by the screen edge
/// or by a nearer occluder do not stretch. A start above the screen advances
/// the initial texture position by the rows lost to clipping; a shortened
/// end needs no compensation because sampling just stops early.
///
/// Texels whose alpha is not 255 are skipped entirely, leaving both the
/// pixel and its stored depth untouched. `tint`, when present, multiplies
/// the sampled channels.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_textured_column(
    screen: &mut Screen,
    x: usize,
    texture: &Texture,
    tex_x: u32,
    depth: f64,
    start_y: i64,
    end_y: i64,
    line_height: f64,
    light: (f64, f64, f64),
    tint: Option<Color>,
) {
    if line_height <= 0.0 {
        return;
    }
    let w = screen.render_width();
    let h = screen.render_height() as i64;
    let y0 = start_y.clamp(0, h) as usize;
    let y1 = end_y.clamp(0, h) as usize;
    if y0 >= y1 {
        return;
    }

    let light = match tint {
        Some(t) => (
            light.0 * t.r as f64 / 255.0,
            light.1 * t.g as f64 / 255.0,
            light.2 * t.b as f64 / 255.0,
        ),
        None => light,
    };

    let tex_height = texture.height();
    let step = tex_height as f64 / line_height;
    let mut tex_pos = if start_y < 0 {
        -start_y as f64 * step
    } else {
        0.0
    };

    let max_tex_y = tex_height - 1;
    let (pixels, depth_buffer) = screen.buffers_mut();
    for y in y0..y1 {
        let tex_y = (tex_pos as u32).min(max_tex_y);
        tex_pos += step;

        let index = y * w + x;
        if depth >= depth_buffer[index] {
            continue;
        }
        let texel = texture.texel(tex_x, tex_y);
        if texel[3] != 255 {
            continue;
        }
        let [r, g, b] = Color::new(texel[0], texel[1], texel[2], texel[3]).scaled(light);
        pixels[4 * index..4 * index + 4].copy_from_slice(&[r, g, b, 255]);
        depth_buffer[index] = depth;
    }
}

/// Writes a skybox span into one screen column: pixels only, no depth test
/// and no depth update, so every later pass overdraws the sky freely.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_sky_column(
    screen: &mut Screen,
    x: usize,
    texture: &Texture,
    tex_x: u32,
    start_y: i64,
    end_y: i64,
    line_height: f64,
    light: (f64, f64, f64),
) {
    if line_height <= 0.0 {
        return;
    }
    let w = screen.render_width();
    let h = screen.render_height() as i64;
    let y0 = start_y.clamp(0, h) as usize;
    let y1 = end_y.clamp(0, h) as usize;
    if y0 >= y1 {
        return;
    }

    let tex_height = texture.height();
    let step = tex_height as f64 / line_height;
    let mut tex_pos = if start_y < 0 {
        -start_y as f64 * step
    } else {
        0.0
    };

    let max_tex_y = tex_height - 1;
    let (pixels, _) = screen.buffers_mut();
    for y in y0..y1 {
        let tex_y = (tex_pos as u32).min(max_tex_y);
        tex_pos += step;

        let texel = texture.texel(tex_x, tex_y);
        if texel[3] != 255 {
            continue;
        }
        let [r, g, b] = Color::new(texel[0], texel[1], texel[2], texel[3]).scaled(light);
        let index = y * w + x;
        pixels[4 * index..4 * index + 4].copy_from_slice(&[r, g, b, 255]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_LIGHT: (f64, f64, f64) = (1.0, 1.0, 1.0);

    fn screen_4x4() -> Screen {
        Screen::new(4, 4, 1.0).unwrap()
    }

    fn pixel(screen: &Screen, x: usize, y: usize) -> [u8; 4] {
        let i = 4 * (y * screen.render_width() + x);
        screen.pixels()[i..i + 4].try_into().unwrap()
    }

    #[test]
    fn colored_column_clips_and_records_depth() {
        let mut screen = screen_4x4();
        draw_colored_column(&mut screen, 1, Color::new(10, 20, 30, 255), 2.0, -5, 99, NO_LIGHT);

        for y in 0..4 {
            assert_eq!(pixel(&screen, 1, y), [10, 20, 30, 255]);
            assert_eq!(screen.depth()[y * 4 + 1], 2.0);
        }
        // Neighbouring column untouched.
        assert_eq!(pixel(&screen, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn nearer_writes_win_and_farther_writes_lose() {
        let mut screen = screen_4x4();
        draw_colored_column(&mut screen, 0, Color::new(100, 0, 0, 255), 2.0, 0, 4, NO_LIGHT);
        draw_colored_column(&mut screen, 0, Color::new(0, 100, 0, 255), 3.0, 0, 4, NO_LIGHT);
        assert_eq!(pixel(&screen, 0, 0), [100, 0, 0, 255]);

        draw_colored_column(&mut screen, 0, Color::new(0, 0, 100, 255), 1.0, 0, 4, NO_LIGHT);
        assert_eq!(pixel(&screen, 0, 0), [0, 0, 100, 255]);
        assert_eq!(screen.depth()[0], 1.0);
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let mut screen = screen_4x4();
        draw_colored_column(&mut screen, 0, Color::new(1, 1, 1, 255), 2.0, 0, 4, NO_LIGHT);
        draw_colored_column(&mut screen, 0, Color::new(9, 9, 9, 255), 2.0, 0, 4, NO_LIGHT);
        assert_eq!(pixel(&screen, 0, 0), [1, 1, 1, 255]);
    }

    #[test]
    fn transparent_texels_are_skipped_and_preserve_depth() {
        let mut screen = screen_4x4();
        // 1x2 texture: opaque red over transparent green.
        let texture = Texture::from_raster(
            "t",
            1,
            2,
            vec![255, 0, 0, 255, 0, 255, 0, 128],
        )
        .unwrap();

        draw_textured_column(&mut screen, 2, &texture, 0, 1.5, 0, 4, 4.0, NO_LIGHT, None);

        // Rows 0..2 sample the opaque texel, rows 2..4 the transparent one.
        assert_eq!(pixel(&screen, 2, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&screen, 2, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&screen, 2, 2), [0, 0, 0, 0]);
        assert_eq!(screen.depth()[2 * 4 + 2], f64::INFINITY);
    }

    #[test]
    fn clipped_start_advances_texture_position() {
        let mut screen = screen_4x4();
        // 1x8 gradient texture so each step is visible.
        let pixels: Vec<u8> = (0..8u8).flat_map(|v| [v, 0, 0, 255]).collect();
        let texture = Texture::from_raster("t", 1, 8, pixels).unwrap();

        // A span twice the screen height, starting two rows above it: the
        // texture step is 8 / 8 = 1 texel per row, so row 0 shows texel 2.
        draw_textured_column(&mut screen, 0, &texture, 0, 1.0, -2, 6, 8.0, NO_LIGHT, None);
        assert_eq!(pixel(&screen, 0, 0)[0], 2);
        assert_eq!(pixel(&screen, 0, 3)[0], 5);
    }

    #[test]
    fn tint_multiplies_sampled_channels() {
        let mut screen = screen_4x4();
        let texture = Texture::from_raster("t", 1, 1, vec![200, 100, 50, 255]).unwrap();
        draw_textured_column(
            &mut screen,
            0,
            &texture,
            0,
            1.0,
            0,
            1,
            1.0,
            NO_LIGHT,
            Some(Color::new(128, 255, 0, 255)),
        );
        let px = pixel(&screen, 0, 0);
        assert_eq!(px[0], 100); // 200 * 128/255, floored
        assert_eq!(px[1], 100);
        assert_eq!(px[2], 0);
    }

    #[test]
    fn sky_column_never_touches_depth() {
        let mut screen = screen_4x4();
        let texture = Texture::from_raster("sky", 1, 1, vec![9, 9, 9, 255]).unwrap();
        draw_sky_column(&mut screen, 3, &texture, 0, 0, 4, 4.0, NO_LIGHT);
        assert_eq!(pixel(&screen, 3, 0), [9, 9, 9, 255]);
        assert!(screen.depth().iter().all(|&d| d == f64::INFINITY));
    }
}

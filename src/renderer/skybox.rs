use crate::camera::Camera;
use crate::ray::{Ray, Side};
use crate::renderer::column::draw_sky_column;
use crate::renderer::lighting::ambient_factors;
use crate::scene::Scene;
use crate::screen::Screen;

/// # Skybox pass
///
/// Runs first and writes pixels only, never depth: the sky is infinitely far
/// away, so leaving the depth buffer at infinity lets every later pass
/// overdraw it wherever there is geometry.
///
/// A solid-color sky fills the rows above the horizon with the color at
/// ambient lighting. A textured sky is treated as a band wrapped around the
/// view: each screen column fires its view ray from the center of a unit
/// cell and samples the texture where the ray leaves the cell, with the wall
/// pass's flip rule unfolding the four faces into one continuous
/// horizontally-repeating strip (logical width four screens for a
/// screen-wide texture) whose origin tracks the camera yaw. The perpendicular
/// exit distance, remapped by a factor of two, scales the band's height
/// below the horizon line.
pub(crate) fn render_skybox(screen: &mut Screen, scene: &Scene, camera: &Camera, ray: &mut Ray) {
    let width = screen.render_width();
    let height = screen.render_height();
    let h = height as f64;
    let aspect = screen.aspect();

    let horizon = (h / 2.0 + camera.pitch() as f64).floor();
    let light = ambient_factors(&scene.lighting, camera.lighting());

    if let Some(texture) = scene.skybox.appearance.as_loaded_texture() {
        let forward = camera.forward();
        let plane = camera.plane();
        let tex_width = texture.width();

        for x in 0..width {
            let camera_x = x as f64 / width as f64 - 0.5;
            let dir = forward + plane * (aspect * camera_x);
            ray.init(0.5, 0.5, dir.x(), dir.y(), 1.0);

            let (side_x, side_y) = ray.side_distances();
            let (exit, side) = if side_x <= side_y {
                (side_x, Side::X)
            } else {
                (side_y, Side::Y)
            };

            let mut wall_x = match side {
                Side::X => 0.5 + exit * dir.y(),
                Side::Y => 0.5 + exit * dir.x(),
            };
            wall_x -= wall_x.floor();

            let mut tex_x = (wall_x * tex_width as f64) as i64;
            let flipped = match side {
                Side::X => dir.x() > 0.0,
                Side::Y => dir.y() < 0.0,
            };
            if flipped {
                tex_x = tex_width as i64 - tex_x - 1;
            }
            let tex_x = tex_x.clamp(0, tex_width as i64 - 1) as u32;

            let perpendicular = exit * 2.0;
            let band_height = texture.height() as f64 / perpendicular;
            draw_sky_column(
                screen,
                x,
                texture,
                tex_x,
                (horizon - band_height).floor() as i64,
                horizon as i64,
                band_height,
                light,
            );
        }
    } else {
        let color = scene.skybox.appearance.fallback_color();
        let [r, g, b] = color.scaled(light);
        let last_row = horizon.clamp(0.0, h) as usize;

        let (pixels, _) = screen.buffers_mut();
        for y in 0..last_row {
            for x in 0..width {
                let index = y * width + x;
                pixels[4 * index..4 * index + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
    }
}

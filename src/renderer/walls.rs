use crate::camera::Camera;
use crate::ray::{Ray, Side};
use crate::renderer::column::{draw_colored_column, draw_textured_column};
use crate::renderer::lighting::lighting_scalar;
use crate::scene::Scene;
use crate::screen::Screen;

/// # Wall pass
///
/// One ray per screen column, swept across the camera plane. Each column
/// scans the grid with the shared DDA ray, projecting every visible wall
/// span from the nearest hit outward: after a hit whose span does not reach
/// the top of everything drawn so far, the cast resumes from the current
/// traversal state, so taller walls behind shorter ones still crest into
/// view. A hit whose projected top falls below the running topmost drawn row
/// is skipped entirely; when two hits project the same top, the nearer one
/// was drawn first and its recorded depth closes the column against the
/// later one.
///
/// Spans are drawn with the full unclipped extent as the texture step basis
/// (see the column primitives), and a cell id without a descriptor lets the
/// ray continue unrendered.
pub(crate) fn render_walls(screen: &mut Screen, scene: &Scene, camera: &Camera, ray: &mut Ray) {
    let width = screen.render_width();
    let height = screen.render_height() as f64;
    let aspect = screen.aspect();

    let position = camera.position();
    let forward = camera.forward();
    let plane = camera.plane();
    let pitch = camera.pitch() as f64;

    for x in 0..width {
        let camera_x = x as f64 / width as f64 - 0.5;
        let ray_dir = forward + plane * (aspect * camera_x);
        ray.init(position.x(), position.y(), ray_dir.x(), ray_dir.y(), 1.0);

        // Highest row drawn so far in this column; spans only ever move up.
        let mut smallest_top = f64::INFINITY;

        loop {
            if ray.cast(&scene.world_map) == 0 {
                break;
            }
            let Some(info) = scene.world_map.cell_info(ray.hit()) else {
                continue;
            };

            let distance = ray.distance();
            let line_height = height / distance;
            let center = (height / 2.0 + pitch) + height * (position.z() - 0.5) / distance;
            let draw_start =
                (center - (line_height * info.height() - line_height / 2.0)).floor();
            let draw_end = (center + line_height / 2.0).floor();

            if draw_start > smallest_top {
                // Hidden behind a taller nearer wall; keep scanning, a yet
                // farther wall may still be taller.
                continue;
            }
            let true_end = if smallest_top.is_infinite() {
                draw_end
            } else {
                smallest_top
            };
            smallest_top = draw_start;

            let light = lighting_scalar(
                &scene.lighting,
                camera.lighting(),
                distance,
                Some(ray.side()),
            );

            match info.appearance().as_loaded_texture() {
                Some(texture) => {
                    let mut wall_x = match ray.side() {
                        Side::X => position.y() + distance * ray_dir.y(),
                        Side::Y => position.x() + distance * ray_dir.x(),
                    };
                    wall_x -= wall_x.floor();

                    let tex_width = texture.width();
                    let mut tex_x = (wall_x * tex_width as f64) as i64;
                    let flipped = match ray.side() {
                        Side::X => ray_dir.x() > 0.0,
                        Side::Y => ray_dir.y() < 0.0,
                    };
                    if flipped {
                        tex_x = tex_width as i64 - tex_x - 1;
                    }
                    let tex_x = tex_x.clamp(0, tex_width as i64 - 1) as u32;

                    draw_textured_column(
                        screen,
                        x,
                        texture,
                        tex_x,
                        distance,
                        draw_start as i64,
                        true_end as i64,
                        draw_end - draw_start,
                        light,
                        None,
                    );
                }
                None => {
                    draw_colored_column(
                        screen,
                        x,
                        info.appearance().fallback_color(),
                        distance,
                        draw_start as i64,
                        draw_end as i64,
                        light,
                    );
                }
            }
        }
    }
}

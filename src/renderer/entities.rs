use crate::camera::Camera;
use crate::renderer::column::{draw_colored_column, draw_textured_column};
use crate::renderer::lighting::lighting_scalar;
use crate::scene::Scene;
use crate::screen::Screen;

/// # Sprite pass
///
/// Billboards every entity after the walls have filled the depth buffer.
/// The entity's offset from the camera is transformed into camera space by
/// inverting the [plane, direction] basis: `transform_x` is the lateral
/// position on the camera plane and `transform_y` the perpendicular depth,
/// the same quantity the wall pass stores, so the shared depth test resolves
/// wall-versus-sprite occlusion per pixel. Entities at or behind the camera
/// plane are skipped.
///
/// Column bounds are clamped to the screen while the unclamped extent keeps
/// driving the texture coordinate, so sprites partially off screen sample
/// the right slice. Rects are computed in floating point and clamped before
/// indexing; an entity grazing the camera plane blows up to at most the
/// screen dimensions.
pub(crate) fn render_entities(screen: &mut Screen, scene: &Scene, camera: &Camera) {
    let width = screen.render_width();
    let w = width as f64;
    let h = screen.render_height() as f64;
    let aspect = screen.aspect();

    let position = camera.position();
    let pitch = camera.pitch() as f64;
    let d = camera.forward();
    let p = camera.plane() * (aspect / 2.0);

    // The basis determinant is -aspect * focal / 2 for a unit direction, so
    // this never divides by zero.
    let inv_det = 1.0 / (p.x() * d.y() - d.x() * p.y());

    for entity in scene.entities() {
        let delta_x = entity.position.x() - position.x();
        let delta_y = entity.position.y() - position.y();

        let transform_x = inv_det * (d.y() * delta_x - d.x() * delta_y);
        let transform_y = inv_det * (-p.y() * delta_x + p.x() * delta_y);
        if transform_y <= 0.0 {
            continue;
        }

        let screen_x = (transform_x / transform_y + 1.0) / 2.0 * w;
        let screen_y = (h / 2.0 + pitch)
            - (entity.position.z() + (entity.size.y() - 1.0) / 2.0 - (position.z() - 0.5))
                / transform_y
                * h;

        let sprite_height = entity.size.y() / transform_y * h;
        let sprite_width = entity.size.x() / transform_y * w / aspect;

        let start_x = screen_x - sprite_width / 2.0;
        let end_x = screen_x + sprite_width / 2.0;
        let start_y = (screen_y - sprite_height / 2.0).floor();
        let end_y = (screen_y + sprite_height / 2.0).floor();

        let first_column = start_x.floor().clamp(0.0, w) as usize;
        let last_column = end_x.floor().clamp(0.0, w) as usize;
        if first_column >= last_column {
            continue;
        }

        let light = lighting_scalar(&scene.lighting, camera.lighting(), transform_y, None);

        match entity.appearance.as_loaded_texture() {
            Some(texture) => {
                let tex_width = texture.width();
                let span = end_x - start_x;
                for x in first_column..last_column {
                    // The unclamped horizontal extent drives the texture
                    // coordinate so off-screen sprites stay aligned.
                    let tex_x = ((x as f64 - start_x) / span * tex_width as f64) as i64;
                    let tex_x = tex_x.clamp(0, tex_width as i64 - 1) as u32;
                    draw_textured_column(
                        screen,
                        x,
                        texture,
                        tex_x,
                        transform_y,
                        start_y as i64,
                        end_y as i64,
                        end_y - start_y,
                        light,
                        entity.tint,
                    );
                }
            }
            None => {
                let color = entity.appearance.fallback_color();
                for x in first_column..last_column {
                    draw_colored_column(
                        screen,
                        x,
                        color,
                        transform_y,
                        start_y as i64,
                        end_y as i64,
                        light,
                    );
                }
            }
        }
    }
}

use crate::camera::Camera;
use crate::color::Color;
use crate::renderer::lighting::lighting_scalar;
use crate::scene::{Plane, Scene};
use crate::screen::Screen;
use crate::texture::Texture;
use rayon::prelude::*;

/// # Floor and ceiling pass
///
/// Runs last so its depth comparisons only fill pixels nothing nearer has
/// claimed. Every screen row below the horizon belongs to the floor, every
/// row above it to the ceiling; a row's perpendicular distance is fixed, so
/// the pass walks the world-space intersection of the row's left and right
/// view rays and steps across it once per column.
///
/// Each row owns a contiguous slice of the pixel and depth buffers and no
/// row reads another's writes, which is exactly the reordering seam the
/// renderer is allowed to exploit: rows are partitioned across threads, the
/// pass stays lock-free, and the output is byte-identical to the sequential
/// top-to-bottom order.
pub(crate) fn render_planes(screen: &mut Screen, scene: &Scene, camera: &Camera) {
    let width = screen.render_width();
    let w = width as f64;
    let h = screen.render_height() as f64;
    let aspect = screen.aspect();

    let position = camera.position();
    let forward = camera.forward();
    let plane = camera.plane();
    let horizon = (h / 2.0 + camera.pitch() as f64).floor();

    let first_row = if scene.ceiling.enabled { 0.0 } else { horizon };
    let last_row = if scene.floor.enabled { h } else { horizon };
    let row_start = first_row.clamp(0.0, h) as usize;
    let row_end = last_row.clamp(0.0, h) as usize;
    if row_start >= row_end {
        return;
    }

    // Rays through the leftmost and rightmost columns; every row walks
    // linearly between them at its own distance.
    let dir_left = forward - plane * (aspect * 0.5);
    let dir_right = forward + plane * (aspect * 0.5);

    let floor_sampler = PlaneSampler::for_plane(&scene.floor);
    let ceiling_sampler = PlaneSampler::for_plane(&scene.ceiling);
    let ceiling_height = scene.ceiling.height;

    let (pixels, depth_buffer) = screen.buffers_mut();
    pixels
        .par_chunks_mut(4 * width)
        .zip(depth_buffer.par_chunks_mut(width))
        .enumerate()
        .skip(row_start)
        .take(row_end - row_start)
        .for_each(|(y, (row_pixels, row_depth))| {
            let is_floor = y as f64 > horizon;
            let sampler = if is_floor {
                floor_sampler.as_ref()
            } else {
                ceiling_sampler.as_ref()
            };
            let Some(sampler) = sampler else {
                return;
            };

            // Camera height in pixels relative to the sampled plane.
            let plane_z = if is_floor {
                position.z() * h
            } else {
                h * (ceiling_height - position.z())
            };
            let mut row_dist = (plane_z / (y as f64 - horizon)).abs();
            if !row_dist.is_finite() {
                row_dist = 1e3;
            }

            let step_x = (dir_right.x() - dir_left.x()) * row_dist / w;
            let step_y = (dir_right.y() - dir_left.y()) * row_dist / w;
            let mut world_x = position.x() + dir_left.x() * row_dist;
            let mut world_y = position.y() + dir_left.y() * row_dist;

            let light = lighting_scalar(&scene.lighting, camera.lighting(), row_dist, None);

            match sampler {
                PlaneSampler::Raster {
                    texture,
                    cell_width,
                    cell_height,
                } => {
                    for x in 0..width {
                        if row_depth[x] > row_dist {
                            let tex_x = texture_coordinate(world_x, *cell_width, texture.width());
                            let tex_y = texture_coordinate(world_y, *cell_height, texture.height());
                            let texel = texture.texel(tex_x, tex_y);
                            let [r, g, b] =
                                Color::new(texel[0], texel[1], texel[2], texel[3]).scaled(light);
                            row_pixels[4 * x..4 * x + 4].copy_from_slice(&[r, g, b, 255]);
                            row_depth[x] = row_dist;
                        }
                        world_x += step_x;
                        world_y += step_y;
                    }
                }
                PlaneSampler::Solid(color) => {
                    let [r, g, b] = color.scaled(light);
                    for x in 0..width {
                        if row_depth[x] > row_dist {
                            row_pixels[4 * x..4 * x + 4].copy_from_slice(&[r, g, b, 255]);
                            row_depth[x] = row_dist;
                        }
                    }
                }
            }
        });
}

/// The per-plane sampling decision, resolved once per frame so the row loop
/// stays monomorphic: a loaded texture with its repetition extents, or the
/// plane's solid (or fallback) color. `None` for a disabled plane.
enum PlaneSampler<'a> {
    Raster {
        texture: &'a Texture,
        cell_width: f64,
        cell_height: f64,
    },
    Solid(Color),
}

impl<'a> PlaneSampler<'a> {
    fn for_plane(plane: &'a Plane) -> Option<PlaneSampler<'a>> {
        if !plane.enabled {
            return None;
        }
        Some(match plane.appearance.as_loaded_texture() {
            Some(texture) => PlaneSampler::Raster {
                texture,
                cell_width: plane.cell_width,
                cell_height: plane.cell_height,
            },
            None => PlaneSampler::Solid(plane.appearance.fallback_color()),
        })
    }
}

/// Maps a world coordinate into a texel column/row of a plane texture that
/// repeats every `cell_extent` world units.
#[inline]
fn texture_coordinate(world: f64, cell_extent: f64, texels: u32) -> u32 {
    let fraction = ((world % cell_extent) / cell_extent).abs();
    ((texels as f64 * fraction) as u32).min(texels - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_coordinates_stay_in_bounds() {
        for world in [-3.7, -1.0, -0.2, 0.0, 0.4, 1.0, 2.9] {
            let t = texture_coordinate(world, 1.0, 4);
            assert!(t < 4, "coordinate {t} out of bounds for world {world}");
        }
        assert_eq!(texture_coordinate(0.5, 1.0, 2), 1);
        assert_eq!(texture_coordinate(2.25, 1.0, 4), 1);
        // Negative coordinates mirror through the absolute value.
        assert_eq!(texture_coordinate(-0.25, 1.0, 4), 1);
    }

    #[test]
    fn wider_cells_stretch_the_repetition() {
        assert_eq!(texture_coordinate(1.0, 4.0, 4), 1);
        assert_eq!(texture_coordinate(3.9, 4.0, 4), 3);
    }
}

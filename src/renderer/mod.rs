mod column;
mod entities;
mod lighting;
mod planes;
mod skybox;
mod walls;

use crate::camera::Camera;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::screen::Screen;

/// # Render orchestration
///
/// Produces one frame into the screen's pixel and depth buffers. The passes
/// run in a fixed order and cooperate only through those buffers:
///
/// 1. skybox (pixels only, depth stays at infinity),
/// 2. walls (fills the depth buffer the sprites test against),
/// 3. entities (depth-tested billboards),
/// 4. floor and ceiling (fill whatever is still open at each row's depth).
///
/// A pass whose inputs cannot produce output is skipped outright: a skybox
/// that is disabled, a world map with no cells or no descriptors, an empty
/// entity list, planes that are both disabled.
///
/// The scene and camera are read-only for the duration of the call, and the
/// caller is responsible for [`Screen::clear`] between frames; rendering the
/// same scene and camera into a cleared screen is deterministic down to the
/// last byte.
pub fn render(screen: &mut Screen, scene: &Scene, camera: &Camera) {
    // One ray's traversal state serves every column of the frame.
    let mut ray = Ray::new();

    if scene.skybox.enabled {
        skybox::render_skybox(screen, scene, camera, &mut ray);
    }
    if !scene.world_map.is_empty() && scene.world_map.has_cell_info() {
        walls::render_walls(screen, scene, camera, &mut ray);
    }
    if !scene.entities().is_empty() {
        entities::render_entities(screen, scene, camera);
    }
    if scene.floor.enabled || scene.ceiling.enabled {
        planes::render_planes(screen, scene, camera);
    }
}

//! A software raycasting renderer. One render call projects a 2D grid world
//! into a pseudo-3D RGBA frame one vertical column at a time, producing a
//! pixel buffer and a matching perpendicular-depth buffer from a scene (grid
//! map, floor and ceiling planes, sprites, skybox, lighting) and a camera.
//!
//! The renderer is pure over (scene, camera, screen): texture decoding is a
//! loading convenience, and presenting the finished pixel buffer is the
//! caller's business.

mod camera;
mod color;
mod configuration;
mod error;
mod orientation;
mod ray;
mod renderer;
mod scene;
mod screen;
mod texture;
mod vec2;
mod vec3;

pub mod utils;

pub use camera::{Camera, CameraLighting};
pub use color::Color;
pub use configuration::{load_configuration, RenderSettings};
pub use error::Error;
pub use orientation::Orientation;
pub use ray::{Ray, Side};
pub use renderer::render;
pub use scene::{CellInfo, Entity, Plane, Scene, SceneLighting, Skybox, WorldMap};
pub use screen::Screen;
pub use texture::{Appearance, Texture};
pub use vec2::Vec2;
pub use vec3::Vec3;

use crate::camera::{Camera, CameraLighting};
use crate::color::Color;
use crate::error::Error;
use crate::scene::{CellInfo, Entity, Plane, Scene, SceneLighting, Skybox, WorldMap};
use crate::screen::Screen;
use crate::texture::Appearance;
use crate::vec2::Vec2;
use crate::vec3::Vec3;
use config::ConfigError;
use log::{debug, info};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::collections::HashMap;

#[derive(Deserialize)]
struct SettingsImpl {
    screen: ScreenImpl,
    camera: CameraImpl,
    scene: SceneImpl,
}

#[derive(Deserialize)]
struct ScreenImpl {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    width: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    height: u32,
    #[serde(
        default = "default_quality",
        deserialize_with = "deserialize_number_from_string"
    )]
    quality: f64,
}

#[derive(Deserialize)]
struct CameraImpl {
    position: [f64; 3],
    direction: [f64; 2],
    #[serde(
        default = "default_focal_length",
        deserialize_with = "deserialize_number_from_string"
    )]
    focal_length: f64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pitch: i32,
    lighting: Option<CameraLightingImpl>,
}

#[derive(Deserialize)]
struct CameraLightingImpl {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    brightness: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    max_brightness: f64,
    #[serde(default = "default_light_color")]
    color: [u8; 4],
}

#[derive(Deserialize)]
struct SceneImpl {
    world_map: WorldMapImpl,
    floor: Option<PlaneImpl>,
    ceiling: Option<PlaneImpl>,
    skybox: Option<SkyboxImpl>,
    #[serde(default)]
    entities: Vec<EntityImpl>,
    lighting: Option<SceneLightingImpl>,
}

#[derive(Deserialize)]
struct WorldMapImpl {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    width: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    height: u32,
    data: Vec<u32>,
    #[serde(default)]
    cell_info: HashMap<String, CellImpl>,
}

#[derive(Deserialize)]
struct CellImpl {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    height: f64,
    appearance: AppearanceImpl,
}

#[derive(Deserialize)]
struct PlaneImpl {
    appearance: AppearanceImpl,
    #[serde(
        default = "default_cell_extent",
        deserialize_with = "deserialize_number_from_string"
    )]
    cell_width: f64,
    #[serde(
        default = "default_cell_extent",
        deserialize_with = "deserialize_number_from_string"
    )]
    cell_height: f64,
    #[serde(
        default = "default_plane_height",
        deserialize_with = "deserialize_number_from_string"
    )]
    height: f64,
}

#[derive(Deserialize)]
struct SkyboxImpl {
    appearance: AppearanceImpl,
}

#[derive(Deserialize)]
struct EntityImpl {
    position: [f64; 3],
    size: [f64; 2],
    appearance: AppearanceImpl,
    tint: Option<[u8; 4]>,
}

#[derive(Deserialize)]
struct SceneLightingImpl {
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    side_shade: f64,
    #[serde(
        default = "default_ambient",
        deserialize_with = "deserialize_number_from_string"
    )]
    ambient_light: f64,
}

/// Either a solid color or a texture file with an optional fallback color
/// shown until (or in place of) the decoded pixels.
#[derive(Deserialize)]
#[serde(untagged)]
enum AppearanceImpl {
    Solid { color: [u8; 4] },
    Raster {
        texture: String,
        fallback: Option<[u8; 4]>,
    },
}

fn default_quality() -> f64 {
    1.0
}

fn default_focal_length() -> f64 {
    1.0
}

fn default_cell_extent() -> f64 {
    1.0
}

fn default_plane_height() -> f64 {
    1.0
}

fn default_ambient() -> f64 {
    1.0
}

fn default_light_color() -> [u8; 4] {
    [255, 255, 255, 255]
}

/// Everything a render call needs, built and validated from the
/// configuration record.
pub struct RenderSettings {
    pub screen: Screen,
    pub camera: Camera,
    pub scene: Scene,
}

impl RenderSettings {
    fn new(settings: SettingsImpl) -> Result<RenderSettings, Error> {
        let screen = Screen::new(
            settings.screen.width,
            settings.screen.height,
            settings.screen.quality,
        )?;
        let camera = build_camera(settings.camera)?;
        let scene = build_scene(settings.scene)?;

        info!(
            "configured {}x{} render at quality {}",
            screen.width(),
            screen.height(),
            screen.quality()
        );
        Ok(RenderSettings {
            screen,
            camera,
            scene,
        })
    }
}

fn build_camera(settings: CameraImpl) -> Result<Camera, Error> {
    let [x, y, z] = settings.position;
    let [dx, dy] = settings.direction;
    let lighting = match settings.lighting {
        Some(l) => CameraLighting {
            brightness: l.brightness,
            max_brightness: l.max_brightness,
            color: color_from(l.color),
        },
        None => CameraLighting::default(),
    };

    Camera::new(
        Vec3::new(x, y, z),
        Vec2::new(dx, dy),
        settings.focal_length,
        settings.pitch,
        lighting,
    )
}

fn build_scene(settings: SceneImpl) -> Result<Scene, Error> {
    let mut world_map = WorldMap::new(
        settings.world_map.width,
        settings.world_map.height,
        settings.world_map.data,
    )?;
    for (key, cell) in settings.world_map.cell_info {
        let id: u32 = key.parse().map_err(|_| {
            Error::Config(ConfigError::Message(format!(
                "cell_info key {key:?} is not a cell id"
            )))
        })?;
        world_map.insert_cell_info(id, CellInfo::new(cell.height, cell.appearance.into())?);
    }

    let mut scene = Scene::new(world_map);
    if let Some(floor) = settings.floor {
        scene.floor = build_plane(floor);
    }
    if let Some(ceiling) = settings.ceiling {
        scene.ceiling = build_plane(ceiling);
    }
    if let Some(skybox) = settings.skybox {
        scene.skybox = Skybox::new(skybox.appearance.into());
    }
    if let Some(lighting) = settings.lighting {
        scene.lighting = SceneLighting {
            ambient: lighting.ambient_light,
            side_shade: lighting.side_shade,
        };
    }
    for entity in settings.entities {
        let [x, y, z] = entity.position;
        let [sx, sy] = entity.size;
        let mut built = Entity::new(
            Vec3::new(x, y, z),
            Vec2::new(sx, sy),
            entity.appearance.into(),
        );
        built.tint = entity.tint.map(color_from);
        scene.add_entity(built);
    }

    Ok(scene)
}

fn build_plane(settings: PlaneImpl) -> Plane {
    let mut plane = Plane::new(
        settings.appearance.into(),
        settings.cell_width,
        settings.cell_height,
    );
    plane.height = settings.height;
    plane
}

impl From<AppearanceImpl> for Appearance {
    fn from(settings: AppearanceImpl) -> Appearance {
        match settings {
            AppearanceImpl::Solid { color } => Appearance::Color(color_from(color)),
            AppearanceImpl::Raster { texture, fallback } => {
                let fallback = fallback.map(color_from).unwrap_or(Color::MAGENTA);
                Appearance::texture_or_fallback(texture, fallback)
            }
        }
    }
}

fn color_from(channels: [u8; 4]) -> Color {
    Color::new(channels[0], channels[1], channels[2], channels[3])
}

/// Reads `configuration/base.yaml` under the current directory into a
/// validated [`RenderSettings`]. Configuration errors surface here and are
/// never silently corrected.
pub fn load_configuration() -> Result<RenderSettings, Error> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");
    debug!("reading configuration from {}", configuration_directory.display());
    let f = config::File::from(configuration_directory.join("base.yaml"));
    let settings = config::Config::builder().add_source(f).build()?;

    settings
        .try_deserialize::<SettingsImpl>()
        .map_err(Error::from)
        .and_then(RenderSettings::new)
}

use crate::color::Color;
use crate::error::Error;
use crate::texture::Appearance;
use crate::vec2::Vec2;
use crate::vec3::Vec3;
use std::collections::HashMap;

/// How a wall cell renders: its height in units of one grid cell (1 projects
/// to the same screen extent as the classic flat-wall raycaster) and its
/// appearance.
#[derive(Debug, Clone)]
pub struct CellInfo {
    height: f64,
    appearance: Appearance,
}

impl CellInfo {
    pub fn new(height: f64, appearance: Appearance) -> Result<CellInfo, Error> {
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::CellHeight(height));
        }
        Ok(CellInfo { height, appearance })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }
}

/// The grid world: a row-major array of non-negative cell ids (0 is empty)
/// plus the per-id render descriptors. A non-zero id with no descriptor is
/// empty-but-opaque: rays pass through it without producing a wall column.
#[derive(Debug, Clone)]
pub struct WorldMap {
    width: u32,
    height: u32,
    data: Vec<u32>,
    cell_info: HashMap<u32, CellInfo>,
}

impl WorldMap {
    pub fn new(width: u32, height: u32, data: Vec<u32>) -> Result<WorldMap, Error> {
        if data.len() != width as usize * height as usize {
            return Err(Error::MapSize {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(WorldMap {
            width,
            height,
            data,
            cell_info: HashMap::new(),
        })
    }

    pub fn insert_cell_info(&mut self, id: u32, info: CellInfo) {
        self.cell_info.insert(id, info);
    }

    pub fn with_cell_info(mut self, id: u32, info: CellInfo) -> WorldMap {
        self.insert_cell_info(id, info);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cell id at (x, y), or None outside the grid. The DDA relies on
    /// this bounds check to terminate.
    #[inline]
    pub fn cell(&self, x: i64, y: i64) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.data[x as usize + y as usize * self.width as usize])
    }

    pub fn cell_info(&self, id: u32) -> Option<&CellInfo> {
        self.cell_info.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_cell_info(&self) -> bool {
        !self.cell_info.is_empty()
    }
}

/// A floor or ceiling plane. `cell_width`/`cell_height` give the world-space
/// extent one texture repetition covers. `height` is the vertical position of
/// the plane in world units; the floor sits at 0 and ignores it, the ceiling
/// defaults to 1.
#[derive(Debug, Clone)]
pub struct Plane {
    pub enabled: bool,
    pub appearance: Appearance,
    pub cell_width: f64,
    pub cell_height: f64,
    pub height: f64,
}

impl Plane {
    pub fn new(appearance: Appearance, cell_width: f64, cell_height: f64) -> Plane {
        Plane {
            enabled: true,
            appearance,
            cell_width,
            cell_height,
            height: 1.0,
        }
    }

    pub fn disabled() -> Plane {
        Plane {
            enabled: false,
            appearance: Appearance::Color(Color::BLACK),
            cell_width: 1.0,
            cell_height: 1.0,
            height: 1.0,
        }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::disabled()
    }
}

#[derive(Debug, Clone)]
pub struct Skybox {
    pub enabled: bool,
    pub appearance: Appearance,
}

impl Skybox {
    pub fn new(appearance: Appearance) -> Skybox {
        Skybox {
            enabled: true,
            appearance,
        }
    }

    pub fn disabled() -> Skybox {
        Skybox {
            enabled: false,
            appearance: Appearance::Color(Color::BLACK),
        }
    }
}

impl Default for Skybox {
    fn default() -> Self {
        Skybox::disabled()
    }
}

/// A billboard sprite. `size` is its world-space extent (x across, y up);
/// `tint`, when set, multiplies sampled texel channels before lighting.
#[derive(Debug, Clone)]
pub struct Entity {
    pub position: Vec3,
    pub size: Vec2,
    pub appearance: Appearance,
    pub tint: Option<Color>,
}

impl Entity {
    pub fn new(position: Vec3, size: Vec2, appearance: Appearance) -> Entity {
        Entity {
            position,
            size,
            appearance,
            tint: None,
        }
    }
}

/// Scene-wide lighting parameters. `ambient` is the minimum lighting scalar
/// applied regardless of distance; `side_shade` darkens walls hit on a
/// horizontal grid line for depth contrast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    pub ambient: f64,
    pub side_shade: f64,
}

impl SceneLighting {
    /// Lighting participates in rendering only when it would change the
    /// output.
    pub fn enabled(&self) -> bool {
        self.side_shade != 0.0 || self.ambient != 1.0
    }
}

impl Default for SceneLighting {
    fn default() -> Self {
        SceneLighting {
            ambient: 1.0,
            side_shade: 0.0,
        }
    }
}

/// Everything the renderer reads: the grid world, the horizontal planes, the
/// sprite list, the skybox and the lighting parameters. The scene is
/// read-only during a render; entities may be inserted or removed between
/// frames.
#[derive(Debug, Clone)]
pub struct Scene {
    pub world_map: WorldMap,
    pub floor: Plane,
    pub ceiling: Plane,
    pub skybox: Skybox,
    pub lighting: SceneLighting,
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new(world_map: WorldMap) -> Scene {
        Scene {
            world_map,
            floor: Plane::disabled(),
            ceiling: Plane::disabled(),
            skybox: Skybox::disabled(),
            lighting: SceneLighting::default(),
            entities: Vec::new(),
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn remove_entity(&mut self, index: usize) -> Entity {
        self.entities.remove(index)
    }

    pub fn clear_entities(&mut self) {
        self.entities.clear();
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }
}

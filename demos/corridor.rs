//! Renders one frame of a textured corridor with a handful of sprites and
//! reports how long the frame took.

use pseudo3d::{
    render, Appearance, Camera, CameraLighting, CellInfo, Color, Entity, Plane, Scene,
    SceneLighting, Screen, Texture, Vec2, Vec3, WorldMap,
};
use rand::Rng;
use timeit::timeit_loops;

/// A procedural brick raster so the demo needs no asset files.
fn brick_texture(size: u32) -> Texture {
    let course = size / 4;
    let mut pixels = Vec::with_capacity((4 * size * size) as usize);
    for y in 0..size {
        for x in 0..size {
            let row = y / course;
            let offset = if row % 2 == 0 { 0 } else { course / 2 };
            let mortar = y % course == 0 || (x + offset) % course == 0;
            let color = if mortar {
                Color::new(180, 180, 180, 255)
            } else {
                Color::new(150, 60, 40, 255)
            };
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
    Texture::from_raster("brick", size, size, pixels).expect("brick raster is well formed")
}

fn corridor_scene() -> Scene {
    // A 9x9 border of walls with a pillared corridor down the middle.
    let (w, h) = (9u32, 9u32);
    let mut data = vec![0u32; (w * h) as usize];
    for x in 0..w {
        data[x as usize] = 1;
        data[(x + (h - 1) * w) as usize] = 1;
    }
    for y in 0..h {
        data[(y * w) as usize] = 1;
        data[(w - 1 + y * w) as usize] = 1;
    }
    for y in (2..h - 2).step_by(2) {
        data[(2 + y * w) as usize] = 2;
        data[(w - 3 + y * w) as usize] = 2;
    }

    let map = WorldMap::new(w, h, data)
        .unwrap()
        .with_cell_info(1, CellInfo::new(1.0, Appearance::from(brick_texture(64))).unwrap())
        .with_cell_info(
            2,
            CellInfo::new(1.5, Appearance::Color(Color::new(90, 90, 110, 255))).unwrap(),
        );

    let mut scene = Scene::new(map);
    scene.floor = Plane::new(Appearance::Color(Color::new(60, 50, 40, 255)), 1.0, 1.0);
    scene.ceiling = Plane::new(Appearance::Color(Color::new(35, 35, 45, 255)), 1.0, 1.0);
    scene.lighting = SceneLighting {
        ambient: 0.25,
        side_shade: 0.15,
    };

    // Scatter a few glowing orbs along the corridor.
    let mut rng = rand::thread_rng();
    for _ in 0..6 {
        let x = rng.gen_range(2.0..(w as f64 - 2.0));
        let y = rng.gen_range(2.0..(h as f64 - 2.0));
        let mut orb = Entity::new(
            Vec3::new(x, y, 0.0),
            Vec2::new(0.3, 0.3),
            Appearance::Color(Color::new(255, 220, 120, 255)),
        );
        orb.tint = Some(Color::new(255, rng.gen_range(160..=255), 120, 255));
        scene.add_entity(orb);
    }

    scene
}

fn main() {
    env_logger::init();

    let scene = corridor_scene();
    let camera = Camera::new(
        Vec3::new(4.5, 1.5, 0.5),
        Vec2::new(0.0, 1.0),
        1.0,
        0,
        CameraLighting {
            brightness: 2.5,
            max_brightness: 1.0,
            color: Color::new(255, 240, 220, 255),
        },
    )
    .expect("demo camera is valid");

    let mut screen = Screen::new(800, 600, 1.0).expect("demo screen is valid");

    let time = timeit_loops!(1, {
        screen.clear();
        render(&mut screen, &scene, &camera);
    });
    eprintln!("{time} seconds to render the frame");

    screen
        .to_image()
        .save("corridor.png")
        .expect("Unable to save image");
    eprintln!("wrote corridor.png");
}

//! Orbits the camera around a small scene and writes the frames as a PNG
//! sequence.

use indicatif::{ProgressBar, ProgressStyle};
use pseudo3d::{
    render, utils::PI, Appearance, Camera, CameraLighting, CellInfo, Color, Entity, Plane, Scene,
    SceneLighting, Screen, Skybox, Vec2, Vec3, WorldMap,
};

const FRAMES: u32 = 60;

fn scene() -> Scene {
    let mut data = vec![0u32; 49];
    data[3 + 3 * 7] = 1; // a single block in the middle of a 7x7 clearing

    let map = WorldMap::new(7, 7, data)
        .unwrap()
        .with_cell_info(
            1,
            CellInfo::new(1.0, Appearance::Color(Color::new(200, 80, 60, 255))).unwrap(),
        );

    let mut scene = Scene::new(map);
    scene.floor = Plane::new(Appearance::Color(Color::new(70, 90, 60, 255)), 1.0, 1.0);
    scene.skybox = Skybox::new(Appearance::Color(Color::new(120, 160, 230, 255)));
    scene.lighting = SceneLighting {
        ambient: 0.35,
        side_shade: 0.1,
    };
    scene.add_entity(Entity::new(
        Vec3::new(3.5, 4.5, 0.0),
        Vec2::new(0.6, 0.6),
        Appearance::Color(Color::new(240, 240, 90, 255)),
    ));
    scene
}

fn main() {
    env_logger::init();

    let scene = scene();
    let mut camera = Camera::new(
        Vec3::new(3.5, 1.0, 0.5),
        Vec2::new(0.0, 1.0),
        1.0,
        0,
        CameraLighting {
            brightness: 2.0,
            max_brightness: 1.0,
            color: Color::WHITE,
        },
    )
    .expect("demo camera is valid");

    let mut screen = Screen::new(320, 240, 1.0).expect("demo screen is valid");

    std::fs::create_dir_all("orbit").expect("Unable to create the output directory");
    let progress = ProgressBar::new(FRAMES as u64).with_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} frames").expect("template is valid"),
    );

    for frame in 0..FRAMES {
        let angle = frame as f64 / FRAMES as f64 * 2.0 * PI;
        let radius = 2.5;
        camera.set_position(Vec3::new(
            3.5 + radius * angle.sin(),
            3.5 - radius * angle.cos(),
            0.5,
        ));
        // Keep looking at the block in the middle.
        camera
            .set_direction(Vec2::new(-angle.sin(), angle.cos()))
            .expect("orbit direction is never zero");

        screen.clear();
        render(&mut screen, &scene, &camera);
        screen
            .to_image()
            .save(format!("orbit/frame_{frame:03}.png"))
            .expect("Unable to save frame");
        progress.inc(1);
    }
    progress.finish();
}

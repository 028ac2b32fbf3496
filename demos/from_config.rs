//! Renders one frame from `configuration/base.yaml`.

use pseudo3d::{load_configuration, render};

fn main() {
    env_logger::init();

    let mut settings = load_configuration().expect("Couldnot read settings");
    render(&mut settings.screen, &settings.scene, &settings.camera);
    settings
        .screen
        .to_image()
        .save("frame.png")
        .expect("Unable to save image");
    eprintln!("wrote frame.png");
}

use crate::camera::CameraLighting;
use crate::ray::Side;
use crate::scene::SceneLighting;

/// Per-channel lighting factors for a surface at the given perpendicular
/// depth. The raw scalar is `brightness / depth`, clamped above by the
/// camera's maximum and below by the scene ambient; a side-shaded wall hit
/// (horizontal grid line) then loses `side_shade`, deliberately after the
/// ambient floor so side faces keep their contrast. The camera light color
/// tints each channel.
#[inline]
pub(crate) fn lighting_scalar(
    scene: &SceneLighting,
    camera: &CameraLighting,
    depth: f64,
    side: Option<Side>,
) -> (f64, f64, f64) {
    if !scene.enabled() {
        return (1.0, 1.0, 1.0);
    }

    let mut level = camera.brightness / depth;
    level = level.min(camera.max_brightness);
    level = level.max(scene.ambient);
    if side == Some(Side::Y) {
        level -= scene.side_shade;
    }

    channel_factors(level, camera)
}

/// Distance-independent factors at the ambient level, used by the skybox
/// (which is infinitely far away).
#[inline]
pub(crate) fn ambient_factors(scene: &SceneLighting, camera: &CameraLighting) -> (f64, f64, f64) {
    if !scene.enabled() {
        return (1.0, 1.0, 1.0);
    }
    channel_factors(scene.ambient, camera)
}

#[inline]
fn channel_factors(level: f64, camera: &CameraLighting) -> (f64, f64, f64) {
    (
        level * camera.color.r as f64 / 255.0,
        level * camera.color.g as f64 / 255.0,
        level * camera.color.b as f64 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use approx::assert_relative_eq;

    fn camera_light() -> CameraLighting {
        CameraLighting {
            brightness: 2.0,
            max_brightness: 1.0,
            color: Color::WHITE,
        }
    }

    #[test]
    fn disabled_lighting_is_identity() {
        let scene = SceneLighting {
            ambient: 1.0,
            side_shade: 0.0,
        };
        assert_eq!(
            lighting_scalar(&scene, &camera_light(), 10.0, None),
            (1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn scalar_is_clamped_between_ambient_and_max_brightness() {
        let scene = SceneLighting {
            ambient: 0.2,
            side_shade: 0.0,
        };
        let camera = camera_light();

        // Very close: brightness / depth would exceed the maximum.
        let (r, _, _) = lighting_scalar(&scene, &camera, 0.1, None);
        assert_relative_eq!(r, 1.0);

        // Very far: the ambient floor holds.
        let (r, _, _) = lighting_scalar(&scene, &camera, 100.0, None);
        assert_relative_eq!(r, 0.2);

        // In between: the raw scalar passes through.
        let (r, _, _) = lighting_scalar(&scene, &camera, 4.0, None);
        assert_relative_eq!(r, 0.5);
    }

    #[test]
    fn side_shade_applies_after_the_ambient_floor() {
        let scene = SceneLighting {
            ambient: 0.5,
            side_shade: 0.2,
        };
        let camera = camera_light();

        // A distant side-faced wall drops below ambient; no reclamp.
        let (r, _, _) = lighting_scalar(&scene, &camera, 100.0, Some(Side::Y));
        assert_relative_eq!(r, 0.3);

        // Vertical-line hits are untouched.
        let (r, _, _) = lighting_scalar(&scene, &camera, 100.0, Some(Side::X));
        assert_relative_eq!(r, 0.5);
    }

    #[test]
    fn camera_color_tints_channels() {
        let scene = SceneLighting {
            ambient: 1.0,
            side_shade: 0.1,
        };
        let camera = CameraLighting {
            brightness: 1.0,
            max_brightness: 1.0,
            color: Color::new(255, 128, 0, 255),
        };
        let (r, g, b) = lighting_scalar(&scene, &camera, 1.0, None);
        assert_relative_eq!(r, 1.0);
        assert_relative_eq!(g, 128.0 / 255.0);
        assert_relative_eq!(b, 0.0);
    }

    #[test]
    fn ambient_factors_ignore_distance() {
        let scene = SceneLighting {
            ambient: 0.25,
            side_shade: 0.0,
        };
        assert_eq!(
            ambient_factors(&scene, &camera_light()),
            (0.25, 0.25, 0.25)
        );
    }
}

use crate::color::Color;
use crate::error::Error;
use crate::orientation::Orientation;
use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// The light the camera carries into the scene. `brightness / depth` gives
/// the raw lighting scalar, clamped above by `max_brightness`; `color` tints
/// every lit pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLighting {
    pub brightness: f64,
    pub max_brightness: f64,
    pub color: Color,
}

impl Default for CameraLighting {
    fn default() -> Self {
        CameraLighting {
            brightness: 1.0,
            max_brightness: 1.0,
            color: Color::WHITE,
        }
    }
}

/// # Camera Geometry
///
/// The camera is an orientation in the grid plane plus the derived camera
/// plane. The effective direction vector has magnitude `focal_length` (the
/// stored direction is unit length; [`Camera::forward`] applies the focal
/// length), and the camera plane is the perpendicular `(-dir.y, dir.x)` with
/// base length 1, scaled by the screen aspect at render time. Together they
/// span the viewing frustum: the ray through screen column x is
/// `forward + plane * aspect * (x / W - 0.5)`, and with that construction the
/// DDA's accumulated side distances are already perpendicular distances, so
/// projection needs no square root and shows no fish-eye.
///
/// `pitch` shears the horizon up or down by whole pixels (y-shearing); the
/// position's z component is the eye height, 0.5 being the middle of a
/// unit-height wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    orientation: Orientation,
    plane: Vec2,
    focal_length: f64,
    pitch: i32,
    lighting: CameraLighting,
}

impl Camera {
    pub fn new(
        position: Vec3,
        direction: Vec2,
        focal_length: f64,
        pitch: i32,
        lighting: CameraLighting,
    ) -> Result<Camera, Error> {
        if !focal_length.is_finite() || focal_length <= 0.0 {
            return Err(Error::FocalLength(focal_length));
        }
        let orientation = Orientation::new(position, direction)?;
        let plane = Camera::plane_for(orientation.direction());

        Ok(Camera {
            orientation,
            plane,
            focal_length,
            pitch,
            lighting,
        })
    }

    // cameraPlane = (-dy, dx), perpendicular to the direction by construction.
    fn plane_for(direction: Vec2) -> Vec2 {
        Vec2::new(-direction.y(), direction.x())
    }

    pub fn position(&self) -> Vec3 {
        self.orientation.position()
    }

    pub fn direction(&self) -> Vec2 {
        self.orientation.direction()
    }

    /// The effective direction vector: unit direction times focal length.
    pub fn forward(&self) -> Vec2 {
        self.orientation.direction() * self.focal_length
    }

    pub fn plane(&self) -> Vec2 {
        self.plane
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn lighting(&self) -> &CameraLighting {
        &self.lighting
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.orientation.set_position(position);
    }

    pub fn set_direction(&mut self, direction: Vec2) -> Result<(), Error> {
        self.orientation.set_direction(direction)?;
        self.plane = Camera::plane_for(self.orientation.direction());
        Ok(())
    }

    pub fn set_pitch(&mut self, pitch: i32) {
        self.pitch = pitch;
    }

    pub fn set_lighting(&mut self, lighting: CameraLighting) {
        self.lighting = lighting;
    }

    /// Turns the camera counter-clockwise by `angle` radians, recomputing
    /// the camera plane.
    pub fn rotate(&mut self, angle: f64) {
        self.orientation.rotate(angle);
        self.plane = Camera::plane_for(self.orientation.direction());
    }

    /// Moves the camera in the grid plane: `forward_by` along the facing
    /// direction and `strafe_by` along the camera plane, leaving the height
    /// untouched. Collision handling belongs to the host.
    pub fn walk(&mut self, forward_by: f64, strafe_by: f64) {
        let step = self.orientation.direction() * forward_by + self.plane * strafe_by;
        let p = self.orientation.position();
        self.orientation
            .set_position(Vec3::new(p.x() + step.x(), p.y() + step.y(), p.z()));
    }
}

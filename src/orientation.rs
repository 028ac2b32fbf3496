use crate::error::Error;
use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// A position paired with a facing direction. The direction is normalized at
/// construction and stays unit length through every mutation; the position's
/// third component is the height above the floor plane in cell units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    position: Vec3,
    direction: Vec2,
}

impl Orientation {
    pub fn new(position: Vec3, direction: Vec2) -> Result<Orientation, Error> {
        if !direction.is_finite() || direction.length_squared() == 0.0 {
            return Err(Error::Direction);
        }

        Ok(Orientation {
            position,
            direction: direction.normalized(),
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_direction(&mut self, direction: Vec2) -> Result<(), Error> {
        if !direction.is_finite() || direction.length_squared() == 0.0 {
            return Err(Error::Direction);
        }
        self.direction = direction.normalized();
        Ok(())
    }

    /// Turns the facing direction counter-clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.direction = self.direction.rotated(angle).normalized();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PI;
    use approx::assert_relative_eq;

    #[test]
    fn direction_is_normalized_at_construction() {
        let o = Orientation::new(Vec3::default(), Vec2::new(3.0, 4.0)).unwrap();
        assert_relative_eq!(o.direction().length(), 1.0);
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Orientation::new(Vec3::default(), Vec2::default()).is_err());
        assert!(Orientation::new(Vec3::default(), Vec2::new(f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn rotation_keeps_unit_length() {
        let mut o = Orientation::new(Vec3::default(), Vec2::new(1.0, 0.0)).unwrap();
        o.rotate(PI / 3.0);
        assert_relative_eq!(o.direction().length(), 1.0);
    }
}

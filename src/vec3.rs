use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// Three-component real-valued vector. Positions carry their height in the
/// third component (z), measured in units of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub e: [f64; 3],
}

impl Vec3 {
    pub fn new(e0: f64, e1: f64, e2: f64) -> Vec3 {
        Vec3 { e: [e0, e1, e2] }
    }

    pub fn x(&self) -> f64 {
        self.e[0]
    }

    pub fn y(&self) -> f64 {
        self.e[1]
    }

    pub fn z(&self) -> f64 {
        self.e[2]
    }

    pub fn length(&self) -> f64 {
        f64::sqrt(self.length_squared())
    }

    pub fn length_squared(&self) -> f64 {
        self.e[0] * self.e[0] + self.e[1] * self.e[1] + self.e[2] * self.e[2]
    }

    pub fn dot(&self, rhs: &Vec3) -> f64 {
        self.x() * rhs.x() + self.y() * rhs.y() + self.z() * rhs.z()
    }

    pub fn distance_squared(&self, rhs: &Vec3) -> f64 {
        (*rhs - *self).length_squared()
    }

    /// Returns the unit vector with this vector's direction. Normalizing the
    /// zero vector is a no-op.
    pub fn normalized(&self) -> Vec3 {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        *self / len
    }

    /// Scales the vector to the given magnitude, keeping its direction.
    /// No-op on the zero vector.
    pub fn with_length(&self, magnitude: f64) -> Vec3 {
        self.normalized() * magnitude
    }

    /// Projects this vector onto `onto`. Projection onto the zero vector is
    /// the zero vector.
    pub fn project_onto(&self, onto: &Vec3) -> Vec3 {
        let denominator = onto.length_squared();
        if denominator == 0.0 {
            return Vec3::default();
        }
        *onto * (self.dot(onto) / denominator)
    }

    /// Rotates the horizontal components counter-clockwise by `angle`
    /// radians, leaving the height untouched. This is the 2D rotation used
    /// for turning positions around the world's vertical axis.
    pub fn rotated_z(&self, angle: f64) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.x() * cos - self.y() * sin,
            self.x() * sin + self.y() * cos,
            self.z(),
        )
    }

    /// Rotates by the Euler angles (pitch about x, then yaw about y, then
    /// roll about z), all in radians.
    pub fn rotated_euler(&self, pitch: f64, yaw: f64, roll: f64) -> Vec3 {
        let (sp, cp) = pitch.sin_cos();
        let rotated = Vec3::new(
            self.x(),
            self.y() * cp - self.z() * sp,
            self.y() * sp + self.z() * cp,
        );

        let (sy, cy) = yaw.sin_cos();
        let rotated = Vec3::new(
            rotated.x() * cy + rotated.z() * sy,
            rotated.y(),
            -rotated.x() * sy + rotated.z() * cy,
        );

        let (sr, cr) = roll.sin_cos();
        Vec3::new(
            rotated.x() * cr - rotated.y() * sr,
            rotated.x() * sr + rotated.y() * cr,
            rotated.z(),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.e.iter().all(|c| c.is_finite())
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.e[0] += rhs.e[0];
        self.e[1] += rhs.e[1];
        self.e[2] += rhs.e[2];
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.e[0] *= rhs;
        self.e[1] *= rhs;
        self.e[2] *= rhs;
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        self.e[0] /= rhs;
        self.e[1] /= rhs;
        self.e[2] /= rhs;
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, index: usize) -> &Self::Output {
        &self.e[index]
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.e[index]
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Vec3::new(-self.e[0], -self.e[1], -self.e[2])
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z())
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

impl Add<f64> for Vec3 {
    type Output = Self;
    fn add(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x() + rhs, self.y() + rhs, self.z() + rhs)
    }
}

impl Sub<f64> for Vec3 {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x() - rhs, self.y() - rhs, self.z() - rhs)
    }
}

impl Mul for Vec3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x() * rhs.x(), self.y() * rhs.y(), self.z() * rhs.z())
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x() * rhs, self.y() * rhs, self.z() * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        let t = 1.0 / rhs;
        self * t
    }
}

// For an expression like 5.0 * Vec3
impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PI;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_is_noop_on_zero_vector() {
        let zero = Vec3::default();
        assert_eq!(zero.normalized(), zero);
    }

    #[test]
    fn z_rotation_leaves_height_untouched() {
        let v = Vec3::new(1.0, 0.0, 0.5).rotated_z(PI / 2.0);
        assert_relative_eq!(v.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y(), 1.0);
        assert_relative_eq!(v.z(), 0.5);
    }

    #[test]
    fn euler_rotation_composes_axis_rotations() {
        // A yaw of 90 degrees swings +x onto -z.
        let v = Vec3::new(1.0, 0.0, 0.0).rotated_euler(0.0, PI / 2.0, 0.0);
        assert_relative_eq!(v.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.z(), -1.0);

        // A pitch of 90 degrees swings +y onto +z.
        let v = Vec3::new(0.0, 1.0, 0.0).rotated_euler(PI / 2.0, 0.0, 0.0);
        assert_relative_eq!(v.y(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.z(), 1.0);

        // A roll of 90 degrees swings +x onto +y.
        let v = Vec3::new(1.0, 0.0, 0.0).rotated_euler(0.0, 0.0, PI / 2.0);
        assert_relative_eq!(v.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y(), 1.0);
    }

    #[test]
    fn projection_recovers_component() {
        let v = Vec3::new(2.0, 3.0, 4.0).project_onto(&Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(v, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn arithmetic() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v + 1.0, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(v * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * v, Vec3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(v.dot(&v), 14.0);
        assert_relative_eq!(v.distance_squared(&Vec3::new(1.0, 2.0, 5.0)), 4.0);
    }
}

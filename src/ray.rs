use crate::scene::WorldMap;
use crate::utils::INFINITY;

/// Which family of grid lines the ray crossed at its last step: `X` means a
/// vertical line (the hit face's normal points along the x axis), `Y` a
/// horizontal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

/// # Grid traversal
///
/// Digital differential analysis over the world grid. The ray keeps the
/// classic DDA state: the cell it currently occupies, the per-axis distance
/// deltas between successive grid lines, the cumulative side distances, and
/// the axis it crossed last. Each [`Ray::cast`] advances cell by cell until
/// it lands in a non-empty cell or leaves the map.
///
/// When the ray is initialised with length 1 and direction
/// `forward + plane * aspect * cameraX`, the side distances accumulate in
/// units of perpendicular (camera-plane) distance, so the reported
/// [`Ray::distance`] projects walls without a square root and without
/// fish-eye distortion.
///
/// The wall pass reuses one ray object across all screen columns, and casts
/// it repeatedly within a column: after a hit that does not close the column
/// the traversal picks up from the current state, so the next hit is strictly
/// beyond the previous one.
#[derive(Debug, Clone, Default)]
pub struct Ray {
    map_x: i64,
    map_y: i64,
    delta_x: f64,
    delta_y: f64,
    step_x: i64,
    step_y: i64,
    side_x: f64,
    side_y: f64,
    side: Option<Side>,
    hit: u32,
    distance: f64,
}

impl Ray {
    pub fn new() -> Ray {
        Ray::default()
    }

    /// Resets the traversal state for a new ray of the given length starting
    /// at (start_x, start_y). A zero direction component makes its delta
    /// infinite so that axis is never selected; the matching initial side
    /// distance is forced to infinity as well, because a start coordinate
    /// sitting exactly on a grid line would otherwise produce 0 * inf = NaN
    /// and poison the axis comparison.
    pub fn init(&mut self, start_x: f64, start_y: f64, dir_x: f64, dir_y: f64, length: f64) {
        self.delta_x = if dir_x == 0.0 {
            INFINITY
        } else {
            (length / dir_x).abs()
        };
        self.delta_y = if dir_y == 0.0 {
            INFINITY
        } else {
            (length / dir_y).abs()
        };

        self.map_x = start_x.floor() as i64;
        self.map_y = start_y.floor() as i64;

        if dir_x < 0.0 {
            self.step_x = -1;
            self.side_x = (start_x - self.map_x as f64) * self.delta_x;
        } else {
            self.step_x = 1;
            self.side_x = (self.map_x as f64 + 1.0 - start_x) * self.delta_x;
        }
        if dir_y < 0.0 {
            self.step_y = -1;
            self.side_y = (start_y - self.map_y as f64) * self.delta_y;
        } else {
            self.step_y = 1;
            self.side_y = (self.map_y as f64 + 1.0 - start_y) * self.delta_y;
        }
        if self.delta_x.is_infinite() {
            self.side_x = INFINITY;
        }
        if self.delta_y.is_infinite() {
            self.side_y = INFINITY;
        }

        self.side = Some(Side::X);
        self.hit = 0;
        self.distance = 0.0;
    }

    /// Advances until the ray lands in a non-empty cell or exits the map,
    /// then records the perpendicular distance to the crossed grid line.
    /// Returns the hit cell id, 0 when the ray left the map.
    pub fn cast(&mut self, map: &WorldMap) -> u32 {
        self.hit = 0;
        loop {
            if self.side_x > self.side_y {
                self.map_y += self.step_y;
                self.side_y += self.delta_y;
                self.side = Some(Side::Y);
            } else {
                self.map_x += self.step_x;
                self.side_x += self.delta_x;
                self.side = Some(Side::X);
            }

            let Some(cell) = map.cell(self.map_x, self.map_y) else {
                break;
            };
            if cell != 0 {
                self.hit = cell;
                break;
            }
        }

        // The side distance has already been advanced past the crossed line,
        // so the distance to the hit is one delta behind it.
        self.distance = match self.side {
            Some(Side::Y) => self.side_y - self.delta_y,
            _ => self.side_x - self.delta_x,
        };
        self.hit
    }

    pub fn hit(&self) -> u32 {
        self.hit
    }

    /// The axis family crossed at the last step. Meaningful after a cast.
    pub fn side(&self) -> Side {
        self.side.unwrap_or(Side::X)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn map_x(&self) -> i64 {
        self.map_x
    }

    pub fn map_y(&self) -> i64 {
        self.map_y
    }

    // The skybox pass samples the freshly initialised side distances to pick
    // the cell face a view ray leaves through.
    pub(crate) fn side_distances(&self) -> (f64, f64) {
        (self.side_x, self.side_y)
    }
}

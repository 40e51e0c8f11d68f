//! Coordinate tuples.

/// One coordinate tuple: x, y and the optional z and m ordinates.
///
/// Which of `z` and `m` are meaningful is decided by the header of the
/// geometry owning the coordinate; ordinates whose flag is clear are ignored
/// by the encoder and decoded as `0.0`.
///
/// Equality compares the raw bit patterns, so a NaN coordinate equals an
/// identical NaN coordinate and `0.0 != -0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Coord {
    /// 2D coordinate.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0, m: 0.0 }
    }

    /// 3D coordinate with elevation.
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, m: 0.0 }
    }

    /// 3D coordinate with measure.
    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self { x, y, z: 0.0, m }
    }

    /// 4D coordinate.
    pub const fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    /// The sentinel used for an empty point: x and y are NaN.
    pub const fn nan() -> Self {
        Self::xy(f64::NAN, f64::NAN)
    }

    /// Returns true if this is the empty-point sentinel (x and y both NaN).
    pub fn is_empty(&self) -> bool {
        self.x.is_nan() && self.y.is_nan()
    }

    fn bits(&self) -> [u64; 4] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits(), self.m.to_bits()]
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Coord {}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord::xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Coord {
    /// Interpreted as x, y, z.
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Coord::xyz(x, y, z)
    }
}

impl From<(f64, f64, f64, f64)> for Coord {
    fn from((x, y, z, m): (f64, f64, f64, f64)) -> Self {
        Coord::xyzm(x, y, z, m)
    }
}

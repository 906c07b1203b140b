use crate::Error;

/// Sentinel marking samples synthesized by boundary padding.
///
/// Padded border cells carry this value so that every crossing fraction
/// computed against them pins to the real grid edge, pulling contours onto
/// the border where they close into loops. It can never collide with a
/// legitimate sample because legitimate samples are compared against it
/// exactly.
pub const OUTSIDE: f64 = -f64::MAX;

/// Dense 2D scalar field with cached value range.
///
/// Immutable after construction; a single grid may serve any number of
/// extraction passes, including concurrent ones, since extraction only
/// reads.
///
/// NaN samples are excluded from the cached range and compare as "below"
/// any level during extraction, so they behave like deep holes rather
/// than poisoning the whole field.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid {
    width: usize,
    height: usize,
    min: f64,
    max: f64,
    data: Vec<f64>,
}

impl ScalarGrid {
    /// Builds a grid from row-major samples. `data.len()` must equal
    /// `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &data {
            if v == OUTSIDE {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }

        Ok(Self {
            width,
            height,
            min,
            max,
            data,
        })
    }

    /// Samples `f` at every lattice point `x = [0, width)`, `y = [0, height)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let len = width.checked_mul(height).expect("grid size overflow");
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Self::from_vec(width, height, data).expect("length matches by construction")
    }

    /// Builds a grid from 16-bit grayscale samples normalized to `[0, 1]`.
    pub fn from_gray16(width: usize, height: usize, pixels: &[u16]) -> Result<Self, Error> {
        let data = pixels.iter().map(|&px| px as f64 / 65535.0).collect();
        Self::from_vec(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Smallest non-sentinel sample, `+inf` for an all-sentinel grid.
    pub fn minimum(&self) -> f64 {
        self.min
    }

    /// Largest non-sentinel sample, `-inf` for an all-sentinel grid.
    pub fn maximum(&self) -> f64 {
        self.max
    }

    /// Sample at integer lattice coordinates.
    ///
    /// Callers must respect `x < width` and `y < height`; violating the
    /// contract panics.
    pub fn value(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.width && y < self.height, "grid index out of bounds");
        self.data[y * self.width + x]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns a `(width + 2, height + 2)` copy with a one-cell [`OUTSIDE`]
    /// border, so every contour extracted from it closes by following the
    /// grid edge instead of terminating there.
    pub fn with_boundary_padding(&self) -> ScalarGrid {
        let w = self.width + 2;
        let h = self.height + 2;
        let mut data = vec![OUTSIDE; w * h];
        for y in 0..self.height {
            let src = y * self.width;
            let dst = (y + 1) * w + 1;
            data[dst..dst + self.width].copy_from_slice(&self.data[src..src + self.width]);
        }

        Self::from_vec(w, h, data).expect("length matches by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::{OUTSIDE, ScalarGrid};
    use crate::Error;

    #[test]
    fn from_vec_rejects_length_mismatch() {
        let err = ScalarGrid::from_vec(3, 2, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn range_skips_sentinel_and_nan() {
        let g = ScalarGrid::from_vec(2, 2, vec![1.0, OUTSIDE, f64::NAN, 3.0]).expect("valid grid");
        assert_eq!(g.minimum(), 1.0);
        assert_eq!(g.maximum(), 3.0);
    }

    #[test]
    fn all_sentinel_grid_has_degenerate_range() {
        let g = ScalarGrid::from_vec(2, 2, vec![OUTSIDE; 4]).expect("valid grid");
        assert_eq!(g.minimum(), f64::INFINITY);
        assert_eq!(g.maximum(), f64::NEG_INFINITY);
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = ScalarGrid::from_fn(3, 2, |x, y| (y * 10 + x) as f64);
        assert_eq!(g.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(g.value(2, 1), 12.0);
        assert_eq!(g.get(3, 0), None);
        assert_eq!(g.get(0, 1), Some(10.0));
    }

    #[test]
    fn gray16_normalizes_to_unit_range() {
        let g = ScalarGrid::from_gray16(2, 1, &[0, 65535]).expect("valid grid");
        assert_eq!(g.value(0, 0), 0.0);
        assert_eq!(g.value(1, 0), 1.0);
    }

    #[test]
    fn boundary_padding_wraps_with_sentinel() {
        let g = ScalarGrid::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("valid grid");
        let p = g.with_boundary_padding();

        assert_eq!(p.width(), 4);
        assert_eq!(p.height(), 4);
        assert_eq!(p.value(1, 1), 1.0);
        assert_eq!(p.value(2, 2), 4.0);
        for x in 0..4 {
            assert_eq!(p.value(x, 0), OUTSIDE);
            assert_eq!(p.value(x, 3), OUTSIDE);
        }
        for y in 0..4 {
            assert_eq!(p.value(0, y), OUTSIDE);
            assert_eq!(p.value(3, y), OUTSIDE);
        }

        // Padding never shifts the cached range.
        assert_eq!(p.minimum(), 1.0);
        assert_eq!(p.maximum(), 4.0);

        // And the original is untouched.
        assert_eq!(g.width(), 2);
        assert_eq!(g.value(0, 0), 1.0);
    }
}

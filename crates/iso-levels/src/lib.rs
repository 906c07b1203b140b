//! Percentile-based level selection.
//!
//! Splits a grid's value histogram into roughly equal-population bands so
//! that stacked contour fills come out visually even regardless of the
//! value distribution. This is an input-preparation aid for choosing
//! levels, not part of the extraction engine.

use iso_core::ScalarGrid;

/// Picks `num_levels` values such that roughly equal pixel counts fall
/// between successive thresholds.
///
/// Each level targets the `(i + 0.5) / num_levels` percentile of the
/// sample population; when no sample sits exactly on a percentile the
/// nearest available value above it is used. An empty grid yields all
/// zeros.
pub fn histogram_levels(grid: &ScalarGrid, num_levels: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = grid.data().to_vec();
    sorted.sort_by(f64::total_cmp);

    // Run-length encode the sorted samples into (value, count) bins.
    let mut keys: Vec<f64> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for &v in &sorted {
        match keys.last() {
            Some(&k) if k.to_bits() == v.to_bits() => {
                *counts.last_mut().expect("counts tracks keys") += 1;
            }
            _ => {
                keys.push(v);
                counts.push(1);
            }
        }
    }

    let num_pixels = sorted.len();
    let mut result = vec![0.0; num_levels];
    for (i, out) in result.iter_mut().enumerate() {
        let t = (i as f64 + 0.5) / num_levels as f64;
        let pixel_count = (t * num_pixels as f64) as usize;

        let mut total = 0_usize;
        for (k, c) in keys.iter().zip(&counts) {
            total += c;
            if total >= pixel_count {
                *out = *k;
                break;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use iso_core::ScalarGrid;

    use super::histogram_levels;

    #[test]
    fn uniform_grid_repeats_its_value() {
        let g = ScalarGrid::from_fn(4, 4, |_, _| 2.5);
        assert_eq!(histogram_levels(&g, 3), vec![2.5, 2.5, 2.5]);
    }

    #[test]
    fn two_value_split_hits_both_values() {
        let g = ScalarGrid::from_fn(4, 4, |x, _| if x < 2 { 1.0 } else { 9.0 });
        assert_eq!(histogram_levels(&g, 2), vec![1.0, 9.0]);
    }

    #[test]
    fn distinct_values_pick_percentiles() {
        let g = ScalarGrid::from_fn(10, 10, |x, y| (y * 10 + x) as f64);
        assert_eq!(
            histogram_levels(&g, 4),
            vec![11.0, 36.0, 61.0, 86.0]
        );
    }

    #[test]
    fn empty_grid_degrades_to_zeros() {
        let g = ScalarGrid::from_vec(0, 0, Vec::new()).expect("valid grid");
        assert_eq!(histogram_levels(&g, 3), vec![0.0, 0.0, 0.0]);
    }
}

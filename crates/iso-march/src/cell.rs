use std::collections::{BTreeMap, BTreeSet, HashMap};

use iso_core::{OUTSIDE, Point2d};

/// Fractions are kept off the exact lattice so stitching never sees a
/// zero-length segment at a cell corner.
const FRACTION_EPS: f64 = 1e-9;

/// Identity of a lattice edge shared between two adjacent cells.
///
/// Both cells derive the key from the same pair of integer endpoints, so
/// crossing points computed independently on either side land under the
/// same key. The `boundary` flag marks edges on the physical border of
/// the grid; it participates in identity because boundary and interior
/// edges are never the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub boundary: bool,
}

/// Bit-pattern key so interpolated points can drive exact-value lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PointKey(u64, u64);

impl From<Point2d> for PointKey {
    fn from(p: Point2d) -> Self {
        Self(p.x.to_bits(), p.y.to_bits())
    }
}

/// Resolution of the two ambiguous saddle configurations (diagonally
/// opposite corners above the level). `ConnectLow` joins the below-level
/// corners, producing two disjoint segments that hug the low corners;
/// `ConnectHigh` joins the above-level corners instead. One policy applies
/// uniformly across a whole extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaddlePolicy {
    #[default]
    ConnectLow,
    ConnectHigh,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractConfig {
    pub saddle: SaddlePolicy,
}

/// Scratch state for one extraction pass: crossing points keyed by edge
/// identity, plus the forward link each segment establishes from its
/// entry point to its exit edge.
#[derive(Debug, Default)]
pub(crate) struct CrossingMaps {
    pub(crate) edge_point: BTreeMap<EdgeKey, Point2d>,
    pub(crate) next_edge: HashMap<PointKey, EdgeKey>,
    pub(crate) boundary: BTreeSet<EdgeKey>,
}

impl CrossingMaps {
    fn insert_segment(&mut self, from: EdgeKey, from_pt: Point2d, to: EdgeKey, to_pt: Point2d) {
        self.edge_point.insert(from, from_pt);
        self.next_edge.insert(PointKey::from(from_pt), to);
        self.edge_point.insert(to, to_pt);

        if from.boundary {
            self.boundary.insert(from);
        }
        if to.boundary {
            self.boundary.insert(to);
        }
    }

    pub(crate) fn remove_edge(&mut self, e: EdgeKey) {
        self.edge_point.remove(&e);
        if e.boundary {
            self.boundary.remove(&e);
        }
    }
}

/// Fractional crossing position along an edge with endpoint values
/// `(z0, z1)` at level `z`.
///
/// A sentinel endpoint pins the crossing to the opposite endpoint, which
/// pulls the contour onto the real grid border of a padded grid. The
/// result is always clamped to `[eps, 1 - eps]`.
pub(crate) fn fraction(z0: f64, z1: f64, z: f64) -> f64 {
    let f = if z0 == OUTSIDE {
        0.0
    } else if z1 == OUTSIDE {
        1.0
    } else if z0 != z1 {
        (z - z0) / (z1 - z0)
    } else {
        0.0
    };

    f.max(FRACTION_EPS).min(1.0 - FRACTION_EPS)
}

/// Classifies the cell with upper-left lattice corner `(x, y)` against
/// level `z` and registers its crossing segments.
///
/// Corner values: `ul`/`ur` on row `y`, `ll`/`lr` on row `y + 1`. The
/// 4-bit case sets a bit per corner strictly greater than `z` (ties count
/// as below); cases 0 and 15 produce nothing. NaN corners compare as
/// below any level.
#[allow(clippy::too_many_arguments)]
pub(crate) fn classify_cell(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    ul: f64,
    ur: f64,
    ll: f64,
    lr: f64,
    z: f64,
    saddle: SaddlePolicy,
    maps: &mut CrossingMaps,
) {
    let mut case = 0_u8;
    if ul > z {
        case |= 1;
    }
    if ur > z {
        case |= 2;
    }
    if ll > z {
        case |= 4;
    }
    if lr > z {
        case |= 8;
    }

    if case == 0 || case == 15 {
        return;
    }

    let fx = x as f64;
    let fy = y as f64;

    let t = Point2d {
        x: fx + fraction(ul, ur, z),
        y: fy,
    };
    let b = Point2d {
        x: fx + fraction(ll, lr, z),
        y: fy + 1.0,
    };
    let l = Point2d {
        x: fx,
        y: fy + fraction(ul, ll, z),
    };
    let r = Point2d {
        x: fx + 1.0,
        y: fy + fraction(ur, lr, z),
    };

    let (xi, yi) = (x as i32, y as i32);
    let te = EdgeKey {
        x0: xi,
        y0: yi,
        x1: xi + 1,
        y1: yi,
        boundary: y == 0,
    };
    let be = EdgeKey {
        x0: xi,
        y0: yi + 1,
        x1: xi + 1,
        y1: yi + 1,
        boundary: y + 2 == height,
    };
    let le = EdgeKey {
        x0: xi,
        y0: yi,
        x1: xi,
        y1: yi + 1,
        boundary: x == 0,
    };
    let re = EdgeKey {
        x0: xi + 1,
        y0: yi,
        x1: xi + 1,
        y1: yi + 1,
        boundary: x + 2 == width,
    };

    match case {
        1 => maps.insert_segment(te, t, le, l),
        2 => maps.insert_segment(re, r, te, t),
        3 => maps.insert_segment(re, r, le, l),
        4 => maps.insert_segment(le, l, be, b),
        5 => maps.insert_segment(te, t, be, b),
        6 => match saddle {
            SaddlePolicy::ConnectHigh => {
                maps.insert_segment(le, l, te, t);
                maps.insert_segment(re, r, be, b);
            }
            SaddlePolicy::ConnectLow => {
                maps.insert_segment(re, r, te, t);
                maps.insert_segment(le, l, be, b);
            }
        },
        7 => maps.insert_segment(re, r, be, b),
        8 => maps.insert_segment(be, b, re, r),
        9 => match saddle {
            SaddlePolicy::ConnectHigh => {
                maps.insert_segment(te, t, re, r);
                maps.insert_segment(be, b, le, l);
            }
            SaddlePolicy::ConnectLow => {
                maps.insert_segment(te, t, le, l);
                maps.insert_segment(be, b, re, r);
            }
        },
        10 => maps.insert_segment(be, b, te, t),
        11 => maps.insert_segment(be, b, le, l),
        12 => maps.insert_segment(le, l, re, r),
        13 => maps.insert_segment(te, t, re, r),
        14 => maps.insert_segment(le, l, te, t),
        _ => unreachable!("cases 0 and 15 are filtered above"),
    }
}

#[cfg(test)]
mod tests {
    use super::{CrossingMaps, SaddlePolicy, classify_cell, fraction};
    use iso_core::OUTSIDE;

    #[test]
    fn fraction_interpolates_linearly() {
        assert!((fraction(0.0, 1.0, 0.25) - 0.25).abs() < 1e-12);
        assert!((fraction(1.0, 0.0, 0.25) - 0.75).abs() < 1e-12);
        assert!((fraction(2.0, 6.0, 5.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn fraction_clamps_away_from_lattice_corners() {
        let lo = fraction(0.0, 1.0, 0.0);
        let hi = fraction(0.0, 1.0, 1.0);
        assert!(lo > 0.0 && lo <= 1e-9);
        assert!(hi < 1.0 && hi >= 1.0 - 1e-9);

        // Level outside the edge range clamps the same way.
        assert!(fraction(0.0, 1.0, -5.0) > 0.0);
        assert!(fraction(0.0, 1.0, 5.0) < 1.0);
    }

    #[test]
    fn fraction_pins_to_non_sentinel_endpoint() {
        assert!(fraction(OUTSIDE, 3.0, 1.0) <= 1e-9);
        assert!(fraction(3.0, OUTSIDE, 1.0) >= 1.0 - 1e-9);
    }

    #[test]
    fn fraction_handles_equal_endpoints() {
        // Degenerate edge: no division, just the clamped floor.
        assert!(fraction(2.0, 2.0, 2.0) <= 1e-9);
    }

    #[test]
    fn uniform_cells_register_nothing() {
        let mut maps = CrossingMaps::default();
        classify_cell(
            0,
            0,
            2,
            2,
            1.0,
            1.0,
            1.0,
            1.0,
            5.0,
            SaddlePolicy::ConnectLow,
            &mut maps,
        );
        classify_cell(
            0,
            0,
            2,
            2,
            1.0,
            1.0,
            1.0,
            1.0,
            0.5,
            SaddlePolicy::ConnectLow,
            &mut maps,
        );
        assert!(maps.edge_point.is_empty());
        assert!(maps.next_edge.is_empty());
    }

    #[test]
    fn ties_classify_as_below() {
        // ul == z exactly, others above: case 14, a single segment.
        let mut maps = CrossingMaps::default();
        classify_cell(
            0,
            0,
            2,
            2,
            0.5,
            1.0,
            1.0,
            1.0,
            0.5,
            SaddlePolicy::ConnectLow,
            &mut maps,
        );
        assert_eq!(maps.edge_point.len(), 2);
        assert_eq!(maps.next_edge.len(), 1);
    }

    #[test]
    fn saddle_registers_two_segments() {
        let mut maps = CrossingMaps::default();
        classify_cell(
            0,
            0,
            2,
            2,
            0.0,
            1.0,
            1.0,
            0.0,
            0.5,
            SaddlePolicy::ConnectLow,
            &mut maps,
        );
        assert_eq!(maps.edge_point.len(), 4);
        assert_eq!(maps.next_edge.len(), 2);
    }

    #[test]
    fn adjacent_cells_share_edge_identity() {
        // Vertical gradient on a 3x2 grid: the isoline runs horizontally
        // through both cells, so each computes a crossing on the vertical
        // edge they share and both must land under one key.
        let mut maps = CrossingMaps::default();
        classify_cell(
            0,
            0,
            3,
            2,
            0.0,
            0.0,
            1.0,
            1.0,
            0.5,
            SaddlePolicy::ConnectLow,
            &mut maps,
        );
        let after_left = maps.edge_point.len();
        assert_eq!(after_left, 2);

        classify_cell(
            1,
            0,
            3,
            2,
            0.0,
            0.0,
            1.0,
            1.0,
            0.5,
            SaddlePolicy::ConnectLow,
            &mut maps,
        );

        // The shared edge appears once, so only the right cell's outer
        // edge is new.
        assert_eq!(maps.edge_point.len(), after_left + 1);
    }
}

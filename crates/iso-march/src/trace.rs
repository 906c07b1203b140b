use iso_core::{Contour, ScalarGrid};

use crate::cell::{CrossingMaps, EdgeKey, ExtractConfig, PointKey, classify_cell};

/// Extracts the isolines of `grid` at level `z`.
///
/// A level outside `[minimum, maximum]` is not an error; every cell then
/// classifies uniformly and the result is empty. Contour order and the
/// starting point within a closed loop follow the deterministic lowest
/// edge-key rule, boundary edges first, so repeated extraction over the
/// same grid reproduces identical output.
pub fn extract_contours(grid: &ScalarGrid, z: f64, cfg: &ExtractConfig) -> Vec<Contour> {
    let w = grid.width();
    let h = grid.height();
    if w < 2 || h < 2 {
        return Vec::new();
    }

    let mut maps = CrossingMaps::default();
    for y in 0..h - 1 {
        // Roll the two left corner values along the row so each sample is
        // read once per cell row.
        let mut up = grid.value(0, y);
        let mut lp = grid.value(0, y + 1);
        for x in 0..w - 1 {
            let ul = up;
            let ur = grid.value(x + 1, y);
            let ll = lp;
            let lr = grid.value(x + 1, y + 1);

            up = ur;
            lp = lr;

            classify_cell(x, y, w, h, ul, ur, ll, lr, z, cfg.saddle, &mut maps);
        }
    }

    stitch(maps)
}

/// Extracts with the default configuration.
pub fn contours(grid: &ScalarGrid, z: f64) -> Vec<Contour> {
    extract_contours(grid, z, &ExtractConfig::default())
}

/// Chains registered crossings into maximal polylines.
///
/// Each trace starts at the lowest unconsumed edge key whose point has an
/// outgoing link, preferring boundary edges so open contours on unpadded
/// grids begin and end at the border. Consumed edges are removed as the
/// walk visits them; a closed loop terminates by revisiting its start
/// edge, which re-appends the starting point before removal.
fn stitch(mut maps: CrossingMaps) -> Vec<Contour> {
    let mut out = Vec::new();

    while !maps.edge_point.is_empty() {
        let e0 = pick_start(&maps);
        let p0 = maps.edge_point[&e0];

        let mut contour = Contour {
            points: vec![p0],
        };

        if let Some(&first) = maps.next_edge.get(&PointKey::from(p0)) {
            let mut e = first;
            while let Some(&p) = maps.edge_point.get(&e) {
                contour.points.push(p);
                maps.remove_edge(e);

                match maps.next_edge.get(&PointKey::from(p)) {
                    Some(&next) => e = next,
                    None => break,
                }
            }
        }

        // Open paths never revisit their start edge; drop it here.
        maps.remove_edge(e0);
        out.push(contour);
    }

    out
}

fn pick_start(maps: &CrossingMaps) -> EdgeKey {
    let has_link = |e: &EdgeKey| {
        maps.edge_point
            .get(e)
            .is_some_and(|p| maps.next_edge.contains_key(&PointKey::from(*p)))
    };

    if let Some(&e) = maps.boundary.iter().find(|e| has_link(e)) {
        return e;
    }
    if let Some(&e) = maps.edge_point.keys().find(|e| has_link(e)) {
        return e;
    }

    // Only orphan exit edges remain; consuming them one at a time still
    // terminates the outer loop.
    *maps
        .edge_point
        .keys()
        .next()
        .expect("stitch loop guarantees a non-empty map")
}

//! Moore-neighbour boundary tracing.
//!
//! Produces an ordered outer boundary for a labeled region. The result is
//! an approximation: holes are not modelled, and a region that touches
//! itself only through its start pixel may be closed early.

use solar_common::{PixelCoord, PixelRegion};
use tracing::debug;

/// Neighbour offsets in scan order: E, SE, S, SW, W, NW, N, NE.
///
/// With `y` growing downward this order runs clockwise on screen.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// After a move in direction `d`, the next scan starts at `(d + 6) % 8`,
/// i.e. a quarter turn counter-clockwise, which keeps the walk on the
/// outside of the region.
const BACKTRACK: usize = 6;

/// Outcome of a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryTrace {
    /// Boundary pixels in walk order, starting at the anchor. The start is
    /// not repeated at the end.
    pub points: Vec<PixelCoord>,
    /// True when the walk came back to the anchor; false when it stopped at
    /// the step limit or found no neighbour at all.
    pub closed: bool,
}

/// Dense membership lookup over the region's extent.
struct Membership {
    min: PixelCoord,
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Membership {
    fn new(region: &PixelRegion, min: PixelCoord, max: PixelCoord) -> Self {
        let width = (max.x - min.x + 1) as usize;
        let height = (max.y - min.y + 1) as usize;
        let mut cells = vec![false; width * height];
        for p in region.pixels() {
            cells[(p.y - min.y) as usize * width + (p.x - min.x) as usize] = true;
        }
        Self {
            min,
            width,
            height,
            cells,
        }
    }

    fn contains(&self, p: PixelCoord) -> bool {
        let (lx, ly) = (p.x - self.min.x, p.y - self.min.y);
        if lx < 0 || ly < 0 || lx as usize >= self.width || ly as usize >= self.height {
            return false;
        }
        self.cells[ly as usize * self.width + lx as usize]
    }
}

/// Trace the outer boundary of `region`.
///
/// The walk starts at the leftmost pixel (topmost among ties), so the
/// result does not depend on how the region was discovered. It ends when
/// the walk returns to the start or after `4 * region.len()` moves,
/// whichever comes first; in the latter case the partial walk is returned.
/// The limit is a guard: 4-connected regions from the labeler close well
/// before it.
pub fn trace_boundary(region: &PixelRegion) -> BoundaryTrace {
    walk(region, 4 * region.len())
}

fn walk(region: &PixelRegion, max_steps: usize) -> BoundaryTrace {
    let Some(&start) = region.pixels().iter().min_by_key(|p| (p.x, p.y)) else {
        return BoundaryTrace {
            points: Vec::new(),
            closed: false,
        };
    };
    let Some((min, max)) = region.extent() else {
        return BoundaryTrace {
            points: Vec::new(),
            closed: false,
        };
    };
    let members = Membership::new(region, min, max);

    let mut points = vec![start];
    let mut current = start;
    // Scan as if the walk had just arrived at the start moving east.
    let mut scan_from = BACKTRACK;

    for _ in 0..max_steps {
        let next = (0..8).map(|i| (scan_from + i) % 8).find_map(|dir| {
            let (dx, dy) = DIRECTIONS[dir];
            let candidate = current.offset(dx, dy);
            members.contains(candidate).then_some((candidate, dir))
        });

        let Some((candidate, dir)) = next else {
            // Isolated pixel
            return BoundaryTrace {
                points,
                closed: false,
            };
        };

        if candidate == start {
            return BoundaryTrace {
                points,
                closed: true,
            };
        }

        points.push(candidate);
        current = candidate;
        scan_from = (dir + BACKTRACK) % 8;
    }

    debug!(
        region_pixels = region.len(),
        traced = points.len(),
        "Boundary trace hit step limit"
    );

    BoundaryTrace {
        points,
        closed: false,
    }
}

/// Ordered outer boundary of `region`; see [`trace_boundary`].
pub fn trace(region: &PixelRegion) -> Vec<PixelCoord> {
    trace_boundary(region).points
}

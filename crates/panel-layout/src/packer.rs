//! Grid packing of rectangular panels into a roof polygon.
//!
//! Panels are laid on a grid rotated to the polygon's principal angle (the
//! bearing of its longest edge) and centred on the polygon's vertex mean.
//! Work happens in a local metric frame; containment is decided on the
//! geographic corners that are finally emitted, so every returned panel
//! satisfies the containment checks exactly as a consumer would run them.

use nalgebra::{Rotation2, Vector2};
use projection::LocalFrame;
use rayon::prelude::*;
use solar_common::{geometry, ExclusionZone, GeoPoint, PanelFootprint, SolarError, SolarResult};
use tracing::{debug, instrument, warn};

use crate::config::PackingConfig;
use crate::request::{PackingRequest, PackingResult};

/// Grid offsets, in steps, tried when phase search is on. The unshifted
/// grid comes first so it wins ties.
const PHASES: [(f64, f64); 4] = [(0.0, 0.0), (0.5, 0.0), (0.0, 0.5), (0.5, 0.5)];

/// Upper bound on candidate cells per phase. Building-scale roofs with
/// real panel sizes stay several orders of magnitude below it.
pub const MAX_GRID_CELLS: f64 = 4_000_000.0;

/// Lay out panels for `req`.
///
/// Never fails: an invalid request is logged and yields no panels, as does
/// a degenerate or too-small polygon. Use [`try_pack`] to see validation
/// errors.
pub fn pack(req: &PackingRequest, config: &PackingConfig) -> PackingResult {
    match try_pack(req, config) {
        Ok(panels) => panels,
        Err(e) => {
            warn!(error = %e, "Rejected packing request");
            Vec::new()
        }
    }
}

/// Pack several independent requests, one result per request in order.
pub fn pack_all(requests: &[PackingRequest], config: &PackingConfig) -> Vec<PackingResult> {
    requests.par_iter().map(|req| pack(req, config)).collect()
}

/// Lay out panels for `req`, reporting invalid requests or configuration.
///
/// Candidates are visited row by row over the rotated grid, so the result
/// is reproducible for identical input. A candidate is kept only if all four
/// corners are inside the target polygon and none is inside an exclusion
/// zone; partially covered panels are never emitted. Packing stops once
/// `max_panels` panels are accepted.
///
/// The target ring may repeat its first vertex at the end. Inputs are
/// expected at building scale: a lattice of more than [`MAX_GRID_CELLS`]
/// candidates is rejected with `InvalidParameter`.
#[instrument(skip_all, fields(vertices = req.target_polygon.len()))]
pub fn try_pack(req: &PackingRequest, config: &PackingConfig) -> SolarResult<PackingResult> {
    req.validate()?;
    config.validate().map_err(SolarError::config)?;

    let target = geometry::open_ring(&req.target_polygon);
    if !geometry::is_valid_ring(target) || req.max_panels == Some(0) {
        return Ok(Vec::new());
    }
    let Some(origin) = geometry::centroid(target) else {
        return Ok(Vec::new());
    };

    let frame = LocalFrame::new(origin);
    let local: Vec<(f64, f64)> = target.iter().map(|p| frame.to_local(*p)).collect();

    let radius = local
        .iter()
        .map(|&(x, y)| (x * x + y * y).sqrt())
        .fold(0.0, f64::max);
    if radius == 0.0 {
        return Ok(Vec::new());
    }

    let grid = CandidateGrid::new(req, config, principal_angle(&local), radius)?;
    let phases: &[(f64, f64)] = if config.phase_search {
        &PHASES
    } else {
        &PHASES[..1]
    };

    let mut best: PackingResult = Vec::new();
    for &phase in phases {
        let panels = grid.fill(req, target, &frame, phase);
        debug!(phase_u = phase.0, phase_v = phase.1, panels = panels.len(), "Packed grid phase");
        if panels.len() > best.len() {
            best = panels;
        }
    }

    debug!(
        angle_deg = grid.angle.to_degrees(),
        panels = best.len(),
        exclusions = req.exclusions.len(),
        "Packing complete"
    );

    Ok(best)
}

/// Bearing, in radians from the local x (east) axis, of the longest edge
/// of a ring including its closing edge. The first longest edge wins ties.
pub fn principal_angle(ring: &[(f64, f64)]) -> f64 {
    let mut best_len = -1.0;
    let mut angle = 0.0;
    for i in 0..ring.len() {
        let (ax, ay) = ring[i];
        let (bx, by) = ring[(i + 1) % ring.len()];
        let (dx, dy) = (bx - ax, by - ay);
        let len = dx * dx + dy * dy;
        if len > best_len {
            best_len = len;
            angle = dy.atan2(dx);
        }
    }
    angle
}

/// Rotated lattice of candidate panel centres around the local origin.
struct CandidateGrid {
    angle: f64,
    rotation: Rotation2<f64>,
    step_u: f64,
    step_v: f64,
    half_u: i64,
    half_v: i64,
    /// Panel corners relative to its centre, before rotation.
    corner_offsets: [Vector2<f64>; 4],
}

impl CandidateGrid {
    fn new(
        req: &PackingRequest,
        config: &PackingConfig,
        angle: f64,
        radius: f64,
    ) -> SolarResult<Self> {
        let step_u = req.panel_width_m + req.gap_m;
        let step_v = req.panel_height_m + req.gap_m;
        let reach = radius * config.grid_margin_factor;
        let (hw, hh) = (req.panel_width_m / 2.0, req.panel_height_m / 2.0);

        let (half_u, half_v) = ((reach / step_u).ceil(), (reach / step_v).ceil());
        let cells = (2.0 * half_u + 1.0) * (2.0 * half_v + 1.0);
        if cells > MAX_GRID_CELLS {
            return Err(SolarError::invalid_parameter(
                "targetPolygon",
                format!(
                    "{:.0} m across needs {:.0} candidate cells per phase, limit is {:.0}",
                    2.0 * radius,
                    cells,
                    MAX_GRID_CELLS
                ),
            ));
        }

        Ok(Self {
            angle,
            rotation: Rotation2::new(angle),
            step_u,
            step_v,
            half_u: half_u as i64,
            half_v: half_v as i64,
            corner_offsets: [
                Vector2::new(-hw, -hh),
                Vector2::new(hw, -hh),
                Vector2::new(hw, hh),
                Vector2::new(-hw, hh),
            ],
        })
    }

    /// Accept candidates at the given phase, row-major over the grid.
    fn fill(
        &self,
        req: &PackingRequest,
        target: &[GeoPoint],
        frame: &LocalFrame,
        phase: (f64, f64),
    ) -> PackingResult {
        let mut panels = Vec::new();

        for j in -self.half_v..=self.half_v {
            for i in -self.half_u..=self.half_u {
                let center = Vector2::new(
                    (i as f64 + phase.0) * self.step_u,
                    (j as f64 + phase.1) * self.step_v,
                );
                let footprint = self.footprint(center, frame);

                if accepts(&footprint, target, &req.exclusions) {
                    panels.push(footprint);
                    if req.max_panels.is_some_and(|max| panels.len() >= max) {
                        return panels;
                    }
                }
            }
        }

        panels
    }

    /// Resolve the four geographic corners of a panel centred at
    /// `center` (grid coordinates).
    fn footprint(&self, center: Vector2<f64>, frame: &LocalFrame) -> PanelFootprint {
        let corners = self.corner_offsets.map(|offset| {
            let p = self.rotation * (center + offset);
            frame.to_geo(p.x, p.y)
        });
        PanelFootprint { corners }
    }
}

fn accepts(
    footprint: &PanelFootprint,
    target: &[GeoPoint],
    exclusions: &[ExclusionZone],
) -> bool {
    let inside = |poly: &[GeoPoint]| {
        footprint
            .corners
            .iter()
            .all(|c| geometry::contains(*c, poly))
    };
    let touches = |poly: &[GeoPoint]| {
        footprint
            .corners
            .iter()
            .any(|c| geometry::contains(*c, poly))
    };

    inside(target) && !exclusions.iter().any(|zone| touches(&zone.polygon))
}

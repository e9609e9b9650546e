//! Hand-drawn roof outline session.
//!
//! A user clicks out a polygon vertex by vertex, closes it, then asks for a
//! panel layout. The session only holds application state; all geometry is
//! delegated to the packing engine.

use panel_layout::{try_pack, PackingConfig, PackingRequest, PackingResult};
use serde::Serialize;
use solar_common::{geometry, ExclusionZone, GeoPoint, PanelFootprint, SolarError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Drawing,
    Complete,
    Packed,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {action} while the session is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("Outline needs at least 3 distinct vertices, has {0}")]
    TooFewVertices(usize),

    #[error("Packing failed: {0}")]
    Packing(#[from] SolarError),
}

/// Panel dimensions used when packing a drawn outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub width_m: f64,
    pub height_m: f64,
    pub gap_m: f64,
}

/// Drawing session: `Idle -> Drawing -> Complete -> Packed`.
///
/// A failed operation leaves the session exactly as it was.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    state: SessionState,
    vertices: Vec<GeoPoint>,
    exclusions: Vec<ExclusionZone>,
    panels: PackingResult,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            vertices: Vec::new(),
            exclusions: Vec::new(),
            panels: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn panels(&self) -> &[PanelFootprint] {
        &self.panels
    }

    /// Begin a new outline.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect_state("start drawing", &[SessionState::Idle])?;
        self.state = SessionState::Drawing;
        Ok(())
    }

    pub fn add_vertex(&mut self, point: GeoPoint) -> Result<(), SessionError> {
        self.expect_state("add a vertex", &[SessionState::Drawing])?;
        self.vertices.push(point);
        Ok(())
    }

    /// Mark an area to keep clear. Allowed while Drawing or Complete.
    pub fn add_exclusion(&mut self, zone: ExclusionZone) -> Result<(), SessionError> {
        self.expect_state(
            "add an exclusion",
            &[SessionState::Drawing, SessionState::Complete],
        )?;
        self.exclusions.push(zone);
        Ok(())
    }

    /// Close the outline. A final click back on the first vertex is
    /// dropped rather than kept as a duplicate.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        self.expect_state("finish the outline", &[SessionState::Drawing])?;
        let ring = geometry::open_ring(&self.vertices);
        if !geometry::is_valid_ring(ring) {
            return Err(SessionError::TooFewVertices(ring.len()));
        }
        let len = ring.len();
        self.vertices.truncate(len);
        self.state = SessionState::Complete;
        Ok(())
    }

    /// Lay out panels on the closed outline. Packing again from `Packed`
    /// replaces the previous layout.
    pub fn pack(
        &mut self,
        panel: &PanelSpec,
        config: &PackingConfig,
    ) -> Result<&[PanelFootprint], SessionError> {
        self.expect_state(
            "pack panels",
            &[SessionState::Complete, SessionState::Packed],
        )?;

        let mut request = PackingRequest::new(self.vertices.clone(), panel.width_m, panel.height_m)
            .with_gap(panel.gap_m);
        request.exclusions = self.exclusions.clone();

        self.panels = try_pack(&request, config)?;
        self.state = SessionState::Packed;
        debug!(panels = self.panels.len(), "Packed drawn outline");

        Ok(&self.panels)
    }

    /// Discard everything and return to `Idle`. Always succeeds.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn expect_state(
        &self,
        action: &'static str,
        allowed: &[SessionState],
    ) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }
}

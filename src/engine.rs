//! The viewport engine: one owner for config, pan/zoom state and cached coordinates.

use crate::Entity;
use crate::config::ViewportConfig;
use crate::error::{ConfigError, ViewportError};
use crate::projection::{Coordinate, CoordinateCache, Coordinates};
use crate::viewport::{PanDirection, ViewportCommand, ViewportState, compute_visible_with_tolerance};

/// Places entities on the map and answers which of them are in view.
///
/// Callers drive it explicitly: change the entity list or issue a viewport
/// command, then call [`visible`](Self::visible) again. Coordinates are only
/// re-derived when the ordered id list changes.
#[derive(Debug, Default)]
pub struct ViewportEngine {
    config: ViewportConfig,
    state: ViewportState,
    cache: CoordinateCache,
}

impl ViewportEngine {
    /// Creates an engine with the reference config at zoom 1, no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom config, starting at its minimum zoom.
    pub fn with_config(config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = ViewportState::new();
        state.reset(&config);
        Ok(Self {
            config,
            state,
            cache: CoordinateCache::new(),
        })
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn zoom_in(&mut self) {
        self.apply(ViewportCommand::ZoomIn);
    }

    pub fn zoom_out(&mut self) {
        self.apply(ViewportCommand::ZoomOut);
    }

    pub fn reset(&mut self) {
        self.apply(ViewportCommand::Reset);
    }

    pub fn pan(&mut self, direction: PanDirection) {
        self.apply(ViewportCommand::Pan(direction));
    }

    pub fn apply(&mut self, command: ViewportCommand) {
        self.state.apply(command, &self.config);
        let pan = self.state.pan_offset();
        log::debug!(
            "{command}: zoom {:.2}, pan ({:.1}, {:.1})",
            self.state.zoom(),
            pan.x,
            pan.y
        );
    }

    /// Parses and applies a textual command such as `zoom-in` or `pan-left`.
    ///
    /// Unrecognised input leaves the state untouched.
    pub fn execute(&mut self, command: &str) -> Result<ViewportCommand, ViewportError> {
        let command = command.parse()?;
        self.apply(command);
        Ok(command)
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), ViewportError> {
        self.state.set_zoom(zoom, &self.config)?;
        log::debug!("set zoom: {:.2}", self.state.zoom());
        Ok(())
    }

    pub fn set_pan(&mut self, x: f64, y: f64) -> Result<(), ViewportError> {
        self.state.set_pan(x, y)?;
        log::debug!("set pan: ({x:.1}, {y:.1})");
        Ok(())
    }

    /// Coordinates for `entities`, derived once per distinct id list.
    pub fn coordinates<E: Entity>(&mut self, entities: &[E]) -> &Coordinates {
        self.cache.coordinates(entities)
    }

    /// The entities currently in view, in their original order.
    pub fn visible<'a, E: Entity>(&mut self, entities: &'a [E]) -> Vec<&'a E> {
        let coordinates = self.cache.coordinates(entities);
        let visible =
            compute_visible_with_tolerance(entities, coordinates, &self.state, self.config.tolerance);
        log::trace!("{} of {} entities visible", visible.len(), entities.len());
        visible
    }

    /// Where a plane coordinate lands in the viewport under the current state.
    pub fn screen_position(&self, coordinate: Coordinate) -> Coordinate {
        self.state.transform(coordinate)
    }
}

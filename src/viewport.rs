//! Pan/zoom state and the visibility test built on it.
//!
//! The transform scales each coordinate's offset from the origin by `zoom`
//! and then shifts it by `pan`. A point is visible when the result lands
//! inside `[0, 100]` on both axes, widened by a tolerance band so pins near
//! the edge don't flicker in and out.
//!
//! Pan moves the viewport, so content slides the opposite way on screen
//! (where y grows downward): panning up adds to `pan.y`, down subtracts,
//! left adds to `pan.x`, right subtracts.

use crate::Entity;
use crate::config::ViewportConfig;
use crate::constants::{ORIGIN, PAN_STEP, VIEWPORT_SIZE, VISIBILITY_TOLERANCE};
use crate::error::ViewportError;
use crate::projection::{Coordinate, Coordinates};
use std::fmt;
use std::str::FromStr;

/// Direction of a discrete pan command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Whole-step change applied to `(pan.x, pan.y)`.
    pub fn steps(self) -> (i64, i64) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (1, 0),
            Self::Right => (-1, 0),
        }
    }

    /// Unit change applied to `(pan.x, pan.y)`.
    pub fn unit(self) -> (f64, f64) {
        let (dx, dy) = self.steps();
        (dx as f64, dy as f64)
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for PanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanDirection {
    type Err = ViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ViewportError::InvalidDirection(trimmed.to_owned()))
    }
}

/// One discrete viewport transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportCommand {
    ZoomIn,
    ZoomOut,
    Reset,
    Pan(PanDirection),
}

impl fmt::Display for ViewportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoomIn => f.write_str("zoom-in"),
            Self::ZoomOut => f.write_str("zoom-out"),
            Self::Reset => f.write_str("reset"),
            Self::Pan(direction) => write!(f, "pan-{direction}"),
        }
    }
}

impl FromStr for ViewportCommand {
    type Err = ViewportError;

    /// Accepts `zoom-in`/`in`/`+`, `zoom-out`/`out`/`-`, `reset`/`fit`/`0`,
    /// and a direction either bare (`up`) or prefixed (`pan-up`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = s.trim().to_ascii_lowercase();
        match command.as_str() {
            "zoom-in" | "in" | "+" => return Ok(Self::ZoomIn),
            "zoom-out" | "out" | "-" => return Ok(Self::ZoomOut),
            "reset" | "fit" | "0" => return Ok(Self::Reset),
            _ => {}
        }

        if let Some(direction) = command.strip_prefix("pan-") {
            return direction.parse().map(Self::Pan);
        }

        command
            .parse()
            .map(Self::Pan)
            .map_err(|_| ViewportError::UnknownCommand(s.trim().to_owned()))
    }
}

/// Translation applied after zoom, in plane units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

impl PanOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// Current zoom and pan of a viewport.
///
/// Only [`ViewportEngine`](crate::ViewportEngine) changes a state, always
/// against its validated config, so zoom stays within the configured limits
/// (never below 1) and pan stays finite.
///
/// Directional pans are kept as whole steps on top of the offset last given
/// to `set_pan`, so opposite pans cancel exactly from any starting offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    zoom: f64,
    pan_base: PanOffset,
    pan_steps: (i64, i64),
    pan_step: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::INITIAL
    }
}

fn pan_axis(base: f64, steps: i64, step: f64) -> f64 {
    if steps == 0 {
        base
    } else {
        base + steps as f64 * step
    }
}

impl ViewportState {
    /// Zoom 1 with no pan.
    pub const INITIAL: Self = Self {
        zoom: 1.0,
        pan_base: PanOffset::ZERO,
        pan_steps: (0, 0),
        pan_step: PAN_STEP,
    };

    pub fn new() -> Self {
        Self::INITIAL
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan_offset(&self) -> PanOffset {
        PanOffset {
            x: pan_axis(self.pan_base.x, self.pan_steps.0, self.pan_step),
            y: pan_axis(self.pan_base.y, self.pan_steps.1, self.pan_step),
        }
    }

    pub(crate) fn zoom_in(&mut self, config: &ViewportConfig) {
        self.zoom = (self.zoom + config.zoom_step).min(config.max_zoom);
    }

    pub(crate) fn zoom_out(&mut self, config: &ViewportConfig) {
        self.zoom = (self.zoom - config.zoom_step).max(config.min_zoom);
    }

    /// Back to minimum zoom with no pan.
    pub(crate) fn reset(&mut self, config: &ViewportConfig) {
        self.zoom = config.min_zoom;
        self.pan_base = PanOffset::ZERO;
        self.pan_steps = (0, 0);
        self.pan_step = config.pan_step;
    }

    pub(crate) fn pan(&mut self, direction: PanDirection, config: &ViewportConfig) {
        if self.pan_step != config.pan_step {
            self.pan_base = self.pan_offset();
            self.pan_steps = (0, 0);
            self.pan_step = config.pan_step;
        }
        let (dx, dy) = direction.steps();
        self.pan_steps.0 = self.pan_steps.0.saturating_add(dx);
        self.pan_steps.1 = self.pan_steps.1.saturating_add(dy);
    }

    pub(crate) fn apply(&mut self, command: ViewportCommand, config: &ViewportConfig) {
        match command {
            ViewportCommand::ZoomIn => self.zoom_in(config),
            ViewportCommand::ZoomOut => self.zoom_out(config),
            ViewportCommand::Reset => self.reset(config),
            ViewportCommand::Pan(direction) => self.pan(direction, config),
        }
    }

    /// Sets zoom directly, clamped into the configured range.
    ///
    /// Non-finite values are rejected and the current zoom is kept.
    pub(crate) fn set_zoom(
        &mut self,
        zoom: f64,
        config: &ViewportConfig,
    ) -> Result<(), ViewportError> {
        if !zoom.is_finite() {
            return Err(ViewportError::NonFinite {
                field: "zoom",
                value: zoom,
            });
        }
        self.zoom = zoom.clamp(config.min_zoom, config.max_zoom);
        Ok(())
    }

    /// Sets pan directly. Non-finite values on either axis are rejected.
    pub(crate) fn set_pan(&mut self, x: f64, y: f64) -> Result<(), ViewportError> {
        if !x.is_finite() {
            return Err(ViewportError::NonFinite {
                field: "pan.x",
                value: x,
            });
        }
        if !y.is_finite() {
            return Err(ViewportError::NonFinite {
                field: "pan.y",
                value: y,
            });
        }
        self.pan_base = PanOffset { x, y };
        self.pan_steps = (0, 0);
        Ok(())
    }

    /// Where `coordinate` lands after zoom and pan.
    pub fn transform(&self, coordinate: Coordinate) -> Coordinate {
        let pan = self.pan_offset();
        Coordinate {
            x: ORIGIN + (coordinate.x - ORIGIN) * self.zoom + pan.x,
            y: ORIGIN + (coordinate.y - ORIGIN) * self.zoom + pan.y,
        }
    }

    /// Whether `coordinate` lands within the viewport widened by `tolerance`.
    pub fn is_visible(&self, coordinate: Coordinate, tolerance: f64) -> bool {
        let screen = self.transform(coordinate);
        let range = -tolerance..=VIEWPORT_SIZE + tolerance;
        range.contains(&screen.x) && range.contains(&screen.y)
    }
}

/// Entities visible under `viewport` with the reference 5 unit tolerance.
///
/// Order is preserved. Entities without an entry in `coordinates` are
/// treated as unplaceable and left out.
pub fn compute_visible<'a, E: Entity>(
    entities: &'a [E],
    coordinates: &Coordinates,
    viewport: &ViewportState,
) -> Vec<&'a E> {
    compute_visible_with_tolerance(entities, coordinates, viewport, VISIBILITY_TOLERANCE)
}

/// [`compute_visible`] with an explicit tolerance band.
pub fn compute_visible_with_tolerance<'a, E: Entity>(
    entities: &'a [E],
    coordinates: &Coordinates,
    viewport: &ViewportState,
    tolerance: f64,
) -> Vec<&'a E> {
    entities
        .iter()
        .filter(|entity| {
            coordinates
                .get(entity.id())
                .is_some_and(|&coordinate| viewport.is_visible(coordinate, tolerance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::derive_coordinates;

    const CONFIG: ViewportConfig = ViewportConfig::REFERENCE;

    fn ids<'a>(visible: &[&&'a str]) -> Vec<&'a str> {
        visible.iter().map(|id| **id).collect()
    }

    #[test]
    fn starts_at_identity() {
        let state = ViewportState::new();
        assert_eq!(state.zoom(), 1.0);
        assert_eq!(state.pan_offset(), PanOffset::ZERO);
        assert_eq!(state, ViewportState::default());
    }

    #[test]
    fn zoom_in_clamps_at_max() {
        let mut state = ViewportState::new();
        for _ in 0..8 {
            state.zoom_in(&CONFIG);
        }
        assert_eq!(state.zoom(), 4.0);
        state.zoom_in(&CONFIG);
        assert_eq!(state.zoom(), 4.0);
    }

    #[test]
    fn zoom_out_clamps_at_min() {
        let mut state = ViewportState::new();
        state.zoom_in(&CONFIG);
        state.zoom_out(&CONFIG);
        state.zoom_out(&CONFIG);
        assert_eq!(state.zoom(), 1.0);
    }

    #[test]
    fn pan_follows_direction_convention() {
        let mut state = ViewportState::new();
        state.pan(PanDirection::Up, &CONFIG);
        assert_eq!(state.pan_offset(), PanOffset { x: 0.0, y: 20.0 });
        state.pan(PanDirection::Right, &CONFIG);
        state.pan(PanDirection::Right, &CONFIG);
        assert_eq!(state.pan_offset(), PanOffset { x: -40.0, y: 20.0 });
        state.pan(PanDirection::Left, &CONFIG);
        state.pan(PanDirection::Down, &CONFIG);
        assert_eq!(state.pan_offset(), PanOffset { x: -20.0, y: 0.0 });
    }

    #[test]
    fn opposite_directions_cancel() {
        for direction in PanDirection::ALL {
            let mut state = ViewportState::new();
            state.pan(direction, &CONFIG);
            state.pan(direction.opposite(), &CONFIG);
            assert_eq!(state.pan_offset(), PanOffset::ZERO, "{direction}");
        }
    }

    #[test]
    fn opposite_pans_cancel_from_an_off_grid_offset() {
        let mut state = ViewportState::new();
        state.set_pan(0.1, -7.3).unwrap();
        let before = state.pan_offset();

        for direction in PanDirection::ALL {
            state.pan(direction, &CONFIG);
            state.pan(direction.opposite(), &CONFIG);
            assert_eq!(state.pan_offset().x.to_bits(), before.x.to_bits());
            assert_eq!(state.pan_offset().y.to_bits(), before.y.to_bits());
        }

        state.pan(PanDirection::Up, &CONFIG);
        state.pan(PanDirection::Up, &CONFIG);
        assert_eq!(state.pan_offset(), PanOffset { x: 0.1, y: -7.3 + 40.0 });
    }

    #[test]
    fn set_pan_replaces_accumulated_steps() {
        let mut state = ViewportState::new();
        state.pan(PanDirection::Left, &CONFIG);
        state.pan(PanDirection::Down, &CONFIG);
        state.set_pan(3.0, 4.0).unwrap();
        assert_eq!(state.pan_offset(), PanOffset { x: 3.0, y: 4.0 });
        state.pan(PanDirection::Right, &CONFIG);
        assert_eq!(state.pan_offset(), PanOffset { x: -17.0, y: 4.0 });
    }

    #[test]
    fn changing_pan_step_keeps_the_current_offset() {
        let coarse = ViewportConfig {
            pan_step: 50.0,
            ..CONFIG
        };
        let mut state = ViewportState::new();
        state.pan(PanDirection::Up, &CONFIG);
        state.pan(PanDirection::Up, &coarse);
        assert_eq!(state.pan_offset(), PanOffset { x: 0.0, y: 70.0 });
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut state = ViewportState::new();
        state.apply(ViewportCommand::ZoomIn, &CONFIG);
        state.apply(ViewportCommand::Pan(PanDirection::Left), &CONFIG);
        state.apply(ViewportCommand::Reset, &CONFIG);
        assert_eq!(state, ViewportState::INITIAL);
        state.reset(&CONFIG);
        assert_eq!(state, ViewportState::INITIAL);
    }

    #[test]
    fn set_zoom_clamps_finite_values() {
        let mut state = ViewportState::new();
        state.set_zoom(10.0, &CONFIG).unwrap();
        assert_eq!(state.zoom(), 4.0);
        state.set_zoom(0.25, &CONFIG).unwrap();
        assert_eq!(state.zoom(), 1.0);
        state.set_zoom(2.25, &CONFIG).unwrap();
        assert_eq!(state.zoom(), 2.25);
    }

    #[test]
    fn non_finite_setters_keep_last_state() {
        let mut state = ViewportState::new();
        state.set_zoom(2.0, &CONFIG).unwrap();
        state.set_pan(15.0, -5.0).unwrap();
        let before = state;

        assert!(matches!(
            state.set_zoom(f64::NAN, &CONFIG),
            Err(ViewportError::NonFinite { field: "zoom", .. })
        ));
        assert!(matches!(
            state.set_pan(f64::INFINITY, 0.0),
            Err(ViewportError::NonFinite { field: "pan.x", .. })
        ));
        assert!(matches!(
            state.set_pan(0.0, f64::NEG_INFINITY),
            Err(ViewportError::NonFinite { field: "pan.y", .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn parses_commands() {
        assert_eq!("zoom-in".parse::<ViewportCommand>(), Ok(ViewportCommand::ZoomIn));
        assert_eq!("+".parse::<ViewportCommand>(), Ok(ViewportCommand::ZoomIn));
        assert_eq!(" OUT ".parse::<ViewportCommand>(), Ok(ViewportCommand::ZoomOut));
        assert_eq!("fit".parse::<ViewportCommand>(), Ok(ViewportCommand::Reset));
        assert_eq!(
            "Up".parse::<ViewportCommand>(),
            Ok(ViewportCommand::Pan(PanDirection::Up))
        );
        assert_eq!(
            "pan-left".parse::<ViewportCommand>(),
            Ok(ViewportCommand::Pan(PanDirection::Left))
        );
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!(
            "pan-north".parse::<ViewportCommand>(),
            Err(ViewportError::InvalidDirection("north".to_owned()))
        );
        assert_eq!(
            "spin".parse::<ViewportCommand>(),
            Err(ViewportError::UnknownCommand("spin".to_owned()))
        );
        assert_eq!(
            "sideways".parse::<PanDirection>(),
            Err(ViewportError::InvalidDirection("sideways".to_owned()))
        );
    }

    #[test]
    fn command_display_round_trips() {
        let commands = [
            ViewportCommand::ZoomIn,
            ViewportCommand::ZoomOut,
            ViewportCommand::Reset,
            ViewportCommand::Pan(PanDirection::Down),
        ];
        for command in commands {
            assert_eq!(command.to_string().parse::<ViewportCommand>(), Ok(command));
        }
    }

    #[test]
    fn transform_scales_then_pans() {
        let mut state = ViewportState::new();
        state.set_zoom(2.0, &CONFIG).unwrap();
        state.set_pan(10.0, -10.0).unwrap();
        let screen = state.transform(Coordinate::new(60.0, 45.0));
        assert_eq!(screen, Coordinate::new(80.0, 30.0));
        assert_eq!(state.transform(Coordinate::ORIGIN), Coordinate::new(60.0, 40.0));
    }

    #[test]
    fn tolerance_band_is_inclusive() {
        let state = ViewportState::new();
        assert!(state.is_visible(Coordinate::new(-5.0, 105.0), 5.0));
        assert!(!state.is_visible(Coordinate::new(-5.000001, 50.0), 5.0));
        assert!(!state.is_visible(Coordinate::new(50.0, 105.000001), 5.0));
        assert!(!state.is_visible(Coordinate::new(-5.0, 50.0), 0.0));
    }

    #[test]
    fn identity_shows_everything() {
        let entities = ["a", "b", "req-1", "off-2", "a-much-longer-identifier"];
        let coordinates = derive_coordinates(&entities);
        let visible = compute_visible(&entities, &coordinates, &ViewportState::new());
        assert_eq!(ids(&visible), entities.to_vec());
    }

    #[test]
    fn max_zoom_keeps_only_near_entities() {
        // "a" sits 41 units out, "d" only 8.
        let entities = ["a", "d"];
        let coordinates = derive_coordinates(&entities);
        let mut state = ViewportState::new();
        state.set_zoom(4.0, &CONFIG).unwrap();

        let visible = compute_visible(&entities, &coordinates, &state);
        assert_eq!(ids(&visible), vec!["d"]);
    }

    #[test]
    fn golden_scenario_at_identity() {
        let entities = ["a", "b"];
        let coordinates = derive_coordinates(&entities);
        let visible = compute_visible(&entities, &coordinates, &ViewportState::new());
        assert_eq!(ids(&visible), vec!["a", "b"]);
    }

    #[test]
    fn panning_can_hide_and_reveal() {
        // "a" is at x ~= 10.6; panning the viewport left pushes content right.
        let entities = ["a"];
        let coordinates = derive_coordinates(&entities);
        let mut state = ViewportState::new();
        state.set_zoom(2.0, &CONFIG).unwrap();
        assert!(compute_visible(&entities, &coordinates, &state).is_empty());

        state.pan(PanDirection::Left, &CONFIG);
        state.pan(PanDirection::Left, &CONFIG);
        assert_eq!(ids(&compute_visible(&entities, &coordinates, &state)), vec!["a"]);
    }

    #[test]
    fn unplaced_entities_are_not_visible() {
        let coordinates = derive_coordinates(&["a"]);
        let entities = ["a", "b"];
        let visible = compute_visible(&entities, &coordinates, &ViewportState::new());
        assert_eq!(ids(&visible), vec!["a"]);
    }
}

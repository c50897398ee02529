//! Rendering of the visible set as text or JSON.

use meal_map::{Coordinates, Entity, Listing, ViewerRole, ViewportEngine, VisibleSummary};
use serde::Serialize;

/// A pin in view, with its plane and screen positions.
#[derive(Debug, Serialize)]
pub struct VisiblePin<'a> {
    pub id: &'a str,
    pub kind: &'static str,
    pub description: &'a str,
    pub x: f64,
    pub y: f64,
    pub screen_x: f64,
    pub screen_y: f64,
}

/// Snapshot of the viewport after a command.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub headline: String,
    pub placed: usize,
    pub visible: Vec<VisiblePin<'a>>,
}

impl<'a> Report<'a> {
    pub fn build(
        engine: &mut ViewportEngine,
        listings: &[&'a Listing],
        role: ViewerRole,
    ) -> Self {
        let visible: Vec<&'a Listing> = engine.visible(listings).into_iter().copied().collect();
        let summary = VisibleSummary::from_listings(visible.iter().copied());
        let coordinates: Coordinates = engine.coordinates(listings).clone();
        let state = engine.state();

        let pins = visible
            .into_iter()
            .filter_map(|listing| {
                let coordinate = *coordinates.get(listing.id())?;
                let screen = engine.screen_position(coordinate);
                Some(VisiblePin {
                    id: listing.id(),
                    kind: listing.kind_label(),
                    description: listing.description(),
                    x: coordinate.x,
                    y: coordinate.y,
                    screen_x: screen.x,
                    screen_y: screen.y,
                })
            })
            .collect();

        Self {
            zoom: state.zoom(),
            pan_x: state.pan_offset().x,
            pan_y: state.pan_offset().y,
            headline: summary.headline(role),
            placed: listings.len(),
            visible: pins,
        }
    }

    pub fn print_text(&self) {
        println!(
            "zoom {:.1}x | pan ({:+.0}, {:+.0}) | {} ({} on map)",
            self.zoom, self.pan_x, self.pan_y, self.headline, self.placed
        );
        for pin in &self.visible {
            println!(
                "  {:<8} {:<8} ({:5.1}, {:5.1})  {}",
                pin.kind,
                pin.id,
                pin.screen_x,
                pin.screen_y,
                truncate(pin.description, 60)
            );
        }
    }

    pub fn print_json(&self) -> Result<(), serde_json::Error> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

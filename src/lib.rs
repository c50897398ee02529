//! Deterministic map placement and viewport visibility for meal listings.
//!
//! Listings are placed on a `[0, 100] x [0, 100]` plane purely from their id,
//! then a pan/zoom viewport decides which of them are in view. See
//! [`ViewportEngine`] for the usual entry point.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod filter;
pub mod projection;
pub mod viewport;

pub use config::ViewportConfig;
pub use engine::ViewportEngine;
pub use error::{ConfigError, ParseLabelError, ViewportError};
pub use filter::{KindFilter, ListingFilter, ViewerRole, VisibleSummary};
pub use projection::{Coordinate, CoordinateCache, Coordinates, derive_coordinates};
pub use viewport::{PanDirection, PanOffset, ViewportCommand, ViewportState, compute_visible};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anything that can be placed on the map. Only the id is ever read.
pub trait Entity {
    /// Stable id, unique within the collection being placed.
    fn id(&self) -> &str;
}

impl Entity for str {
    fn id(&self) -> &str {
        self
    }
}

impl Entity for String {
    fn id(&self) -> &str {
        self
    }
}

impl<T: Entity + ?Sized> Entity for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}

/// Dietary preferences a seeker can ask for or a donor can cater to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    HinduVeg,
    JainVeg,
    Halal,
    Kosher,
    GlutenFree,
    NutFree,
    NoRestrictions,
}

impl DietaryPreference {
    pub const ALL: [Self; 9] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::HinduVeg,
        Self::JainVeg,
        Self::Halal,
        Self::Kosher,
        Self::GlutenFree,
        Self::NutFree,
        Self::NoRestrictions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::HinduVeg => "Hindu Veg (No Egg)",
            Self::JainVeg => "Jain Veg (No Root Veg)",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
            Self::GlutenFree => "Gluten Free",
            Self::NutFree => "Nut Free",
            Self::NoRestrictions => "No Restrictions",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::HinduVeg => "hindu-veg",
            Self::JainVeg => "jain-veg",
            Self::Halal => "halal",
            Self::Kosher => "kosher",
            Self::GlutenFree => "gluten-free",
            Self::NutFree => "nut-free",
            Self::NoRestrictions => "no-restrictions",
        }
    }
}

/// Medical restrictions attached to a request or offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalPreference {
    NoOil,
    NoSugar,
    DairyFree,
    LowSodium,
    SoftFood,
    Unrestricted,
}

impl MedicalPreference {
    pub const ALL: [Self; 6] = [
        Self::NoOil,
        Self::NoSugar,
        Self::DairyFree,
        Self::LowSodium,
        Self::SoftFood,
        Self::Unrestricted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NoOil => "No Oil",
            Self::NoSugar => "No Sugar",
            Self::DairyFree => "Dairy Free",
            Self::LowSodium => "Low Sodium",
            Self::SoftFood => "Soft Food Only",
            Self::Unrestricted => "None",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::NoOil => "no-oil",
            Self::NoSugar => "no-sugar",
            Self::DairyFree => "dairy-free",
            Self::LowSodium => "low-sodium",
            Self::SoftFood => "soft-food",
            Self::Unrestricted => "none",
        }
    }
}

/// How a meal changes hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FulfillmentOption {
    Pickup,
    Delivery,
    DineIn,
    MeetUp,
}

impl FulfillmentOption {
    pub const ALL: [Self; 4] = [Self::Pickup, Self::Delivery, Self::DineIn, Self::MeetUp];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pickup => "Pickup (Student travels)",
            Self::Delivery => "Delivery (Donor drops off)",
            Self::DineIn => "Dine-in (Hosted by Donor)",
            Self::MeetUp => "Meet Up (Public Spot)",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
            Self::DineIn => "dine-in",
            Self::MeetUp => "meet-up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Once,
    Weekly,
    Daily,
    AsNeeded,
}

impl Frequency {
    pub const ALL: [Self; 4] = [Self::Once, Self::Weekly, Self::Daily, Self::AsNeeded];

    pub fn label(self) -> &'static str {
        match self {
            Self::Once => "One-time",
            Self::Weekly => "Weekly",
            Self::Daily => "Daily",
            Self::AsNeeded => "As needed",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Weekly => "weekly",
            Self::Daily => "daily",
            Self::AsNeeded => "as-needed",
        }
    }
}

/// Finds the variant whose slug or label matches `value`, ignoring case.
fn parse_labelled<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    slug: fn(T) -> &'static str,
    label: fn(T) -> &'static str,
) -> Result<T, ParseLabelError> {
    let value = value.trim();
    all.iter()
        .copied()
        .find(|&item| slug(item).eq_ignore_ascii_case(value) || label(item).eq_ignore_ascii_case(value))
        .ok_or_else(|| ParseLabelError::new(kind, value))
}

impl FromStr for DietaryPreference {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled("dietary preference", s, &Self::ALL, Self::slug, Self::label)
    }
}

impl FromStr for MedicalPreference {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled("medical preference", s, &Self::ALL, Self::slug, Self::label)
    }
}

impl FromStr for FulfillmentOption {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled("fulfillment option", s, &Self::ALL, Self::slug, Self::label)
    }
}

impl FromStr for Frequency {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_labelled("frequency", s, &Self::ALL, Self::slug, Self::label)
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MedicalPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for FulfillmentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Open,
    InProgress,
    Fulfilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Available,
    InProgress,
    Claimed,
}

/// A student asking for a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    /// Unique listing id; also decides where the pin lands on the map
    pub id: String,
    pub seeker_id: String,
    /// Anonymous display name (e.g. "Studious Owl")
    pub seeker_name: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub dietary_needs: Vec<DietaryPreference>,
    #[serde(default)]
    pub medical_needs: Vec<MedicalPreference>,
    #[serde(default)]
    pub logistics: Vec<FulfillmentOption>,
    pub description: String,
    /// Free-form availability ("Weekends", "Evenings after 6pm")
    pub availability: String,
    pub frequency: Frequency,
    /// Posting time in milliseconds since the Unix epoch
    pub posted_at: u64,
    pub status: RequestStatus,
    /// 4-digit PIN confirming the hand-off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_pin: Option<String>,
}

/// A donor offering a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOffer {
    /// Unique listing id; also decides where the pin lands on the map
    pub id: String,
    pub donor_id: String,
    pub donor_name: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub dietary_tags: Vec<DietaryPreference>,
    /// Expiry in milliseconds since the Unix epoch
    pub available_until: u64,
    #[serde(default)]
    pub logistics: Vec<FulfillmentOption>,
    pub availability: String,
    pub frequency: Frequency,
    pub status: OfferStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_pin: Option<String>,
}

/// Anything shown as a pin: either a request or an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Listing {
    Request(MealRequest),
    Offer(MealOffer),
}

impl Listing {
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Request(_) => "Request",
            Self::Offer(_) => "Offer",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Request(request) => &request.description,
            Self::Offer(offer) => &offer.description,
        }
    }

    pub fn city(&self) -> &str {
        match self {
            Self::Request(request) => &request.city,
            Self::Offer(offer) => &offer.city,
        }
    }

    pub fn country(&self) -> &str {
        match self {
            Self::Request(request) => &request.country,
            Self::Offer(offer) => &offer.country,
        }
    }

    pub fn zip(&self) -> &str {
        match self {
            Self::Request(request) => &request.zip,
            Self::Offer(offer) => &offer.zip,
        }
    }

    /// Request dietary needs, or offer dietary tags
    pub fn dietary(&self) -> &[DietaryPreference] {
        match self {
            Self::Request(request) => &request.dietary_needs,
            Self::Offer(offer) => &offer.dietary_tags,
        }
    }

    pub fn logistics(&self) -> &[FulfillmentOption] {
        match self {
            Self::Request(request) => &request.logistics,
            Self::Offer(offer) => &offer.logistics,
        }
    }

    /// Open requests and available offers
    pub fn is_active(&self) -> bool {
        match self {
            Self::Request(request) => request.status == RequestStatus::Open,
            Self::Offer(offer) => offer.status == OfferStatus::Available,
        }
    }
}

impl Entity for MealRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for MealOffer {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Listing {
    fn id(&self) -> &str {
        match self {
            Self::Request(request) => &request.id,
            Self::Offer(offer) => &offer.id,
        }
    }
}

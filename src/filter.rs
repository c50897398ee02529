//! Choosing which listings go on the map, and summarising what is in view.

use crate::error::ParseLabelError;
use crate::{DietaryPreference, FulfillmentOption, Listing};
use std::fmt;
use std::str::FromStr;

/// Who is looking at the map; decides which listings are relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewerRole {
    /// Browsing without a dashboard: requests and offers alike.
    #[default]
    Guest,
    /// A student: sees offers.
    Seeker,
    /// A donor: sees requests.
    Donor,
}

impl ViewerRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Seeker => "seeker",
            Self::Donor => "donor",
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerRole {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Guest, Self::Seeker, Self::Donor]
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError::new("role", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KindFilter {
    #[default]
    All,
    Requests,
    Offers,
}

impl KindFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Requests => "requests",
            Self::Offers => "offers",
        }
    }

    pub fn matches(self, listing: &Listing) -> bool {
        match self {
            Self::All => true,
            Self::Requests => listing.is_request(),
            Self::Offers => !listing.is_request(),
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KindFilter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::All, Self::Requests, Self::Offers]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError::new("listing kind", s.trim()))
    }
}

/// Narrows a listing collection down to what should be placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub kind: KindFilter,
    /// Keep only open requests and available offers.
    pub active_only: bool,
    /// Matches city or country (case-insensitive) or zip.
    pub location: Option<String>,
    pub diet: Option<DietaryPreference>,
    pub logistics: Option<FulfillmentOption>,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            kind: KindFilter::All,
            active_only: true,
            location: None,
            diet: None,
            logistics: None,
        }
    }
}

impl ListingFilter {
    /// The dashboard default for `role`.
    pub fn for_role(role: ViewerRole) -> Self {
        let kind = match role {
            ViewerRole::Guest => KindFilter::All,
            ViewerRole::Seeker => KindFilter::Offers,
            ViewerRole::Donor => KindFilter::Requests,
        };
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if !self.kind.matches(listing) {
            return false;
        }
        if self.active_only && !listing.is_active() {
            return false;
        }
        if let Some(location) = self.location.as_deref().map(str::trim)
            && !location.is_empty()
        {
            let needle = location.to_lowercase();
            let found = listing.city().to_lowercase().contains(&needle)
                || listing.country().to_lowercase().contains(&needle)
                || listing.zip().contains(&needle);
            if !found {
                return false;
            }
        }
        if let Some(diet) = self.diet
            && !listing.dietary().contains(&diet)
        {
            return false;
        }
        if let Some(option) = self.logistics
            && !listing.logistics().contains(&option)
        {
            return false;
        }
        true
    }

    /// Matching listings, in their original order.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        let kept: Vec<_> = listings.iter().filter(|l| self.matches(l)).collect();
        log::debug!("Filter kept {} of {} listings", kept.len(), listings.len());
        kept
    }
}

/// Counts of visible listings by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleSummary {
    pub requests: usize,
    pub offers: usize,
}

impl VisibleSummary {
    pub fn from_listings<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> Self {
        listings
            .into_iter()
            .fold(Self::default(), |mut summary, listing| {
                if listing.is_request() {
                    summary.requests += 1;
                } else {
                    summary.offers += 1;
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.requests + self.offers
    }

    /// The count line shown above the map for `role`.
    pub fn headline(&self, role: ViewerRole) -> String {
        match role {
            ViewerRole::Seeker => format!("Showing {} active offers", self.offers),
            ViewerRole::Donor => format!("Showing {} students in map view", self.requests),
            ViewerRole::Guest => format!("{} results found", self.total()),
        }
    }
}

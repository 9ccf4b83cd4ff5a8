//! Fixture categories for water-usage events.
//!
//! The category set is a fixed enumeration of the fixture types the
//! sensor pipeline can classify, plus `leak`, `unknown` (unclassified),
//! and `rest` (aggregate remainder used in breakdowns). Each category
//! carries static display metadata (icon name, hex color) served as
//! reference data to clients.

use serde::{Deserialize, Serialize};

/// A water fixture category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sink,
    Shower,
    Toilet,
    Dishwasher,
    Washer,
    Irrigation,
    Pool,
    Leak,
    Other,
    Unknown,
    Rest,
}

/// All categories, in display order.
pub const ALL_CATEGORIES: &[Category] = &[
    Category::Sink,
    Category::Shower,
    Category::Toilet,
    Category::Dishwasher,
    Category::Washer,
    Category::Irrigation,
    Category::Pool,
    Category::Leak,
    Category::Other,
    Category::Unknown,
    Category::Rest,
];

impl Category {
    /// The wire name, also used as the database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sink => "sink",
            Category::Shower => "shower",
            Category::Toilet => "toilet",
            Category::Dishwasher => "dishwasher",
            Category::Washer => "washer",
            Category::Irrigation => "irrigation",
            Category::Pool => "pool",
            Category::Leak => "leak",
            Category::Other => "other",
            Category::Unknown => "unknown",
            Category::Rest => "rest",
        }
    }

    /// Parse a wire name into a category.
    pub fn parse(s: &str) -> Option<Category> {
        ALL_CATEGORIES.iter().copied().find(|c| c.as_str() == s)
    }

    /// Icon name for UI display.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Sink => "faucet",
            Category::Shower => "shower-head",
            Category::Toilet => "toilet",
            Category::Dishwasher => "dishwasher",
            Category::Washer => "washing-machine",
            Category::Irrigation => "sprinkler",
            Category::Pool => "waves",
            Category::Leak => "droplet-alert",
            Category::Other => "droplet",
            Category::Unknown => "help-circle",
            Category::Rest => "more-horizontal",
        }
    }

    /// Hex display color for charts.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Sink => "#4FC3F7",
            Category::Shower => "#0288D1",
            Category::Toilet => "#7E57C2",
            Category::Dishwasher => "#26A69A",
            Category::Washer => "#66BB6A",
            Category::Irrigation => "#9CCC65",
            Category::Pool => "#29B6F6",
            Category::Leak => "#EF5350",
            Category::Other => "#90A4AE",
            Category::Unknown => "#BDBDBD",
            Category::Rest => "#E0E0E0",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static reference-data record for one category, served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        CategoryInfo {
            name: category.as_str(),
            icon: category.icon(),
            color: category.color(),
        }
    }
}

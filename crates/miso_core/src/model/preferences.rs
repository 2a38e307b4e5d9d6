//! User preference values persisted alongside tasks and board data.

use serde::{Deserialize, Serialize};

/// Board minimum height while the page is collapsed.
pub const BOARD_HEIGHT_COLLAPSED: f64 = 4000.0;
/// Board minimum height while the page is expanded.
pub const BOARD_HEIGHT_EXPANDED: f64 = 8000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Minimum board height for the given page expansion state.
pub fn board_min_height(page_expanded: bool) -> f64 {
    if page_expanded {
        BOARD_HEIGHT_EXPANDED
    } else {
        BOARD_HEIGHT_COLLAPSED
    }
}

/// Parses a page number typed by the user, defaulting to page 1.
pub fn parse_page_number(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(value) => value,
    }
}

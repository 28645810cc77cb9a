//! Meal Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Restaurant id owning the shared catalog of common dishes.
pub const COMMON_RESTAURANT_ID: &str = "comune";

/// Where a dish came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Part of, or cloned from, the common catalog.
    Comune,

    /// Authored by the owning restaurant.
    Personalizzato,
}

impl Origin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comune => "comune",
            Self::Personalizzato => "personalizzato",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown origin `{0}`")]
pub struct UnknownOrigin(pub String);

impl FromStr for Origin {
    type Err = UnknownOrigin;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "comune" => Ok(Self::Comune),
            "personalizzato" => Ok(Self::Personalizzato),
            _ => Err(UnknownOrigin(value.to_string())),
        }
    }
}

/// Meal Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    /// Catalog-wide numeric identifier.
    pub idmeals: u64,
    pub restaurant_id: String,
    pub nome: String,
    pub prezzo: Decimal,

    #[serde(default)]
    pub tipologia: Option<String>,

    #[serde(default)]
    pub ingredienti: Vec<String>,

    pub origine: Origin,

    #[serde(default)]
    pub descrizione: Option<String>,

    #[serde(default)]
    pub immagine: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MealRecord {
    /// Whether the dish belongs to the shared common catalog.
    #[must_use]
    pub fn is_common(&self) -> bool {
        self.restaurant_id == COMMON_RESTAURANT_ID
    }
}

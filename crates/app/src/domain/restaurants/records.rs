//! Restaurant Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Restaurant Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub restaurant_id: String,
    pub nome: String,

    #[serde(default)]
    pub luogo: Option<String>,

    #[serde(default)]
    pub telefono: Option<String>,

    /// VAT number, unique across the directory when present.
    #[serde(rename = "partitaIVA", default)]
    pub partita_iva: Option<String>,

    #[serde(default)]
    pub indirizzo: Option<String>,

    #[serde(default)]
    pub tipologie: Vec<String>,

    #[serde(default)]
    pub orari: Option<String>,

    #[serde(default = "active")]
    pub attivo: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

const fn active() -> bool {
    true
}

//! Restaurant Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use forchetta_app::domain::restaurants::{data::RestaurantDetails, records::RestaurantRecord};

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestaurantResponse {
    pub restaurant_id: String,
    pub nome: String,
    pub luogo: Option<String>,
    pub telefono: Option<String>,

    #[serde(rename = "partitaIVA")]
    pub partita_iva: Option<String>,

    pub indirizzo: Option<String>,
    pub tipologie: Vec<String>,
    pub orari: Option<String>,
    pub attivo: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RestaurantRecord> for RestaurantResponse {
    fn from(restaurant: RestaurantRecord) -> Self {
        Self {
            restaurant_id: restaurant.restaurant_id,
            nome: restaurant.nome,
            luogo: restaurant.luogo,
            telefono: restaurant.telefono,
            partita_iva: restaurant.partita_iva,
            indirizzo: restaurant.indirizzo,
            tipologie: restaurant.tipologie,
            orari: restaurant.orari,
            attivo: restaurant.attivo,
            created_at: restaurant.created_at.to_string(),
            updated_at: restaurant.updated_at.to_string(),
        }
    }
}

/// Restaurant fields from a loosely typed body; `tipologie` may be a list or a comma separated
/// string.
pub(crate) fn details_from_json(value: Value) -> Result<RestaurantDetails, StatusError> {
    serde_json::from_value(value).or_400("invalid restaurant payload")
}

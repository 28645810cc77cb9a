//! Meal Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use forchetta_app::domain::meals::records::MealRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MealResponse {
    pub idmeals: u64,
    pub restaurant_id: String,
    pub nome: String,

    #[salvo(schema(value_type = f64))]
    pub prezzo: Decimal,

    pub tipologia: Option<String>,
    pub ingredienti: Vec<String>,

    /// `comune` or `personalizzato`
    pub origine: String,

    pub descrizione: Option<String>,
    pub immagine: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MealRecord> for MealResponse {
    fn from(meal: MealRecord) -> Self {
        Self {
            idmeals: meal.idmeals,
            restaurant_id: meal.restaurant_id,
            nome: meal.nome,
            prezzo: meal.prezzo,
            tipologia: meal.tipologia,
            ingredienti: meal.ingredienti,
            origine: meal.origine.to_string(),
            descrizione: meal.descrizione,
            immagine: meal.immagine,
            created_at: meal.created_at.to_string(),
            updated_at: meal.updated_at.to_string(),
        }
    }
}

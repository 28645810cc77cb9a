//! Restaurants Data

use jiff::Timestamp;
use serde::{Deserialize, Deserializer};

use crate::domain::restaurants::records::RestaurantRecord;

/// Restaurant profile fields for create, update and upsert.
///
/// Every field is optional; updates overwrite only the fields that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetails {
    #[serde(default, deserialize_with = "trimmed")]
    pub restaurant_id: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub luogo: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub telefono: Option<String>,

    #[serde(rename = "partitaIVA", alias = "partitaIva", default, deserialize_with = "trimmed")]
    pub partita_iva: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub indirizzo: Option<String>,

    /// A list, or one comma separated string.
    #[serde(default, deserialize_with = "list_or_csv")]
    pub tipologie: Option<Vec<String>>,

    #[serde(default, deserialize_with = "trimmed")]
    pub orari: Option<String>,

    #[serde(default)]
    pub attivo: Option<bool>,
}

impl RestaurantDetails {
    /// Build a new record under `restaurant_id`.
    ///
    /// Returns `None` when `nome` is missing.
    #[must_use]
    pub fn into_record(self, restaurant_id: String, now: Timestamp) -> Option<RestaurantRecord> {
        Some(RestaurantRecord {
            restaurant_id,
            nome: self.nome?,
            luogo: self.luogo,
            telefono: self.telefono,
            partita_iva: self.partita_iva,
            indirizzo: self.indirizzo,
            tipologie: self.tipologie.unwrap_or_default(),
            orari: self.orari,
            attivo: self.attivo.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the fields present in `self`.
    pub fn apply(self, record: &mut RestaurantRecord) {
        if let Some(nome) = self.nome {
            record.nome = nome;
        }

        if let Some(tipologie) = self.tipologie {
            record.tipologie = tipologie;
        }

        if let Some(attivo) = self.attivo {
            record.attivo = attivo;
        }

        record.luogo = self.luogo.or(record.luogo.take());
        record.telefono = self.telefono.or(record.telefono.take());
        record.partita_iva = self.partita_iva.or(record.partita_iva.take());
        record.indirizzo = self.indirizzo.or(record.indirizzo.take());
        record.orari = self.orari.or(record.orari.take());
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

fn list_or_csv<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<ListOrCsv>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(ListOrCsv::List(items)) => items,
        Some(ListOrCsv::Csv(text)) => text.split(',').map(str::to_string).collect(),
    };

    Ok(Some(
        items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    ))
}

/// Directory listing filter; both terms are case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub nome: Option<String>,
    pub luogo: Option<String>,
}

impl RestaurantFilter {
    #[must_use]
    pub fn matches(&self, restaurant: &RestaurantRecord) -> bool {
        contains(Some(&restaurant.nome), self.nome.as_deref())
            && contains(restaurant.luogo.as_ref(), self.luogo.as_deref())
    }

    pub(crate) fn nome(&self) -> Option<&str> {
        non_blank(self.nome.as_deref())
    }

    pub(crate) fn luogo(&self) -> Option<&str> {
        non_blank(self.luogo.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn contains(haystack: Option<&String>, needle: Option<&str>) -> bool {
    let Some(needle) = non_blank(needle) else {
        return true;
    };

    haystack.is_some_and(|haystack| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

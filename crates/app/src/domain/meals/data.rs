//! Meals Data
//!
//! Meal payloads arrive in several legacy shapes: prices as numbers or numeric strings,
//! ingredients as a list, a comma separated string, or numbered `ingredienteN` fields.
//! [`MealInput::from_json`] normalises all of them into one typed value.

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::{
    domain::meals::records::{COMMON_RESTAURANT_ID, MealRecord, Origin},
    store::like_pattern,
};

/// Highest numbered discrete ingredient field read from a payload.
pub const MAX_INGREDIENT_FIELDS: usize = 20;

/// Highest unit price accepted for a dish or an order line.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MealInputError {
    #[error("meal payload must be a JSON object")]
    NotAnObject,

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} has an invalid value")]
    Invalid(&'static str),

    #[error("prezzo must be numeric, got `{0}`")]
    InvalidPrice(String),

    #[error("prezzo must not be negative")]
    NegativePrice,

    #[error("prezzo must not exceed {MAX_PRICE}")]
    PriceTooLarge,

    #[error("idmeals cannot be changed")]
    IdChange,
}

/// Normalised meal payload used for both create and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealInput {
    pub idmeals: Option<u64>,
    pub restaurant_id: Option<String>,
    pub nome: Option<String>,
    pub prezzo: Option<Decimal>,
    pub tipologia: Option<String>,

    /// `None` when the payload carried no ingredient fields at all.
    pub ingredienti: Option<Vec<String>>,

    pub origine: Option<Origin>,
    pub descrizione: Option<String>,
    pub immagine: Option<String>,
}

impl MealInput {
    /// Parse a raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error for non-object payloads, non-numeric or negative prices and fields of
    /// the wrong JSON type.
    pub fn from_json(value: &Value) -> Result<Self, MealInputError> {
        let object = value.as_object().ok_or(MealInputError::NotAnObject)?;

        let origine = text_field(object, &["origine"], "origine")?
            .map(|origine| origine.parse::<Origin>())
            .transpose()
            .map_err(|_| MealInputError::Invalid("origine"))?;

        Ok(Self {
            idmeals: id_field(object)?,
            restaurant_id: text_field(object, &["restaurantId", "restaurant_id"], "restaurantId")?,
            nome: text_field(object, &["nome"], "nome")?,
            prezzo: present(object, "prezzo").map(parse_price).transpose()?,
            tipologia: text_field(object, &["tipologia"], "tipologia")?,
            ingredienti: ingredients(object)?,
            origine,
            descrizione: text_field(object, &["descrizione"], "descrizione")?,
            immagine: text_field(object, &["immagine"], "immagine")?,
        })
    }

    /// Build a new record from a create payload; `idmeals` is left at zero for the caller to
    /// assign.
    ///
    /// # Errors
    ///
    /// Returns an error when `restaurantId`, `nome` or `prezzo` is missing.
    pub fn into_new_meal(self, now: Timestamp) -> Result<MealRecord, MealInputError> {
        let restaurant_id = self
            .restaurant_id
            .ok_or(MealInputError::Missing("restaurantId"))?;

        let nome = self.nome.ok_or(MealInputError::Missing("nome"))?;
        let prezzo = self.prezzo.ok_or(MealInputError::Missing("prezzo"))?;

        let origine = self.origine.unwrap_or(if restaurant_id == COMMON_RESTAURANT_ID {
            Origin::Comune
        } else {
            Origin::Personalizzato
        });

        Ok(MealRecord {
            idmeals: 0,
            restaurant_id,
            nome,
            prezzo,
            tipologia: self.tipologia,
            ingredienti: self.ingredienti.unwrap_or_default(),
            origine,
            descrizione: self.descrizione,
            immagine: self.immagine,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the supplied fields into `record`, leaving the others untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MealInputError::IdChange`] when the payload names a different `idmeals`.
    pub fn apply(self, record: &mut MealRecord) -> Result<(), MealInputError> {
        if self.idmeals.is_some_and(|id| id != record.idmeals) {
            return Err(MealInputError::IdChange);
        }

        if let Some(restaurant_id) = self.restaurant_id {
            record.restaurant_id = restaurant_id;
        }

        if let Some(nome) = self.nome {
            record.nome = nome;
        }

        if let Some(prezzo) = self.prezzo {
            record.prezzo = prezzo;
        }

        if let Some(ingredienti) = self.ingredienti {
            record.ingredienti = ingredienti;
        }

        if let Some(origine) = self.origine {
            record.origine = origine;
        }

        record.tipologia = self.tipologia.or(record.tipologia.take());
        record.descrizione = self.descrizione.or(record.descrizione.take());
        record.immagine = self.immagine.or(record.immagine.take());

        Ok(())
    }
}

/// Coerce a JSON number or numeric-looking string into a non-negative price.
///
/// # Errors
///
/// Returns an error for anything that is not a plain decimal number, for negative values and for
/// values above [`MAX_PRICE`].
pub fn parse_price(value: &Value) -> Result<Decimal, MealInputError> {
    let price = match value {
        Value::Number(number) => {
            number_to_decimal(number).ok_or_else(|| MealInputError::InvalidPrice(number.to_string()))?
        }
        Value::String(text) => parse_decimal_text(text.trim())
            .ok_or_else(|| MealInputError::InvalidPrice(text.clone()))?,
        other => return Err(MealInputError::InvalidPrice(other.to_string())),
    };

    if price.is_sign_negative() && !price.is_zero() {
        return Err(MealInputError::NegativePrice);
    }

    if price > MAX_PRICE {
        return Err(MealInputError::PriceTooLarge);
    }

    Ok(price.normalize())
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(value) = number.as_u64() {
        return Some(Decimal::from(value));
    }

    if let Some(value) = number.as_i64() {
        return Some(Decimal::from(value));
    }

    let text = number.to_string();

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };

    let value = if fraction.is_empty() {
        Decimal::from_str(whole).ok()?
    } else {
        Decimal::from_str(&format!("{whole}.{fraction}")).ok()?
    };

    Some(if negative { -value } else { value })
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn text_field(
    object: &Map<String, Value>,
    keys: &[&str],
    name: &'static str,
) -> Result<Option<String>, MealInputError> {
    let Some(value) = keys.iter().find_map(|key| present(object, key)) else {
        return Ok(None);
    };

    let text = scalar_text(value).ok_or(MealInputError::Invalid(name))?;
    let text = text.trim();

    Ok((!text.is_empty()).then(|| text.to_string()))
}

fn id_field(object: &Map<String, Value>) -> Result<Option<u64>, MealInputError> {
    match present(object, "idmeals") {
        None => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .map(Some)
            .ok_or(MealInputError::Invalid("idmeals")),
        Some(Value::String(text)) => text
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| MealInputError::Invalid("idmeals")),
        Some(_) => Err(MealInputError::Invalid("idmeals")),
    }
}

fn push_ingredient(list: &mut Vec<String>, ingredient: &str) {
    let ingredient = ingredient.trim();

    if !ingredient.is_empty() {
        list.push(ingredient.to_string());
    }
}

fn ingredients(object: &Map<String, Value>) -> Result<Option<Vec<String>>, MealInputError> {
    let mut found = false;
    let mut list = Vec::new();

    if let Some(value) = present(object, "ingredienti") {
        found = true;

        match value {
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    let text = scalar_text(item).ok_or(MealInputError::Invalid("ingredienti"))?;

                    push_ingredient(&mut list, &text);
                }
            }
            Value::String(text) => text
                .split(',')
                .for_each(|ingredient| push_ingredient(&mut list, ingredient)),
            _ => return Err(MealInputError::Invalid("ingredienti")),
        }
    }

    for n in 1..=MAX_INGREDIENT_FIELDS {
        for key in [
            format!("ingrediente{n}"),
            format!("ingredient {n}"),
            format!("ingredient{n}"),
        ] {
            if let Some(value) = present(object, &key) {
                found = true;

                let text = scalar_text(value).ok_or(MealInputError::Invalid("ingredienti"))?;

                push_ingredient(&mut list, &text);
            }
        }
    }

    Ok(found.then_some(list))
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealFilter {
    pub restaurant_id: Option<String>,

    /// Dish type, compared ignoring case.
    pub tipologia: Option<String>,

    /// Case-insensitive substring of the name or any ingredient.
    pub search: Option<String>,
}

impl MealFilter {
    #[must_use]
    pub fn for_restaurant(restaurant_id: impl Into<String>) -> Self {
        Self {
            restaurant_id: Some(restaurant_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matches(&self, meal: &MealRecord) -> bool {
        if let Some(restaurant_id) = non_blank(self.restaurant_id.as_deref())
            && meal.restaurant_id != restaurant_id
        {
            return false;
        }

        if let Some(tipologia) = non_blank(self.tipologia.as_deref())
            && !meal
                .tipologia
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(tipologia))
        {
            return false;
        }

        let Some(search) = non_blank(self.search.as_deref()) else {
            return true;
        };

        let needle = search.to_lowercase();

        meal.nome.to_lowercase().contains(&needle)
            || meal
                .ingredienti
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }

    pub(crate) fn restaurant_id(&self) -> Option<&str> {
        non_blank(self.restaurant_id.as_deref())
    }

    pub(crate) fn tipologia(&self) -> Option<&str> {
        non_blank(self.tipologia.as_deref())
    }

    /// `ILIKE` pattern for the search term.
    pub(crate) fn search_pattern(&self) -> Option<String> {
        non_blank(self.search.as_deref()).map(like_pattern)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

//! Cart Models

use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{meals::records::MealRecord, orders::data::OrderLine};

/// Stable identity of a cart line.
///
/// `<restaurant>:<meal id>`, or `<restaurant>:h<hash>` for items without a meal id, where the
/// hash is the first 8 bytes of SHA-256 over `<restaurant>::<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineKey(String);

impl LineKey {
    #[must_use]
    pub fn derive(restaurant_id: &str, meal_id: Option<u64>, name: &str) -> Self {
        let restaurant_id = restaurant_id.trim();

        match meal_id {
            Some(meal_id) => Self(format!("{restaurant_id}:{meal_id}")),
            None => {
                let digest = Sha256::digest(format!("{restaurant_id}::{}", name.trim()));

                Self(format!("{restaurant_id}:h{}", hex::encode(&digest[..8])))
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LineKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Item offered for adding to a cart, priced at the moment of adding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub meal_id: Option<u64>,
    pub name: String,
    pub unit_price: Decimal,
    pub restaurant_id: String,
    pub restaurant_name: Option<String>,
    pub image: Option<String>,
}

impl CartItem {
    #[must_use]
    pub fn from_meal(meal: &MealRecord, restaurant_name: Option<&str>) -> Self {
        Self {
            meal_id: Some(meal.idmeals),
            name: meal.nome.clone(),
            unit_price: meal.prezzo,
            restaurant_id: meal.restaurant_id.clone(),
            restaurant_name: restaurant_name.map(str::to_string),
            image: meal.immagine.clone(),
        }
    }

    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::derive(&self.restaurant_id, self.meal_id, &self.name)
    }
}

/// A cart line; `quantity` is at least 1 while the line is in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(default)]
    pub meal_id: Option<u64>,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub restaurant_id: String,

    #[serde(default)]
    pub restaurant_name: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl CartLine {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::derive(&self.restaurant_id, self.meal_id, &self.name)
    }

    /// `unit_price * quantity`, or `None` when the product does not fit a [`Decimal`].
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Ordered collection of cart lines keyed by [`LineKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: IndexMap<LineKey, CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, merging lines that share a key and dropping empty ones.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            cart.lines
                .entry(line.key())
                .and_modify(|existing| {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                })
                .or_insert(line);
        }

        cart
    }

    /// Add one unit of `item`, merging with an existing line for the same key.
    pub fn add(&mut self, item: CartItem) -> &CartLine {
        self.lines
            .entry(item.key())
            .and_modify(|line| line.quantity = line.quantity.saturating_add(1))
            .or_insert_with(|| CartLine {
                meal_id: item.meal_id,
                name: item.name,
                unit_price: item.unit_price,
                quantity: 1,
                restaurant_id: item.restaurant_id,
                restaurant_name: item.restaurant_name,
                image: item.image,
            })
    }

    /// Set a line's quantity, clamped to at least 1. Use [`Cart::remove`] to drop a line.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> Option<&CartLine> {
        let line = self.lines.get_mut(key)?;

        line.quantity = quantity.max(1);

        Some(line)
    }

    pub fn remove(&mut self, key: &LineKey) -> Option<CartLine> {
        self.lines.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.get(key)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price * quantity`, computed from the current lines on every call.
    ///
    /// `None` when the sum does not fit a [`Decimal`].
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.lines().try_fold(Decimal::ZERO, |total, line| {
            line.line_total().and_then(|line_total| total.checked_add(line_total))
        })
    }

    /// Checkout lines for order creation.
    #[must_use]
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines()
            .map(|line| OrderLine {
                meal_id: line.meal_id,
                name: line.name.clone(),
                qty: line.quantity,
                unit_price: line.unit_price,
                restaurant_id: Some(line.restaurant_id.clone()),
            })
            .collect()
    }
}

//! Cart persistence.
//!
//! Carts are loaded, changed and saved again within each [`CartSession`] operation, so no
//! cart state outlives a single call.

use std::{
    cell::RefCell,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::carts::models::{Cart, CartItem, CartLine, LineKey};

#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("cart storage is unavailable")]
    Io(#[from] std::io::Error),

    #[error("stored cart is not valid JSON")]
    Json(#[from] serde_json::Error),
}

/// Where a cart is kept between operations.
pub trait CartStorage {
    /// Read the stored cart; nothing stored yet is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored representation cannot be read.
    fn load(&self) -> Result<Cart, CartStorageError>;

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be written.
    fn save(&self, cart: &Cart) -> Result<(), CartStorageError>;
}

/// Cart stored as a JSON array of lines in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileCartStorage {
    path: PathBuf,
}

impl JsonFileCartStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileCartStorage {
    fn load(&self) -> Result<Cart, CartStorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Cart::new()),
            Err(error) => return Err(error.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Cart::new());
        }

        let lines: Vec<CartLine> = serde_json::from_slice(&bytes)?;

        Ok(Cart::from_lines(lines))
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStorageError> {
        let lines: Vec<&CartLine> = cart.lines().collect();

        fs::write(&self.path, serde_json::to_vec(&lines)?)?;

        Ok(())
    }
}

/// In-process storage holding the serialised cart.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    stored: RefCell<Option<String>>,
}

impl MemoryCartStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Cart, CartStorageError> {
        match self.stored.borrow().as_deref() {
            None => Ok(Cart::new()),
            Some(json) => Ok(Cart::from_lines(serde_json::from_str::<Vec<CartLine>>(json)?)),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStorageError> {
        let lines: Vec<&CartLine> = cart.lines().collect();

        *self.stored.borrow_mut() = Some(serde_json::to_string(&lines)?);

        Ok(())
    }
}

/// Cart operations that load from and save back to `S` on every call.
#[derive(Debug)]
pub struct CartSession<S> {
    storage: S,
}

impl<S: CartStorage> CartSession<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current cart contents.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be loaded.
    pub fn cart(&self) -> Result<Cart, CartStorageError> {
        self.storage.load()
    }

    /// Load, apply `change`, save, and return the saved cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be loaded or saved.
    pub fn update(&self, change: impl FnOnce(&mut Cart)) -> Result<Cart, CartStorageError> {
        let mut cart = self.storage.load()?;

        change(&mut cart);

        self.storage.save(&cart)?;

        Ok(cart)
    }

    /// # Errors
    ///
    /// Returns an error when the cart cannot be loaded or saved.
    pub fn add(&self, item: CartItem) -> Result<Cart, CartStorageError> {
        self.update(|cart| {
            cart.add(item);
        })
    }

    /// # Errors
    ///
    /// Returns an error when the cart cannot be loaded or saved.
    pub fn set_quantity(&self, key: &LineKey, quantity: u32) -> Result<Cart, CartStorageError> {
        self.update(|cart| {
            cart.set_quantity(key, quantity);
        })
    }

    /// # Errors
    ///
    /// Returns an error when the cart cannot be loaded or saved.
    pub fn remove(&self, key: &LineKey) -> Result<Cart, CartStorageError> {
        self.update(|cart| {
            cart.remove(key);
        })
    }

    /// Empty the cart, e.g. after a successful checkout.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be saved.
    pub fn clear(&self) -> Result<(), CartStorageError> {
        self.storage.save(&Cart::new())
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn pizza() -> CartItem {
        CartItem {
            meal_id: Some(7),
            name: "Pizza".to_string(),
            unit_price: Decimal::new(950, 2),
            restaurant_id: "r_1".to_string(),
            restaurant_name: Some("Da Mario".to_string()),
            image: Some("/img/pizza.jpg".to_string()),
        }
    }

    #[test]
    fn every_operation_is_persisted() -> TestResult {
        let session = CartSession::new(MemoryCartStorage::new());

        session.add(pizza())?;
        session.add(pizza())?;

        let key = pizza().key();

        assert_eq!(session.cart()?.get(&key).map(|line| line.quantity), Some(2));

        session.set_quantity(&key, 5)?;

        assert_eq!(session.cart()?.total(), Some(Decimal::new(4750, 2)));

        session.remove(&key)?;

        assert!(session.cart()?.is_empty());

        Ok(())
    }

    #[test]
    fn file_storage_survives_new_sessions() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("cart.json");

        CartSession::new(JsonFileCartStorage::new(&path)).add(pizza())?;

        let cart = CartSession::new(JsonFileCartStorage::new(&path)).add(pizza())?;

        assert_eq!(cart.item_count(), 2);
        assert_eq!(
            cart.lines().next().and_then(|line| line.image.as_deref()),
            Some("/img/pizza.jpg")
        );

        CartSession::new(JsonFileCartStorage::new(&path)).clear()?;

        assert!(JsonFileCartStorage::new(&path).load()?.is_empty());

        Ok(())
    }

    #[test]
    fn missing_file_is_an_empty_cart() -> TestResult {
        let dir = TempDir::new()?;

        let cart = JsonFileCartStorage::new(dir.path().join("none.json")).load()?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("cart.json");

        fs::write(&path, "{")?;

        let result = JsonFileCartStorage::new(&path).load();

        assert!(
            matches!(result, Err(CartStorageError::Json(_))),
            "expected Json error, got {result:?}"
        );

        Ok(())
    }
}

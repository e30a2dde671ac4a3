//! Wishlist persisted through a pluggable key/value store.

use std::collections::HashMap;

use thiserror::Error;
use wildflower_catalog::types::Product;
use wildflower_core::ProductId;

/// Storage key the wishlist lives under.
const WISHLIST_KEY: &str = "wishlist";

/// String store the wishlist persists through.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
}

/// Wishlist errors.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("failed to serialize wishlist: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Products the visitor saved for later.
///
/// Reads go through the store on every call; a missing or corrupt entry
/// reads as an empty wishlist rather than an error, so a bad write can never
/// brick the page.
#[derive(Debug)]
pub struct Wishlist<S> {
    store: S,
}

impl<S: KeyValueStore> Wishlist<S> {
    /// Creates a wishlist over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The saved products, oldest first.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.store
            .get(WISHLIST_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// IDs of the saved products, oldest first.
    #[must_use]
    pub fn ids(&self) -> Vec<ProductId> {
        self.products().iter().map(|p| p.id).collect()
    }

    /// Whether the product with `id` is saved.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products().iter().any(|p| p.id == id)
    }

    /// Adds `product` when absent, removes it when present. Returns whether
    /// the product is saved after the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated wishlist fails to serialize.
    pub fn toggle(&mut self, product: &Product) -> Result<bool, WishlistError> {
        let mut products = self.products();
        let saved = match products.iter().position(|p| p.id == product.id) {
            Some(index) => {
                products.remove(index);
                false
            }
            None => {
                products.push(product.clone());
                true
            }
        };
        self.store
            .set(WISHLIST_KEY, serde_json::to_string(&products)?);
        Ok(saved)
    }
}

/// In-memory store for tests and server-side use.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wildflower_catalog::normalize::{ImageResolution, normalize_product};
    use wildflower_catalog::wire::{RawProductDescription, RawProductRecord};

    use super::*;

    fn product(id: i64, name: &str) -> Product {
        let raw = RawProductRecord {
            product_id: Some(id),
            description: Some(RawProductDescription {
                name: Some(name.to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        };
        normalize_product(&raw, ImageResolution::Listing)
    }

    #[test]
    fn test_toggle_saves_then_removes() {
        let mut wishlist = Wishlist::new(InMemoryStore::default());
        let boots = product(1, "Boots");

        assert!(wishlist.toggle(&boots).unwrap());
        assert!(wishlist.contains(boots.id));
        assert_eq!(wishlist.products()[0].name, "Boots");

        assert!(!wishlist.toggle(&boots).unwrap());
        assert!(!wishlist.contains(boots.id));
        assert!(wishlist.products().is_empty());
    }

    #[test]
    fn test_keeps_save_order() {
        let mut wishlist = Wishlist::new(InMemoryStore::default());
        let first = product(1, "First");
        let second = product(2, "Second");
        let third = product(3, "Third");

        wishlist.toggle(&first).unwrap();
        wishlist.toggle(&second).unwrap();
        wishlist.toggle(&third).unwrap();
        wishlist.toggle(&second).unwrap();

        assert_eq!(
            wishlist.ids(),
            vec![ProductId::new(1), ProductId::new(3)]
        );
    }

    #[test]
    fn test_corrupt_entry_reads_as_empty() {
        let mut store = InMemoryStore::default();
        store.set(WISHLIST_KEY, "definitely not json".to_owned());

        let mut wishlist = Wishlist::new(store);
        assert!(wishlist.products().is_empty());

        // The next toggle writes a clean list over the corrupt one.
        let boots = product(1, "Boots");
        assert!(wishlist.toggle(&boots).unwrap());
        assert_eq!(wishlist.ids(), vec![ProductId::new(1)]);
    }
}

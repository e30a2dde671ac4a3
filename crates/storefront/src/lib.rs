//! Wildflower storefront state library.
//!
//! Holds the pieces of the shop page that are pure state: the product grid
//! ([`grid`]) and the visitor's wishlist ([`wishlist`]). Everything here is
//! host-agnostic; the grid drives a [`wildflower_catalog::CatalogApi`] client
//! and exposes a read model, rendering is the embedder's job.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod grid;
pub mod wishlist;

pub use grid::{GridState, PaginationInfo, PriceRange, ShopGrid, SortOrder};
pub use wishlist::{InMemoryStore, KeyValueStore, Wishlist, WishlistError};

//! Price window and sort order applied on top of a fetched page.

use rust_decimal::Decimal;
use wildflower_catalog::types::Product;
use wildflower_core::Price;

/// Upper bound of the price slider.
pub const MAX_PRICE: u32 = 5_000;

/// Minimum distance kept between the two slider handles.
pub const MIN_PRICE_GAP: u32 = 10;

// =============================================================================
// PriceRange
// =============================================================================

/// Inclusive price window selected on the grid.
///
/// The setters keep `min + MIN_PRICE_GAP <= max <= MAX_PRICE`, so the two
/// slider handles can never cross or leave the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: MAX_PRICE,
        }
    }
}

impl PriceRange {
    /// Builds a window from both handle positions.
    ///
    /// `max` is placed on the slider first, then `min` below it, so the gap
    /// invariant holds for any input pair.
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        let mut range = Self::default();
        range.set_max(max);
        range.set_min(min);
        range
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Moves the lower handle, clamping it below the upper one.
    pub fn set_min(&mut self, min: u32) {
        self.min = min.min(self.max.saturating_sub(MIN_PRICE_GAP));
    }

    /// Moves the upper handle, clamping it between the lower one and the cap.
    pub fn set_max(&mut self, max: u32) {
        self.max = max.clamp(self.min.saturating_add(MIN_PRICE_GAP), MAX_PRICE);
    }

    /// Whether `price` falls inside the window.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        let amount = price.amount();
        Decimal::from(self.min) <= amount && amount <= Decimal::from(self.max)
    }
}

// =============================================================================
// SortOrder
// =============================================================================

/// Grid sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// The catalog's own ordering.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOrder {
    /// Parse from URL parameter value.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-ascending" | "price_asc" => Self::PriceLowToHigh,
            "price-descending" | "price_desc" => Self::PriceHighToLow,
            _ => Self::Featured,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLowToHigh => "price-ascending",
            Self::PriceHighToLow => "price-descending",
        }
    }
}

/// Applies the price window and sort order to one fetched page.
///
/// Featured keeps the catalog's order. The price sorts are stable, so equal
/// prices keep it too.
#[must_use]
pub fn apply(products: &[Product], range: PriceRange, sort: SortOrder) -> Vec<Product> {
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|p| range.contains(p.price))
        .cloned()
        .collect();

    match sort {
        SortOrder::Featured => {}
        SortOrder::PriceLowToHigh => visible.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceHighToLow => visible.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    visible
}

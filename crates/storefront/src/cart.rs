//! Session-local shopping cart.
//!
//! The cart is an ordered list of line items keyed by product id. The only
//! mutation is [`CartLedger::change_quantity`]; an item whose quantity reaches
//! zero is removed on the spot, so a zero-quantity line never exists.
//!
//! Amounts use [`Price`] (decimal), so totals are exact and only rounded when
//! formatted. A total too large for a decimal is reported as
//! [`PriceError::Overflow`].

use std::collections::HashMap;

use tracing::debug;

use shopeasy_core::{CurrencyCode, Price, PriceError, ProductId};

use crate::catalog;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    id: ProductId,
    name: String,
    unit_price: Price,
    quantity: u32,
    display_glyph: String,
}

impl CartItem {
    /// Create a line item.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Price,
        quantity: u32,
        display_glyph: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
            display_glyph: display_glyph.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn display_glyph(&self) -> &str {
        &self.display_glyph
    }

    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product is out of range.
    pub fn line_total(&self) -> Result<Price, PriceError> {
        self.unit_price.times(self.quantity)
    }
}

/// What [`CartLedger::change_quantity`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The item is still in the cart with this quantity.
    Updated { quantity: u32 },
    /// The quantity reached zero and the item was removed.
    Removed,
    /// No item with that id is in the cart; nothing changed.
    Unknown,
}

/// Totals view of the cart, or the empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartSummary {
    /// Nothing in the cart; show the empty-state affordance.
    Empty,
    /// At least one line item.
    Populated {
        /// Number of distinct line items.
        item_count: usize,
        /// Sum of all line totals.
        total: Price,
    },
}

impl CartSummary {
    /// Label for the totals row, e.g. `Total (2 items):`.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Populated { item_count, .. } => Some(format!("Total ({item_count} items):")),
        }
    }
}

/// The cart's line items and their derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLedger {
    items: Vec<CartItem>,
    currency_code: CurrencyCode,
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::empty(CurrencyCode::default())
    }
}

impl CartLedger {
    /// An empty cart in `currency_code`.
    #[must_use]
    pub const fn empty(currency_code: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            currency_code,
        }
    }

    /// Build a cart from `items`.
    ///
    /// Zero-quantity items are dropped and repeated ids are merged into the
    /// first occurrence with their quantities summed.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if an item is priced in a
    /// different currency from `currency_code`.
    pub fn from_items(
        currency_code: CurrencyCode,
        items: impl IntoIterator<Item = CartItem>,
    ) -> Result<Self, PriceError> {
        let mut merged: Vec<CartItem> = Vec::new();
        let mut positions: HashMap<ProductId, usize> = HashMap::new();

        for item in items {
            if item.unit_price.currency_code() != currency_code {
                return Err(PriceError::CurrencyMismatch {
                    left: currency_code,
                    right: item.unit_price.currency_code(),
                });
            }
            if item.quantity == 0 {
                continue;
            }
            if let Some(existing) = positions
                .get(&item.id)
                .and_then(|&pos| merged.get_mut(pos))
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                positions.insert(item.id.clone(), merged.len());
                merged.push(item);
            }
        }

        Ok(Self {
            items: merged,
            currency_code,
        })
    }

    /// The sample cart the storefront opens with.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            items: catalog::sample_cart_items(),
            currency_code: CurrencyCode::USD,
        }
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line item by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Adjust an item's quantity by `delta`.
    ///
    /// The new quantity is `max(0, current + delta)`. At zero the item is
    /// removed. Ids not in the cart are ignored.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let Some(pos) = self.items.iter().position(|item| &item.id == id) else {
            debug!(product_id = %id, delta, "Quantity change for item not in cart");
            return QuantityChange::Unknown;
        };

        let current = self.items.get(pos).map_or(0, |item| item.quantity);
        let next = i64::from(current).saturating_add(delta).max(0);
        let next = u32::try_from(next).unwrap_or(u32::MAX);

        if next == 0 {
            self.items.remove(pos);
            debug!(product_id = %id, "Item removed from cart");
            return QuantityChange::Removed;
        }

        if let Some(item) = self.items.get_mut(pos) {
            item.quantity = next;
        }
        debug!(product_id = %id, quantity = next, "Item quantity updated");
        QuantityChange::Updated { quantity: next }
    }

    /// Exact sum of `unit_price × quantity` over all items.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if a line total or the running sum is
    /// out of range.
    pub fn total(&self) -> Result<Price, PriceError> {
        self.items
            .iter()
            .try_fold(Price::zero(self.currency_code), |acc, item| {
                acc.plus(&item.line_total()?)
            })
    }

    /// Number of distinct line items (not units).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals for display, or [`CartSummary::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the total is out of range.
    pub fn summary(&self) -> Result<CartSummary, PriceError> {
        if self.is_empty() {
            return Ok(CartSummary::Empty);
        }
        Ok(CartSummary::Populated {
            item_count: self.item_count(),
            total: self.total()?,
        })
    }
}

//! Cart command.
//!
//! # Usage
//!
//! ```bash
//! # Print the sample cart
//! shopeasy cart
//!
//! # Remove one Smart Watch and drop the Coffee Maker line
//! shopeasy cart --change 2:-1 --change 3:-1
//! ```

use std::str::FromStr;

use shopeasy_core::ProductId;
use shopeasy_storefront::cart::{CartLedger, CartSummary, QuantityChange};
use shopeasy_storefront::error::AppError;
use shopeasy_storefront::navigation::Navigator;
use thiserror::Error;

/// Errors parsing a `--change` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityDeltaError {
    #[error("expected ID:DELTA, got {0:?}")]
    MissingSeparator(String),
    #[error("item id is empty")]
    EmptyId,
    #[error("invalid delta {0:?}, expected a whole number such as -1 or +2")]
    InvalidDelta(String),
}

/// A `--change ID:DELTA` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityDelta {
    pub id: ProductId,
    pub delta: i64,
}

impl FromStr for QuantityDelta {
    type Err = QuantityDeltaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, delta) = s
            .rsplit_once(':')
            .ok_or_else(|| QuantityDeltaError::MissingSeparator(s.to_string()))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(QuantityDeltaError::EmptyId);
        }
        let delta = delta
            .trim()
            .parse::<i64>()
            .map_err(|_| QuantityDeltaError::InvalidDelta(delta.to_string()))?;
        Ok(Self {
            id: ProductId::new(id),
            delta,
        })
    }
}

/// Apply `changes` to the sample cart and print it.
///
/// # Errors
///
/// Returns [`AppError::Price`] if the total is too large to compute.
#[allow(clippy::print_stdout)]
pub fn show(changes: &[QuantityDelta], navigator: &mut Navigator) -> Result<(), AppError> {
    let cart = apply(CartLedger::seeded(), changes);
    for line in render(&cart, navigator)? {
        println!("{line}");
    }
    Ok(())
}

fn apply(mut cart: CartLedger, changes: &[QuantityDelta]) -> CartLedger {
    for change in changes {
        match cart.change_quantity(&change.id, change.delta) {
            QuantityChange::Updated { quantity } => {
                tracing::info!(id = %change.id, quantity, "Quantity updated");
            }
            QuantityChange::Removed => tracing::info!(id = %change.id, "Item removed"),
            QuantityChange::Unknown => tracing::warn!(id = %change.id, "No such item in cart"),
        }
    }
    cart
}

/// Screen lines for `cart`. The empty state's only action leads back.
fn render(cart: &CartLedger, navigator: &mut Navigator) -> Result<Vec<String>, AppError> {
    let mut lines = vec![super::screen_heading(navigator)];

    match cart.summary()? {
        CartSummary::Empty => {
            lines.push("🛒 Your cart is empty".to_string());
            lines.push("Add some products to get started!".to_string());
            if navigator.go_back() {
                tracing::info!(route = %navigator.current(), "Continue shopping");
            }
        }
        summary @ CartSummary::Populated { total, .. } => {
            for item in cart.items() {
                lines.push(format!(
                    "{:>3}  {} {:<22} {} x {:>3} = {}",
                    item.id().as_str(),
                    item.display_glyph(),
                    item.name(),
                    item.unit_price(),
                    item.quantity(),
                    item.line_total()?,
                ));
            }
            lines.push(String::new());
            lines.push(format!("{} {total}", summary.label().unwrap_or_default()));
        }
    }
    Ok(lines)
}

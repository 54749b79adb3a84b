use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

use crate::models::product::{Product, ProductId, SelectedProductInfo};

/// In-memory basket: per-product quantities plus the distinct selected
/// products in first-selection order.
///
/// A product whose quantity drops to zero leaves the selection list but keeps
/// its quantity entry at 0, so a later selection counts up from 0 again and
/// appends the product to the end of the list.
#[derive(Debug, Clone, Default)]
pub struct Basket {
    quantities: HashMap<ProductId, u32>,
    selected: IndexMap<ProductId, SelectedProductInfo>,
    revision: u64,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, returning the new quantity.
    pub fn select(&mut self, product: &Product) -> u32 {
        let quantity = self.quantities.entry(product.id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        let quantity = *quantity;

        if !self.selected.contains_key(&product.id) {
            self.selected
                .insert(product.id, SelectedProductInfo::from(product));
        }

        self.revision += 1;
        debug!("Selected product {} (quantity {})", product.id, quantity);
        quantity
    }

    /// Takes one unit of `product_id` out, returning the remaining quantity.
    /// Never goes below zero; removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: ProductId) -> u32 {
        let Some(quantity) = self.quantities.get_mut(&product_id) else {
            debug!("Ignoring removal of unselected product {}", product_id);
            return 0;
        };

        let mut changed = false;
        if *quantity > 0 {
            *quantity -= 1;
            changed = true;
        }
        let remaining = *quantity;

        // quantity entry stays at 0
        if remaining == 0 && self.selected.shift_remove(&product_id).is_some() {
            changed = true;
        }

        if changed {
            self.revision += 1;
            debug!("Removed product {} (quantity {})", product_id, remaining);
        }
        remaining
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.quantities.get(&product_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.selected.contains_key(&product_id)
    }

    /// Selected products in first-selection order.
    pub fn selected(&self) -> impl Iterator<Item = &SelectedProductInfo> {
        self.selected.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&SelectedProductInfo, u32)> {
        self.selected
            .values()
            .map(move |info| (info, self.quantity_of(info.id)))
    }

    pub fn quantities(&self) -> &HashMap<ProductId, u32> {
        &self.quantities
    }

    pub fn item_count(&self) -> u32 {
        self.lines().map(|(_, quantity)| quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

use bigdecimal::{BigDecimal, RoundingMode};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{
    basket::Basket,
    product::{Catalog, Product, ProductId},
};

/// Sum of `price * quantity` over every catalog product, rounded half-up to
/// cents. Products missing from `quantities` contribute nothing.
pub fn invoice_total(products: &[Product], quantities: &HashMap<ProductId, u32>) -> BigDecimal {
    let total = products.iter().fold(BigDecimal::from(0), |acc, product| {
        let quantity = quantities.get(&product.id).copied().unwrap_or(0);
        acc + &product.price * &BigDecimal::from(quantity)
    });

    round_to_cents(&total)
}

pub fn round_to_cents(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Caches the invoice total against the catalog and basket revisions it was
/// computed from. Recomputes only when either side has changed.
#[derive(Debug, Default)]
pub struct InvoiceCalculator {
    cached: Option<((u64, u64), BigDecimal)>,
    recomputations: u64,
}

impl InvoiceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&mut self, catalog: &Catalog, basket: &Basket) -> BigDecimal {
        let key = (catalog.revision(), basket.revision());
        if let Some((cached_key, total)) = &self.cached {
            if *cached_key == key {
                return total.clone();
            }
        }

        debug!(
            "Calculating invoice total (catalog rev {}, basket rev {})",
            key.0, key.1
        );
        let total = invoice_total(catalog.products(), basket.quantities());
        self.recomputations += 1;
        self.cached = Some((key, total.clone()));
        total
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).unwrap()
    }

    #[test]
    fn test_empty_quantities_total_zero() {
        let products = vec![Product::new(1, "A", "5").unwrap()];
        let total = invoice_total(&products, &HashMap::new());
        assert_eq!(total, dec("0.00"));
    }

    #[test]
    fn test_empty_catalog_total_zero() {
        let quantities = HashMap::from([(ProductId(1), 3)]);
        assert_eq!(invoice_total(&[], &quantities), dec("0"));
    }

    #[test]
    fn test_half_cent_rounds_up() {
        let products = vec![Product::new(1, "A", "10.005").unwrap()];
        let quantities = HashMap::from([(ProductId(1), 3)]);

        // 30.015 -> 30.02
        assert_eq!(invoice_total(&products, &quantities), dec("30.02"));
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(&dec("1.004")), dec("1.00"));
        assert_eq!(round_to_cents(&dec("1.005")), dec("1.01"));
        assert_eq!(round_to_cents(&dec("2.675")), dec("2.68"));
        assert_eq!(round_to_cents(&dec("7")), dec("7.00"));
    }

    #[test]
    fn test_sums_over_catalog_with_tombstones() {
        let products = vec![
            Product::new(1, "A", "5").unwrap(),
            Product::new(2, "B", "2.5").unwrap(),
            Product::new(3, "C", "99.99").unwrap(),
        ];
        let quantities = HashMap::from([(ProductId(1), 2), (ProductId(2), 1), (ProductId(3), 0)]);

        assert_eq!(invoice_total(&products, &quantities), dec("12.50"));
    }

    #[test]
    fn test_quantities_outside_catalog_ignored() {
        let products = vec![Product::new(1, "A", "5").unwrap()];
        let quantities = HashMap::from([(ProductId(1), 1), (ProductId(77), 4)]);

        assert_eq!(invoice_total(&products, &quantities), dec("5"));
    }

    #[test]
    fn test_calculator_memoizes_on_revisions() {
        let mut catalog = Catalog::new();
        catalog.replace(vec![Product::new(1, "A", "5").unwrap()]);
        let mut basket = Basket::new();
        let mut calculator = InvoiceCalculator::new();

        assert_eq!(calculator.total(&catalog, &basket), dec("0"));
        assert_eq!(calculator.total(&catalog, &basket), dec("0"));
        assert_eq!(calculator.recomputations(), 1);

        let product = catalog.products()[0].clone();
        basket.select(&product);
        assert_eq!(calculator.total(&catalog, &basket), dec("5"));
        assert_eq!(calculator.recomputations(), 2);

        catalog.replace(vec![Product::new(1, "A", "6").unwrap()]);
        assert_eq!(calculator.total(&catalog, &basket), dec("6"));
        assert_eq!(calculator.recomputations(), 3);

        calculator.total(&catalog, &basket);
        assert_eq!(calculator.recomputations(), 3);
    }
}

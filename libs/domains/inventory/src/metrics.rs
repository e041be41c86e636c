//! Stock metrics aggregation.

use crate::models::{MetricsRow, Product, OVERALL_CATEGORY};

/// One row per category, in the order given, followed by the `Overall` row.
///
/// Recomputed from scratch on every call.
pub fn compute(products: &[Product], categories: &[String]) -> Vec<MetricsRow> {
    let mut rows: Vec<MetricsRow> = categories
        .iter()
        .map(|category| {
            fold(
                category,
                products.iter().filter(|p| &p.category == category),
            )
        })
        .collect();

    rows.push(fold(OVERALL_CATEGORY, products.iter()));
    rows
}

fn fold<'a>(label: &str, products: impl Iterator<Item = &'a Product>) -> MetricsRow {
    let (total_stock, total_value) = products.fold((0u64, 0.0f64), |(stock, value), p| {
        (stock + u64::from(p.stock), value + p.stock_value())
    });

    MetricsRow {
        category: label.to_string(),
        total_stock,
        total_value,
        average_price: average_price(total_value, total_stock),
    }
}

/// Stock-weighted average price; zero stock yields zero.
pub fn average_price(total_value: f64, total_stock: u64) -> f64 {
    if total_stock == 0 {
        0.0
    } else {
        total_value / total_stock as f64
    }
}

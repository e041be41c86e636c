//! Demo data for local development

use chrono::NaiveDate;
use domain_inventory::{InventoryResult, InventoryService, ProductDraft, ProductRepository};
use tracing::info;

fn product(
    name: &str,
    category: &str,
    unit_price: f64,
    stock: u32,
    expires: Option<(i32, u32, u32)>,
) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        category: category.to_string(),
        unit_price,
        expiration_date: expires.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        stock,
    }
}

fn demo_products() -> Vec<ProductDraft> {
    vec![
        product("Whole Milk", "Dairy", 1.49, 24, Some((2026, 11, 2))),
        product("Cheddar Cheese", "Dairy", 5.99, 8, Some((2027, 1, 15))),
        product("Sourdough Bread", "Bakery", 4.25, 0, Some((2026, 10, 25))),
        product("Basmati Rice", "Pantry", 3.10, 40, None),
        product("Sea Salt", "Pantry", 1.05, 15, None),
        product("Orange Juice", "Drinks", 2.79, 0, Some((2026, 12, 1))),
    ]
}

/// Insert the demo products, returning how many were created.
pub async fn seed<R: ProductRepository>(service: &InventoryService<R>) -> InventoryResult<usize> {
    let drafts = demo_products();
    let count = drafts.len();

    for draft in drafts {
        service.create_product(draft).await?;
    }

    info!(count, "Seeded demo products");
    Ok(count)
}

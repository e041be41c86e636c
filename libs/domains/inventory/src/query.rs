//! Filter → sort → paginate pipeline over an in-memory product list.

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::models::{PageResult, Product, ProductQuery, SortDirection, SortKey, SortSpec};

/// Run the whole listing pipeline over `products`.
pub fn execute(products: Vec<Product>, query: &ProductQuery) -> PageResult<Product> {
    let mut filtered: Vec<Product> = products
        .into_iter()
        .filter(|p| matches(p, query))
        .collect();

    sort(&mut filtered, query.primary_sort, query.secondary_sort);

    paginate(filtered, query.page, query.size)
}

/// Whether a product passes every active filter of the query.
pub fn matches(product: &Product, query: &ProductQuery) -> bool {
    if let Some(ref name) = query.name {
        if !product
            .name
            .to_lowercase()
            .contains(&name.to_lowercase())
        {
            return false;
        }
    }
    if !query.categories.is_empty() && !query.categories.contains(&product.category) {
        return false;
    }
    if let Some(available) = query.available {
        if available != product.is_in_stock() {
            return false;
        }
    }
    true
}

/// Stable sort by `primary`, breaking ties with `secondary` when given.
pub fn sort(products: &mut [Product], primary: SortSpec, secondary: Option<SortSpec>) {
    products.sort_by(|a, b| {
        let ordering = compare(a, b, primary);
        match secondary {
            Some(spec) => ordering.then_with(|| compare(a, b, spec)),
            None => ordering,
        }
    });
}

/// Compare two products on one key, honouring that key's direction.
pub fn compare(a: &Product, b: &Product, spec: SortSpec) -> Ordering {
    let ordering = match spec.key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::UnitPrice => a.unit_price.total_cmp(&b.unit_price),
        SortKey::InStock => a.stock.cmp(&b.stock),
        SortKey::ExpirationDate => expiration_or_max(a).cmp(&expiration_or_max(b)),
    };

    match spec.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

// Products without an expiration date sort as if they expire last.
fn expiration_or_max(product: &Product) -> NaiveDate {
    product.expiration_date.unwrap_or(NaiveDate::MAX)
}

/// Slice one page out of an already sorted list.
///
/// A page past the end yields empty content rather than an error; the total
/// always counts the full input.
pub fn paginate<T>(items: Vec<T>, page: usize, size: usize) -> PageResult<T> {
    let total = items.len();
    let start = page.saturating_mul(size);

    let content = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(size).min(total);
        items.into_iter().skip(start).take(end - start).collect()
    };

    PageResult {
        content,
        page_number: page,
        page_size: size,
        total_elements: total,
    }
}

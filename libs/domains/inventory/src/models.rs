use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Label of the aggregate row appended after the per-category metrics.
pub const OVERALL_CATEGORY: &str = "Overall";

/// Quantity added to a product's stock by a replenishment when none is configured.
pub const DEFAULT_REPLENISH_QUANTITY: u32 = 10;

/// Product entity as held by a [`ProductRepository`](crate::repository::ProductRepository).
///
/// An `id` of zero (or below) marks a record that has not been persisted yet;
/// every record read back from a repository carries a positive id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    #[serde(default)]
    pub id: i64,
    /// Product name
    pub name: String,
    /// Free-form category label
    pub category: String,
    /// Unit price
    pub unit_price: f64,
    /// Expiration date, if the product expires
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    /// Units currently in stock
    #[serde(rename = "inStock")]
    pub stock: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied product fields for create and update.
///
/// Timestamps and the id are never read from the client; unknown JSON fields
/// such as `createdAt` are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, rename = "inStock")]
    pub stock: u32,
}

impl Product {
    /// Build an unsaved product from a draft, stamping both timestamps with `now`.
    pub fn new(draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: draft.name,
            category: draft.category,
            unit_price: draft.unit_price,
            expiration_date: draft.expiration_date,
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every client-owned field with the draft's values.
    ///
    /// This is a full replacement, not a merge: fields the caller left at their
    /// defaults overwrite the stored values.
    pub fn apply_draft(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.category = draft.category;
        self.unit_price = draft.unit_price;
        self.expiration_date = draft.expiration_date;
        self.stock = draft.stock;
        self.updated_at = now;
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Stock value at unit price; zero when nothing is in stock.
    pub fn stock_value(&self) -> f64 {
        if self.is_in_stock() {
            self.unit_price * f64::from(self.stock)
        } else {
            0.0
        }
    }
}

/// One page of a filtered and sorted result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Records on this page (at most `page_size`)
    pub content: Vec<T>,
    /// Zero-based page index that was requested
    pub page_number: usize,
    /// Page size that was requested
    pub page_size: usize,
    /// Number of records matching the filter before pagination
    pub total_elements: usize,
}

/// Aggregate stock figures for one category, or for every product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRow {
    /// Category label, or `Overall`
    pub category: String,
    pub total_stock: u64,
    /// Sum of `unitPrice * inStock` over products with stock
    pub total_value: f64,
    /// `totalValue / totalStock`, or 0 when there is no stock
    pub average_price: f64,
}

/// Field a product listing can be ordered by.
///
/// Unrecognised or missing keys fall back to [`SortKey::Id`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize, ToSchema,
)]
pub enum SortKey {
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "category")]
    Category,
    #[strum(to_string = "unitPrice", serialize = "price")]
    UnitPrice,
    #[strum(to_string = "inStock", serialize = "stock")]
    InStock,
    #[strum(serialize = "expirationDate")]
    ExpirationDate,
}

impl SortKey {
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

/// Ordering direction; anything other than `desc` (any case) is ascending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize, ToSchema,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
    }
}

/// One sort key together with its own direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Primary ordering; always present, defaulting to ascending id.
    pub fn primary(key: Option<&str>, direction: Option<&str>) -> Self {
        Self::new(SortKey::parse(key), SortDirection::parse(direction))
    }

    /// Tie-break ordering; only present when a non-empty key was supplied.
    pub fn secondary(key: Option<&str>, direction: Option<&str>) -> Option<Self> {
        key.filter(|k| !k.is_empty())
            .map(|k| Self::new(SortKey::parse(Some(k)), SortDirection::parse(direction)))
    }
}

/// Filter, ordering and page selection for a product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    /// Case-insensitive name substring
    pub name: Option<String>,
    /// Accepted categories; empty accepts every category
    pub categories: Vec<String>,
    /// `Some(true)` keeps products with stock, `Some(false)` keeps products without
    pub available: Option<bool>,
    pub primary_sort: SortSpec,
    pub secondary_sort: Option<SortSpec>,
    /// Zero-based page index
    pub page: usize,
    pub size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            name: None,
            categories: Vec::new(),
            available: None,
            primary_sort: SortSpec::default(),
            secondary_sort: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            unit_price: 1.5,
            expiration_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            stock: 4,
        }
    }

    #[test]
    fn test_new_product_is_unsaved_with_equal_timestamps() {
        let now = Utc::now();
        let product = Product::new(draft(), now);
        assert!(!product.is_persisted());
        assert_eq!(product.created_at, now);
        assert_eq!(product.updated_at, now);
    }

    #[test]
    fn test_apply_draft_overwrites_everything_but_created_at() {
        let created = Utc::now();
        let mut product = Product::new(draft(), created);
        let later = created + chrono::Duration::seconds(5);

        product.apply_draft(
            ProductDraft {
                name: "Cheese".to_string(),
                ..Default::default()
            },
            later,
        );

        assert_eq!(product.name, "Cheese");
        assert_eq!(product.category, "");
        assert_eq!(product.stock, 0);
        assert_eq!(product.expiration_date, None);
        assert_eq!(product.created_at, created);
        assert_eq!(product.updated_at, later);
    }

    #[test]
    fn test_stock_value_ignores_empty_stock() {
        let mut product = Product::new(draft(), Utc::now());
        assert_eq!(product.stock_value(), 6.0);
        product.stock = 0;
        assert_eq!(product.stock_value(), 0.0);
    }

    #[test]
    fn test_sort_key_parsing_and_aliases() {
        assert_eq!(SortKey::parse(Some("name")), SortKey::Name);
        assert_eq!(SortKey::parse(Some("unitPrice")), SortKey::UnitPrice);
        assert_eq!(SortKey::parse(Some("price")), SortKey::UnitPrice);
        assert_eq!(SortKey::parse(Some("stock")), SortKey::InStock);
        assert_eq!(SortKey::parse(Some("expirationDate")), SortKey::ExpirationDate);
        assert_eq!(SortKey::parse(Some("bogus")), SortKey::Id);
        assert_eq!(SortKey::parse(None), SortKey::Id);
        assert_eq!(SortKey::UnitPrice.to_string(), "unitPrice");
    }

    #[test]
    fn test_sort_direction_defaults_to_ascending() {
        assert_eq!(SortDirection::parse(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(None), SortDirection::Asc);
    }

    #[test]
    fn test_secondary_sort_requires_non_empty_key() {
        assert_eq!(SortSpec::secondary(None, Some("desc")), None);
        assert_eq!(SortSpec::secondary(Some(""), Some("desc")), None);
        assert_eq!(
            SortSpec::secondary(Some("name"), Some("desc")),
            Some(SortSpec::new(SortKey::Name, SortDirection::Desc))
        );
    }

    #[test]
    fn test_draft_ignores_client_timestamps() {
        let draft: ProductDraft = serde_json::from_value(serde_json::json!({
            "name": "Bread",
            "category": "Bakery",
            "unitPrice": 2.25,
            "inStock": 3,
            "createdAt": "2001-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(draft.name, "Bread");
        assert_eq!(draft.stock, 3);
    }
}

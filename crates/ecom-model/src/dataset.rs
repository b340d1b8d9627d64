//! Catalogue of the source extracts the pipeline reads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns::{
    CUSTOMER_CITY, CUSTOMER_ID, CUSTOMER_STATE, ORDER_ID, PAYMENT_TYPE, PAYMENT_VALUE,
    PRODUCT_CATEGORY_NAME, PRODUCT_CATEGORY_NAME_ENGLISH, PRODUCT_ID, SELLER_ID,
};

/// One of the fixed input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Orders,
    Customers,
    Payments,
    OrderItems,
    Reviews,
    Products,
    Sellers,
    CategoryTranslation,
}

impl SourceTable {
    /// All tables in load order (anchor first).
    pub const ALL: [SourceTable; 8] = [
        SourceTable::Orders,
        SourceTable::Customers,
        SourceTable::Payments,
        SourceTable::OrderItems,
        SourceTable::Reviews,
        SourceTable::Products,
        SourceTable::Sellers,
        SourceTable::CategoryTranslation,
    ];

    /// Expected file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceTable::Orders => "orders_dataset.csv",
            SourceTable::Customers => "customers_dataset.csv",
            SourceTable::Payments => "order_payments_dataset.csv",
            SourceTable::OrderItems => "order_items_dataset.csv",
            SourceTable::Reviews => "order_reviews_dataset.csv",
            SourceTable::Products => "products_dataset.csv",
            SourceTable::Sellers => "sellers_dataset.csv",
            SourceTable::CategoryTranslation => "product_category_name_translation.csv",
        }
    }

    /// Short snake_case name, also used as the join collision suffix.
    pub fn name(self) -> &'static str {
        match self {
            SourceTable::Orders => "orders",
            SourceTable::Customers => "customers",
            SourceTable::Payments => "payments",
            SourceTable::OrderItems => "order_items",
            SourceTable::Reviews => "reviews",
            SourceTable::Products => "products",
            SourceTable::Sellers => "sellers",
            SourceTable::CategoryTranslation => "category_translation",
        }
    }

    /// Columns that must be present before the table is loaded.
    ///
    /// Covers the join keys plus the columns the aggregations read.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            SourceTable::Orders => &[ORDER_ID, CUSTOMER_ID],
            SourceTable::Customers => &[CUSTOMER_ID, CUSTOMER_CITY, CUSTOMER_STATE],
            SourceTable::Payments => &[ORDER_ID, PAYMENT_TYPE, PAYMENT_VALUE],
            SourceTable::OrderItems => &[ORDER_ID, PRODUCT_ID, SELLER_ID],
            SourceTable::Reviews => &[ORDER_ID],
            SourceTable::Products => &[PRODUCT_ID, PRODUCT_CATEGORY_NAME],
            SourceTable::Sellers => &[SELLER_ID],
            SourceTable::CategoryTranslation => {
                &[PRODUCT_CATEGORY_NAME, PRODUCT_CATEGORY_NAME_ENGLISH]
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SourceTable::Orders => "Order headers (join anchor)",
            SourceTable::Customers => "Customer location per order customer",
            SourceTable::Payments => "Payment rows per order",
            SourceTable::OrderItems => "Line items per order",
            SourceTable::Reviews => "Customer reviews per order",
            SourceTable::Products => "Product attributes and category",
            SourceTable::Sellers => "Seller location",
            SourceTable::CategoryTranslation => "Category name translation to English",
        }
    }

    /// Case-insensitive lookup by file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.file_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Column names shared by the join, aggregation and segmentation stages.

pub const ORDER_ID: &str = "order_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const PRODUCT_ID: &str = "product_id";
pub const SELLER_ID: &str = "seller_id";

pub const CUSTOMER_CITY: &str = "customer_city";
pub const CUSTOMER_STATE: &str = "customer_state";

pub const PAYMENT_TYPE: &str = "payment_type";
pub const PAYMENT_VALUE: &str = "payment_value";

pub const PRODUCT_CATEGORY_NAME: &str = "product_category_name";
pub const PRODUCT_CATEGORY_NAME_ENGLISH: &str = "product_category_name_english";

/// Segment label column appended to the clustered order-items table.
pub const CLUSTER: &str = "cluster";

// Output headers for derived tables.
pub const PRODUCT_CATEGORY_LABEL: &str = "Product Category";
pub const ORDER_COUNT_LABEL: &str = "Order Count";
pub const PAYMENT_TYPE_LABEL: &str = "Payment Type";
pub const COUNT_LABEL: &str = "Count";
pub const CLUSTER_LABEL: &str = "Cluster";
pub const NUMBER_OF_ORDERS_LABEL: &str = "Number of Orders";

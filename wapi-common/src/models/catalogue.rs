use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    OutOfStock,
    Limited,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItem {
    pub id: String,
    /// 1-based serial number shown in the table.
    pub sno: u32,
    pub image: String,
    pub retailer_id: String,
    pub item_name: String,
    pub item_description: String,
    pub price: f64,
    pub condition: ItemCondition,
    pub availability: Availability,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueItemPatch {
    pub retailer_id: Option<String>,
    pub item_name: Option<String>,
    pub item_description: Option<String>,
    pub price: Option<f64>,
    pub condition: Option<ItemCondition>,
    pub availability: Option<Availability>,
}

impl Entity for CatalogueItem {
    type Patch = CatalogueItemPatch;

    const STORAGE_KEY: &'static str = "catalogueItems";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.item_name
    }

    fn set_name(&mut self, name: String) {
        self.item_name = name;
    }

    fn apply_patch(&mut self, patch: &CatalogueItemPatch) {
        if let Some(v) = &patch.retailer_id {
            self.retailer_id = v.clone();
        }
        if let Some(v) = &patch.item_name {
            self.item_name = v.clone();
        }
        if let Some(v) = &patch.item_description {
            self.item_description = v.clone();
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.condition {
            self.condition = v;
        }
        if let Some(v) = patch.availability {
            self.availability = v;
        }
    }

    fn on_duplicate(&mut self, _today: NaiveDate, collection_len: usize) {
        self.sno = collection_len as u32 + 1;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.item_name, term)
            || contains_ci(&self.retailer_id, term)
            || contains_ci(&self.item_description, term)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl FromStr for PaymentStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

/// A commerce order. `items` is carried for layout compatibility only and is
/// always empty: orders do not reference catalogue rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub order_id: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_price: f64,
    pub transaction_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub items: Vec<CatalogueItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub order_id: Option<String>,
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub total_price: Option<f64>,
    pub transaction_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
}

impl Entity for Order {
    type Patch = OrderPatch;

    const STORAGE_KEY: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.order_id
    }

    fn set_name(&mut self, name: String) {
        self.order_id = name;
    }

    fn apply_patch(&mut self, patch: &OrderPatch) {
        if let Some(v) = &patch.order_id {
            self.order_id = v.clone();
        }
        if let Some(v) = patch.order_status {
            self.order_status = v;
        }
        if let Some(v) = patch.payment_status {
            self.payment_status = v;
        }
        if let Some(v) = patch.total_price {
            self.total_price = v;
        }
        if let Some(v) = &patch.transaction_id {
            self.transaction_id = v.clone();
        }
        if let Some(v) = &patch.customer_name {
            self.customer_name = v.clone();
        }
        if let Some(v) = &patch.customer_email {
            self.customer_email = v.clone();
        }
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.order_id, term)
            || contains_ci(&self.customer_name, term)
            || contains_ci(&self.customer_email, term)
    }
}

use chrono::{NaiveDate, Utc};

use super::{EntityForm, parse_float_or};
use wapi_common::models::{
    Availability, CatalogueItem, CatalogueItemPatch, ItemCondition, Order, OrderPatch,
    OrderStatus, PaymentStatus,
};

/// Placeholder artwork for items created from the form.
pub const DEFAULT_ITEM_IMAGE: &str = "📦";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueItemForm {
    pub retailer_id: String,
    pub item_name: String,
    pub item_description: String,
    pub price: String,
    pub condition: ItemCondition,
    pub availability: Availability,
}

impl Default for CatalogueItemForm {
    fn default() -> Self {
        Self {
            retailer_id: String::new(),
            item_name: String::new(),
            item_description: String::new(),
            price: String::new(),
            condition: ItemCondition::New,
            availability: Availability::InStock,
        }
    }
}

impl EntityForm for CatalogueItemForm {
    type Entity = CatalogueItem;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("itemName", &self.item_name),
            ("retailerId", &self.retailer_id),
            ("price", &self.price),
        ]
    }

    /// `sno` is left at 0; the catalogue service numbers the row on insert.
    fn into_new(self, today: NaiveDate) -> CatalogueItem {
        CatalogueItem {
            id: String::new(),
            sno: 0,
            image: DEFAULT_ITEM_IMAGE.to_string(),
            retailer_id: self.retailer_id,
            item_name: self.item_name,
            item_description: self.item_description,
            price: parse_float_or(&self.price, 0.0),
            condition: self.condition,
            availability: self.availability,
            created_at: today,
        }
    }

    fn into_patch(self) -> CatalogueItemPatch {
        CatalogueItemPatch {
            retailer_id: Some(self.retailer_id),
            item_name: Some(self.item_name),
            item_description: Some(self.item_description),
            price: Some(parse_float_or(&self.price, 0.0)),
            condition: Some(self.condition),
            availability: Some(self.availability),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub order_id: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_price: String,
    pub transaction_id: String,
    pub customer_name: String,
    pub customer_email: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            order_id: String::new(),
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            total_price: String::new(),
            transaction_id: String::new(),
            customer_name: String::new(),
            customer_email: String::new(),
        }
    }
}

impl EntityForm for OrderForm {
    type Entity = Order;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("orderId", &self.order_id),
            ("customerName", &self.customer_name),
            ("totalPrice", &self.total_price),
        ]
    }

    fn into_new(self, _today: NaiveDate) -> Order {
        Order {
            id: String::new(),
            created_at: Utc::now(),
            order_id: self.order_id,
            order_status: self.order_status,
            payment_status: self.payment_status,
            total_price: parse_float_or(&self.total_price, 0.0),
            transaction_id: self.transaction_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            items: Vec::new(),
        }
    }

    fn into_patch(self) -> OrderPatch {
        OrderPatch {
            order_id: Some(self.order_id),
            order_status: Some(self.order_status),
            payment_status: Some(self.payment_status),
            total_price: Some(parse_float_or(&self.total_price, 0.0)),
            transaction_id: Some(self.transaction_id),
            customer_name: Some(self.customer_name),
            customer_email: Some(self.customer_email),
        }
    }
}

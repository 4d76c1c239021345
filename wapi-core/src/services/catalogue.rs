// src/services/catalogue.rs

use std::ops::Deref;
use std::sync::Arc;

use crate::Error;
use crate::eventbus::EventBus;
use crate::forms::{CatalogueItemForm, EntityForm};
use crate::services::{CrudService, Paginated, Toasts, listing};
use crate::utils::time::today;
use wapi_common::models::{CatalogueItem, Order, OrderStatus, PaymentStatus};
use wapi_common::traits::Repository;

pub const DEFAULT_PER_PAGE: usize = 10;

const ITEM_TOASTS: Toasts = Toasts {
    created: "Catalogue item created successfully",
    updated: "Catalogue item updated successfully",
    deleted: "Catalogue item deleted successfully",
    duplicated: "Catalogue item duplicated successfully",
};

const ORDER_TOASTS: Toasts = Toasts {
    created: "Order created successfully",
    updated: "Order updated successfully",
    deleted: "Order deleted successfully",
    duplicated: "Order duplicated successfully",
};

pub struct CatalogueService {
    crud: CrudService<CatalogueItem>,
}

impl CatalogueService {
    pub fn new(repo: Arc<dyn Repository<CatalogueItem>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, ITEM_TOASTS) }
    }

    /// New items are numbered after the current row count.
    pub async fn submit_new(&self, form: CatalogueItemForm) -> Result<Vec<CatalogueItem>, Error> {
        if let Err(e) = form.validate() {
            return Err(self.crud.notifier().rejected(e).await);
        }
        let mut item = form.into_new(today());
        item.sno = self.crud.list().await?.len() as u32 + 1;
        self.crud.create(item).await
    }

    pub async fn page(
        &self,
        term: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Paginated<CatalogueItem>, Error> {
        let hits = listing::search(self.crud.list().await?, term);
        Ok(Paginated::new(hits, page, per_page))
    }
}

impl Deref for CatalogueService {
    type Target = CrudService<CatalogueItem>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

/// Order table filter; `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.order_status.is_none_or(|s| order.order_status == s)
            && self.payment_status.is_none_or(|s| order.payment_status == s)
    }
}

pub struct OrderService {
    crud: CrudService<Order>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn Repository<Order>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, ORDER_TOASTS) }
    }

    pub async fn page(
        &self,
        filter: OrderFilter,
        page: usize,
        per_page: usize,
    ) -> Result<Paginated<Order>, Error> {
        let hits: Vec<Order> = self
            .crud
            .list()
            .await?
            .into_iter()
            .filter(|o| filter.matches(o))
            .collect();
        Ok(Paginated::new(hits, page, per_page))
    }
}

impl Deref for OrderService {
    type Target = CrudService<Order>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{CollectionRepository, InMemoryStore};
    use crate::seed;

    fn catalogue() -> Result<CatalogueService, Error> {
        let repo =
            CollectionRepository::new(Arc::new(InMemoryStore::new()), seed::catalogue_items()?);
        Ok(CatalogueService::new(Arc::new(repo), None))
    }

    #[tokio::test]
    async fn new_item_gets_the_next_serial_number() -> Result<(), Error> {
        let svc = catalogue()?;
        let form = CatalogueItemForm {
            item_name: "USB-C Cable".into(),
            retailer_id: "CAB-001".into(),
            price: "9.5".into(),
            ..Default::default()
        };
        let items = svc.submit_new(form).await?;
        let cable = items.last().unwrap();
        assert_eq!(cable.sno, 4);
        assert_eq!(cable.price, 9.5);
        Ok(())
    }

    #[tokio::test]
    async fn search_then_paginate() -> Result<(), Error> {
        let svc = catalogue()?;
        let page = svc.page("pro", 1, 2).await?;
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);

        let second = svc.page("pro", 2, 2).await?;
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.showing(), (3, 3, 3));
        Ok(())
    }

    #[tokio::test]
    async fn orders_filter_by_status_and_payment() -> Result<(), Error> {
        let repo = CollectionRepository::new(Arc::new(InMemoryStore::new()), seed::orders()?);
        let svc = OrderService::new(Arc::new(repo), None);

        let paid = OrderFilter { payment_status: Some(PaymentStatus::Paid), ..Default::default() };
        assert_eq!(svc.page(paid, 1, DEFAULT_PER_PAGE).await?.total, 2);

        let shipped_and_paid = OrderFilter {
            order_status: Some(OrderStatus::Shipped),
            payment_status: Some(PaymentStatus::Paid),
        };
        assert_eq!(svc.page(shipped_and_paid, 1, DEFAULT_PER_PAGE).await?.total, 1);
        assert_eq!(svc.page(OrderFilter::default(), 1, DEFAULT_PER_PAGE).await?.total, 3);
        Ok(())
    }
}

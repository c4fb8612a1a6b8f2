//! In-memory orders keyed by user id, plus the fixed demo profile.

use apilab_schema::orders::{Address, ItemQuantity, Preferences};
use apilab_schema::{Order, OrderFilters, OrderUpdate, UserProfile};
use std::collections::HashMap;

pub const DEMO_USER_ID: i64 = 101;

/// Outcome of inserting an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    /// Appended to an existing user's list.
    Appended,
    /// User had no entry; one was created holding only this order.
    CreatedUser,
    /// The user already has an order with this id. Nothing changed.
    DuplicateId,
}

/// Outcome of a partial order update.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Updated(Order),
    UnknownUser,
    UnknownOrder,
}

#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    by_user: HashMap<i64, Vec<Order>>,
}

impl OrderBook {
    /// Book seeded with the demo users 101 and 102.
    pub fn seeded() -> Self {
        let mut by_user = HashMap::new();
        by_user.insert(
            DEMO_USER_ID,
            vec![
                Order::new(5001, "Mechanical Keyboard", 1, 120.5),
                Order::new(5002, "Wireless Mouse", 2, 45.0),
                Order::new(5003, "Laptop Stand", 1, 30.0),
                Order::new(5004, "Wireless Mouse", 1, 50.0),
            ],
        );
        by_user.insert(102, vec![Order::new(6001, "USB-C Hub", 1, 25.0)]);
        Self { by_user }
    }

    pub fn orders_of(&self, user_id: i64) -> &[Order] {
        self.by_user.get(&user_id).map_or(&[], Vec::as_slice)
    }

    /// Orders of `user_id` that pass every supplied filter, in stored order.
    pub fn search(&self, user_id: i64, filters: &OrderFilters) -> Vec<Order> {
        self.orders_of(user_id)
            .iter()
            .filter(|order| filters.matches(order))
            .cloned()
            .collect()
    }

    pub fn insert(&mut self, user_id: i64, order: Order) -> Insert {
        match self.by_user.get_mut(&user_id) {
            Some(orders) if orders.iter().any(|o| o.order_id == order.order_id) => {
                Insert::DuplicateId
            }
            Some(orders) => {
                orders.push(order);
                Insert::Appended
            }
            None => {
                self.by_user.insert(user_id, vec![order]);
                Insert::CreatedUser
            }
        }
    }

    /// Applies `patch` to the first order of `user_id` with `order_id`.
    pub fn update(&mut self, user_id: i64, order_id: i64, patch: &OrderUpdate) -> Update {
        let Some(orders) = self.by_user.get_mut(&user_id) else {
            return Update::UnknownUser;
        };
        match orders.iter_mut().find(|o| o.order_id == order_id) {
            Some(order) => {
                patch.apply_to(order);
                Update::Updated(order.clone())
            }
            None => Update::UnknownOrder,
        }
    }
}

/// The fixed profile served for user 101.
pub fn demo_profile() -> UserProfile {
    UserProfile {
        user_id: DEMO_USER_ID,
        name: "Jacky".to_string(),
        email: "jacky@example.com".to_string(),
        is_active: true,
        address: Address {
            street: "123 FastAPI Lane".to_string(),
            city: "Melbourne".to_string(),
            postcode: "3000".to_string(),
            country: "Australia".to_string(),
        },
        orders: vec![
            Order::new(5001, "Mechanical Keyboard", 1, 120.5),
            Order::new(5002, "Wireless Mouse", 2, 45.0),
        ],
        preferences: Preferences {
            newsletter: true,
            notifications: vec!["email".to_string(), "sms".to_string()],
        },
    }
}

/// Profile orders whose quantity equals `quantity`. `None` matches nothing.
pub fn items_with_quantity(profile: &UserProfile, quantity: Option<i64>) -> Vec<ItemQuantity> {
    let Some(quantity) = quantity else {
        return Vec::new();
    };
    profile
        .orders
        .iter()
        .filter(|o| o.quantity == quantity)
        .map(|o| ItemQuantity {
            order: o.item.clone(),
            quantity: o.quantity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_order_id_leaves_book_untouched() {
        let mut book = OrderBook::seeded();
        let before = book.orders_of(DEMO_USER_ID).to_vec();

        let outcome = book.insert(DEMO_USER_ID, Order::new(5001, "Other", 9, 1.0));

        assert_eq!(outcome, Insert::DuplicateId);
        assert_eq!(book.orders_of(DEMO_USER_ID), before.as_slice());
    }

    #[test]
    fn insert_creates_unknown_users() {
        let mut book = OrderBook::seeded();
        assert_eq!(
            book.insert(300, Order::new(1, "Pen", 3, 2.5)),
            Insert::CreatedUser
        );
        assert_eq!(
            book.insert(300, Order::new(2, "Ink", 1, 4.0)),
            Insert::Appended
        );
        assert_eq!(book.orders_of(300).len(), 2);
    }

    #[test]
    fn search_combines_filters() {
        let book = OrderBook::seeded();
        let filters = OrderFilters {
            item: Some("mouse".to_string()),
            quantity: Some(1),
            ..Default::default()
        };
        let found = book.search(DEMO_USER_ID, &filters);
        assert_eq!(found, vec![Order::new(5004, "Wireless Mouse", 1, 50.0)]);

        assert!(book.search(999, &OrderFilters::default()).is_empty());
    }

    #[test]
    fn update_reports_missing_user_and_order() {
        let mut book = OrderBook::seeded();
        let patch = OrderUpdate {
            quantity: Some(5),
            ..Default::default()
        };
        assert_eq!(book.update(999, 5001, &patch), Update::UnknownUser);
        assert_eq!(book.update(DEMO_USER_ID, 1, &patch), Update::UnknownOrder);
        assert_eq!(
            book.update(DEMO_USER_ID, 5003, &patch),
            Update::Updated(Order::new(5003, "Laptop Stand", 5, 30.0))
        );
    }

    #[test]
    fn quantity_lookup_needs_a_quantity() {
        let profile = demo_profile();
        assert!(items_with_quantity(&profile, None).is_empty());
        let twos = items_with_quantity(&profile, Some(2));
        assert_eq!(twos.len(), 1);
        assert_eq!(twos[0].order, "Wireless Mouse");
    }
}

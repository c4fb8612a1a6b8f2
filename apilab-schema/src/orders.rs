use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub item: String,
    pub quantity: i64,
    pub price: f64,
}

impl Order {
    pub fn new(order_id: i64, item: &str, quantity: i64, price: f64) -> Self {
        Self {
            order_id,
            item: item.to_string(),
            quantity,
            price,
        }
    }
}

/// Partial order update. Fields left out stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderUpdate {
    pub order_id: Option<i64>,
    pub item: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl OrderUpdate {
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(order_id) = self.order_id {
            order.order_id = order_id;
        }
        if let Some(item) = &self.item {
            order.item.clone_from(item);
        }
        if let Some(quantity) = self.quantity {
            order.quantity = quantity;
        }
        if let Some(price) = self.price {
            order.price = price;
        }
    }
}

/// Optional filters for a user's orders, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFilters {
    /// Case-insensitive substring of the item name. Empty means no filter.
    pub item: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub quantity: Option<i64>,
}

impl OrderFilters {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(item) = self.item.as_deref().filter(|s| !s.is_empty()) {
            if !order.item.to_lowercase().contains(&item.to_lowercase()) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| order.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| order.price > max) {
            return false;
        }
        if self.quantity.is_some_and(|q| order.quantity != q) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuantityQuery {
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub newsletter: bool,
    pub notifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub address: Address,
    pub orders: Vec<Order>,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemQuantity {
    pub order: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoMatch {
    #[serde(rename = "Data")]
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOrders {
    pub user_id: i64,
    pub filters_applied: OrderFilters,
    pub results: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    pub message: String,
    pub order: Order,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdated {
    pub message: String,
    pub updated_order: OrderUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sum {
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// In-band failure reply, sent with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> Order {
        Order::new(5002, "Wireless Mouse", 2, 45.0)
    }

    #[test]
    fn empty_filters_match_everything() {
        assert!(OrderFilters::default().matches(&mouse()));
        let blank_item = OrderFilters {
            item: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_item.matches(&mouse()));
    }

    #[test]
    fn filters_are_anded_and_bounds_inclusive() {
        let filters = OrderFilters {
            item: Some("MOUSE".to_string()),
            min_price: Some(45.0),
            max_price: Some(45.0),
            quantity: Some(2),
        };
        assert!(filters.matches(&mouse()));

        let wrong_qty = OrderFilters {
            quantity: Some(1),
            ..filters.clone()
        };
        assert!(!wrong_qty.matches(&mouse()));

        let too_cheap = OrderFilters {
            min_price: Some(45.01),
            ..filters
        };
        assert!(!too_cheap.matches(&mouse()));
    }

    #[test]
    fn update_only_overwrites_supplied_fields() {
        let mut order = mouse();
        OrderUpdate {
            price: Some(39.5),
            ..Default::default()
        }
        .apply_to(&mut order);
        assert_eq!(order, Order::new(5002, "Wireless Mouse", 2, 39.5));
    }
}

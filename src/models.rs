// models.rs - Dish and order records

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::openapi::schema::{AdditionalProperties, ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};

use crate::core_types::{DishId, OrderId};

/// Anything kept in a repository has a stable string id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

// ============================================================
// DISH
// ============================================================

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    #[schema(example = "3c637d011d844ebab1205fef8a7e36ea")]
    pub id: DishId,
    #[schema(example = "Century Eggs")]
    pub name: String,
    #[schema(example = "Whole eggs preserved in clay and ash for a few months")]
    pub description: String,
    /// Whole currency units, always > 0
    #[schema(example = 17)]
    pub price: u64,
    pub image_url: String,
}

impl Record for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================
// ORDER
// ============================================================

/// Order lifecycle status.
///
/// Wire format is kebab-case: `pending`, `preparing`, `out-for-delivery`, `delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        *self == OrderStatus::Pending
    }

    /// Delivered orders are frozen
    #[inline]
    pub fn is_delivered(&self) -> bool {
        *self == OrderStatus::Delivered
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One dish inside an order.
///
/// Only `quantity` is validated. Every other key is kept exactly as the client
/// sent it (a snapshot of the dish at order time), whatever its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: u32,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LineItem {
    pub fn new(quantity: u32) -> Self {
        Self {
            quantity,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Any non-quantity key, as sent
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

// Open object: `quantity` is required, anything else passes through.
impl PartialSchema for LineItem {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .description(Some(
                "Dish snapshot; any keys besides `quantity` are stored as sent",
            ))
            .property(
                "quantity",
                ObjectBuilder::new()
                    .schema_type(Type::Integer)
                    .description(Some("Integer greater than 0")),
            )
            .required("quantity")
            .additional_properties(Some(AdditionalProperties::FreeForm(true)))
            .into()
    }
}

impl ToSchema for LineItem {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("LineItem")
    }
}

/// A delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = "f6069a542257054114138301947672ba")]
    pub id: OrderId,
    #[schema(example = "308 Negra Arroyo Lane, Albuquerque, NM")]
    pub deliver_to: String,
    #[schema(example = "(505) 143-3369")]
    pub mobile_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// Never empty
    pub dishes: Vec<LineItem>,
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(OrderStatus::OutForDelivery).unwrap(),
            json!("out-for-delivery")
        );
        let parsed: OrderStatus = serde_json::from_value(json!("delivered")).unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }

    #[test]
    fn test_status_from_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("Delivered".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_default_is_pending() {
        assert!(OrderStatus::default().is_pending());
    }

    #[test]
    fn test_order_uses_camel_case_fields() {
        let order = Order {
            id: "o1".into(),
            deliver_to: "X".into(),
            mobile_number: "555".into(),
            status: OrderStatus::Pending,
            dishes: vec![LineItem::new(2).with_field("id", json!("d1"))],
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["deliverTo"], "X");
        assert_eq!(value["mobileNumber"], "555");
        assert_eq!(value["status"], "pending");
        // Line item extras sit beside quantity, not nested
        assert_eq!(value["dishes"][0], json!({"id": "d1", "quantity": 2}));
    }

    #[test]
    fn test_line_item_keeps_unknown_keys() {
        let sent = json!({"id": "d1", "price": "19", "note": "no onions", "quantity": 2});
        let item: LineItem = serde_json::from_value(sent.clone()).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.field("price"), Some(&json!("19")));
        assert_eq!(item.field("quantity"), None);
        assert_eq!(serde_json::to_value(&item).unwrap(), sent);
    }
}

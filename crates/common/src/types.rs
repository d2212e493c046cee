use serde::{Deserialize, Serialize};

/// Declares a store-assigned numeric identifier.
///
/// Each identifier wraps an `i64` so user, item, cart, and order ids
/// cannot be mixed up at call sites even though they share a representation.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw id value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw id value.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of a registered user.
    UserId
);

numeric_id!(
    /// Identifier of a catalog item.
    ItemId
);

numeric_id!(
    /// Identifier of a shopping cart.
    CartId
);

numeric_id!(
    /// Identifier of a submitted order.
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_preserves_raw_value() {
        let id = UserId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(ItemId::from(7).to_string(), "7");
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&OrderId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: CartId = serde_json::from_str("9").unwrap();
        assert_eq!(id, CartId::new(9));
    }

    #[test]
    fn ids_order_numerically() {
        let mut ids = vec![ItemId::new(3), ItemId::new(1), ItemId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![ItemId::new(1), ItemId::new(2), ItemId::new(3)]);
    }
}

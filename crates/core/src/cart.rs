//! Cart aggregation model.
//!
//! A [`CartState`] is an ordered list of [`CartLine`]s, one per distinct
//! product, in the order products were first added. All operations are pure:
//! they borrow the current state and return a new one, leaving persistence to
//! the caller.
//!
//! # Aggregation rules
//!
//! - Adding a product already in the cart sums the quantities. The line keeps
//!   the name, image and price captured when it was first added.
//! - Adding a new product appends a line at the end.
//! - Setting a quantity replaces it; it never sums.
//! - Removing or setting an unknown product leaves the state unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId, Quantity};

/// Errors from cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Summing quantities for a line overflowed.
    #[error("quantity overflow for product {0}")]
    QuantityOverflow(ProductId),
    /// A serialized cart held more than one line for the same product.
    #[error("duplicate cart line for product {0}")]
    DuplicateLine(ProductId),
}

/// One distinct product in the cart with its aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    /// Unit price captured when the line was first added.
    pub price: Price,
    pub quantity: Quantity,
}

impl CartLine {
    /// Build a line from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
            quantity,
        }
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.times(self.quantity.get())
    }
}

/// The full ordered collection of cart lines.
///
/// At most one line exists per product id. The invariant holds for every
/// value produced by the operations below and is checked again when a state
/// is deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into the existing line for the same id (keeping its captured
    /// attributes), or appends a new line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the merged quantity does not
    /// fit; the current state is left as it was.
    pub fn add_line(&self, product: &Product, quantity: Quantity) -> Result<Self, CartError> {
        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|line| line.id == product.id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .map_err(|_| CartError::QuantityOverflow(product.id.clone()))?;
            }
            None => lines.push(CartLine::from_product(product, quantity)),
        }
        Ok(Self { lines })
    }

    /// Remove the line for `id`. Unknown ids are a no-op.
    #[must_use]
    pub fn remove_line(&self, id: &ProductId) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .filter(|line| &line.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Replace the quantity of the line for `id`. Unknown ids are a no-op.
    #[must_use]
    pub fn set_quantity(&self, id: &ProductId, quantity: Quantity) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .map(|line| {
                    if &line.id == id {
                        CartLine {
                            quantity,
                            ..line.clone()
                        }
                    } else {
                        line.clone()
                    }
                })
                .collect(),
        }
    }

    /// Total units across all lines; 0 when empty.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of `price * quantity` using each line's captured price; 0 when
    /// empty. No rounding is applied.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.subtotal()))
    }
}

impl TryFrom<Vec<CartLine>> for CartState {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (i, line) in lines.iter().enumerate() {
            if lines.iter().skip(i + 1).any(|other| other.id == line.id) {
                return Err(CartError::DuplicateLine(line.id.clone()));
            }
        }
        Ok(Self { lines })
    }
}

impl From<CartState> for Vec<CartLine> {
    fn from(state: CartState) -> Self {
        state.lines
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: u64) -> Product {
        Product::new(
            ProductId::parse(id).unwrap(),
            format!("Product {id}"),
            format!("/img/{id}.png"),
            Price::from_units(price),
        )
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn ids(state: &CartState) -> Vec<&str> {
        state.lines().iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_empty_totals() {
        let state = CartState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.total(), Decimal::ZERO);
        assert!(state.is_empty());
    }

    #[test]
    fn test_distinct_products_append_in_order() {
        let state = CartState::new()
            .add_line(&product("C", 10), qty(1))
            .unwrap()
            .add_line(&product("A", 20), qty(3))
            .unwrap()
            .add_line(&product("B", 30), qty(2))
            .unwrap();

        assert_eq!(ids(&state), ["C", "A", "B"]);
        assert_eq!(state.len(), 3);
        assert_eq!(state.count(), 6);
    }

    #[test]
    fn test_same_product_merges_and_keeps_first_attributes() {
        let first = product("A", 500);
        let mut repriced = product("A", 999);
        repriced.name = "Renamed".to_string();
        repriced.image = "/img/new.png".to_string();

        let state = CartState::new()
            .add_line(&first, qty(2))
            .unwrap()
            .add_line(&repriced, qty(3))
            .unwrap();

        assert_eq!(state.len(), 1);
        let line = state.get(&id("A")).unwrap();
        assert_eq!(line.quantity.get(), 5);
        assert_eq!(line.price, Price::from_units(500));
        assert_eq!(line.name, "Product A");
        assert_eq!(line.image, "/img/A.png");
    }

    #[test]
    fn test_add_does_not_touch_input_state() {
        let before = CartState::new().add_line(&product("A", 1), qty(1)).unwrap();
        let after = before.add_line(&product("A", 1), qty(1)).unwrap();
        assert_eq!(before.count(), 1);
        assert_eq!(after.count(), 2);
    }

    #[test]
    fn test_add_overflow_is_error() {
        let state = CartState::new()
            .add_line(&product("A", 1), qty(u32::MAX))
            .unwrap();
        assert_eq!(
            state.add_line(&product("A", 1), qty(1)),
            Err(CartError::QuantityOverflow(id("A")))
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let state = CartState::new()
            .add_line(&product("A", 1), qty(1))
            .unwrap()
            .add_line(&product("B", 1), qty(1))
            .unwrap();
        let once = state.remove_line(&id("A"));
        let twice = once.remove_line(&id("A"));
        assert_eq!(ids(&once), ["B"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let state = CartState::new().add_line(&product("A", 1), qty(1)).unwrap();
        assert_eq!(state.remove_line(&id("Z")), state);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let state = CartState::new().add_line(&product("A", 10), qty(1)).unwrap();
        let state = state.set_quantity(&id("A"), qty(4));
        let state = state.set_quantity(&id("A"), qty(2));
        assert_eq!(state.get(&id("A")).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_set_quantity_unknown_is_noop() {
        let state = CartState::new().add_line(&product("A", 10), qty(1)).unwrap();
        assert_eq!(state.set_quantity(&id("Z"), qty(9)), state);
    }

    #[test]
    fn test_total_example() {
        let state = CartState::new()
            .add_line(&product("A", 100), qty(2))
            .unwrap()
            .add_line(&product("B", 50), qty(1))
            .unwrap();
        assert_eq!(state.total(), Decimal::from(250));
    }

    #[test]
    fn test_total_fractional_prices_unrounded() {
        let p = Product::new(id("A"), "A", "", Price::new(Decimal::new(3333, 3)).unwrap());
        let state = CartState::new().add_line(&p, qty(3)).unwrap();
        assert_eq!(state.total(), Decimal::new(9999, 3));
    }

    #[test]
    fn test_serialized_shape() {
        let state = CartState::new().add_line(&product("A", 500), qty(2)).unwrap();
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json[0]["id"], "A");
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[0]["price"], "500");
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"id": "A", "name": "a", "price": 1, "quantity": 1},
            {"id": "A", "name": "a", "price": 1, "quantity": 2}
        ]"#;
        assert!(serde_json::from_str::<CartState>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"[{"id": "A", "name": "a", "price": 1, "quantity": 0}]"#;
        assert!(serde_json::from_str::<CartState>(json).is_err());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    const IDS: [&str; 5] = ["A", "B", "C", "D", "E"];

    #[derive(Debug, Clone)]
    enum Op {
        Add { id: usize, price: u64, quantity: u32 },
        Remove { id: usize },
        Set { id: usize, quantity: u32 },
    }

    /// `(id index, unit price, quantity)` per line, in insertion order.
    type Model = Vec<(usize, u64, u32)>;

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0..IDS.len(), 0..10_000u64, 1..=50u32)
                .prop_map(|(id, price, quantity)| Op::Add { id, price, quantity }),
            1 => (0..IDS.len()).prop_map(|id| Op::Remove { id }),
            1 => (0..IDS.len(), 1..=50u32).prop_map(|(id, quantity)| Op::Set { id, quantity }),
        ]
    }

    fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
        prop::collection::vec(arb_op(), 0..40)
    }

    fn name(id: usize) -> &'static str {
        IDS.get(id).copied().unwrap()
    }

    fn product_id(id: usize) -> ProductId {
        ProductId::parse(name(id)).unwrap()
    }

    fn product(id: usize, price: u64) -> Product {
        Product::new(
            product_id(id),
            format!("{} at {price}", name(id)),
            "",
            Price::from_units(price),
        )
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn apply(cart: &CartState, model: &mut Model, op: &Op) -> CartState {
        match *op {
            Op::Add { id, price, quantity } => {
                match model.iter_mut().find(|(i, _, _)| *i == id) {
                    Some(line) => line.2 += quantity,
                    None => model.push((id, price, quantity)),
                }
                cart.add_line(&product(id, price), qty(quantity)).unwrap()
            }
            Op::Remove { id } => {
                model.retain(|(i, _, _)| *i != id);
                cart.remove_line(&product_id(id))
            }
            Op::Set { id, quantity } => {
                if let Some(line) = model.iter_mut().find(|(i, _, _)| *i == id) {
                    line.2 = quantity;
                }
                cart.set_quantity(&product_id(id), qty(quantity))
            }
        }
    }

    fn build(ops: &[Op]) -> CartState {
        let mut model = Model::new();
        ops.iter()
            .fold(CartState::new(), |cart, op| apply(&cart, &mut model, op))
    }

    proptest! {
        /// After every step the cart agrees with a plain list of lines.
        #[test]
        fn prop_cart_follows_line_model(ops in arb_ops()) {
            let mut cart = CartState::new();
            let mut model = Model::new();

            for op in &ops {
                cart = apply(&cart, &mut model, op);

                let mut ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
                let lines = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), lines, "one line per product id");

                let expected: Vec<(&str, Price, u32)> = model
                    .iter()
                    .map(|&(id, price, quantity)| (name(id), Price::from_units(price), quantity))
                    .collect();
                let actual: Vec<(&str, Price, u32)> = cart
                    .lines()
                    .iter()
                    .map(|l| (l.id.as_str(), l.price, l.quantity.get()))
                    .collect();
                prop_assert_eq!(actual, expected, "lines in insertion order");

                let count: u64 = model.iter().map(|&(_, _, q)| u64::from(q)).sum();
                prop_assert_eq!(cart.count(), count);

                let total: Decimal = model
                    .iter()
                    .map(|&(_, p, q)| Decimal::from(p) * Decimal::from(q))
                    .sum();
                prop_assert_eq!(cart.total(), total);
            }
        }

        /// Adding the same product twice sums the quantities and keeps what
        /// was captured by the first add.
        #[test]
        fn prop_repeat_add_merges(
            ops in arb_ops(),
            id in 0..IDS.len(),
            first_price in 0..10_000u64,
            second_price in 0..10_000u64,
            q1 in 1..=50u32,
            q2 in 1..=50u32,
        ) {
            let cart = build(&ops);
            let key = product_id(id);
            let existing = cart.get(&key).cloned();

            let merged = cart
                .add_line(&product(id, first_price), qty(q1))
                .unwrap()
                .add_line(&product(id, second_price), qty(q2))
                .unwrap();
            let line = merged.get(&key).unwrap();

            match existing {
                Some(prev) => {
                    prop_assert_eq!(line.quantity.get(), prev.quantity.get() + q1 + q2);
                    prop_assert_eq!(line.price, prev.price);
                    prop_assert_eq!(&line.name, &prev.name);
                    prop_assert_eq!(merged.len(), cart.len());
                }
                None => {
                    prop_assert_eq!(line.quantity.get(), q1 + q2);
                    prop_assert_eq!(line.price, Price::from_units(first_price));
                    prop_assert_eq!(&line.name, &format!("{} at {first_price}", name(id)));
                    prop_assert_eq!(merged.len(), cart.len() + 1);
                    prop_assert_eq!(&merged.lines().last().unwrap().id, &key);
                }
            }
        }

        /// Setting a quantity replaces it on that line only.
        #[test]
        fn prop_set_replaces_quantity(ops in arb_ops(), id in 0..IDS.len(), quantity in 1..=50u32) {
            let cart = build(&ops);
            let key = product_id(id);
            let updated = cart.set_quantity(&key, qty(quantity));

            match cart.get(&key) {
                Some(before) => {
                    let after = updated.get(&key).unwrap();
                    prop_assert_eq!(after.quantity.get(), quantity);
                    prop_assert_eq!(
                        updated.count(),
                        cart.count() - u64::from(before.quantity.get()) + u64::from(quantity)
                    );
                }
                None => prop_assert_eq!(&updated, &cart),
            }
            for (old, new) in cart.lines().iter().zip(updated.lines()) {
                prop_assert_eq!(&old.id, &new.id);
                if old.id != key {
                    prop_assert_eq!(old, new);
                }
            }
        }
    }
}

//! Shared in-memory store for carts, the order ledger, ratings and
//! favorites.
//!
//! Every mutating operation runs inside a per-key critical section:
//! [`DashMap::get_mut`] (and `entry`) holds an exclusive guard on the entry,
//! so operations on the same order (or the same user's cart) serialize while
//! operations on different keys proceed concurrently. Callers must finish
//! all validation before mutating inside a closure and must not hold two
//! guards into the same map, which keeps failed operations all-or-nothing
//! and the store deadlock-free.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::error::{AppError, AppResult};
use crate::models::{Cart, ItemId, Order, OrderId, RaterRole, Rating, UserId};

#[derive(Default)]
pub struct MemoryStore {
    carts: DashMap<UserId, Cart>,
    orders: DashMap<OrderId, Order>,
    order_seq: AtomicU64,
    ratings: DashMap<(UserId, RaterRole), Vec<Rating>>,
    favorites: DashMap<UserId, BTreeSet<ItemId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the user's cart, creating an empty
    /// cart on first touch. Order placement runs entirely inside this
    /// critical section so a concurrent cart mutation lands either wholly
    /// before the snapshot or wholly after the clear.
    pub fn with_cart<R>(
        &self,
        user_id: &str,
        f: impl FnOnce(&mut Cart) -> AppResult<R>,
    ) -> AppResult<R> {
        let mut entry = self.carts.entry(user_id.to_string()).or_default();
        f(entry.value_mut())
    }

    pub fn cart(&self, user_id: &str) -> Cart {
        self.carts
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn next_order_id(&self) -> OrderId {
        self.order_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn insert_order(&self, order: Order) {
        self.orders.insert(order.id, order);
    }

    /// Run `f` with exclusive access to one order. Claim, checklist and
    /// rating-flag updates all go through here, which is what makes the
    /// claim race resolve to a single winner.
    pub fn with_order<R>(
        &self,
        order_id: OrderId,
        f: impl FnOnce(&mut Order) -> AppResult<R>,
    ) -> AppResult<R> {
        let mut entry = self.orders.get_mut(&order_id).ok_or(AppError::NotFound)?;
        f(entry.value_mut())
    }

    pub fn order(&self, order_id: OrderId) -> AppResult<Order> {
        self.orders
            .get(&order_id)
            .map(|entry| entry.value().clone())
            .ok_or(AppError::NotFound)
    }

    pub fn orders_matching(&self, pred: impl Fn(&Order) -> bool) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn push_rating(&self, rating: Rating) {
        self.ratings
            .entry((rating.rated_user_id.clone(), rating.role))
            .or_default()
            .push(rating);
    }

    pub fn ratings_for(&self, user_id: &str, role: RaterRole) -> Vec<Rating> {
        self.ratings
            .get(&(user_id.to_string(), role))
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns true when the item was newly added.
    pub fn add_favorite(&self, user_id: &str, item_id: &str) -> bool {
        self.favorites
            .entry(user_id.to_string())
            .or_default()
            .insert(item_id.to_string())
    }

    /// Returns true when the item was present.
    pub fn remove_favorite(&self, user_id: &str, item_id: &str) -> bool {
        self.favorites
            .get_mut(user_id)
            .map(|mut entry| entry.value_mut().remove(item_id))
            .unwrap_or(false)
    }

    pub fn favorites(&self, user_id: &str) -> BTreeSet<ItemId> {
        self.favorites
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::models::{OrderStatus, UserId};
    use crate::timeline::Timeline;

    fn placed_order(id: OrderId, user: &str) -> Order {
        Order {
            id,
            user_id: user.to_string(),
            items: BTreeMap::new(),
            location: "Frist Campus Center".to_string(),
            subtotal_cents: 500,
            delivery_fee_cents: 50,
            created_at: Utc::now(),
            status: OrderStatus::Placed,
            claimed_by: None,
            timeline: Timeline::default(),
            shopper_rated: false,
            deliverer_rated: false,
        }
    }

    #[test]
    fn order_ids_are_monotonic() {
        let store = MemoryStore::new();
        let a = store.next_order_id();
        let b = store.next_order_id();
        let c = store.next_order_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn with_order_on_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.with_order(42, |_| Ok(())).unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn failed_update_leaves_the_order_untouched() {
        let store = MemoryStore::new();
        store.insert_order(placed_order(1, "shopper1"));

        let result: AppResult<()> = store.with_order(1, |order| {
            if order.status != OrderStatus::Claimed {
                return Err(AppError::NotClaimed);
            }
            order.status = OrderStatus::Fulfilled;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(store.order(1).unwrap().status, OrderStatus::Placed);
    }

    #[test]
    fn concurrent_claims_have_one_winner() {
        let store = Arc::new(MemoryStore::new());
        store.insert_order(placed_order(7, "shopper1"));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let deliverer: UserId = format!("deliverer{i}");
                    store.with_order(7, |order| {
                        if order.status != OrderStatus::Placed {
                            return Err(AppError::AlreadyClaimed);
                        }
                        order.status = OrderStatus::Claimed;
                        order.claimed_by = Some(deliverer.clone());
                        Ok(deliverer)
                    })
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(
            results.iter().filter(|r| r.is_err()).count(),
            results.len() - 1
        );

        let order = store.order(7).unwrap();
        assert_eq!(order.status, OrderStatus::Claimed);
        assert_eq!(
            order.claimed_by.as_ref(),
            winners[0].as_ref().ok()
        );
    }

    #[test]
    fn cart_mutations_are_per_user() {
        let store = MemoryStore::new();
        store
            .with_cart("alice", |cart| {
                cart.insert("1".to_string(), 2);
                Ok(())
            })
            .unwrap();
        assert_eq!(store.cart("alice").get("1"), Some(&2));
        assert!(store.cart("bob").is_empty());
    }

    #[test]
    fn favorites_add_is_idempotent() {
        let store = MemoryStore::new();
        assert!(store.add_favorite("alice", "5"));
        assert!(!store.add_favorite("alice", "5"));
        assert!(store.remove_favorite("alice", "5"));
        assert!(!store.remove_favorite("alice", "5"));
    }
}

//! Concurrency properties of the order lifecycle: single-winner claiming
//! and loss-free cart mutation racing order placement.

use tigercart::{
    dto::{cart::AddToCartRequest, orders::PlaceOrderRequest},
    error::AppError,
    middleware::auth::AuthUser,
    models::OrderId,
    services::{cart_service, delivery_service, order_service},
    state::AppState,
};

fn user(netid: &str) -> AuthUser {
    AuthUser {
        netid: netid.to_string(),
    }
}

async fn seed_order(state: &AppState, shopper: &AuthUser) -> OrderId {
    cart_service::add_to_cart(
        state,
        shopper,
        AddToCartRequest {
            item_id: "1".to_string(),
            quantity: 1,
        },
    )
    .await
    .expect("seed cart");
    order_service::place_order(
        state,
        shopper,
        PlaceOrderRequest {
            delivery_location: "Firestone Library, B-Floor".to_string(),
        },
    )
    .await
    .expect("place order")
    .data
    .unwrap()
    .order_id
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_claims_resolve_to_one_winner() {
    let state = AppState::with_sample_catalog();
    let order_id = seed_order(&state, &user("shopper1")).await;

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                let deliverer = user(&format!("deliverer{i}"));
                delivery_service::claim(&state, &deliverer, order_id)
                    .await
                    .map(|_| deliverer.netid)
            })
        })
        .collect();

    let mut winners = Vec::new();
    let mut losers = 0;
    for handle in handles {
        match handle.await.expect("claim task") {
            Ok(netid) => winners.push(netid),
            Err(err) => {
                assert!(matches!(err, AppError::AlreadyClaimed));
                losers += 1;
            }
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(losers, 11);

    let order = state.store.order(order_id).expect("order");
    assert_eq!(order.claimed_by.as_deref(), Some(winners[0].as_str()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cart_add_racing_placement_is_never_lost() {
    // Run the race repeatedly; whichever side wins the cart lock, the added
    // item must end up in exactly one place.
    for round in 0..25 {
        let state = AppState::with_sample_catalog();
        let shopper = user(&format!("shopper{round}"));

        cart_service::add_to_cart(
            &state,
            &shopper,
            AddToCartRequest {
                item_id: "1".to_string(),
                quantity: 1,
            },
        )
        .await
        .unwrap();

        let place = {
            let state = state.clone();
            let shopper = shopper.clone();
            tokio::spawn(async move {
                order_service::place_order(
                    &state,
                    &shopper,
                    PlaceOrderRequest {
                        delivery_location: "Friend Center 001".to_string(),
                    },
                )
                .await
            })
        };
        let add = {
            let state = state.clone();
            let shopper = shopper.clone();
            tokio::spawn(async move {
                cart_service::add_to_cart(
                    &state,
                    &shopper,
                    AddToCartRequest {
                        item_id: "2".to_string(),
                        quantity: 1,
                    },
                )
                .await
            })
        };

        let order_id = place
            .await
            .expect("place task")
            .expect("placement succeeds")
            .data
            .unwrap()
            .order_id;
        add.await.expect("add task").expect("add succeeds");

        let order = state.store.order(order_id).unwrap();
        let cart = state.store.cart(&shopper.netid);

        // The pre-seeded item is always in the snapshot.
        assert_eq!(order.items.get("1").map(|l| l.quantity), Some(1));

        let in_order = order.items.get("2").map(|l| l.quantity).unwrap_or(0);
        let in_cart = cart.get("2").copied().unwrap_or(0);
        assert_eq!(
            in_order + in_cart,
            1,
            "round {round}: item must be in the snapshot xor the cart"
        );
        if in_order > 0 {
            assert!(cart.is_empty(), "snapshot items must not linger in the cart");
        }
    }
}

use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartLineDto, CartView, UpdateCartItemRequest},
        deliveries::{ChecklistUpdated, DeliveryBoard, DeliveryDto, SetStepRequest},
        items::{ItemDto, ItemList},
        orders::{OrderDto, OrderItemDto, OrderList, OrderPlaced, PlaceOrderRequest, TimelineStepDto},
        ratings::{AverageRating, SubmitRatingRequest},
    },
    models::{CatalogItem, OrderLine, OrderStatus, RaterRole},
    response::{ApiResponse, Meta},
    routes::{cart, deliveries, favorites, health, items, orders, params, ratings},
    timeline::ChecklistStep,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "netid",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                crate::middleware::auth::NETID_HEADER,
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        items::list_items,
        items::get_item,
        cart::cart_view,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        orders::place_order,
        orders::list_orders,
        orders::get_order,
        orders::cancel_order,
        orders::submit_rating,
        deliveries::delivery_board,
        deliveries::get_delivery,
        deliveries::claim_delivery,
        deliveries::decline_delivery,
        deliveries::update_checklist,
        ratings::get_average_rating,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite
    ),
    components(
        schemas(
            CatalogItem,
            OrderLine,
            OrderStatus,
            RaterRole,
            ChecklistStep,
            ItemDto,
            ItemList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartLineDto,
            CartView,
            PlaceOrderRequest,
            OrderPlaced,
            OrderItemDto,
            TimelineStepDto,
            OrderDto,
            OrderList,
            DeliveryDto,
            DeliveryBoard,
            SetStepRequest,
            ChecklistUpdated,
            SubmitRatingRequest,
            AverageRating,
            params::Pagination,
            params::OrderListQuery,
            ratings::RoleQuery,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<OrderPlaced>,
            ApiResponse<OrderDto>,
            ApiResponse<OrderList>,
            ApiResponse<DeliveryBoard>,
            ApiResponse<ChecklistUpdated>,
            ApiResponse<AverageRating>,
            ApiResponse<ItemList>
        )
    ),
    security(
        ("netid" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Items", description = "Catalog browsing"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order lifecycle endpoints"),
        (name = "Deliveries", description = "Claiming and fulfillment endpoints"),
        (name = "Ratings", description = "Post-delivery rating endpoints"),
        (name = "Favorites", description = "Favorite item endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:5000/docs`
//! - OpenAPI JSON: `http://localhost:5000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::catalog::{Accessory, Game};
use crate::gateway::handlers::{
    AccessoryData, AccessoryListData, AccessorySearchData, BrandsData, CategoriesData,
    FeaturedAccessoriesData, FeaturedGamesData, GameData, GameListData, GameSearchData,
    HealthResponse, OrderData, OrderListData, OrderSearchData, OrderStatsData, PlatformsData,
    UserData, UserListData,
};
use crate::gateway::types::{Empty, ErrorBody};
use crate::orders::{
    ContactRequest, CreateOrderRequest, CustomerInfo, Order, OrderStats, OrderStatus,
    UpdateStatusRequest,
};
use crate::users::{LoginRequest, RegisterRequest, UpdateProfileRequest, UserProfile};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Game storefront: catalog browsing, order placement, customer accounts and contact relay.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        // Orders
        crate::gateway::handlers::create_order,
        crate::gateway::handlers::validate_order,
        crate::gateway::handlers::list_orders,
        crate::gateway::handlers::get_order,
        crate::gateway::handlers::update_order_status,
        crate::gateway::handlers::search_orders,
        crate::gateway::handlers::order_stats,
        crate::gateway::handlers::submit_contact,
        // Users
        crate::gateway::handlers::register_user,
        crate::gateway::handlers::login_user,
        crate::gateway::handlers::get_user_profile,
        crate::gateway::handlers::update_user_profile,
        crate::gateway::handlers::list_users,
        crate::gateway::handlers::delete_user,
        // Catalog
        crate::gateway::handlers::list_games,
        crate::gateway::handlers::get_game,
        crate::gateway::handlers::game_categories,
        crate::gateway::handlers::game_platforms,
        crate::gateway::handlers::featured_games,
        crate::gateway::handlers::search_games,
        crate::gateway::handlers::list_accessories,
        crate::gateway::handlers::get_accessory,
        crate::gateway::handlers::accessory_categories,
        crate::gateway::handlers::accessory_brands,
        crate::gateway::handlers::featured_accessories,
        crate::gateway::handlers::search_accessories,
        crate::gateway::handlers::accessories_by_price,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            Empty,
            Order,
            OrderStatus,
            OrderStats,
            CustomerInfo,
            CreateOrderRequest,
            UpdateStatusRequest,
            ContactRequest,
            OrderData,
            OrderListData,
            OrderSearchData,
            OrderStatsData,
            UserProfile,
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            UserData,
            UserListData,
            Game,
            Accessory,
            GameData,
            GameListData,
            GameSearchData,
            FeaturedGamesData,
            AccessoryData,
            AccessoryListData,
            AccessorySearchData,
            FeaturedAccessoriesData,
            CategoriesData,
            PlatformsData,
            BrandsData,
        )
    ),
    tags(
        (name = "Orders", description = "Order placement, status and statistics"),
        (name = "Users", description = "Customer accounts"),
        (name = "Contact", description = "Contact form relay"),
        (name = "Catalog", description = "Game and accessory listings"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

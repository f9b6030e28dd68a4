//! Game and accessory listing handlers (read-only)

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{Accessory, AccessoryFilter, Game, GameFilter, PriceRange};

use super::super::state::AppState;
use super::super::types::{ApiPath, ApiQuery, ApiResult, ErrorBody, ok};
use super::order::SearchQuery;

#[derive(Debug, Serialize, ToSchema)]
pub struct GameListData {
    pub games: Vec<Game>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GameData {
    pub game: Game,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeaturedGamesData {
    pub featured_games: Vec<Game>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GameSearchData {
    pub results: Vec<Game>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessoryListData {
    pub accessories: Vec<Accessory>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessoryData {
    pub accessory: Accessory,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeaturedAccessoriesData {
    pub featured_accessories: Vec<Accessory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessorySearchData {
    pub results: Vec<Accessory>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesData {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformsData {
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandsData {
    pub brands: Vec<String>,
}

// ============================================================================
// Games
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/games",
    params(
        ("category" = Option<String>, Query, description = "Category, case-insensitive"),
        ("platform" = Option<String>, Query, description = "Platform, exact (e.g. PS5)")
    ),
    responses((status = 200, description = "Games", body = GameListData)),
    tag = "Catalog"
)]
pub async fn list_games(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<GameFilter>,
) -> ApiResult<GameListData> {
    let games = state.catalog.list_games(&filter);
    ok(GameListData {
        total: games.len(),
        games,
    })
}

#[utoipa::path(
    get,
    path = "/api/games/{id}",
    params(("id" = u64, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game found", body = GameData),
        (status = 404, description = "Game not found", body = ErrorBody)
    ),
    tag = "Catalog"
)]
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<GameData> {
    let game = state.catalog.get_game(id)?;
    ok(GameData { game })
}

#[utoipa::path(
    get,
    path = "/api/games/categories",
    responses((status = 200, description = "Distinct categories", body = CategoriesData)),
    tag = "Catalog"
)]
pub async fn game_categories(State(state): State<Arc<AppState>>) -> ApiResult<CategoriesData> {
    ok(CategoriesData {
        categories: state.catalog.game_categories(),
    })
}

#[utoipa::path(
    get,
    path = "/api/games/platforms",
    responses((status = 200, description = "Distinct platforms", body = PlatformsData)),
    tag = "Catalog"
)]
pub async fn game_platforms(State(state): State<Arc<AppState>>) -> ApiResult<PlatformsData> {
    ok(PlatformsData {
        platforms: state.catalog.game_platforms(),
    })
}

#[utoipa::path(
    get,
    path = "/api/games/featured",
    responses((status = 200, description = "Top rated games", body = FeaturedGamesData)),
    tag = "Catalog"
)]
pub async fn featured_games(State(state): State<Arc<AppState>>) -> ApiResult<FeaturedGamesData> {
    ok(FeaturedGamesData {
        featured_games: state.catalog.featured_games(),
    })
}

#[utoipa::path(
    get,
    path = "/api/games/search",
    params(("q" = String, Query, description = "Name or description fragment")),
    responses(
        (status = 200, description = "Matching games", body = GameSearchData),
        (status = 400, description = "Search query is required", body = ErrorBody)
    ),
    tag = "Catalog"
)]
pub async fn search_games(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<GameSearchData> {
    let results = state
        .catalog
        .search_games(query.q.as_deref().unwrap_or_default())?;
    ok(GameSearchData {
        total: results.len(),
        results,
    })
}

// ============================================================================
// Accessories
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/accessories",
    params(
        ("category" = Option<String>, Query, description = "Category, case-insensitive"),
        ("brand" = Option<String>, Query, description = "Brand, case-insensitive")
    ),
    responses((status = 200, description = "Accessories", body = AccessoryListData)),
    tag = "Catalog"
)]
pub async fn list_accessories(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<AccessoryFilter>,
) -> ApiResult<AccessoryListData> {
    let accessories = state.catalog.list_accessories(&filter);
    ok(AccessoryListData {
        total: accessories.len(),
        accessories,
    })
}

#[utoipa::path(
    get,
    path = "/api/accessories/{id}",
    params(("id" = u64, Path, description = "Accessory id")),
    responses(
        (status = 200, description = "Accessory found", body = AccessoryData),
        (status = 404, description = "Accessory not found", body = ErrorBody)
    ),
    tag = "Catalog"
)]
pub async fn get_accessory(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<AccessoryData> {
    let accessory = state.catalog.get_accessory(id)?;
    ok(AccessoryData { accessory })
}

#[utoipa::path(
    get,
    path = "/api/accessories/categories",
    responses((status = 200, description = "Distinct categories", body = CategoriesData)),
    tag = "Catalog"
)]
pub async fn accessory_categories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<CategoriesData> {
    ok(CategoriesData {
        categories: state.catalog.accessory_categories(),
    })
}

#[utoipa::path(
    get,
    path = "/api/accessories/brands",
    responses((status = 200, description = "Distinct brands", body = BrandsData)),
    tag = "Catalog"
)]
pub async fn accessory_brands(State(state): State<Arc<AppState>>) -> ApiResult<BrandsData> {
    ok(BrandsData {
        brands: state.catalog.accessory_brands(),
    })
}

#[utoipa::path(
    get,
    path = "/api/accessories/featured",
    responses((status = 200, description = "Top rated accessories", body = FeaturedAccessoriesData)),
    tag = "Catalog"
)]
pub async fn featured_accessories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<FeaturedAccessoriesData> {
    ok(FeaturedAccessoriesData {
        featured_accessories: state.catalog.featured_accessories(),
    })
}

#[utoipa::path(
    get,
    path = "/api/accessories/search",
    params(("q" = String, Query, description = "Name or description fragment")),
    responses(
        (status = 200, description = "Matching accessories", body = AccessorySearchData),
        (status = 400, description = "Search query is required", body = ErrorBody)
    ),
    tag = "Catalog"
)]
pub async fn search_accessories(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<AccessorySearchData> {
    let results = state
        .catalog
        .search_accessories(query.q.as_deref().unwrap_or_default())?;
    ok(AccessorySearchData {
        total: results.len(),
        results,
    })
}

#[utoipa::path(
    get,
    path = "/api/accessories/by-price",
    params(
        ("min_price" = Option<u32>, Query, description = "Lowest price, inclusive"),
        ("max_price" = Option<u32>, Query, description = "Highest price, inclusive")
    ),
    responses(
        (status = 200, description = "Accessories in range", body = AccessoryListData),
        (status = 400, description = "Malformed price bound", body = ErrorBody)
    ),
    tag = "Catalog"
)]
pub async fn accessories_by_price(
    State(state): State<Arc<AppState>>,
    ApiQuery(range): ApiQuery<PriceRange>,
) -> ApiResult<AccessoryListData> {
    let accessories = state.catalog.accessories_by_price(&range);
    ok(AccessoryListData {
        total: accessories.len(),
        accessories,
    })
}

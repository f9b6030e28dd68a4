use crate::catalog::CatalogService;
use crate::orders::OrderService;
use crate::users::UserService;

/// Gateway shared state
pub struct AppState {
    pub orders: OrderService,
    pub users: UserService,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(orders: OrderService, users: UserService, catalog: CatalogService) -> Self {
        Self {
            orders,
            users,
            catalog,
        }
    }
}

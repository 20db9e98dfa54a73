// products_app/src/web/handlers/product_handlers.rs

use std::sync::Arc;

use scaffold::ModelViewSet;

use crate::serializers::ProductSerializer;
use crate::state::AppState;

/// list / retrieve / create / update / partial update / destroy over every
/// product row, with no filtering.
pub type ProductViewSet = ModelViewSet<ProductSerializer>;

pub const PRODUCTS_BASENAME: &str = "products";

pub fn product_viewset(app_state: &AppState) -> Arc<ProductViewSet> {
  Arc::new(ProductViewSet::new(PRODUCTS_BASENAME, Arc::clone(&app_state.products)).with_name("Product"))
}

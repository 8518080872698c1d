use axum::{Extension, extract::State};

use crate::db::{AppState, JsonRow, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path, Query};
use crate::middleware::SessionContext;
use crate::models::{
    CreateProduct, DEFAULT_PRODUCT_IMAGE, DEFAULT_PRODUCT_STOCK, ProductCreated, SearchQuery,
    SearchResults,
};
use crate::util::{splice, truthy};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<JsonRow>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_products(&conn)?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JsonRow>> {
    let conn = state.db.get()?;
    queries::get_product(&conn, &id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<CreateProduct>,
) -> Result<Json<ProductCreated>> {
    let owner = ctx.user_id_raw();
    let image = if truthy(req.image.as_ref()) {
        splice(req.image.as_ref())
    } else {
        DEFAULT_PRODUCT_IMAGE.to_string()
    };
    let stock = if truthy(req.stock.as_ref()) {
        splice(req.stock.as_ref())
    } else {
        DEFAULT_PRODUCT_STOCK.to_string()
    };

    let conn = state.db.get()?;
    let product_id = queries::create_product(
        &conn,
        &queries::NewProduct {
            owner_raw: &owner,
            name: &splice(req.name.as_ref()),
            description: &splice(req.description.as_ref()),
            price_raw: &splice(req.price.as_ref()),
            image: &image,
            category: &splice(req.category.as_ref()),
            stock_raw: &stock,
        },
    )?;

    Ok(Json(ProductCreated {
        success: true,
        product_id,
    }))
}

/// Name search. A failing query still answers 200 with the error text.
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let term = query.q.unwrap_or_default();
    let conn = state.db.get()?;

    let results = match queries::search_products(&conn, &term) {
        Ok(rows) => SearchResults {
            query: term,
            count: rows.len(),
            results: rows,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Search for {:?} failed: {}", term, e);
            SearchResults {
                query: term,
                results: Vec::new(),
                count: 0,
                error: Some(e.to_string()),
            }
        }
    };

    Ok(Json(results))
}

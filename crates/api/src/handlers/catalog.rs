//! Handlers for the `/catalog` reference data (PRD-02).

use axum::Json;
use serde::Serialize;
use tulong_core::calamity::CALAMITY_TYPES;
use tulong_core::necessity::NECESSITY_CATALOG;

use crate::response::DataResponse;

/// The fixed intake catalogs: recognized calamity types and the in-kind
/// necessity list the form offers.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub calamity_types: &'static [&'static str],
    pub in_kind_necessities: &'static [&'static str],
}

/// GET /api/v1/catalog
///
/// Return both intake catalogs in one response. Public, and static: the
/// values are compiled in, not read from the database.
pub async fn get_catalog() -> Json<DataResponse<CatalogResponse>> {
    Json(DataResponse {
        data: CatalogResponse {
            calamity_types: CALAMITY_TYPES,
            in_kind_necessities: NECESSITY_CATALOG,
        },
    })
}

//! The Tollway tutorial application.
//!
//! | Route | Shows |
//! |-------|-------|
//! | `GET /` | a plain JSON body |
//! | `GET /hello/{name}` | a path parameter |
//! | `GET /search` | required, defaulted and optional query parameters |
//! | `GET /catalog/search` | the same query bound as one object |
//! | `GET /items`, `GET /items/{item_id}`, `POST /items` | a route group with a typed body and a 201 |

use std::sync::Arc;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use tollway::prelude::*;
use tollway::RegistrationError;
use tollway_config::TollwayConfig;

/// Search parameters shared by `/search` and `/catalog/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search text
    pub q: String,
    /// Page size
    pub limit: i64,
    /// Opaque pagination cursor
    pub cursor: Option<String>,
}

/// Search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// The search text, echoed back
    pub query: String,
    /// Page size
    pub limit: i64,
    /// Pagination cursor
    pub cursor: Option<String>,
}

impl From<SearchQuery> for SearchResult {
    fn from(q: SearchQuery) -> Self {
        Self {
            query: q.q,
            limit: q.limit,
            cursor: q.cursor,
        }
    }
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Free-form labels
    pub tags: Vec<String>,
    /// Long description
    pub description: Option<String>,
}

/// The schema of [`SearchQuery`].
pub fn search_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("SearchQuery")
            .field("q", FieldType::String)
            .field_with_default("limit", FieldType::Integer, 10)
            .optional("cursor", FieldType::String)
            .build(),
    )
}

/// The schema of [`Item`].
pub fn item_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("Item")
            .field("name", FieldType::String)
            .field("price", FieldType::Number)
            .field_with_default("tags", FieldType::list(FieldType::String), Vec::<Value>::new())
            .optional("description", FieldType::String)
            .build(),
    )
}

/// Maps the `[app]` section of the configuration to app settings.
#[must_use]
pub fn settings_from(config: &TollwayConfig) -> AppSettings {
    AppSettings {
        title: config.app.title.clone(),
        max_body_bytes: config.app.max_body_bytes,
        validate_responses: config.app.validate_responses,
    }
}

/// The items group, mounted at `/items`.
pub fn items() -> RouteGroup {
    RouteGroup::new()
        .route(
            Route::get("/")
                .name("list_items")
                .response(FieldType::list(FieldType::String))
                .handler(|_, _| Ok(["a", "b"])),
        )
        .route(
            Route::get("/{item_id}")
                .name("read_item")
                .param(ParamSpec::path("item_id", FieldType::Integer))
                .handler(|params, _| {
                    let item_id: i64 = params.extract("item_id").map_err(ApiError::internal)?;
                    Ok(serde_json::json!({ "item_id": item_id }))
                }),
        )
        .route(
            Route::post("/")
                .name("create_item")
                .param(ParamSpec::body("item", item_schema()))
                .response(FieldType::Object(item_schema()))
                .status(StatusCode::CREATED)
                .handler(|params, ctx| {
                    let item: Item = params.extract("item").map_err(ApiError::internal)?;
                    ctx.set_location("/items/1").map_err(ApiError::internal)?;
                    tracing::debug!(item.name = %item.name, "Item created");
                    Ok(item)
                }),
        )
}

/// Builds the tutorial app.
pub fn build_app(settings: AppSettings) -> Result<App, RegistrationError> {
    let mut app = App::with_settings(settings);

    app.route(
        Route::get("/")
            .name("root")
            .handler(|_, _| Ok(serde_json::json!({ "message": "Hello World" }))),
    )?;

    app.route(
        Route::get("/hello/{name}")
            .name("say_hello")
            .param(ParamSpec::path("name", FieldType::String))
            .handler(|params, _| {
                let name: String = params.extract("name").map_err(ApiError::internal)?;
                Ok(serde_json::json!({ "message": format!("Hello {name}") }))
            }),
    )?;

    app.route(
        Route::get("/search")
            .name("search")
            .param(ParamSpec::query("q", FieldType::String))
            .param(ParamSpec::query_with_default("limit", FieldType::Integer, 10))
            .param(ParamSpec::query_optional("cursor", FieldType::String))
            .handler(|params, _| {
                let query: SearchQuery = params.extract_all().map_err(ApiError::internal)?;
                Ok(SearchResult::from(query))
            }),
    )?;

    app.route(
        Route::get("/catalog/search")
            .name("catalog_search")
            .param(ParamSpec::query_object("params", search_schema()))
            .handler(|params, _| {
                let query: SearchQuery = params.extract("params").map_err(ApiError::internal)?;
                Ok(SearchResult::from(query))
            }),
    )?;

    app.include("/items", items())?;

    Ok(app)
}

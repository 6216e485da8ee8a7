//! HTTP surface: the GraphQL endpoint and the GraphiQL IDE.

use async_graphql::http::GraphiQLSource;
use async_graphql::{Request, Variables};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use domql_schema::DomqlSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Path of the GraphQL endpoint.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Failure of a request before a query could run.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request parameters (400).
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The response could not be produced (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Query string of a `GET` request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetParams {
    query: Option<String>,
    /// JSON-encoded variables object.
    variables: Option<String>,
    operation_name: Option<String>,
}

/// Routes, CORS and request tracing around `schema`.
pub fn router(schema: DomqlSchema) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(graphiql))
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_post))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(schema)
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// `GET /graphql`: execute `?query=…`, or serve GraphiQL when absent.
async fn graphql_get(
    State(schema): State<DomqlSchema>,
    Query(params): Query<GetParams>,
) -> Result<Response, ApiError> {
    let Some(query) = params.query.filter(|query| !query.trim().is_empty()) else {
        return Ok(graphiql().await.into_response());
    };

    let mut request = Request::new(query);
    if let Some(name) = params.operation_name {
        request = request.operation_name(name);
    }
    if let Some(variables) = params.variables {
        let value = serde_json::from_str(&variables)
            .map_err(|e| ApiError::BadRequest(format!("invalid variables: {e}")))?;
        request = request.variables(Variables::from_json(value));
    }

    execute(&schema, request).await
}

/// `POST /graphql` with a JSON body.
async fn graphql_post(
    State(schema): State<DomqlSchema>,
    Json(request): Json<Request>,
) -> Result<Response, ApiError> {
    execute(&schema, request).await
}

async fn execute(schema: &DomqlSchema, request: Request) -> Result<Response, ApiError> {
    let response = schema.execute(request).await;
    if !response.errors.is_empty() {
        tracing::debug!(errors = response.errors.len(), "query finished with errors");
    }
    pretty_json(&response)
}

fn pretty_json(value: &impl Serialize) -> Result<Response, ApiError> {
    let body =
        serde_json::to_string_pretty(value).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use sales_dash_api::{
    ApiError, DashboardRequest, DashboardResponse, FilterOptionsResponse, ListSalesResponse,
    PreviewSalesResponse, UploadSalesResponse, dashboard, filter_options, list_sales,
    preview_sales, upload_sales,
};
use sales_dash_persistence::SqliteStore;

/// Sales Dash Server - HTTP server for the Sales Dash service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the append store wrapped in a Mutex to allow safe
/// concurrent access. Each user action takes the lock for its full
/// synchronous compute pass.
#[derive(Clone)]
struct AppState {
    /// The append store for sales records.
    store: Arc<Mutex<SqliteStore>>,
}

/// API request carrying uploaded CSV text.
///
/// Used by both the upload and preview endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UploadCsvApiRequest {
    /// The raw CSV file contents.
    csv: String,
}

/// Query parameters for the dashboard endpoint.
///
/// Absent parameters mean "no filter"; both filters combine with AND.
#[derive(Debug, Deserialize)]
struct DashboardQuery {
    /// Restrict to this region.
    region: Option<String>,
    /// Restrict to this product.
    product: Option<String>,
}

/// JSON body returned for any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidCsvFormat { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::SchemaViolation { .. } | ApiError::AggregationFailed { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::StorageFailed { .. } => {
                error!(error = %err, "Storage error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handler for POST `/sales/upload` endpoint.
///
/// Uploads a CSV batch: validates, normalizes, and appends it to the store.
async fn handle_upload(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UploadCsvApiRequest>,
) -> Result<Json<UploadSalesResponse>, HttpError> {
    info!(bytes = req.csv.len(), "Handling upload request");

    let mut store = app_state.store.lock().await;
    let response: UploadSalesResponse = upload_sales(&mut store, &req.csv)?;
    drop(store);

    info!(
        rows_appended = response.rows_appended,
        total_rows = response.total_rows,
        "Successfully uploaded sales batch"
    );

    Ok(Json(response))
}

/// Handler for POST `/sales/preview` endpoint.
///
/// Runs the upload pipeline without persisting anything.
#[allow(clippy::unused_async)]
async fn handle_preview(
    Json(req): Json<UploadCsvApiRequest>,
) -> Result<Json<PreviewSalesResponse>, HttpError> {
    info!(bytes = req.csv.len(), "Handling preview request");

    let response: PreviewSalesResponse = preview_sales(&req.csv)?;

    Ok(Json(response))
}

/// Handler for GET `/sales` endpoint.
///
/// Lists the full stored record set.
async fn handle_list_sales(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListSalesResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: ListSalesResponse = list_sales(&mut store)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/dashboard` endpoint.
///
/// Computes the dashboard aggregates under the requested filters.
async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, HttpError> {
    info!(
        region = query.region.as_deref().unwrap_or("-"),
        product = query.product.as_deref().unwrap_or("-"),
        "Handling dashboard request"
    );

    let request: DashboardRequest = DashboardRequest {
        region: query.region,
        product: query.product,
    };

    let mut store = app_state.store.lock().await;
    let response: DashboardResponse = dashboard(&mut store, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/filters` endpoint.
///
/// Lists the distinct region and product filter values.
async fn handle_filter_options(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FilterOptionsResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: FilterOptionsResponse = filter_options(&mut store)?;
    drop(store);

    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/sales/upload", post(handle_upload))
        .route("/sales/preview", post(handle_preview))
        .route("/sales", get(handle_list_sales))
        .route("/dashboard", get(handle_dashboard))
        .route("/filters", get(handle_filter_options))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Sales Dash Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: SqliteStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteStore::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    const EXAMPLE_CSV: &str = "date,product,region,units_sold,revenue\n\
                               2024-06-01,WidgetA,East,10,100\n\
                               2024-06-02,WidgetB,West,5,50\n";

    /// Helper to create test app state with an in-memory store.
    fn create_test_app_state() -> AppState {
        let store: SqliteStore =
            SqliteStore::new_in_memory().expect("Failed to create in-memory store");
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Helper to build a JSON POST request carrying CSV text.
    fn csv_request(uri: &str, csv: &str) -> Request<Body> {
        let body: String = serde_json::to_string(&UploadCsvApiRequest {
            csv: csv.to_string(),
        })
        .expect("serialize request");
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("build request")
    }

    /// Helper to deserialize a JSON response body.
    async fn response_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("parse body")
    }

    #[tokio::test]
    async fn test_upload_then_dashboard_flow() {
        let app: Router = build_router(create_test_app_state());

        let upload_response = app
            .clone()
            .oneshot(csv_request("/sales/upload", EXAMPLE_CSV))
            .await
            .expect("request");
        assert_eq!(upload_response.status(), HttpStatusCode::OK);
        let upload: UploadSalesResponse = response_json(upload_response).await;
        assert_eq!(upload.rows_appended, 2);

        let dashboard_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/dashboard")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("request");
        assert_eq!(dashboard_response.status(), HttpStatusCode::OK);
        let body: DashboardResponse = response_json(dashboard_response).await;
        assert!((body.kpis.total_revenue - 150.0).abs() < 1e-9);
        assert_eq!(body.kpis.total_units, 15);
        assert_eq!(body.daily.len(), 2);
    }

    #[tokio::test]
    async fn test_upload_without_date_column_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(csv_request("/sales/upload", "product,revenue\nWidgetA,100\n"))
            .await
            .expect("request");
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = response_json(response).await;
        assert!(body.error);
        assert!(body.message.contains("'date'"));

        // The rejected upload must leave the store unchanged.
        let listing_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/sales")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("request");
        let listing: ListSalesResponse = response_json(listing_response).await;
        assert_eq!(listing.total_rows, 0);
    }

    #[tokio::test]
    async fn test_malformed_csv_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(csv_request("/sales/upload", "date,revenue\n2024-06-01\n"))
            .await
            .expect("request");
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_does_not_persist() {
        let app: Router = build_router(create_test_app_state());

        let preview_response = app
            .clone()
            .oneshot(csv_request("/sales/preview", EXAMPLE_CSV))
            .await
            .expect("request");
        assert_eq!(preview_response.status(), HttpStatusCode::OK);
        let preview: PreviewSalesResponse = response_json(preview_response).await;
        assert_eq!(preview.total_rows, 2);

        let listing_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/sales")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("request");
        let listing: ListSalesResponse = response_json(listing_response).await;
        assert_eq!(listing.total_rows, 0);
    }

    #[tokio::test]
    async fn test_dashboard_filter_query_parameters() {
        let app: Router = build_router(create_test_app_state());

        let csv: &str = "date,product,region,units_sold,revenue\n\
                         2024-06-01,WidgetA,East,10,100\n\
                         2024-06-02,WidgetA,West,5,50\n\
                         2024-06-03,WidgetB,East,2,20\n";
        app.clone()
            .oneshot(csv_request("/sales/upload", csv))
            .await
            .expect("request");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/dashboard?region=East&product=WidgetA")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("request");
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: DashboardResponse = response_json(response).await;
        assert!((body.kpis.total_revenue - 100.0).abs() < 1e-9);
        assert_eq!(body.kpis.total_units, 10);
    }

    #[tokio::test]
    async fn test_dashboard_on_empty_store_returns_zeroes() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/dashboard")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("request");
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: DashboardResponse = response_json(response).await;
        assert!(body.kpis.total_revenue.abs() < 1e-9);
        assert_eq!(body.kpis.total_units, 0);
        assert!(body.daily.is_empty());
        assert!(body.correlation.columns.is_empty());
    }

    #[tokio::test]
    async fn test_filter_options_endpoint() {
        let app: Router = build_router(create_test_app_state());

        app.clone()
            .oneshot(csv_request("/sales/upload", EXAMPLE_CSV))
            .await
            .expect("request");

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/filters")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("request");
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: FilterOptionsResponse = response_json(response).await;
        assert_eq!(body.regions.len(), 2);
        assert_eq!(body.products.len(), 2);
    }
}

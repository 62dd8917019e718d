use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use frontdesk::config::AppConfig;
use frontdesk::db;
use frontdesk::handlers;
use frontdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/v1/bookings", get(handlers::bookings::list_bookings))
        .route("/api/v1/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/v1/bookings/checking-in-today",
            get(handlers::bookings::checking_in_today),
        )
        .route(
            "/api/v1/bookings/checking-out-today",
            get(handlers::bookings::checking_out_today),
        )
        .route("/api/v1/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/v1/bookings/:id",
            delete(handlers::bookings::cancel_booking),
        )
        .route(
            "/api/v1/bookings/:id/check-in",
            put(handlers::bookings::check_in),
        )
        .route(
            "/api/v1/bookings/:id/check-out",
            put(handlers::bookings::check_out),
        )
        .route(
            "/api/v1/bookings/:id/extend",
            put(handlers::bookings::extend_booking),
        )
        .route(
            "/api/v1/bookings/:id/checklist",
            get(handlers::checklists::list_checklist),
        )
        .route(
            "/api/v1/bookings/:id/checklist",
            post(handlers::checklists::add_checklist_item),
        )
        .route(
            "/api/v1/bookings/:id/checklist",
            put(handlers::checklists::replace_checklist),
        )
        .route(
            "/api/v1/bookings/:id/checklist/:item_id",
            put(handlers::checklists::update_checklist_item),
        )
        .route(
            "/api/v1/bookings/:id/checklist/:item_id",
            delete(handlers::checklists::delete_checklist_item),
        )
        .route(
            "/api/v1/bookings/:id/checklist/:item_id/toggle",
            put(handlers::checklists::toggle_checklist_item),
        )
        .route("/api/v1/rooms", get(handlers::rooms::list_rooms))
        .route("/api/v1/rooms", post(handlers::rooms::create_room))
        .route(
            "/api/v1/rooms/available",
            get(handlers::rooms::available_rooms),
        )
        .route("/api/v1/rooms/:id", get(handlers::rooms::get_room))
        .route(
            "/api/v1/rooms/:id/status",
            put(handlers::rooms::set_room_status),
        )
        .route("/api/v1/guests", get(handlers::guests::list_guests))
        .route("/api/v1/guests", post(handlers::guests::create_guest))
        .route("/api/v1/guests/:id", get(handlers::guests::get_guest))
        .route(
            "/api/v1/guests/:id/bookings",
            get(handlers::guests::guest_bookings),
        )
        .route("/api/v1/guests/:id", put(handlers::guests::update_guest))
        .route("/api/v1/guests/:id", delete(handlers::guests::delete_guest))
        .route("/api/v1/inventory", get(handlers::inventory::list_inventory))
        .route(
            "/api/v1/inventory",
            post(handlers::inventory::create_inventory_item),
        )
        .route(
            "/api/v1/inventory/low-stock",
            get(handlers::inventory::low_stock),
        )
        .route(
            "/api/v1/inventory/:id",
            get(handlers::inventory::get_inventory_item),
        )
        .route(
            "/api/v1/inventory/:id",
            put(handlers::inventory::update_inventory_item),
        )
        .route(
            "/api/v1/inventory/:id",
            delete(handlers::inventory::delete_inventory_item),
        )
        .route(
            "/api/v1/inventory/:id/quantity",
            patch(handlers::inventory::set_quantity),
        )
        .route(
            "/api/v1/inventory/:id/restock",
            post(handlers::inventory::restock),
        )
        .route("/api/v1/expenses", get(handlers::expenses::list_expenses))
        .route("/api/v1/expenses", post(handlers::expenses::create_expense))
        .route("/api/v1/expenses/:id", get(handlers::expenses::get_expense))
        .route(
            "/api/v1/expenses/:id",
            put(handlers::expenses::update_expense),
        )
        .route(
            "/api/v1/expenses/:id",
            delete(handlers::expenses::delete_expense),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

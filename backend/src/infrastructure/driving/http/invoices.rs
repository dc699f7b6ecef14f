use axum::{extract::State, response::Json, routing::get, Router};

use crate::application::member::commands::list_invoices::{self, InvoiceWithBooking};
use crate::application::AppError;
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

pub fn invoice_routes() -> Router<AppState> {
    Router::new().route("/api/invoices", get(list))
}

async fn list(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<Json<Vec<InvoiceWithBooking>>, AppError> {
    Ok(Json(list_invoices::execute(&state, &caller).await?))
}

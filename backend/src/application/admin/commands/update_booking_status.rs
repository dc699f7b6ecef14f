use crate::application::access::Caller;
use crate::application::validation::{field, required};
use crate::application::AppError;
use crate::domain::{BookingId, BookingRequest, BookingStatus, InvoiceStatus};
use crate::infrastructure::AppState;

pub async fn execute(
    state: &AppState,
    caller: &Caller,
    raw_id: &str,
    status: Option<String>,
) -> Result<BookingRequest, AppError> {
    caller.require_admin()?;
    let id = field(BookingId::parse(raw_id))?;
    let next = field(BookingStatus::parse(required("Status", &status)?))?;

    let mut booking = state
        .booking_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let previous = booking.status;
    let changed = booking.transition_to(next).map_err(|(from, to)| AppError::InvalidTransition {
        from: from.as_str(),
        to: to.as_str(),
    })?;
    if !changed {
        return Ok(booking);
    }

    let written = state
        .booking_repo
        .update_status(&id, previous, next, booking.updated_at)
        .await?;
    if !written {
        return Err(AppError::Conflict(
            "Booking status was changed by someone else, reload and try again".to_string(),
        ));
    }
    tracing::info!(
        booking = %id,
        from = previous.as_str(),
        to = next.as_str(),
        by = %caller.email,
        "booking status updated"
    );

    if next.is_withdrawn() {
        withdraw(state, &booking).await;
    }
    Ok(booking)
}

/// Cancels the open invoice and frees the workspace. Failures are logged; the
/// status change itself already stands.
async fn withdraw(state: &AppState, booking: &BookingRequest) {
    match state.invoice_repo.find_by_booking(&booking.id).await {
        Ok(Some(mut invoice)) => {
            if invoice.cancel() {
                if let Err(e) = state.invoice_repo.update_status(&invoice.id, InvoiceStatus::Cancelled).await {
                    tracing::error!(invoice = %invoice.invoice_number, error = %e, "failed to cancel invoice");
                }
            }
        }
        Ok(None) => {}
        Err(e) => tracing::error!(booking = %booking.id, error = %e, "failed to look up invoice"),
    }

    if let Some(allotment) = booking.allotment() {
        match state.workspace_repo.release(&booking.workspace_id, Some(&allotment)).await {
            Ok(true) => tracing::info!(
                workspace = %booking.workspace_id,
                occupant = %allotment.allotted_to,
                "allotment released"
            ),
            Ok(false) => {}
            Err(e) => tracing::error!(workspace = %booking.workspace_id, error = %e, "failed to release allotment"),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::access::{resolve_identity, Caller};
use crate::application::ports::AllotOutcome;
use crate::application::validation::{field, optional, parse_date, required};
use crate::application::{invoicing, AppError};
use crate::domain::pricing::total_charge;
use crate::domain::*;
use crate::infrastructure::AppState;

const MAX_INVOICE_NUMBER_ATTEMPTS: usize = 5;

/// Raw submission; every field may be missing so validation can name it.
#[derive(Debug, Clone, Default)]
pub struct SubmitBookingCommand {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub firm_name: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<String>,
    pub workspace_id: Option<String>,
    pub workspace_name: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub booking: BookingRequest,
    pub invoice: Invoice,
}

/// Validate, price, allot (for immediate payment), record the booking and
/// issue its invoice. The writes form one saga: a failure after the first
/// write undoes the earlier ones before the error is returned.
pub async fn execute(
    state: &AppState,
    session: Option<&Caller>,
    cmd: SubmitBookingCommand,
) -> Result<BookingReceipt, AppError> {
    let draft = validate(cmd)?;

    let workspace = state
        .workspace_repo
        .find_by_id(&draft.workspace_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".to_string()))?;

    let total = field(total_charge(workspace.base_price, &draft.duration))?;
    let lease = field(LeaseWindow::starting_at(draft.start_date, &draft.duration))?;
    let invoice_number = next_free_invoice_number(state).await?;
    let now = Utc::now();

    let mut booking = BookingRequest::submit(draft, lease, total, invoice_number, now);
    booking.workspace_name = workspace.name.clone();

    let payer = resolve_identity(&*state.user_repo, session.map(|c| &c.id), &booking.email).await?;

    if booking.payment_method.is_immediate() {
        if let Some(occupant) = &payer {
            allot(state, &workspace, occupant, lease, now).await?;
            booking.occupant = Some(occupant.clone());
        } else {
            tracing::info!(
                workspace = %workspace.id,
                email = %booking.email,
                "paid booking without a known member, allotment skipped"
            );
        }
    }

    if let Err(e) = state.booking_repo.save(&booking).await {
        undo_allotment(state, &booking).await;
        return Err(e.into());
    }
    tracing::info!(
        booking = %booking.id,
        workspace = %booking.workspace_id,
        status = booking.status.as_str(),
        amount = booking.total_amount,
        "booking recorded"
    );

    match invoicing::issue(&*state.invoice_repo, &booking, payer, state.invoice_due_in, now).await {
        Ok(invoice) => Ok(BookingReceipt { booking, invoice }),
        Err(e) => {
            tracing::warn!(booking = %booking.id, error = %e, "invoice failed, rolling booking back");
            undo_booking(state, &booking).await;
            undo_allotment(state, &booking).await;
            Err(e)
        }
    }
}

fn validate(cmd: SubmitBookingCommand) -> Result<BookingDraft, AppError> {
    let full_name = required("Full name", &cmd.full_name)?;
    let email = required("Email", &cmd.email)?;
    let contact_number = required("Contact number", &cmd.contact_number)?;
    let duration = required("Duration", &cmd.duration)?;
    let start_date = required("Start date", &cmd.start_date)?;
    let workspace_id = required("Workspace id", &cmd.workspace_id)?;
    let workspace_name = required("Workspace name", &cmd.workspace_name)?;
    let payment_method = required("Payment method", &cmd.payment_method)?;

    Ok(BookingDraft {
        workspace_id: field(WorkspaceId::parse(workspace_id))?,
        workspace_name: workspace_name.to_string(),
        full_name: field(DisplayName::new(full_name))?,
        email: field(Email::new(email))?,
        contact_number: field(ContactNumber::new(contact_number))?,
        firm_name: optional(cmd.firm_name),
        duration: field(DurationSpec::parse(duration))?,
        raw_duration: duration.to_string(),
        start_date: parse_date("Start date", start_date)?,
        payment_method: field(PaymentMethod::parse(payment_method))?,
    })
}

async fn next_free_invoice_number(state: &AppState) -> Result<InvoiceNumber, AppError> {
    for _ in 0..MAX_INVOICE_NUMBER_ATTEMPTS {
        let candidate = state.invoice_numbers.next_number();
        if state.invoice_repo.find_by_number(&candidate).await?.is_none() {
            return Ok(candidate);
        }
        tracing::debug!(invoice = %candidate, "invoice number collision, drawing again");
    }
    Err(AppError::Internal("could not allocate a unique invoice number".to_string()))
}

async fn allot(
    state: &AppState,
    workspace: &Workspace,
    occupant: &UserId,
    window: LeaseWindow,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let allotment = Allotment { allotted_to: occupant.clone(), window };
    match state.workspace_repo.try_allot(&workspace.id, &allotment, now).await? {
        AllotOutcome::Allotted(_) => {
            tracing::info!(
                workspace = %workspace.id,
                occupant = %occupant,
                until = %window.end,
                "workspace allotted"
            );
            Ok(())
        }
        AllotOutcome::Occupied(current) => Err(AppError::AlreadyAllotted(format!(
            "Workspace '{}' is already allotted until {}",
            workspace.name,
            current.window.end.format("%Y-%m-%d")
        ))),
        AllotOutcome::Missing => Err(AppError::NotFound("Workspace not found".to_string())),
    }
}

async fn undo_booking(state: &AppState, booking: &BookingRequest) {
    if let Err(e) = state.booking_repo.delete(&booking.id).await {
        tracing::error!(booking = %booking.id, error = %e, "failed to roll back booking");
    }
}

async fn undo_allotment(state: &AppState, booking: &BookingRequest) {
    let Some(allotment) = booking.allotment() else {
        return;
    };
    match state.workspace_repo.release(&booking.workspace_id, Some(&allotment)).await {
        Ok(_) => tracing::warn!(
            workspace = %booking.workspace_id,
            occupant = %allotment.allotted_to,
            "allotment rolled back"
        ),
        Err(e) => tracing::error!(workspace = %booking.workspace_id, error = %e, "failed to roll back allotment"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::access::RecordScope;
    use crate::test_support::{self, TestStore};
    use chrono::Duration;

    fn submission(workspace: &Workspace, method: &str) -> SubmitBookingCommand {
        SubmitBookingCommand {
            full_name: Some("Amit Sharma".into()),
            email: Some("amit@startup.co".into()),
            contact_number: Some("+91 98765 43210".into()),
            firm_name: Some("Startup Co".into()),
            duration: Some("1 month".into()),
            start_date: Some(crate::test_support::today()),
            workspace_id: Some(workspace.id.to_string()),
            workspace_name: Some(workspace.name.clone()),
            payment_method: Some(method.into()),
        }
    }

    async fn booking_count(store: &TestStore) -> usize {
        store.state.booking_repo.list(&RecordScope::All).await.unwrap().len()
    }

    async fn invoice_count(store: &TestStore) -> usize {
        store.state.invoice_repo.list(&RecordScope::All).await.unwrap().len()
    }

    #[tokio::test]
    async fn test_pay_now_confirms_pays_and_allots() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        let member = store.member("amit@startup.co", UserRole::Member).await;

        let receipt = execute(&store.state, None, submission(&workspace, "Pay Now"))
            .await
            .unwrap();

        assert_eq!(receipt.booking.status, BookingStatus::Confirmed);
        assert_eq!(receipt.booking.payment_status, PaymentStatus::Paid);
        assert_eq!(receipt.booking.total_amount, 10_000);
        assert_eq!(receipt.invoice.status, InvoiceStatus::Paid);
        assert!(receipt.invoice.paid_date.is_some());
        assert!(receipt.invoice.due_date.is_none());
        assert_eq!(receipt.invoice.user_id.as_ref(), Some(member.id()));
        assert_eq!(receipt.invoice.booking_id, receipt.booking.id);
        assert_eq!(receipt.invoice.invoice_number, receipt.booking.invoice_number);

        let stored = store.state.workspace_repo.find_by_id(&workspace.id).await.unwrap().unwrap();
        let allotment = stored.allotment.expect("workspace should be allotted");
        assert_eq!(&allotment.allotted_to, member.id());
        assert_eq!(allotment.window, receipt.booking.lease);
    }

    #[tokio::test]
    async fn test_session_identity_wins_over_email_lookup() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        store.member("amit@startup.co", UserRole::Member).await;
        let session = test_support::caller("manager@cohort.com", UserRole::Manager);

        let receipt = execute(&store.state, Some(&session), submission(&workspace, "Pay Now"))
            .await
            .unwrap();

        assert_eq!(receipt.invoice.user_id.as_ref(), Some(&session.id));
        assert_eq!(receipt.booking.occupant.as_ref(), Some(&session.id));
    }

    #[tokio::test]
    async fn test_pay_later_awaits_payment_and_leaves_workspace_alone() {
        let store = TestStore::new();
        let workspace = store.workspace("Open Workstation", 5_999.0).await;
        store.member("amit@startup.co", UserRole::Member).await;
        let before = Utc::now();

        let receipt = execute(&store.state, None, submission(&workspace, "Pay Later"))
            .await
            .unwrap();

        assert_eq!(receipt.booking.status, BookingStatus::AwaitingPayment);
        assert_eq!(receipt.booking.payment_status, PaymentStatus::Pending);
        assert_eq!(receipt.invoice.status, InvoiceStatus::Pending);
        assert!(receipt.invoice.paid_date.is_none());
        let due = receipt.invoice.due_date.expect("deferred invoices carry a due date");
        assert!(due >= before + Duration::days(7));
        assert!(due <= Utc::now() + Duration::days(7));

        let stored = store.state.workspace_repo.find_by_id(&workspace.id).await.unwrap().unwrap();
        assert!(stored.allotment.is_none());
    }

    #[tokio::test]
    async fn test_invoice_method_behaves_like_deferred_payment() {
        let store = TestStore::new();
        let workspace = store.workspace("Creative Studio", 12_999.0).await;

        let receipt = execute(&store.state, None, submission(&workspace, "Invoice"))
            .await
            .unwrap();

        assert_eq!(receipt.booking.status, BookingStatus::AwaitingPayment);
        assert_eq!(receipt.invoice.payment_method, PaymentMethod::Invoice);
        assert!(receipt.invoice.user_id.is_none());
    }

    #[tokio::test]
    async fn test_pay_now_without_known_member_skips_allotment() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 24_999.0).await;

        let receipt = execute(&store.state, None, submission(&workspace, "Pay Now"))
            .await
            .unwrap();

        assert_eq!(receipt.booking.status, BookingStatus::Confirmed);
        assert!(receipt.booking.occupant.is_none());
        assert!(receipt.invoice.user_id.is_none());
        let stored = store.state.workspace_repo.find_by_id(&workspace.id).await.unwrap().unwrap();
        assert!(stored.allotment.is_none());
    }

    #[tokio::test]
    async fn test_missing_workspace_writes_nothing() {
        let store = TestStore::new();
        let ghost = Workspace::create(crate::domain::entities::workspace::tests::details("Ghost", 100.0)).unwrap();

        let err = execute(&store.state, None, submission(&ghost, "Pay Now"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Workspace not found"));
        assert_eq!(booking_count(&store).await, 0);
        assert_eq!(invoice_count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_missing_contact_number_is_named() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        let mut cmd = submission(&workspace, "Pay Now");
        cmd.contact_number = None;

        let err = execute(&store.state, None, cmd).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "Contact number is required"));
        assert_eq!(booking_count(&store).await, 0);
        assert_eq!(invoice_count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_malformed_fields_are_rejected() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        let cases: Vec<(fn(&mut SubmitBookingCommand), &str)> = vec![
            (|c| c.email = Some("not-an-email".into()), "Invalid email format"),
            (|c| c.contact_number = Some("12345".into()), "Invalid contact number"),
            (|c| c.duration = Some("3 fortnights".into()), "Unknown duration unit 'fortnights'"),
            (|c| c.payment_method = Some("Crypto".into()), "Payment method must be one of Pay Now, Pay Later, Invoice"),
            (|c| c.start_date = Some("next tuesday".into()), "Start date must be a valid date"),
            (|c| c.workspace_id = Some("42".into()), "Invalid workspace id"),
        ];
        for (mutate, expected) in cases {
            let mut cmd = submission(&workspace, "Pay Now");
            mutate(&mut cmd);
            let err = execute(&store.state, None, cmd).await.unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
        assert_eq!(booking_count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_price_is_read_from_the_stored_workspace() {
        let store = TestStore::new();
        let workspace = store.workspace("Executive Meeting Room", 10_000.0).await;
        let mut cmd = submission(&workspace, "Pay Later");
        cmd.duration = Some("1 week".into());
        cmd.workspace_name = Some("Renamed on the client".into());

        let receipt = execute(&store.state, None, cmd).await.unwrap();

        assert_eq!(receipt.booking.total_amount, 2_305);
        assert_eq!(receipt.booking.workspace_name, "Executive Meeting Room");
        assert_eq!(receipt.invoice.amount, 2_305);
    }

    #[tokio::test]
    async fn test_out_of_range_total_is_refused_before_writing() {
        let store = TestStore::new();
        let workspace = store.workspace("Penthouse", 1e18).await;
        store.member("amit@startup.co", UserRole::Member).await;
        let mut cmd = submission(&workspace, "Pay Now");
        cmd.duration = Some("12 months".into());

        let err = execute(&store.state, None, cmd).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "Booking total is out of range"));
        assert_eq!(booking_count(&store).await, 0);
        let stored = store.state.workspace_repo.find_by_id(&workspace.id).await.unwrap().unwrap();
        assert!(stored.allotment.is_none());
    }

    #[tokio::test]
    async fn test_occupied_workspace_rejects_and_rolls_back() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        store.member("amit@startup.co", UserRole::Member).await;
        let rival = store.member("sneha@designhub.in", UserRole::Member).await;
        let lease = LeaseWindow::starting_at(Utc::now() - Duration::days(1), &DurationSpec::parse("1 year").unwrap()).unwrap();
        store
            .state
            .workspace_repo
            .try_allot(&workspace.id, &Allotment { allotted_to: rival.id().clone(), window: lease }, Utc::now())
            .await
            .unwrap();

        let err = execute(&store.state, None, submission(&workspace, "Pay Now"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyAllotted(_)));
        assert_eq!(booking_count(&store).await, 0);
        assert_eq!(invoice_count(&store).await, 0);
        let stored = store.state.workspace_repo.find_by_id(&workspace.id).await.unwrap().unwrap();
        assert_eq!(&stored.allotment.unwrap().allotted_to, rival.id());
    }

    #[tokio::test]
    async fn test_lapsed_allotment_can_be_taken_over() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        let member = store.member("amit@startup.co", UserRole::Member).await;
        let former = store.member("sneha@designhub.in", UserRole::Member).await;
        let expired = LeaseWindow {
            start: Utc::now() - Duration::days(60),
            end: Utc::now() - Duration::days(30),
        };
        store
            .state
            .workspace_repo
            .try_allot(&workspace.id, &Allotment { allotted_to: former.id().clone(), window: expired }, expired.start)
            .await
            .unwrap();

        execute(&store.state, None, submission(&workspace, "Pay Now")).await.unwrap();

        let stored = store.state.workspace_repo.find_by_id(&workspace.id).await.unwrap().unwrap();
        assert_eq!(&stored.allotment.unwrap().allotted_to, member.id());
    }

    #[tokio::test]
    async fn test_invoice_failure_rolls_back_booking_and_allotment() {
        let store = TestStore::with_failing_invoices();
        let workspace = store.workspace("Private Suite", 10_000.0).await;
        store.member("amit@startup.co", UserRole::Member).await;

        let err = execute(&store.state, None, submission(&workspace, "Pay Now"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(booking_count(&store).await, 0);
        let stored = store.state.workspace_repo.find_by_id(&workspace.id).await.unwrap().unwrap();
        assert!(stored.allotment.is_none());
    }

    #[tokio::test]
    async fn test_invoice_numbers_are_unique_and_well_formed() {
        let store = TestStore::new();
        let workspace = store.workspace("Open Workstation", 5_999.0).await;
        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            let receipt = execute(&store.state, None, submission(&workspace, "Pay Later"))
                .await
                .unwrap();
            let number = receipt.invoice.invoice_number.as_str().to_string();
            assert!(InvoiceNumber::parse(&number).is_ok(), "{number}");
            assert!(seen.insert(number));
        }
    }

    #[tokio::test]
    async fn test_colliding_invoice_number_is_redrawn() {
        let store = TestStore::with_invoice_numbers(&["INV-00000A", "INV-00000A", "INV-00000B"]);
        let workspace = store.workspace("Open Workstation", 5_999.0).await;

        let first = execute(&store.state, None, submission(&workspace, "Pay Later")).await.unwrap();
        let second = execute(&store.state, None, submission(&workspace, "Pay Later")).await.unwrap();

        assert_eq!(first.invoice.invoice_number.as_str(), "INV-00000A");
        assert_eq!(second.invoice.invoice_number.as_str(), "INV-00000B");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_pay_now_bookings_allot_exactly_once() {
        let store = TestStore::new();
        let workspace = store.workspace("Private Suite", 24_999.0).await;
        store.member("amit@startup.co", UserRole::Member).await;
        store.member("sneha@designhub.in", UserRole::Member).await;

        let mut handles = Vec::new();
        for round in 0..8 {
            let state = store.state.clone();
            let mut cmd = submission(&workspace, "Pay Now");
            if round % 2 == 1 {
                cmd.email = Some("sneha@designhub.in".into());
                cmd.full_name = Some("Sneha Reddy".into());
            }
            handles.push(tokio::spawn(async move { execute(&state, None, cmd).await }));
        }

        let mut allotted = 0;
        let mut refused = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(receipt) => {
                    assert!(receipt.booking.occupant.is_some());
                    allotted += 1;
                }
                Err(AppError::AlreadyAllotted(_)) => refused += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(allotted, 1);
        assert_eq!(refused, 7);
        assert_eq!(booking_count(&store).await, 1);
        assert_eq!(invoice_count(&store).await, 1);
    }
}

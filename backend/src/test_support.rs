// Fixtures shared by the unit tests: an in-memory AppState plus helpers for
// seeding workspaces and members and minting bearer tokens.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::application::access::{Caller, RecordScope};
use crate::application::ports::*;
use crate::domain::entities::workspace::tests::details;
use crate::domain::*;
use crate::infrastructure::driven::*;
use crate::infrastructure::driving::http::middleware::auth::Claims;
use crate::infrastructure::AppState;

pub const JWT_SECRET: &str = "test-secret";

pub struct TestStore {
    pub state: AppState,
}

impl TestStore {
    pub fn new() -> Self {
        Self::assemble(
            Arc::new(LogMailer),
            Arc::new(InMemoryInvoiceRepository::new()),
            Arc::new(OsRandomInvoiceNumbers),
        )
    }

    pub fn with_mailer(mailer: MockMailer) -> Self {
        Self::assemble(
            Arc::new(mailer),
            Arc::new(InMemoryInvoiceRepository::new()),
            Arc::new(OsRandomInvoiceNumbers),
        )
    }

    pub fn with_failing_invoices() -> Self {
        Self::assemble(
            Arc::new(LogMailer),
            Arc::new(FailingInvoiceRepository::default()),
            Arc::new(OsRandomInvoiceNumbers),
        )
    }

    pub fn with_invoice_numbers(numbers: &[&str]) -> Self {
        let queue = numbers
            .iter()
            .map(|raw| InvoiceNumber::parse(raw).unwrap())
            .collect();
        Self::assemble(
            Arc::new(LogMailer),
            Arc::new(InMemoryInvoiceRepository::new()),
            Arc::new(ScriptedInvoiceNumbers(Mutex::new(queue))),
        )
    }

    fn assemble(
        mailer: Arc<dyn Mailer>,
        invoice_repo: Arc<dyn InvoiceRepository>,
        invoice_numbers: Arc<dyn InvoiceNumberSource>,
    ) -> Self {
        Self {
            state: AppState {
                jwt_secret: JWT_SECRET.to_string(),
                invoice_due_in: Duration::days(7),
                user_repo: Arc::new(InMemoryUserRepository::new()),
                workspace_repo: Arc::new(InMemoryWorkspaceRepository::new()),
                booking_repo: Arc::new(InMemoryBookingRepository::new()),
                invoice_repo,
                inquiry_repo: Arc::new(InMemoryInquiryRepository::new()),
                day_pass_repo: Arc::new(InMemoryDayPassRepository::new()),
                mailer,
                invoice_numbers,
            },
        }
    }

    pub async fn workspace(&self, name: &str, base_price: f64) -> Workspace {
        let workspace = Workspace::create(details(name, base_price)).unwrap();
        self.state.workspace_repo.save(&workspace).await.unwrap();
        workspace
    }

    pub async fn member(&self, email: &str, role: UserRole) -> User {
        let local = email.split('@').next().unwrap_or(email);
        let user = User::new(
            DisplayName::new(local).unwrap(),
            Email::new(email).unwrap(),
            None,
            None,
            role,
        );
        self.state.user_repo.save(&user).await.unwrap();
        user
    }
}

pub fn caller(email: &str, role: UserRole) -> Caller {
    Caller {
        id: UserId::new(),
        email: Email::new(email).unwrap(),
        role,
    }
}

pub fn caller_for(user: &User) -> Caller {
    Caller {
        id: user.id().clone(),
        email: user.email().clone(),
        role: user.role(),
    }
}

pub fn token_for(caller: &Caller) -> String {
    let claims = Claims {
        sub: caller.id.to_string(),
        email: caller.email.to_string(),
        role: caller.role.as_str().to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_bytes())).unwrap()
}

/// Hands out the given numbers in order, then falls back to random ones.
struct ScriptedInvoiceNumbers(Mutex<VecDeque<InvoiceNumber>>);

impl InvoiceNumberSource for ScriptedInvoiceNumbers {
    fn next_number(&self) -> InvoiceNumber {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| OsRandomInvoiceNumbers.next_number())
    }
}

/// Reads work; every save fails as if the database went away mid-saga.
#[derive(Default)]
struct FailingInvoiceRepository(InMemoryInvoiceRepository);

#[async_trait]
impl InvoiceRepository for FailingInvoiceRepository {
    async fn save(&self, _invoice: &Invoice) -> StoreResult<()> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn find_by_number(&self, number: &InvoiceNumber) -> StoreResult<Option<Invoice>> {
        self.0.find_by_number(number).await
    }

    async fn find_by_booking(&self, booking_id: &BookingId) -> StoreResult<Option<Invoice>> {
        self.0.find_by_booking(booking_id).await
    }

    async fn list(&self, scope: &RecordScope) -> StoreResult<Vec<Invoice>> {
        self.0.list(scope).await
    }

    async fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> StoreResult<bool> {
        self.0.update_status(id, status).await
    }

    async fn count_by_status(&self, status: InvoiceStatus) -> StoreResult<u64> {
        self.0.count_by_status(status).await
    }
}

/// Today's UTC date as a submitted `YYYY-MM-DD`, so leases starting on it are
/// running whenever the tests execute.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

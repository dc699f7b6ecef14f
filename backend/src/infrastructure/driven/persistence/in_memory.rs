// In-memory repositories for development and tests. Each store sits behind one
// std RwLock; conditional writes check and write under the same write guard.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::access::RecordScope;
use crate::application::ports::{
    AllotOutcome, BookingRepository, DayPassRepository, InquiryRepository, InvoiceRepository,
    StoreError, StoreResult, UserRepository, WorkspaceRepository,
};
use crate::domain::*;

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| StoreError::Backend("lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| StoreError::Backend("lock poisoned".to_string()))
}

fn newest_first<T: Clone>(items: impl Iterator<Item = T>, created: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by_key(|item| std::cmp::Reverse(created(item)));
    items
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> StoreResult<()> {
        let mut users = write(&self.users)?;
        if users.values().any(|u| u.email() == user.email() && u.id() != user.id()) {
            return Err(StoreError::Duplicate("user".to_string()));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> StoreResult<bool> {
        let mut users = write(&self.users)?;
        if !users.contains_key(user.id()) {
            return Ok(false);
        }
        if users.values().any(|u| u.email() == user.email() && u.id() != user.id()) {
            return Err(StoreError::Duplicate("user".to_string()));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(true)
    }

    async fn delete(&self, id: &UserId) -> StoreResult<bool> {
        Ok(write(&self.users)?.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(read(&self.users)?.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        Ok(read(&self.users)?.values().find(|u| u.email() == email).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let users = read(&self.users)?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = read(&self.users)?;
        Ok(newest_first(users.values().cloned(), |u| u.joined_at()))
    }

    async fn count(&self, status: Option<UserStatus>) -> StoreResult<u64> {
        let users = read(&self.users)?;
        Ok(users.values().filter(|u| status.map_or(true, |s| u.status() == s)).count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryWorkspaceRepository {
    workspaces: RwLock<HashMap<WorkspaceId, Workspace>>,
}

impl InMemoryWorkspaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn save(&self, workspace: &Workspace) -> StoreResult<()> {
        write(&self.workspaces)?.insert(workspace.id, workspace.clone());
        Ok(())
    }

    async fn update_details(&self, id: &WorkspaceId, details: &WorkspaceDetails) -> StoreResult<Option<Workspace>> {
        let mut workspaces = write(&self.workspaces)?;
        let Some(workspace) = workspaces.get_mut(id) else {
            return Ok(None);
        };
        workspace
            .apply_details(details.clone())
            .map_err(StoreError::Backend)?;
        Ok(Some(workspace.clone()))
    }

    async fn delete(&self, id: &WorkspaceId) -> StoreResult<bool> {
        Ok(write(&self.workspaces)?.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &WorkspaceId) -> StoreResult<Option<Workspace>> {
        Ok(read(&self.workspaces)?.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Workspace>> {
        let workspaces = read(&self.workspaces)?;
        Ok(newest_first(workspaces.values().cloned(), |w| w.created_at))
    }

    async fn list_by_location(&self, location: &str) -> StoreResult<Vec<Workspace>> {
        let workspaces = read(&self.workspaces)?;
        Ok(newest_first(
            workspaces.values().filter(|w| w.location == location).cloned(),
            |w| w.created_at,
        ))
    }

    async fn find_by_occupant(&self, occupant: &UserId, now: DateTime<Utc>) -> StoreResult<Option<Workspace>> {
        let workspaces = read(&self.workspaces)?;
        Ok(workspaces
            .values()
            .find(|w| w.active_occupant(now) == Some(occupant))
            .cloned())
    }

    async fn try_allot(&self, id: &WorkspaceId, allotment: &Allotment, now: DateTime<Utc>) -> StoreResult<AllotOutcome> {
        let mut workspaces = write(&self.workspaces)?;
        let Some(workspace) = workspaces.get_mut(id) else {
            return Ok(AllotOutcome::Missing);
        };
        if !workspace.can_be_allotted(now) {
            if let Some(current) = &workspace.allotment {
                return Ok(AllotOutcome::Occupied(current.clone()));
            }
        }
        workspace.allotment = Some(allotment.clone());
        workspace.updated_at = Utc::now();
        Ok(AllotOutcome::Allotted(workspace.clone()))
    }

    async fn release(&self, id: &WorkspaceId, expected: Option<&Allotment>) -> StoreResult<bool> {
        let mut workspaces = write(&self.workspaces)?;
        let Some(workspace) = workspaces.get_mut(id) else {
            return Ok(false);
        };
        let holds = match (&workspace.allotment, expected) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(current), Some(expected)) => current == expected,
        };
        if holds {
            workspace.allotment = None;
            workspace.updated_at = Utc::now();
        }
        Ok(holds)
    }

    async fn count_active_allotments(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let workspaces = read(&self.workspaces)?;
        Ok(workspaces.values().filter(|w| w.active_occupant(now).is_some()).count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<BookingId, BookingRequest>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &BookingRequest) -> StoreResult<()> {
        write(&self.bookings)?.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn delete(&self, id: &BookingId) -> StoreResult<bool> {
        Ok(write(&self.bookings)?.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &BookingId) -> StoreResult<Option<BookingRequest>> {
        Ok(read(&self.bookings)?.get(id).cloned())
    }

    async fn find_many(&self, ids: &[BookingId]) -> StoreResult<Vec<BookingRequest>> {
        let bookings = read(&self.bookings)?;
        Ok(ids.iter().filter_map(|id| bookings.get(id).cloned()).collect())
    }

    async fn list(&self, scope: &RecordScope) -> StoreResult<Vec<BookingRequest>> {
        let bookings = read(&self.bookings)?;
        Ok(newest_first(
            bookings.values().filter(|b| scope.admits(&b.email)).cloned(),
            |b| b.created_at,
        ))
    }

    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let mut bookings = write(&self.bookings)?;
        match bookings.get_mut(id) {
            Some(booking) if booking.status == expected => {
                booking.status = next;
                booking.updated_at = at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryInvoiceRepository {
    invoices: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn save(&self, invoice: &Invoice) -> StoreResult<()> {
        let mut invoices = write(&self.invoices)?;
        if invoices
            .values()
            .any(|i| i.invoice_number == invoice.invoice_number && i.id != invoice.id)
        {
            return Err(StoreError::Duplicate("invoice number".to_string()));
        }
        invoices.insert(invoice.id, invoice.clone());
        Ok(())
    }

    async fn find_by_number(&self, number: &InvoiceNumber) -> StoreResult<Option<Invoice>> {
        Ok(read(&self.invoices)?.values().find(|i| &i.invoice_number == number).cloned())
    }

    async fn find_by_booking(&self, booking_id: &BookingId) -> StoreResult<Option<Invoice>> {
        Ok(read(&self.invoices)?.values().find(|i| &i.booking_id == booking_id).cloned())
    }

    async fn list(&self, scope: &RecordScope) -> StoreResult<Vec<Invoice>> {
        let invoices = read(&self.invoices)?;
        Ok(newest_first(
            invoices.values().filter(|i| scope.admits(&i.customer_email)).cloned(),
            |i| i.created_at,
        ))
    }

    async fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> StoreResult<bool> {
        let mut invoices = write(&self.invoices)?;
        match invoices.get_mut(id) {
            Some(invoice) => {
                invoice.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_by_status(&self, status: InvoiceStatus) -> StoreResult<u64> {
        Ok(read(&self.invoices)?.values().filter(|i| i.status == status).count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryInquiryRepository {
    quotes: RwLock<Vec<QuoteRequest>>,
    contacts: RwLock<Vec<ContactRequest>>,
    visits: RwLock<Vec<VisitRequest>>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn save_quote(&self, quote: &QuoteRequest) -> StoreResult<()> {
        write(&self.quotes)?.push(quote.clone());
        Ok(())
    }

    async fn list_quotes(&self) -> StoreResult<Vec<QuoteRequest>> {
        let quotes = read(&self.quotes)?;
        Ok(newest_first(quotes.iter().cloned(), |q| q.created_at))
    }

    async fn count_quotes(&self, status: InquiryStatus) -> StoreResult<u64> {
        Ok(read(&self.quotes)?.iter().filter(|q| q.status == status).count() as u64)
    }

    async fn save_contact(&self, contact: &ContactRequest) -> StoreResult<()> {
        write(&self.contacts)?.push(contact.clone());
        Ok(())
    }

    async fn list_contacts(&self) -> StoreResult<Vec<ContactRequest>> {
        let contacts = read(&self.contacts)?;
        Ok(newest_first(contacts.iter().cloned(), |c| c.created_at))
    }

    async fn save_visit(&self, visit: &VisitRequest) -> StoreResult<()> {
        write(&self.visits)?.push(visit.clone());
        Ok(())
    }

    async fn list_visits(&self) -> StoreResult<Vec<VisitRequest>> {
        let visits = read(&self.visits)?;
        Ok(newest_first(visits.iter().cloned(), |v| v.created_at))
    }
}

#[derive(Default)]
pub struct InMemoryDayPassRepository {
    passes: RwLock<HashMap<PassCode, DayPass>>,
}

impl InMemoryDayPassRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DayPassRepository for InMemoryDayPassRepository {
    async fn save(&self, pass: &DayPass) -> StoreResult<()> {
        let mut passes = write(&self.passes)?;
        if passes.contains_key(&pass.pass_code) {
            return Err(StoreError::Duplicate("pass code".to_string()));
        }
        passes.insert(pass.pass_code.clone(), pass.clone());
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<DayPass>> {
        let passes = read(&self.passes)?;
        Ok(newest_first(passes.values().cloned(), |p| p.created_at))
    }

    async fn find_by_code(&self, code: &PassCode) -> StoreResult<Option<DayPass>> {
        Ok(read(&self.passes)?.get(code).cloned())
    }

    async fn mark_used(&self, code: &PassCode) -> StoreResult<bool> {
        let mut passes = write(&self.passes)?;
        match passes.get_mut(code) {
            Some(pass) if pass.status == DayPassStatus::Pending => {
                pass.status = DayPassStatus::Used;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

pub mod list_bookings;
pub mod list_invoices;
pub mod my_workspace;
pub mod profile;

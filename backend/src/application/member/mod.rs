// Signed-in members: their own bookings, invoices and workspace

pub mod commands;

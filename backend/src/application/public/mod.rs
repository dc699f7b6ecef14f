// Unauthenticated visitors: catalogue browsing, bookings, inquiries, day passes

pub mod commands;

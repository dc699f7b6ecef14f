pub mod update_booking_status;
pub mod manage_workspaces;
pub mod manage_members;
pub mod list_inquiries;
pub mod dashboard_stats;

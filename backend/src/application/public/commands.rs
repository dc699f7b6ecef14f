pub mod submit_booking;
pub mod browse_workspaces;
pub mod submit_inquiry;
pub mod request_day_pass;

// Operator back office: booking review, catalogue, members, inquiries, stats

pub mod commands;

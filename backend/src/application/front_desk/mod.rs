// Reception staff: day pass lookup and redemption

pub mod commands;

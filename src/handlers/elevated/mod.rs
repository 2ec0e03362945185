// handlers/elevated/mod.rs - /admin/* handlers, ADMIN callers only
pub mod users;

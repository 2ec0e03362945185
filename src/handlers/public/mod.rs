// handlers/public/mod.rs - Account entry points, reachable without a session
pub mod auth;

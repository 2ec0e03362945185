// handlers/protected/mod.rs - /api/* handlers
//
// The router rejects requests without an Authorization header before these
// run; each handler still passes the resolved Caller to its action.
pub mod auth;
pub mod exams;
pub mod journal;

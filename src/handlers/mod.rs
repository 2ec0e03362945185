// handlers/mod.rs - Handler tiers
//
// Public (no session needed) -> Protected (/api/*, Authorization header) -> Elevated (/admin/*, ADMIN only)
pub mod dashboard;
pub mod elevated;
pub mod protected;
pub mod public;

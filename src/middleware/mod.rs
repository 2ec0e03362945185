pub mod gate;
pub mod session;

pub use gate::access_gates;
pub use session::resolve_session;

pub mod envelope;

pub use envelope::{ActionResult, Envelope, Success};

//! Application session state

mod session;

pub use session::{Page, Session};

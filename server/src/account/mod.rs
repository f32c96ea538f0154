pub mod profile;
pub mod session;

pub use profile::UserProfileRow;
pub use session::{require_session, Session};

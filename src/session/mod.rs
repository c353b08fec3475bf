mod session;

pub use session::{DEFAULT_FILE_SIZE, EditOutcome, Session};

//! Session directories and CSV writers for the UGPS logger.
//!
//! Each run owns one timestamp-named directory with the antenna dump and
//! one CSV file per position kind. Rows are flushed as they are written;
//! the process may be interrupted at any time.

pub mod error;
pub mod session;
pub mod writer;

pub use error::{PersistenceError, PersistenceResult};
pub use session::{SessionDir, ANTENNA_FILE, SESSION_DIR_FORMAT};
pub use writer::SessionWriter;

//! Release domain: version resolution, output layout, archiving, and the
//! build ledger.

pub mod archive;
pub mod layout;
pub mod ledger;
pub mod version;

pub use archive::archive_release;
pub use layout::{ReleaseLayout, LEDGER_FILENAME, RELEASES_DIRNAME};
pub use ledger::{append_entry, LedgerEntry};
pub use version::next_version;

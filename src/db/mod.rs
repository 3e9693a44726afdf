//! Local persistence (credential file and JSON snapshots).

pub mod credentials;
pub mod snapshots;

pub use credentials::CredentialStore;
pub use snapshots::{SnapshotWriter, WriteOutcome};

/// Collection names as constants.
pub mod collections {
    pub const PERSONS: &str = "persons";
    pub const MEETING_SUMMARIES: &str = "meetingSummaries";
    pub const TRANSCRIPTS: &str = "transcripts";
    pub const MEETINGS: &str = "meetings";

    /// Default export set, in export order.
    pub const ALL: [&str; 4] = [PERSONS, MEETING_SUMMARIES, TRANSCRIPTS, MEETINGS];
}

pub mod issue_guest_token;

pub use issue_guest_token::{IssueGuestTokenError, IssueGuestTokenUseCase};

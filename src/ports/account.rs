//! User account port.

use serde::{Deserialize, Serialize};

use super::ApiFuture;

/// Optional feedback sent along with an account deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    /// Free-form comment.
    pub comment: Option<String>,
    /// Selected feedback reason.
    pub feedback: Option<String>,
}

/// Body of an account deletion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    /// Current password, re-confirmed by the user.
    pub password: String,
    /// Why the user is leaving.
    pub cancellation_details: CancellationDetails,
}

/// Manages user accounts on the server.
pub trait AccountApi: Send + Sync {
    /// Permanently deletes a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the password is rejected or the server cannot be reached.
    fn delete_account(&self, user_id: i64, request: &DeleteAccountRequest) -> ApiFuture<'_, ()>;
}

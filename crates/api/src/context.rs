use ntt_core::AccountId;
use uuid::Uuid;

/// Caller context for a request (the account acting on the dashboard).
///
/// Must be present for the admin routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallerContext {
    account: AccountId,
}

impl CallerContext {
    pub fn new(account: AccountId) -> Self {
        Self { account }
    }

    pub fn account(&self) -> AccountId {
        self.account
    }
}

/// Correlation id of a request, echoed back in `x-request-id`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

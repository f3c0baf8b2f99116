//! `ntt-auth`: role model and the role-check boundary.
//!
//! The token contract is the authority on roles; this crate only names them
//! and defines the seam (`RoleCheck`) through which callers ask the contract.

pub mod authorize;
pub mod roles;

pub use authorize::{require_role, AuthzError, RoleCheck};
pub use roles::{Role, RoleHint};

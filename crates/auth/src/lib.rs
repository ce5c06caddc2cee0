//! `tradeloom-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! signature verification happens at the transport layer, and the buyer
//! approval flag lives with the buyer directory. What remains here is the
//! claims model, deterministic claim validation, and role policy checks.

pub mod authorize;
pub mod claims;
pub mod principal;
pub mod roles;

pub use authorize::{require_admin, require_owner_or_admin, AuthzError};
pub use claims::{validate_claims, AccessClaims, TokenValidationError};
pub use principal::{Principal, PrincipalId};
pub use roles::Role;

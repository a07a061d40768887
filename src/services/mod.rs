//! Business logic services

pub mod backend;
pub mod membership;
pub mod remote;
pub mod saga;
pub mod signup;

pub use backend::BackendClient;
pub use membership::{MembershipError, MembershipService};
pub use remote::{
    Credentials, FailureKind, IdentityProvider, RemoteFailure, RemoteResult, RowStore,
};
pub use saga::{Compensation, DeleteRow, DeleteUser, Saga, UnwindReport};
pub use signup::{SignupError, SignupOutcome, SignupService, RATE_LIMITED_MESSAGE};

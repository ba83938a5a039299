//! Token acquisition: signing, attempt planning and probing.

pub mod acquirer;
pub mod plan;
pub mod signature;

pub use acquirer::{SignedAttempt, TokenAcquirer, TokenAcquisition};
pub use plan::AttemptPlan;
pub use signature::{SignatureGenerator, signature_password};

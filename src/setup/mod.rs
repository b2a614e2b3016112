//! Setup-batch validation.
//!
//! One player submits their full formation as a single batch; the
//! validator accepts or rejects it atomically. Quotas are configuration
//! ([`SetupLimits`]), not hard-coded counts.

pub mod validator;

pub use validator::{SetupError, SetupLimits, SetupValidator};

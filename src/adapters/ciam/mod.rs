//! Opt-out registrar adapters.
//!
//! Implementations of the `OptOutRegistrar` port:
//! - `HttpOptOutRegistrar` - the consent (CIAM) service over HTTPS
//! - `LoggingOptOutRegistrar` - development fallback when no service is configured
//! - `MockOptOutRegistrar` - call recording and error injection for tests

mod http_registrar;
mod logging_registrar;
mod mock_registrar;

pub use http_registrar::{CiamClientConfig, HttpOptOutRegistrar, DEFAULT_OPT_OUT_PATH};
pub use logging_registrar::LoggingOptOutRegistrar;
pub use mock_registrar::MockOptOutRegistrar;

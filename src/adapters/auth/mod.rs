//! Authentication adapters.
//!
//! - `jwt` - HS256 access/refresh tokens (production)
//! - `mock` - Token map for tests that don't need signed tokens

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtTokenService};
pub use mock::MockSessionValidator;

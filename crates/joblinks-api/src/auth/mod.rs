//! Authentication: bearer tokens, password hashing, and the request extractor.

pub mod extractor;
pub mod password;
pub mod token;

pub use extractor::AuthUser;
pub use password::{PasswordError, PasswordHasher, Verification};
pub use token::{Claims, IssuedToken, TokenError, TokenService};

//! Authentication adapters.
//!
//! - `JwtSessionManager` - Issues and validates HS256 session tokens
//! - `BcryptPasswordHasher` - Salted password hashing

mod bcrypt_hasher;
mod jwt;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt::JwtSessionManager;

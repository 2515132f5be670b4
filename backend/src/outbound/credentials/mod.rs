//! Credential adapters: Argon2id password hashing and HS256 bearer tokens.

mod argon2_password_hasher;
mod fingerprint;
mod jwt_token_issuer;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use fingerprint::key_fingerprint;
pub use jwt_token_issuer::JwtTokenIssuer;

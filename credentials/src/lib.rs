//! Credential handling library
//!
//! Provides reusable credential infrastructure for services:
//! - One-way hashing of secrets (Argon2id), used for both stored passwords
//!   and one-time verification tokens
//! - One-time verification token generation
//!
//! Each service defines its own ports and adapts these implementations.
//! This avoids coupling services through shared domain logic while reducing
//! code duplication.
//!
//! # Examples
//!
//! ## Secret Hashing
//! ```
//! use credentials::SecretHasher;
//!
//! let hasher = SecretHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## One-Time Tokens
//! ```
//! use credentials::VerificationToken;
//!
//! let token = VerificationToken::generate("4f8a4ae8-2ff1-4b90-9c6e-000000000000");
//! assert!(token.as_str().ends_with("4f8a4ae8-2ff1-4b90-9c6e-000000000000"));
//! ```

pub mod hashing;
pub mod token;

// Re-export commonly used items
pub use hashing::HashingError;
pub use hashing::SecretHasher;
pub use token::VerificationToken;

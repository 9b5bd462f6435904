pub mod account;
pub mod verification;

pub use account::PostgresAccountRepository;
pub use verification::PostgresVerificationRepository;

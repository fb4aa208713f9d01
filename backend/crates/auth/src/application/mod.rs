//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod change_login;
pub mod config;
pub mod profile;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use authorize::RequestAuthorizer;
pub use change_login::ChangeLoginUseCase;
pub use config::AuthConfig;
pub use profile::GetProfileUseCase;
pub use sign_in::{SessionAuthenticator, SignInInput, SignInOutput};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};

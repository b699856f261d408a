//! Authentication domain types

mod credentials;
mod session;
mod token;

pub use credentials::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterForm, ResetPasswordRequest,
};
pub use session::{Session, SessionState, UserIdentity};
pub use token::{BearerToken, TokenClaims};

//! Guest House Domain - Core business types
//!
//! This crate defines the domain model of the guest-house booking client:
//! roles and sessions, bearer tokens, route permissions and the resources
//! served by the booking API. All types here are pure Rust with no I/O.

pub mod auth;
pub mod error;
pub mod resources;
pub mod role;
pub mod route;

pub use auth::{
    AuthResponse, BearerToken, ForgotPasswordRequest, LoginRequest, RegisterForm,
    ResetPasswordRequest, Session, SessionState, TokenClaims, UserIdentity,
};
pub use error::{DomainError, DomainResult};
pub use resources::{
    Bed, Booking, BookingFilters, BookingForm, BookingStatus, DashboardStats, GuestHouse, Room,
    User,
};
pub use role::Role;
pub use route::{
    LOGIN_PATH, RETURN_TO_PARAM, RouteAccess, RoutePattern, RoutePermission, RouteTable,
    UNAUTHORIZED_PATH,
};

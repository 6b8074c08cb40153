//! Authentication: credentials, bearer tokens, and session management.

mod credentials;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use session::{AnonymousSession, Session, SessionProvider};
pub use tokens::{AccessToken, RefreshToken};

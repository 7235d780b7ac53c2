//! Credentials, tokens, and the authorization state they drive.

pub mod credentials;
pub mod secret;
pub mod state;
pub mod token;

pub use credentials::*;
pub use secret::*;
pub use state::*;
pub use token::*;

pub mod user;

pub use user::{AuthProvider, UserProfile};

//! Request middleware

pub mod access;

pub use access::{access_middleware, access_token, verify_access_token, ACCESS_COOKIE};

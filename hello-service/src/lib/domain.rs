pub mod access;
pub mod authentication;

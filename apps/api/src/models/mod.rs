pub mod artifact;
pub mod session;

pub mod admin;
pub mod chirp;
pub mod session;
pub mod user;

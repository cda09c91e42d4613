pub mod message;
pub mod user;
pub mod validation;
pub mod verification;

//! User domain - identity records provisioned on first sign-in

mod entity;
mod repository;

pub use entity::{SignInIdentity, User};
pub use repository::UserRepository;

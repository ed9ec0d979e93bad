//! Auth domain actions - business logic functions

mod login;

pub use login::{login, LoginResult};

// Business domains
pub mod admin;
pub mod adoptions;
pub mod auth;
pub mod children;
pub mod documents;
pub mod parents;
pub mod staff;
pub mod visits;

mod credentials;

pub use credentials::StoredCredentials;

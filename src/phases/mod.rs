pub mod capacity;
pub mod classify;
pub mod combine;
pub mod fingerprint;
pub mod store;

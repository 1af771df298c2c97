//! Outbound adapters implementing the domain ports against real
//! collaborators.

pub mod upstream;

pub use upstream::UpstreamClient;

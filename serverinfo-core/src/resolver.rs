//! Endpoint resolution
//!
//! The address is opaque to the core: it is handed to the fetcher verbatim,
//! without validation, and re-read on every tick.

/// Supplies the metrics endpoint URL
pub trait EndpointResolver: Send + Sync + 'static {
    fn api_address(&self) -> String;
}

/// Resolver that always returns the same address
#[derive(Debug, Clone, Default)]
pub struct FixedAddress(pub String);

impl EndpointResolver for FixedAddress {
    fn api_address(&self) -> String {
        self.0.clone()
    }
}

//! Destination resolution with a per-configuration cache.

use contracts::{Destination, PublishError, Transport};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Resolves a destination to its canonical address exactly once.
///
/// Canonical values pass through without touching the transport. A short
/// name is resolved through the transport on first use and cached for the
/// lifetime of the publisher configuration; re-configuring the publisher
/// installs a fresh resolver.
#[derive(Debug, Default)]
pub struct DestinationResolver {
    address: OnceCell<String>,
}

impl DestinationResolver {
    /// Resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical address for the destination, resolving it if necessary.
    ///
    /// Concurrent callers share one resolution; nobody resolves twice.
    ///
    /// # Errors
    ///
    /// Resolution failures are configuration-class: the destination setup is
    /// unusable, which is not a transient send problem.
    pub async fn resolve<T: Transport>(
        &self,
        transport: &T,
        destination: &Destination,
    ) -> Result<&str, PublishError> {
        self.address
            .get_or_try_init(|| async {
                if transport.is_canonical(&destination.value) {
                    debug!(destination = %destination, "destination is already canonical");
                    return Ok(destination.value.clone());
                }

                let address = transport.resolve(destination).await.map_err(|error| {
                    PublishError::configuration_with(
                        format!("cannot resolve destination '{destination}'"),
                        error,
                    )
                })?;

                info!(destination = %destination, address = %address, "destination resolved");
                Ok(address)
            })
            .await
            .map(String::as_str)
    }

    /// Cached address, if resolution already happened.
    pub fn cached(&self) -> Option<&str> {
        self.address.get().map(String::as_str)
    }
}

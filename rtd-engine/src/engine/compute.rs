//! Concurrent fetch of both directions, detached from the engine borrow.

use std::sync::Arc;

use futures_util::future::join;
use rtd_core::{
    DirectionsError, DirectionsProvider, DirectionsRequest, EndpointPair, ProviderPathResult,
    TripRoute,
};

/// Monotonic tag identifying a route computation.
///
/// Only the most recently issued token may commit its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Token held before any computation is issued.
    pub const INITIAL: Self = Self(0);

    pub(crate) const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Sequence number of the token.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Result of a route computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeOutcome {
    /// Both directions were committed; carries the new snapshot.
    Applied(TripRoute),
    /// An endpoint was the zero default; nothing was requested.
    Skipped,
    /// A newer computation was issued before this one resolved; its results
    /// were discarded.
    Superseded,
}

/// A computation that has been issued but not yet fetched.
///
/// Holds its own handle to the provider so the fetch can run while the
/// engine keeps serving selection and drag events.
#[must_use = "a pending computation does nothing until resolved and applied"]
pub struct PendingComputation<P> {
    pub(crate) token: RequestToken,
    pub(crate) endpoints: EndpointPair,
    pub(crate) provider: Arc<P>,
}

impl<P> std::fmt::Debug for PendingComputation<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingComputation")
            .field("token", &self.token)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl<P: DirectionsProvider> PendingComputation<P> {
    /// Token the computation was issued with.
    #[must_use]
    pub const fn token(&self) -> RequestToken {
        self.token
    }

    /// Request outbound and return alternatives concurrently.
    pub async fn resolve(self) -> ResolvedComputation {
        let (source, destination) = (self.endpoints.source, self.endpoints.destination);
        let outbound_request = DirectionsRequest::driving_alternatives(source, destination);
        let return_request = DirectionsRequest::driving_alternatives(destination, source);
        let (outbound, return_trip) = join(
            self.provider.route(&outbound_request),
            self.provider.route(&return_request),
        )
        .await;
        ResolvedComputation {
            token: self.token,
            endpoints: self.endpoints,
            outbound,
            return_trip,
        }
    }
}

/// Provider answers for both directions, ready to be applied.
#[derive(Debug, Clone)]
#[must_use = "a resolved computation changes nothing until applied"]
pub struct ResolvedComputation {
    pub(crate) token: RequestToken,
    pub(crate) endpoints: EndpointPair,
    pub(crate) outbound: Result<ProviderPathResult, DirectionsError>,
    pub(crate) return_trip: Result<ProviderPathResult, DirectionsError>,
}

impl ResolvedComputation {
    /// Token the computation was issued with.
    #[must_use]
    pub const fn token(&self) -> RequestToken {
        self.token
    }
}

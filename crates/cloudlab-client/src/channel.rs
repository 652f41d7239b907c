use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: tonic::transport::Error,
    },
}

/// Reusable channel to one remote endpoint, shared read-only by all invokers
/// for the lifetime of a dispatcher run.
///
/// `open` is lazy: no round trip happens until the first call. `close` drains
/// in-flight calls up to a bound and releases the transport regardless.
pub struct RemoteChannel {
    channel: Channel,
    tracker: CallTracker,
}

impl RemoteChannel {
    pub fn open(address: &str) -> Result<Self, ChannelError> {
        let endpoint =
            Endpoint::from_shared(normalize_endpoint(address)).map_err(|source| {
                ChannelError::InvalidEndpoint {
                    endpoint: address.to_string(),
                    source,
                }
            })?;

        Ok(Self {
            channel: endpoint.connect_lazy(),
            tracker: CallTracker::default(),
        })
    }

    pub fn grpc(&self) -> Channel {
        self.channel.clone()
    }

    pub fn tracker(&self) -> CallTracker {
        self.tracker.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.in_flight()
    }

    /// Graceful shutdown: wait up to `timeout` for outstanding calls to
    /// drain, then release the transport either way. Overrunning the bound is
    /// logged, never escalated.
    pub async fn close(self, timeout: Duration) {
        let deadline = Instant::now() + timeout;

        while self.tracker.in_flight() > 0 {
            if Instant::now() >= deadline {
                warn!(
                    outstanding = self.tracker.in_flight(),
                    "Channel close timed out before in-flight calls drained"
                );
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }

        debug!("Channel closed cleanly");
    }
}

/// Shared in-flight call counter; invokers hold a clone and take a guard
/// around each remote call.
#[derive(Clone, Default)]
pub struct CallTracker {
    in_flight: Arc<AtomicUsize>,
}

impl CallTracker {
    pub fn guard(&self) -> CallGuard {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        CallGuard {
            in_flight: self.in_flight.clone(),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

pub struct CallGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

fn normalize_endpoint(address: &str) -> String {
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

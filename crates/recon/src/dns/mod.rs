mod resolver;

#[cfg(test)]
pub mod mock;

pub use resolver::{DnsResolver, ResolverConfig};

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;

pub type DnsResult<T> = core::result::Result<T, DnsError>;

/// Resolver shared by every lookup of a command run.
pub type SharedResolver = Arc<dyn Resolve>;

// region:        --- Models

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mailserver {
    pub host: String,
    pub priority: u16,
}

/// Failure of a single DNS lookup.
///
/// `NotFound` is the resolver telling us the record does not exist (NXDOMAIN
/// or an empty answer). The other variants mean we don't know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    NotFound(String),
    Timeout,
    Failed(String),
}

impl DnsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DnsError::NotFound(_))
    }
}

impl From<ResolveError> for DnsError {
    fn from(err: ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. }
                if matches!(response_code, ResponseCode::NXDomain | ResponseCode::NoError) =>
            {
                DnsError::NotFound(err.to_string())
            }
            ResolveErrorKind::Timeout => DnsError::Timeout,
            _ => DnsError::Failed(err.to_string()),
        }
    }
}

// endregion:     --- Models

/// Lookups needed by the host aggregator and the subdomain brute-forcer.
///
/// Implementations must be usable concurrently from many lookups at once.
/// Dropping a returned future abandons the lookup.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn lookup_addresses(&self, name: &str) -> DnsResult<Vec<IpAddr>>;

    async fn lookup_hostnames(&self, ip: IpAddr) -> DnsResult<Vec<String>>;

    async fn lookup_nameservers(&self, name: &str) -> DnsResult<Vec<String>>;

    async fn lookup_mailservers(&self, name: &str) -> DnsResult<Vec<Mailserver>>;
}

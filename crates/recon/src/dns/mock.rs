//! Scripted resolver for tests. Anything not scripted answers `NotFound`.

use super::{DnsError, DnsResult, Mailserver, Resolve};
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct MockResolver {
    addresses: HashMap<String, DnsResult<Vec<IpAddr>>>,
    hostnames: HashMap<IpAddr, DnsResult<Vec<String>>>,
    nameservers: HashMap<String, DnsResult<Vec<String>>>,
    mailservers: HashMap<String, DnsResult<Vec<Mailserver>>>,
    latency_ms: Option<(u64, u64)>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_addresses(mut self, name: &str, result: DnsResult<Vec<IpAddr>>) -> Self {
        self.addresses.insert(name.to_string(), result);
        self
    }

    pub fn with_hostnames(mut self, ip: IpAddr, result: DnsResult<Vec<String>>) -> Self {
        self.hostnames.insert(ip, result);
        self
    }

    pub fn with_nameservers(mut self, name: &str, result: DnsResult<Vec<String>>) -> Self {
        self.nameservers.insert(name.to_string(), result);
        self
    }

    pub fn with_mailservers(mut self, name: &str, result: DnsResult<Vec<Mailserver>>) -> Self {
        self.mailservers.insert(name.to_string(), result);
        self
    }

    /// Every lookup sleeps a random duration in `min..=max`.
    pub fn with_latency(mut self, min: Duration, max: Duration) -> Self {
        self.latency_ms = Some((min.as_millis() as u64, max.as_millis() as u64));
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer<T: Clone>(
        &self,
        scripted: Option<&DnsResult<T>>,
        query: String,
    ) -> DnsResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some((min, max)) = self.latency_ms {
            let millis = rand::thread_rng().gen_range(min..=max);
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        scripted
            .cloned()
            .unwrap_or_else(|| Err(DnsError::NotFound(query)))
    }
}

#[async_trait]
impl Resolve for MockResolver {
    async fn lookup_addresses(&self, name: &str) -> DnsResult<Vec<IpAddr>> {
        self.answer(self.addresses.get(name), name.to_string()).await
    }

    async fn lookup_hostnames(&self, ip: IpAddr) -> DnsResult<Vec<String>> {
        self.answer(self.hostnames.get(&ip), ip.to_string()).await
    }

    async fn lookup_nameservers(&self, name: &str) -> DnsResult<Vec<String>> {
        self.answer(self.nameservers.get(name), name.to_string()).await
    }

    async fn lookup_mailservers(&self, name: &str) -> DnsResult<Vec<Mailserver>> {
        self.answer(self.mailservers.get(name), name.to_string()).await
    }
}

pub mod wordlist;

pub use wordlist::Wordlist;

use crate::dns::Resolve;
use futures::{stream, StreamExt};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, instrument, trace, warn};

// region:        --- Constants

pub const RESOLVE_DNS_CONCURRENCY: usize = 100;

// endregion:     --- Constants

// region:        --- Models

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BruteForceConfig {
    /// Maximum number of lookups in flight, 0 behaves as 1.
    pub concurrency: usize,
    /// Aggregate deadline for the whole run. Lookups still in flight when it
    /// elapses are dropped.
    pub deadline: Option<Duration>,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            concurrency: RESOLVE_DNS_CONCURRENCY,
            deadline: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BruteForceReport {
    pub domain: String,
    pub candidates: usize,
    /// Candidates that resolved, in completion order.
    pub subdomains: Vec<String>,
    /// Candidates whose lookup failed for another reason than "not found".
    pub failed: Vec<String>,
    pub truncated: bool,
}

#[derive(Debug, Default)]
struct Found {
    live: Vec<String>,
    failed: Vec<String>,
}

/// Results shared by the concurrent lookups of one run.
#[derive(Debug, Default)]
pub struct BruteForceResult {
    found: Mutex<Found>,
}

impl BruteForceResult {
    pub async fn record_live(&self, candidate: String) {
        self.found.lock().await.live.push(candidate);
    }

    pub async fn record_failed(&self, candidate: String) {
        self.found.lock().await.failed.push(candidate);
    }

    pub fn into_report(self, domain: &str, candidates: usize, truncated: bool) -> BruteForceReport {
        let found = self.found.into_inner();
        BruteForceReport {
            domain: domain.to_string(),
            candidates,
            subdomains: found.live,
            failed: found.failed,
            truncated,
        }
    }
}

// endregion:     --- Models

/// Tests `label.domain` for every label of the wordlist and returns the ones
/// that resolve. Per-candidate failures never fail the run.
#[instrument(name = "subdomains", level = "info", skip(resolver, wordlist), fields(candidates = wordlist.len()))]
pub async fn brute_force(
    resolver: &dyn Resolve,
    domain: &str,
    wordlist: &Wordlist,
    config: &BruteForceConfig,
) -> BruteForceReport {
    let result = BruteForceResult::default();
    if wordlist.is_empty() {
        info!("empty wordlist, nothing to resolve");
        return result.into_report(domain, 0, false);
    }

    let concurrency = config.concurrency.max(1);
    info!("{} candidates to resolve", wordlist.len());

    let run = stream::iter(wordlist.candidates(domain)).for_each_concurrent(
        concurrency,
        |candidate| {
            let result = &result;
            async move { check_candidate(resolver, candidate, result).await }
        },
    );

    let truncated = match config.deadline {
        Some(deadline) => timeout(deadline, run).await.is_err(),
        None => {
            run.await;
            false
        }
    };

    let report = result.into_report(domain, wordlist.len(), truncated);
    if report.truncated {
        warn!("deadline reached, result is partial");
    }
    if !report.failed.is_empty() {
        warn!("{} candidates could not be resolved", report.failed.len());
    }
    info!("{} subdomains resolved", report.subdomains.len());

    report
}

async fn check_candidate(resolver: &dyn Resolve, candidate: String, result: &BruteForceResult) {
    match resolver.lookup_addresses(&candidate).await {
        Ok(addresses) => {
            debug!("{:12} - {} {:?}", "RESOLVED", candidate, addresses);
            result.record_live(candidate).await;
        }
        Err(err) if err.is_not_found() => trace!("{:12} - {}", "NOT RESOLVED", candidate),
        Err(err) => {
            warn!("{:12} - {} {:?}", "LOOKUP FAILED", candidate, err);
            result.record_failed(candidate).await;
        }
    }
}

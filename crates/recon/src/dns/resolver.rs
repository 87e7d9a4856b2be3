use super::{DnsResult, Mailserver, Resolve};
use crate::{Error, Result};
use async_trait::async_trait;
use hickory_resolver::config::{
    NameServerConfig, Protocol, ResolverConfig as HickoryConfig, ResolverOpts,
};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, info};

// the override resolver is always dialed on udp/53
const OVERRIDE_DNS_PORT: u16 = 53;

// region:        --- Config

/// Where and how long to resolve. Built once per command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    nameserver: Option<IpAddr>,
    timeout: Duration,
}

impl ResolverConfig {
    /// Validates the resolver override. It has to be an IP literal since the
    /// resolver dials it directly, resolving a hostname there would need a
    /// resolver in the first place.
    pub fn new(override_address: Option<&str>, timeout: Duration) -> Result<Self> {
        let nameserver = match override_address.map(str::trim) {
            None | Some("") => None,
            Some(address) => Some(
                address
                    .parse::<IpAddr>()
                    .map_err(|_| Error::InvalidResolver(address.to_string()))?,
            ),
        };

        Ok(Self {
            nameserver,
            timeout,
        })
    }

    pub fn nameserver(&self) -> Option<IpAddr> {
        self.nameserver
    }

    /// A single attempt per nameserver, so `timeout` is what one lookup
    /// waits on a silent server.
    fn apply(&self, mut opts: ResolverOpts) -> ResolverOpts {
        opts.timeout = self.timeout;
        opts.attempts = 1;
        opts
    }
}

// endregion:     --- Config

// region:        --- Hickory resolver

#[derive(Debug)]
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let (hickory_config, opts) = match config.nameserver() {
            Some(ip) => {
                info!("{:12} - {}", "RESOLVER", ip);
                let mut hickory_config = HickoryConfig::new();
                hickory_config.add_name_server(NameServerConfig::new(
                    SocketAddr::new(ip, OVERRIDE_DNS_PORT),
                    Protocol::Udp,
                ));
                (hickory_config, ResolverOpts::default())
            }
            None => read_system_conf()?,
        };
        let opts = config.apply(opts);
        debug!("DNS resolver options: {:?}", opts);

        let inner = TokioAsyncResolver::tokio(hickory_config, opts);
        debug!("DNS resolver created: {:?}", inner);

        Ok(Self { inner })
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn lookup_addresses(&self, name: &str) -> DnsResult<Vec<IpAddr>> {
        let lookup = self.inner.lookup_ip(name).await?;
        Ok(lookup.iter().collect())
    }

    async fn lookup_hostnames(&self, ip: IpAddr) -> DnsResult<Vec<String>> {
        let lookup = self.inner.reverse_lookup(ip).await?;
        Ok(lookup.iter().map(|name| name.to_string()).collect())
    }

    async fn lookup_nameservers(&self, name: &str) -> DnsResult<Vec<String>> {
        let lookup = self.inner.ns_lookup(name).await?;
        Ok(lookup.iter().map(|ns| ns.to_string()).collect())
    }

    async fn lookup_mailservers(&self, name: &str) -> DnsResult<Vec<Mailserver>> {
        let lookup = self.inner.mx_lookup(name).await?;
        Ok(lookup
            .iter()
            .map(|mx| Mailserver {
                host: mx.exchange().to_string(),
                priority: mx.preference(),
            })
            .collect())
    }
}

// endregion:     --- Hickory resolver

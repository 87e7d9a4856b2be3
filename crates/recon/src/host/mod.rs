mod classify;

pub use classify::{classify, HostType};

use crate::dns::{DnsError, Mailserver, Resolve};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;
use tracing::{debug, info, instrument};

// region:        --- Models

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Ns,
    Mx,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
    pub addresses: BTreeSet<IpAddr>,
    pub hostnames: Vec<String>,
    pub nameservers: Vec<String>,
    pub mailservers: Vec<Mailserver>,
}

impl fmt::Display for HostInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addresses: Vec<String> = self.addresses.iter().map(IpAddr::to_string).collect();
        let mailservers: Vec<&str> = self.mailservers.iter().map(|mx| mx.host.as_str()).collect();

        writeln!(f, "IPs: {}", addresses.join(" "))?;
        writeln!(f, "Hostnames: {}", self.hostnames.join(" "))?;
        writeln!(f, "Nameservers: {}", self.nameservers.join(" "))?;
        write!(f, "Mailservers: {}", mailservers.join(" "))
    }
}

// endregion:     --- Models

/// Resolves `host` (IP or hostname) and collects the NS and MX records of
/// every hostname found.
#[instrument(name = "host", level = "info", skip(resolver))]
pub async fn gather(resolver: &dyn Resolve, host: &str) -> Result<HostInfo> {
    let mut info = HostInfo::default();

    match classify(host)? {
        HostType::IpAddress(ip) => {
            debug!("{:12} - {}", "IP ADDRESS", ip);
            info.addresses.insert(ip);
            info.hostnames = resolver
                .lookup_hostnames(ip)
                .await
                .map_err(|source| lookup_error(host, source))?;
        }
        HostType::Hostname => {
            debug!("{:12} - {}", "HOSTNAME", host);
            info.hostnames.push(host.to_string());
            info.addresses = resolver
                .lookup_addresses(host)
                .await
                .map_err(|source| lookup_error(host, source))?
                .into_iter()
                .collect();
        }
    }
    info!(
        "{} addresses, {} hostnames",
        info.addresses.len(),
        info.hostnames.len()
    );

    for hostname in &info.hostnames {
        let nameservers = resolver.lookup_nameservers(hostname).await;
        if let Some(nameservers) = skip_not_found(hostname, Record::Ns, nameservers)? {
            info.nameservers.extend(nameservers);
        }
    }

    for hostname in &info.hostnames {
        let mailservers = resolver.lookup_mailservers(hostname).await;
        if let Some(mailservers) = skip_not_found(hostname, Record::Mx, mailservers)? {
            info.mailservers.extend(mailservers);
        }
    }

    info!(
        "{} nameservers, {} mailservers",
        info.nameservers.len(),
        info.mailservers.len()
    );
    Ok(info)
}

fn lookup_error(host: &str, source: DnsError) -> Error {
    Error::Lookup {
        host: host.to_string(),
        source,
    }
}

/// A missing record type is not an error, the host may simply not have any.
fn skip_not_found<T>(
    hostname: &str,
    record: Record,
    result: core::result::Result<Vec<T>, DnsError>,
) -> Result<Option<Vec<T>>> {
    match result {
        Ok(records) => Ok(Some(records)),
        Err(err) if err.is_not_found() => {
            debug!("{:12} - {:?} {}", "NO RECORD", record, hostname);
            Ok(None)
        }
        Err(source) => Err(Error::RecordLookup {
            hostname: hostname.to_string(),
            record,
            source,
        }),
    }
}

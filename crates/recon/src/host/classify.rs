use crate::{Error, Result};
use lazy_regex::regex_is_match;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostType {
    IpAddress(IpAddr),
    Hostname,
}

/// Tells an IP literal from a hostname. Syntax only, nothing is resolved.
pub fn classify(host: &str) -> Result<HostType> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(HostType::IpAddress(ip));
    }

    // labels of 1 to 63 alphanumerics, hyphens only inside a label
    if regex_is_match!(
        r"^(?i)[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$",
        host
    ) {
        return Ok(HostType::Hostname);
    }

    Err(Error::UnclassifiableHost(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{classify, HostType};
    use crate::Error;
    use std::net::IpAddr;

    #[test]
    fn ip_literals() {
        let hosts = ["127.0.0.1", "8.8.8.8", "::1", "2001:db8::ff00:42:8329", "::ffff:10.0.0.1"];
        for host in hosts {
            let expected = host.parse::<IpAddr>().unwrap();
            assert!(
                matches!(classify(host), Ok(HostType::IpAddress(ip)) if ip == expected),
                "{host} should be an IP address"
            );
        }
    }

    #[test]
    fn hostnames() {
        let hosts = [
            "www.google.com",
            "a.b-c.io",
            "localhost",
            "WWW.Example.COM",
            "xn--80ak6aa92e.com",
        ];
        for host in hosts {
            assert_eq!(HostType::Hostname, classify(host).unwrap(), "{host}");
        }

        let longest_label = "a".repeat(63);
        assert_eq!(
            HostType::Hostname,
            classify(&format!("{longest_label}.com")).unwrap()
        );
    }

    #[test]
    fn unclassifiable() {
        let too_long = format!("{}.com", "a".repeat(64));
        for host in [
            "-bad-.com",
            "exa mple.com",
            "bad-.com",
            "a..b.com",
            ".example.com",
            "example.com.",
            "under_score.com",
            "",
            too_long.as_str(),
        ] {
            assert!(
                matches!(classify(host), Err(Error::UnclassifiableHost(input)) if input == host),
                "{host:?} should not be classified"
            );
        }
    }
}

use crate::dns::DnsError;
use crate::host::Record;
use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    // -- Resolver
    InvalidResolver(String),

    #[from]
    ResolverSetup(hickory_resolver::error::ResolveError),

    // -- Host
    UnclassifiableHost(String),
    Lookup {
        host: String,
        source: DnsError,
    },
    RecordLookup {
        hostname: String,
        record: Record,
        source: DnsError,
    },

    // -- CLI
    CliUsage(String),

    #[from]
    SystemTime(std::time::SystemTimeError),

    #[from]
    File(std::io::Error),

    #[from]
    Json(serde_json::Error),

    #[from]
    Fmt(std::fmt::Error),

    #[from]
    Subscriber(tracing::subscriber::SetGlobalDefaultError),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate

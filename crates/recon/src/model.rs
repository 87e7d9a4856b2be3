use crate::host::HostInfo;
use crate::subdomains::BruteForceReport;
use crate::{Error, Result};
use serde_json::to_string_pretty;
use std::fmt::Write as FmtWrite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_arg(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::CliUsage(format!("unknown output format: {other}"))),
        }
    }
}

// region:        --- Rendering

pub fn render_host_info(host: &str, info: &HostInfo, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(to_string_pretty(info)?),
        OutputFormat::Text => Ok(format!("found host info for {}:\n{}", host, info)),
    }
}

pub fn render_subdomains(report: &BruteForceReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(to_string_pretty(report)?);
    }

    let mut content = String::new();
    writeln!(&mut content, "found subdomains for {}:", report.domain)?;
    for subdomain in &report.subdomains {
        writeln!(&mut content, "{}", subdomain)?;
    }

    if !report.failed.is_empty() {
        writeln!(&mut content)?;
        writeln!(
            &mut content,
            "could not resolve {} candidates (not counted as subdomains):",
            report.failed.len()
        )?;
        for candidate in &report.failed {
            writeln!(&mut content, "{}", candidate)?;
        }
    }

    if report.truncated {
        writeln!(&mut content)?;
        writeln!(&mut content, "deadline reached, result is partial")?;
    }

    Ok(content.trim_end().to_string())
}

// endregion:     --- Rendering

use crate::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const DEFAULT_WORDLIST: &str = include_str!("../../assets/subdomain_wordlist.txt");

/// Candidate subdomain labels, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wordlist {
    labels: Vec<String>,
}

impl Wordlist {
    /// Trims every line, skips blank ones and keeps the first occurrence of a
    /// label only.
    pub fn parse(text: &str) -> Self {
        let mut seen = HashSet::new();
        let labels = text
            .lines()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .filter(|label| seen.insert(*label))
            .map(str::to_string)
            .collect();

        Self { labels }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let wordlist = Self::parse(&fs::read_to_string(path)?);
        debug!("{:12} - {} labels from {:?}", "WORDLIST", wordlist.len(), path);
        Ok(wordlist)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn candidates<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = String> + 'a {
        let domain = domain.trim_end_matches('.');
        self.iter().map(move |label| format!("{}.{}", label, domain))
    }
}

impl Default for Wordlist {
    fn default() -> Self {
        Self::parse(DEFAULT_WORDLIST)
    }
}

#[cfg(test)]
mod tests {
    use super::Wordlist;
    use std::io::Write;

    #[test]
    fn parse_trims_and_dedups() {
        let wordlist = Wordlist::parse("www\r\nmail\n\n  api  \nwww\n");

        assert_eq!(vec!["www", "mail", "api"], wordlist.iter().collect::<Vec<_>>());
    }

    #[test]
    fn candidates_append_domain() {
        let wordlist = Wordlist::parse("www\nmail");

        assert_eq!(
            vec!["www.example.com", "mail.example.com"],
            wordlist.candidates("example.com.").collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_text_is_empty_wordlist() {
        assert!(Wordlist::parse("").is_empty());
        assert!(Wordlist::parse("\n\n \n").is_empty());
    }

    #[test]
    fn default_wordlist_is_embedded() {
        let wordlist = Wordlist::default();

        assert!(!wordlist.is_empty());
        assert!(wordlist.iter().any(|label| label == "www"));
    }

    #[test]
    fn from_file_reads_labels() {
        let path = std::env::temp_dir().join(format!("recon-wordlist-{}.txt", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dev\nstaging").unwrap();

        let wordlist = Wordlist::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(vec!["dev", "staging"], wordlist.iter().collect::<Vec<_>>());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("recon-wordlist-does-not-exist.txt");

        assert!(matches!(Wordlist::from_file(&path), Err(crate::Error::File(_))));
    }
}

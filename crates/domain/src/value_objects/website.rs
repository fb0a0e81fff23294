//! Website value object
//!
//! Companies are identified across stages by the host of their website:
//! it is the deduplication key, the subject of exclusion rules and the
//! domain part of inferred contact emails.
//!
//! # Examples
//!
//! ```
//! use domain::Website;
//!
//! let site = Website::parse("https://www.Zalando.com/about").unwrap();
//! assert_eq!(site.domain(), "zalando.com");
//! assert_eq!(site.brand(), "Zalando");
//! ```

use std::fmt;

use crate::errors::DomainError;

/// A company website reduced to its normalized host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Website {
    url: String,
    domain: String,
}

impl Website {
    /// Parse a website URL; the scheme is optional
    ///
    /// # Errors
    ///
    /// Returns an error if no host can be extracted from the input.
    pub fn parse(url: impl Into<String>) -> Result<Self, DomainError> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidWebsite("empty URL".to_string()));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let host = url::Url::parse(&candidate)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .filter(|h| !h.is_empty())
            .ok_or_else(|| DomainError::InvalidWebsite(url.clone()))?;

        Ok(Self {
            domain: strip_www(&host).to_string(),
            url,
        })
    }

    /// Normalized domain of a URL, falling back to the lowercased input
    /// when no host can be parsed
    pub fn domain_of(url: &str) -> String {
        Self::parse(url).map_or_else(
            |_| strip_www(url.trim()).to_lowercase(),
            |site| site.domain,
        )
    }

    /// Original URL as supplied
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lowercased host without a leading `www.`
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Brand name derived from the domain
    ///
    /// Uses the second-to-last label (`shop.example.co` → `Example`), or
    /// the only label for single-label hosts.
    pub fn brand(&self) -> String {
        brand_from_domain(&self.domain)
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domain)
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn brand_from_domain(domain: &str) -> String {
    let labels: Vec<&str> = domain
        .split('.')
        .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case("www"))
        .collect();

    match labels.as_slice() {
        [] => domain.to_string(),
        [only] => capitalize(only),
        [.., second_last, _] => capitalize(second_last),
    }
}

/// Uppercase the first character and lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

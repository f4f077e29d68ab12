//! TOSID classification codes.
//!
//! A TOSID encodes an entity's domain, type and hierarchical scale followed by
//! an opaque identifier, e.g. `00B2-SOL-STR-SUN:000-000-000-001`:
//!
//! * `00` is the taxonomy code (domain digit, type digit),
//! * `B` is the netmask indicator (scale within the taxonomy),
//! * `2-SOL-STR-SUN:000-000-000-001` is the identifier, made of category
//!   triplets and an optional instance suffix.
//!
//! Parsing only checks the grammar. [`Tosid::create`] additionally checks
//! every component against a [`TaxonomyTable`].

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
    sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{error::TosidComponent, Error, Result};

pub mod taxonomy;
pub mod validator;

pub use taxonomy::TaxonomyTable;
pub use validator::{ConsistencyWarning, TosidValidator, WarningKind};

const GRAMMAR: &str = "DD N CCC-CCC-CCC[:SSS-SSS-SSS-SSS]";

static TOSID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{2})([A-Z])((?:[0-9]-[A-Z]{3}|[0-9][A-Z]{2}|[A-Z]{2,3})-[A-Z]{3}-[A-Z]{3}(?::[A-Z0-9]{3}-[A-Z0-9]{3}-[A-Z0-9]{3}-[A-Z0-9]{3})?)$",
    )
    .expect("TOSID grammar is a valid regex")
});

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[0-9]-[A-Z]{3}|[0-9][A-Z]{2}|[A-Z]{2,3})-[A-Z]{3}-[A-Z]{3}(?::[A-Z0-9]{3}-[A-Z0-9]{3}-[A-Z0-9]{3}-[A-Z0-9]{3})?$",
    )
    .expect("identifier grammar is a valid regex")
});

/// Immutable, grammar-checked TOSID code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tosid {
    taxonomy: String,
    netmask: String,
    identifier: String,
}

impl Tosid {
    /// Parses a canonical TOSID string.
    pub fn parse(code: &str) -> Result<Self> {
        let captures = TOSID_RE
            .captures(code)
            .ok_or_else(|| Error::format(code, format!("expected `{GRAMMAR}`")))?;
        Ok(Self {
            taxonomy: captures[1].to_string(),
            netmask: captures[2].to_string(),
            identifier: captures[3].to_string(),
        })
    }

    /// Builds a TOSID from components validated against the built-in table.
    pub fn create(taxonomy: &str, netmask: &str, identifier: &str) -> Result<Self> {
        TaxonomyTable::builtin().create(taxonomy, netmask, identifier)
    }

    pub(crate) fn check_identifier(identifier: &str) -> Result<()> {
        if IDENTIFIER_RE.is_match(identifier) {
            Ok(())
        } else {
            Err(Error::component(
                TosidComponent::Identifier,
                identifier,
                "expected CCC-CCC-CCC with optional :SSS-SSS-SSS-SSS suffix",
            ))
        }
    }

    pub(crate) fn from_validated_parts(taxonomy: &str, netmask: &str, identifier: &str) -> Self {
        Self {
            taxonomy: taxonomy.to_owned(),
            netmask: netmask.to_owned(),
            identifier: identifier.to_owned(),
        }
    }

    /// Two digit taxonomy code.
    #[must_use]
    pub fn taxonomy_code(&self) -> &str {
        &self.taxonomy
    }

    /// Single letter scale indicator.
    #[must_use]
    pub fn netmask_indicator(&self) -> &str {
        &self.netmask
    }

    /// Category triplets including the instance suffix, if any.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Domain digit of the taxonomy code.
    #[must_use]
    pub fn domain_digit(&self) -> char {
        self.taxonomy.chars().next().unwrap_or('?')
    }

    /// Type digit of the taxonomy code.
    #[must_use]
    pub fn type_digit(&self) -> char {
        self.taxonomy.chars().nth(1).unwrap_or('?')
    }

    /// Category triplets without the instance suffix.
    #[must_use]
    pub fn category(&self) -> &str {
        self.identifier
            .split_once(':')
            .map_or(self.identifier.as_str(), |(category, _)| category)
    }

    /// Instance triplets following the colon.
    #[must_use]
    pub fn instance_code(&self) -> Option<&str> {
        self.identifier.split_once(':').map(|(_, instance)| instance)
    }

    /// Renders `"<domain> - <type> - <scope>"` using the built-in table.
    #[must_use]
    pub fn classification_description(&self) -> String {
        TaxonomyTable::builtin().describe(self)
    }

    /// Codes are compatible when taxonomy and netmask agree.
    #[must_use]
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.taxonomy == other.taxonomy && self.netmask == other.netmask
    }

    /// Tests the canonical string against a prefix or wildcard pattern.
    ///
    /// A pattern is always open-ended on the right: without `*` it is a plain
    /// prefix, with `*` the first segment must be a prefix and the remaining
    /// segments must occur in order. A leading `*` is needed to match from
    /// the middle of the code.
    ///
    /// ```
    /// use tosid_kmac::tosid::Tosid;
    ///
    /// let sun: Tosid = "00B2-SOL-STR-SUN".parse()?;
    /// assert!(sun.matches_pattern("00B*SUN"));
    /// assert!(sun.matches_pattern("*SOL*"));
    /// assert!(!sun.matches_pattern("SOL*"));
    /// # Ok::<(), tosid_kmac::Error>(())
    /// ```
    #[must_use]
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        glob_prefix_match(&self.to_string(), pattern)
    }
}

fn glob_prefix_match(text: &str, pattern: &str) -> bool {
    if !pattern.contains('*') {
        return text.starts_with(pattern);
    }

    let mut segments = pattern.split('*');
    let head = segments.next().unwrap_or_default();
    let Some(mut rest) = text.strip_prefix(head) else {
        return false;
    };
    for segment in segments.filter(|segment| !segment.is_empty()) {
        match rest.find(segment) {
            Some(index) => rest = &rest[index + segment.len()..],
            None => return false,
        }
    }
    true
}

impl Display for Tosid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.taxonomy, self.netmask, self.identifier)
    }
}

impl FromStr for Tosid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tosid {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tosid> for String {
    fn from(value: Tosid) -> Self {
        value.to_string()
    }
}

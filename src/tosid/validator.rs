//! Heuristic consistency checks for TOSID codes.
//!
//! Nothing here rejects a code: every finding is a [`ConsistencyWarning`]
//! the caller may surface or ignore.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::{TaxonomyTable, Tosid};

const NATURAL_DOMAIN: char = '0';
const ARTIFICIAL_DOMAIN: char = '1';

/// Category keywords and the netmask letters they are expected under, for
/// the natural physical taxonomy (`00`).
const SCALE_KEYWORDS: &[(&str, &[char])] = &[
    ("GAL", &['A']),
    ("STR", &['B']),
    ("PLN", &['C']),
    ("MON", &['B', 'C']),
    ("CLL", &['G']),
    ("MOL", &['H']),
    ("ATM", &['H']),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnknownDomain,
    UnknownType,
    UnknownScope,
    DomainMismatch,
    ScaleMismatch,
}

/// Advisory finding produced by [`TosidValidator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConsistencyWarning {
    pub kind: WarningKind,
    pub code: String,
    pub message: String,
}

impl Display for ConsistencyWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Semantic validator bound to a taxonomy table.
#[derive(Clone, Debug, Default)]
pub struct TosidValidator {
    table: TaxonomyTable,
}

impl TosidValidator {
    #[must_use]
    pub fn new(table: TaxonomyTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &TaxonomyTable {
        &self.table
    }

    /// Collects advisory warnings for `tosid`; an empty list means no findings.
    #[must_use]
    pub fn validate_semantic_consistency(&self, tosid: &Tosid) -> Vec<ConsistencyWarning> {
        let mut warnings = Vec::new();
        let mut warn = |kind: WarningKind, message: String| {
            warnings.push(ConsistencyWarning {
                kind,
                code: tosid.to_string(),
                message,
            });
        };

        let domain = tosid.domain_digit();
        if self.table.domain_label(domain).is_none() {
            warn(
                WarningKind::UnknownDomain,
                format!("domain digit `{domain}` is not registered"),
            );
        }
        let kind = tosid.type_digit();
        if self.table.type_label(kind).is_none() {
            warn(
                WarningKind::UnknownType,
                format!("type digit `{kind}` is not registered"),
            );
        }
        if self
            .table
            .scope_label(tosid.taxonomy_code(), tosid.netmask_indicator())
            .is_none()
        {
            warn(
                WarningKind::UnknownScope,
                format!(
                    "netmask `{}` is not a registered scale for taxonomy `{}`",
                    tosid.netmask_indicator(),
                    tosid.taxonomy_code()
                ),
            );
        }

        let category = tosid.category();
        if domain == NATURAL_DOMAIN && category.contains("ART") {
            warn(
                WarningKind::DomainMismatch,
                "identifier suggests an artificial entity but the domain is natural".to_string(),
            );
        }
        if domain == ARTIFICIAL_DOMAIN && category.contains("NAT") {
            warn(
                WarningKind::DomainMismatch,
                "identifier suggests a natural entity but the domain is artificial".to_string(),
            );
        }

        if tosid.taxonomy_code() == "00" {
            let netmask = tosid.netmask_indicator().chars().next().unwrap_or('?');
            for (keyword, expected) in SCALE_KEYWORDS {
                if category.contains(keyword) && !expected.contains(&netmask) {
                    warn(
                        WarningKind::ScaleMismatch,
                        format!("identifier keyword `{keyword}` does not fit scale `{netmask}`"),
                    );
                }
            }
        }

        warnings
    }
}

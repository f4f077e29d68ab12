use std::{collections::BTreeMap, sync::LazyLock};

use super::Tosid;
use crate::{config::TaxonomySettings, error::TosidComponent, Error, Result};

static BUILTIN: LazyLock<TaxonomyTable> =
    LazyLock::new(|| TaxonomyTable::from(TaxonomySettings::default()));

/// Immutable domain/type/scope lookup table.
///
/// Built once from [`TaxonomySettings`] and handed to whatever needs to
/// resolve or validate classification components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxonomyTable {
    domains: BTreeMap<char, String>,
    types: BTreeMap<char, String>,
    scopes: BTreeMap<String, BTreeMap<char, String>>,
}

impl TaxonomyTable {
    /// Shared instance of the default table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub fn domain_label(&self, digit: char) -> Option<&str> {
        self.domains.get(&digit).map(String::as_str)
    }

    #[must_use]
    pub fn type_label(&self, digit: char) -> Option<&str> {
        self.types.get(&digit).map(String::as_str)
    }

    #[must_use]
    pub fn scope_label(&self, taxonomy: &str, netmask: &str) -> Option<&str> {
        let mut letters = netmask.chars();
        let (Some(letter), None) = (letters.next(), letters.next()) else {
            return None;
        };
        self.scopes
            .get(taxonomy)
            .and_then(|scopes| scopes.get(&letter))
            .map(String::as_str)
    }

    /// Netmask letters registered for a taxonomy code, in order.
    pub fn scopes_for<'a>(&'a self, taxonomy: &str) -> impl Iterator<Item = (char, &'a str)> + 'a {
        self.scopes
            .get(taxonomy)
            .into_iter()
            .flat_map(|scopes| scopes.iter().map(|(letter, label)| (*letter, label.as_str())))
    }

    /// Renders `"<domain> - <type> - <scope>"`, substituting `Unknown ...`
    /// for unresolved entries.
    #[must_use]
    pub fn describe(&self, tosid: &Tosid) -> String {
        let domain = self
            .domain_label(tosid.domain_digit())
            .unwrap_or("Unknown Domain");
        let kind = self
            .type_label(tosid.type_digit())
            .unwrap_or("Unknown Type");
        let scope = self
            .scope_label(tosid.taxonomy_code(), tosid.netmask_indicator())
            .unwrap_or("Unknown Scope");
        format!("{domain} - {kind} - {scope}")
    }

    /// Builds a [`Tosid`] after validating every component against this table.
    pub fn create(&self, taxonomy: &str, netmask: &str, identifier: &str) -> Result<Tosid> {
        self.check_taxonomy(taxonomy)?;
        self.check_netmask(taxonomy, netmask)?;
        Tosid::check_identifier(identifier)?;
        Ok(Tosid::from_validated_parts(taxonomy, netmask, identifier))
    }

    fn check_taxonomy(&self, taxonomy: &str) -> Result<()> {
        let digits: Vec<char> = taxonomy.chars().collect();
        let &[domain, kind] = digits.as_slice() else {
            return Err(Error::component(
                TosidComponent::Taxonomy,
                taxonomy,
                "expected exactly two digits",
            ));
        };
        if !self.domains.contains_key(&domain) {
            return Err(Error::component(
                TosidComponent::Taxonomy,
                taxonomy,
                format!("unknown domain digit `{domain}`"),
            ));
        }
        if !self.types.contains_key(&kind) {
            return Err(Error::component(
                TosidComponent::Taxonomy,
                taxonomy,
                format!("unknown type digit `{kind}`"),
            ));
        }
        Ok(())
    }

    fn check_netmask(&self, taxonomy: &str, netmask: &str) -> Result<()> {
        if self.scope_label(taxonomy, netmask).is_some() {
            Ok(())
        } else {
            Err(Error::component(
                TosidComponent::Netmask,
                netmask,
                format!("not a registered scale for taxonomy `{taxonomy}`"),
            ))
        }
    }
}

impl From<TaxonomySettings> for TaxonomyTable {
    /// Entries whose keys are not a single character are skipped.
    fn from(settings: TaxonomySettings) -> Self {
        fn by_letter(entries: BTreeMap<String, String>) -> BTreeMap<char, String> {
            entries
                .into_iter()
                .filter_map(|(key, label)| {
                    let mut chars = key.chars();
                    match (chars.next(), chars.next()) {
                        (Some(letter), None) => Some((letter, label)),
                        _ => None,
                    }
                })
                .collect()
        }

        Self {
            domains: by_letter(settings.domains),
            types: by_letter(settings.types),
            scopes: settings
                .scopes
                .into_iter()
                .map(|(code, scopes)| (code, by_letter(scopes)))
                .collect(),
        }
    }
}

impl Default for TaxonomyTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_known_scopes() {
        let table = TaxonomyTable::builtin();
        assert_eq!(table.domain_label('1'), Some("Human/Artificial"));
        assert_eq!(table.type_label('1'), Some("Conceptual/Abstract"));
        assert_eq!(table.scope_label("10", "C"), Some("Organization"));
        assert_eq!(table.scope_label("10", "CC"), None);
        assert_eq!(table.scope_label("42", "A"), None);
        let letters: String = table.scopes_for("01").map(|(letter, _)| letter).collect();
        assert_eq!(letters, "ABCD");
    }

    #[test]
    fn custom_table_drives_create_and_describe() {
        let mut settings = TaxonomySettings::default();
        settings
            .scopes
            .entry("00".to_string())
            .or_default()
            .insert("Z".to_string(), "Quantum Scale".to_string());
        settings.domains.insert("bad".to_string(), "ignored".to_string());
        let table = TaxonomyTable::from(settings);

        let tosid = table
            .create("00", "Z", "QNT-FLD-ELC")
            .expect("custom scope accepted");
        assert_eq!(
            table.describe(&tosid),
            "Celestial/Natural - Physical/Material - Quantum Scale"
        );
        assert_eq!(
            tosid.classification_description(),
            "Celestial/Natural - Physical/Material - Unknown Scope"
        );
        assert!(Tosid::create("00", "Z", "QNT-FLD-ELC").is_err());
    }
}

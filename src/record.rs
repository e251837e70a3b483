//! Catalog record structures.
//!
//! A catalog record describes one dataset and carries an ordered list of
//! [`Distribution`] entries, each a candidate representation of the dataset.
//! The adaptor reads records only through the [`CatalogRecord`] trait, so any
//! upstream parser type can be harvested; [`DcatRecord`] is the concrete model
//! of a DCAT dataset entry.

use serde::{Deserialize, Serialize};

/// One candidate representation of a dataset.
///
/// Order within a record is significant: the first distribution whose format
/// matches wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Distribution {
    /// Declared format label, e.g. `"CSV"` or `"Esri REST"`
    #[serde(default)]
    pub format: String,
    /// Location from which the distribution's content can be retrieved
    #[serde(default, rename = "accessURL")]
    pub access_url: String,
}

impl Distribution {
    /// Create a new distribution.
    #[must_use]
    pub fn new(format: impl Into<String>, access_url: impl Into<String>) -> Self {
        Distribution {
            format: format.into(),
            access_url: access_url.into(),
        }
    }
}

/// Read-only view of a catalog record used by the adaptor.
pub trait CatalogRecord {
    /// The record's distributions, in source order.
    fn distributions(&self) -> &[Distribution];
}

/// A DCAT dataset entry.
///
/// # Examples
///
/// ```
/// use dcat_harvest::{DcatRecord, Distribution, CatalogRecord};
///
/// let record = DcatRecord::new()
///     .with_title("Parcels")
///     .add_distribution(Distribution::new("CSV", "http://example.org/parcels.csv"))
///     .add_distribution(Distribution::new("Esri REST", "http://example.org/arcgis/rest"));
///
/// assert_eq!(record.distributions().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DcatRecord {
    /// Dataset identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Dataset title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Candidate distributions, in source order
    #[serde(default)]
    pub distribution: Vec<Distribution>,
}

impl DcatRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a distribution.
    #[must_use]
    pub fn add_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution.push(distribution);
        self
    }
}

impl CatalogRecord for DcatRecord {
    fn distributions(&self) -> &[Distribution] {
        &self.distribution
    }
}

impl<T: CatalogRecord + ?Sized> CatalogRecord for &T {
    fn distributions(&self) -> &[Distribution] {
        (**self).distributions()
    }
}

impl<T: CatalogRecord + ?Sized> CatalogRecord for Box<T> {
    fn distributions(&self) -> &[Distribution] {
        (**self).distributions()
    }
}

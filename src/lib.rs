#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # DCAT Harvest
//!
//! Adapts a stream of DCAT catalog records into a lazily produced, filtered
//! stream of publishable resources. For each record, the access URL of the
//! first distribution whose declared format matches the configured pattern is
//! emitted; records without a match are skipped.
//!
//! ## Quick Start
//!
//! ```
//! use dcat_harvest::{DcatIteratorAdaptor, DcatRecord, Distribution, IterSource};
//!
//! let records = vec![
//!     DcatRecord::new()
//!         .add_distribution(Distribution::new("CSV", "a"))
//!         .add_distribution(Distribution::new("JSON", "b")),
//!     DcatRecord::new().add_distribution(Distribution::new("csv", "c")),
//! ];
//!
//! let adaptor = DcatIteratorAdaptor::new("json", (), IterSource::from_records(records));
//! let mut iter = adaptor.iter();
//!
//! assert!(iter.has_next()?);
//! assert_eq!(iter.next_resource()?.access_url(), "b");
//! assert!(!iter.has_next()?);
//!
//! adaptor.close()?;
//! # Ok::<(), dcat_harvest::HarvestError>(())
//! ```
//!
//! ## Modules
//!
//! - [`adaptor`] — Adaptor owning the record source and its close lifecycle
//! - [`iterator`] — Lookahead filtering iterator
//! - [`selector`] — Access URL selection from a record's distributions
//! - [`format_matcher`] — Case-insensitive, full-label format matching with default fallback
//! - [`record`] — Catalog record and distribution structures
//! - [`source`] — Record source trait and iterator-backed source
//! - [`resource`] — Publishable resources emitted by the adaptor
//! - [`config`] — Harvest configuration
//! - [`error`] — Error types and result type

pub mod adaptor;
pub mod config;
pub mod error;
pub mod format_matcher;
pub mod iterator;
pub mod record;
pub mod resource;
pub mod selector;
pub mod source;

pub use adaptor::DcatIteratorAdaptor;
pub use config::HarvestConfig;
pub use error::{HarvestError, Result};
pub use format_matcher::{FormatMatcher, DEFAULT_FORMAT_PATTERN};
pub use iterator::{DcatIterator, IteratorState};
pub use record::{CatalogRecord, DcatRecord, Distribution};
pub use resource::PublishableResource;
pub use selector::{find_distribution, select_access_url};
pub use source::{IterSource, RecordSource, VecSource};

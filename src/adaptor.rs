//! Adaptation of a record source into publishable resources.
//!
//! [`DcatIteratorAdaptor`] owns the record source, the compiled format
//! pattern and the collaborator proxy. It hands out [`DcatIterator`]s on demand
//! and releases the source when closed.
//!
//! # Examples
//!
//! ```
//! use dcat_harvest::{DcatIteratorAdaptor, DcatRecord, Distribution, IterSource};
//!
//! let records = vec![
//!     DcatRecord::new().add_distribution(Distribution::new("CSV", "http://a/data.csv")),
//!     DcatRecord::new().add_distribution(Distribution::new("Esri REST", "http://b/rest")),
//! ];
//! let adaptor = DcatIteratorAdaptor::new("esri rest", (), IterSource::from_records(records));
//!
//! for resource in &adaptor {
//!     println!("harvesting {}", resource?.access_url());
//! }
//! adaptor.close()?;
//! # Ok::<(), dcat_harvest::HarvestError>(())
//! ```

use crate::config::HarvestConfig;
use crate::error::{HarvestError, Result};
use crate::format_matcher::FormatMatcher;
use crate::iterator::{DcatIterator, SharedSource};
use crate::source::RecordSource;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Adaptor turning a [`RecordSource`] into a stream of
/// [`PublishableResource`](crate::PublishableResource)s.
///
/// Every iterator obtained from the adaptor pulls from the same source.
/// [`close`](Self::close) releases the source once and ends iteration for all
/// of them. The adaptor is single-threaded (`!Send`).
pub struct DcatIteratorAdaptor<S: RecordSource, P> {
    proxy: Rc<P>,
    source: SharedSource<S>,
    matcher: FormatMatcher,
}

impl<S: RecordSource, P> DcatIteratorAdaptor<S, P> {
    /// Create an adaptor selecting distributions whose format matches `format`.
    ///
    /// An invalid `format` is replaced by the default pattern.
    pub fn new(format: &str, proxy: P, source: S) -> Self {
        Self::with_matcher(FormatMatcher::compile(format), proxy, source)
    }

    /// Create an adaptor with an already compiled matcher.
    pub fn with_matcher(matcher: FormatMatcher, proxy: P, source: S) -> Self {
        DcatIteratorAdaptor {
            proxy: Rc::new(proxy),
            source: Rc::new(RefCell::new(Some(source))),
            matcher,
        }
    }

    /// Create an adaptor from a harvest configuration.
    pub fn from_config(config: &HarvestConfig, proxy: P, source: S) -> Self {
        Self::with_matcher(config.matcher(), proxy, source)
    }

    /// A new iterator over the remaining records.
    ///
    /// After [`close`](Self::close) the iterator is empty.
    #[must_use]
    pub fn iter(&self) -> DcatIterator<S, P> {
        DcatIterator::new(
            Rc::clone(&self.source),
            self.matcher.clone(),
            Rc::clone(&self.proxy),
        )
    }

    /// Close the adaptor and the underlying record source.
    ///
    /// The source is closed exactly once; later calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Close`] if the source fails to close on the
    /// first call. The adaptor is closed regardless.
    pub fn close(&self) -> Result<()> {
        let Some(mut source) = self.source.borrow_mut().take() else {
            return Ok(());
        };
        tracing::debug!(
            records_read = source.records_read(),
            "closing record source"
        );
        source.close().map_err(|e| match e {
            HarvestError::Close(_) => e,
            other => HarvestError::close_failed(other),
        })
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.source.borrow().is_none()
    }

    /// The compiled format pattern.
    #[must_use]
    pub fn matcher(&self) -> &FormatMatcher {
        &self.matcher
    }

    /// The collaborator proxy passed to every resource.
    #[must_use]
    pub fn proxy(&self) -> &Rc<P> {
        &self.proxy
    }
}

impl<S: RecordSource, P> IntoIterator for &DcatIteratorAdaptor<S, P> {
    type Item = Result<crate::PublishableResource<P>>;
    type IntoIter = DcatIterator<S, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: RecordSource, P> fmt::Debug for DcatIteratorAdaptor<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DcatIteratorAdaptor")
            .field("matcher", &self.matcher)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

//! Record sources feeding the adaptor.
//!
//! A [`RecordSource`] is the forward-only cursor over catalog records that
//! the upstream feed parser exposes. It cannot peek or restart, and it holds
//! resources (a reader, a connection) that must be released with
//! [`close`](RecordSource::close).
//!
//! # Implementation Notes
//!
//! Implementations should:
//! - Return `Ok(None)` when the feed is exhausted (not an error)
//! - Return records in feed order
//! - Report read and parse failures as errors rather than skipping records;
//!   the adaptor propagates them unchanged

use crate::error::Result;
use crate::record::CatalogRecord;
use std::fmt;

/// Forward-only, closeable cursor over catalog records.
pub trait RecordSource {
    /// Record type produced by this source.
    type Record: CatalogRecord;

    /// Read the next record.
    ///
    /// Returns:
    /// - `Ok(Some(record))` if a record was read successfully
    /// - `Ok(None)` if the source is exhausted
    /// - `Err(_)` if reading failed; the caller treats this as fatal
    ///
    /// May block on I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read or a record cannot be parsed.
    fn read_record(&mut self) -> Result<Option<Self::Record>>;

    /// Release the resources held by this source.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying resource fails to close.
    fn close(&mut self) -> Result<()>;

    /// Returns the number of records read so far.
    ///
    /// The default implementation returns `None` if tracking is not supported.
    fn records_read(&self) -> Option<usize> {
        None
    }
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    type Record = S::Record;

    fn read_record(&mut self) -> Result<Option<Self::Record>> {
        (**self).read_record()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn records_read(&self) -> Option<usize> {
        (**self).records_read()
    }
}

/// [`RecordSource`] over any iterator of record results.
///
/// Closing drops the iterator; reads after close report exhaustion.
///
/// # Examples
///
/// ```
/// use dcat_harvest::{DcatRecord, IterSource, RecordSource};
///
/// let mut source = IterSource::from_records(vec![DcatRecord::new(), DcatRecord::new()]);
/// assert!(source.read_record()?.is_some());
/// source.close()?;
/// assert!(source.read_record()?.is_none());
/// assert_eq!(source.records_read(), Some(1));
/// # Ok::<(), dcat_harvest::HarvestError>(())
/// ```
pub struct IterSource<I> {
    iter: Option<I>,
    records_read: usize,
}

impl<I> IterSource<I> {
    /// Wrap an iterator yielding `Result<R>`.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        IterSource {
            iter: Some(iter.into_iter()),
            records_read: 0,
        }
    }

    /// Whether [`close`](RecordSource::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.iter.is_none()
    }
}

/// [`IterSource`] over records already in memory, built by
/// [`IterSource::from_records`].
pub type VecSource<R> = IterSource<std::iter::Map<std::vec::IntoIter<R>, fn(R) -> Result<R>>>;

impl<R> VecSource<R> {
    /// Wrap records that are already in memory.
    #[must_use]
    pub fn from_records(records: Vec<R>) -> Self {
        IterSource::new(records.into_iter().map(Ok as fn(R) -> Result<R>))
    }
}

impl<I, R> RecordSource for IterSource<I>
where
    I: Iterator<Item = Result<R>>,
    R: CatalogRecord,
{
    type Record = R;

    fn read_record(&mut self) -> Result<Option<R>> {
        let Some(iter) = self.iter.as_mut() else {
            return Ok(None);
        };
        match iter.next() {
            Some(Ok(record)) => {
                self.records_read += 1;
                Ok(Some(record))
            },
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.iter = None;
        Ok(())
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}

impl<I> fmt::Debug for IterSource<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterSource")
            .field("closed", &self.is_closed())
            .field("records_read", &self.records_read)
            .finish()
    }
}

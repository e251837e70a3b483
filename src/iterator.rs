//! Lookahead filtering iterator over a record source.
//!
//! The record source only offers a forward cursor, so answering "is there
//! another resource?" means pulling records until one has a matching
//! distribution. [`DcatIterator`] keeps the access URL of that record in a
//! single-slot buffer until the caller takes it, skipping non-matching records
//! lazily as it goes.
//!
//! # State machine
//!
//! | State | Meaning | `has_next` | `next_resource` |
//! |-------|---------|------------|-----------------|
//! | [`Empty`](IteratorState::Empty) | nothing buffered | pulls until a match or exhaustion | `NoElementsAvailable` |
//! | [`Ready`](IteratorState::Ready) | one URL buffered | `true`, no pull | emits, moves to `Empty` |
//! | [`Done`](IteratorState::Done) | exhausted, failed or closed | `false` | `NoElementsAvailable` |
//!
//! Closing the adaptor moves every derived iterator to `Done` on its next
//! call, discarding a buffered URL.

use crate::error::{HarvestError, Result};
use crate::format_matcher::FormatMatcher;
use crate::resource::PublishableResource;
use crate::selector::select_access_url;
use crate::source::RecordSource;
use std::cell::RefCell;
use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Record source slot shared by an adaptor and its iterators; `None` once closed.
pub(crate) type SharedSource<S> = Rc<RefCell<Option<S>>>;

/// Lookahead state of a [`DcatIterator`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IteratorState {
    /// No URL buffered; whether more matches exist is unknown
    #[default]
    Empty,
    /// A qualifying access URL is buffered, waiting to be taken
    Ready(String),
    /// Source exhausted, failed, or closed
    Done,
}

impl IteratorState {
    /// The buffered access URL, if any.
    #[must_use]
    pub fn pending_url(&self) -> Option<&str> {
        match self {
            IteratorState::Ready(url) => Some(url),
            _ => None,
        }
    }
}

/// Filtered, single-pass view over a record source.
///
/// Created by [`DcatIteratorAdaptor::iter`](crate::DcatIteratorAdaptor::iter).
/// Iterators of the same adaptor keep independent lookahead buffers but pull
/// from the same source, so interleaving them splits the records between them.
///
/// Besides the explicit `has_next`/`next_resource` protocol, the iterator
/// implements [`Iterator`] yielding `Result<PublishableResource<P>>`; an
/// upstream error is yielded once and ends iteration.
pub struct DcatIterator<S: RecordSource, P> {
    source: SharedSource<S>,
    matcher: FormatMatcher,
    proxy: Rc<P>,
    state: IteratorState,
    records_read: usize,
    records_skipped: usize,
}

impl<S: RecordSource, P> DcatIterator<S, P> {
    pub(crate) fn new(source: SharedSource<S>, matcher: FormatMatcher, proxy: Rc<P>) -> Self {
        DcatIterator {
            source,
            matcher,
            proxy,
            state: IteratorState::Empty,
            records_read: 0,
            records_skipped: 0,
        }
    }

    /// Whether another resource is available, pulling from the source if needed.
    ///
    /// Repeated calls without an intervening
    /// [`next_resource`](Self::next_resource) return the same answer and pull
    /// nothing more. May block while the source reads.
    ///
    /// # Errors
    ///
    /// Returns the source's error if reading fails; the iterator is then done.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.state == IteratorState::Done {
            return Ok(false);
        }

        let mut slot = self.source.borrow_mut();
        let Some(source) = slot.as_mut() else {
            self.state = IteratorState::Done;
            return Ok(false);
        };

        if let IteratorState::Ready(_) = self.state {
            return Ok(true);
        }

        loop {
            match source.read_record() {
                Ok(Some(record)) => {
                    self.records_read += 1;
                    let url = select_access_url(&record, &self.matcher);
                    if url.is_empty() {
                        self.records_skipped += 1;
                        tracing::trace!(
                            record = self.records_read,
                            format = %self.matcher,
                            "no matching distribution, skipping record"
                        );
                        continue;
                    }
                    self.state = IteratorState::Ready(url);
                    return Ok(true);
                },
                Ok(None) => {
                    tracing::debug!(
                        records_read = self.records_read,
                        records_skipped = self.records_skipped,
                        "record source exhausted"
                    );
                    self.state = IteratorState::Done;
                    return Ok(false);
                },
                Err(e) => {
                    self.state = IteratorState::Done;
                    return Err(e);
                },
            }
        }
    }

    /// Take the buffered resource.
    ///
    /// Never pulls from the source: call [`has_next`](Self::has_next) first.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::NoElementsAvailable`] unless a preceding
    /// `has_next` returned `true` and the adaptor is still open.
    pub fn next_resource(&mut self) -> Result<PublishableResource<P>> {
        if self.source.borrow().is_none() {
            self.state = IteratorState::Done;
            return Err(HarvestError::NoElementsAvailable);
        }
        match std::mem::take(&mut self.state) {
            IteratorState::Ready(url) => {
                Ok(PublishableResource::new(Rc::clone(&self.proxy), url))
            },
            other => {
                self.state = other;
                Err(HarvestError::NoElementsAvailable)
            },
        }
    }

    /// Current lookahead state.
    #[must_use]
    pub fn state(&self) -> &IteratorState {
        &self.state
    }

    /// Number of records this iterator pulled from the source.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Number of pulled records that had no matching distribution.
    #[must_use]
    pub fn records_skipped(&self) -> usize {
        self.records_skipped
    }
}

impl<S: RecordSource, P> Iterator for DcatIterator<S, P> {
    type Item = Result<PublishableResource<P>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.next_resource()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<S: RecordSource, P> FusedIterator for DcatIterator<S, P> {}

impl<S: RecordSource, P> fmt::Debug for DcatIterator<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DcatIterator")
            .field("matcher", &self.matcher)
            .field("state", &self.state)
            .field("records_read", &self.records_read)
            .field("records_skipped", &self.records_skipped)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DcatRecord, Distribution};

    /// Mock source counting pulls, for testing lookahead behavior
    #[derive(Debug)]
    struct MockSource {
        records: Vec<Result<DcatRecord>>,
        pulls: Rc<RefCell<usize>>,
    }

    impl RecordSource for MockSource {
        type Record = DcatRecord;

        fn read_record(&mut self) -> Result<Option<DcatRecord>> {
            *self.pulls.borrow_mut() += 1;
            if self.records.is_empty() {
                return Ok(None);
            }
            self.records.remove(0).map(Some)
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn rec(format: &str, url: &str) -> Result<DcatRecord> {
        Ok(DcatRecord::new().add_distribution(Distribution::new(format, url)))
    }

    fn iterator(
        records: Vec<Result<DcatRecord>>,
        pattern: &str,
    ) -> (DcatIterator<MockSource, ()>, Rc<RefCell<usize>>) {
        let pulls = Rc::new(RefCell::new(0));
        let source = MockSource {
            records,
            pulls: Rc::clone(&pulls),
        };
        let iter = DcatIterator::new(
            Rc::new(RefCell::new(Some(source))),
            FormatMatcher::compile(pattern),
            Rc::new(()),
        );
        (iter, pulls)
    }

    #[test]
    fn test_skips_non_matching_records() {
        let (mut iter, _) = iterator(
            vec![rec("csv", "a"), rec("json", "b"), rec("xml", "c"), rec("JSON", "d")],
            "json",
        );
        let urls: Vec<String> = iter
            .by_ref()
            .map(|r| r.unwrap().access_url().to_string())
            .collect();
        assert_eq!(urls, vec!["b", "d"]);
        assert_eq!(iter.records_read(), 4);
        assert_eq!(iter.records_skipped(), 2);
        assert_eq!(iter.state(), &IteratorState::Done);
    }

    #[test]
    fn test_has_next_is_idempotent() {
        let (mut iter, pulls) = iterator(vec![rec("csv", "a"), rec("json", "b")], "json");
        assert!(iter.has_next().unwrap());
        assert_eq!(*pulls.borrow(), 2);
        assert!(iter.has_next().unwrap());
        assert!(iter.has_next().unwrap());
        assert_eq!(*pulls.borrow(), 2);
        assert_eq!(iter.state().pending_url(), Some("b"));
    }

    #[test]
    fn test_has_next_in_done_does_not_pull() {
        let (mut iter, pulls) = iterator(vec![], "json");
        assert!(!iter.has_next().unwrap());
        assert!(!iter.has_next().unwrap());
        assert_eq!(*pulls.borrow(), 1);
    }

    #[test]
    fn test_next_resource_without_has_next_fails() {
        let (mut iter, pulls) = iterator(vec![rec("json", "a")], "json");
        let err = iter.next_resource().unwrap_err();
        assert!(err.is_protocol_misuse());
        assert_eq!(*pulls.borrow(), 0);
        assert_eq!(iter.state(), &IteratorState::Empty);
    }

    #[test]
    fn test_next_resource_clears_buffer() {
        let (mut iter, _) = iterator(vec![rec("json", "a"), rec("json", "b")], "json");
        assert!(iter.has_next().unwrap());
        assert_eq!(iter.next_resource().unwrap().access_url(), "a");
        assert_eq!(iter.state(), &IteratorState::Empty);
        assert!(matches!(
            iter.next_resource(),
            Err(HarvestError::NoElementsAvailable)
        ));
        assert!(iter.has_next().unwrap());
        assert_eq!(iter.next_resource().unwrap().access_url(), "b");
    }

    #[test]
    fn test_upstream_error_propagates_and_ends_iteration() {
        let (mut iter, pulls) = iterator(
            vec![
                rec("csv", "a"),
                Err(HarvestError::upstream("truncated feed")),
                rec("json", "c"),
            ],
            "json",
        );
        let err = iter.has_next().unwrap_err();
        assert!(matches!(err, HarvestError::Source(_)));
        assert_eq!(iter.state(), &IteratorState::Done);
        assert!(!iter.has_next().unwrap());
        assert_eq!(*pulls.borrow(), 2);
    }

    #[test]
    fn test_iterator_yields_error_once() {
        let (iter, _) = iterator(
            vec![rec("json", "a"), Err(HarvestError::upstream("boom"))],
            "json",
        );
        let items: Vec<_> = iter.collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[test]
    fn test_closed_source_reports_done() {
        let (mut iter, _) = iterator(vec![rec("json", "a")], "json");
        assert!(iter.has_next().unwrap());
        iter.source.borrow_mut().take();
        assert!(!iter.has_next().unwrap());
        assert_eq!(iter.state(), &IteratorState::Done);
        assert!(iter.next_resource().is_err());
    }

    #[test]
    fn test_resource_carries_shared_proxy() {
        let (mut iter, _) = iterator(vec![rec("json", "a")], "json");
        let resource = iter.next().unwrap().unwrap();
        assert!(Rc::ptr_eq(resource.proxy(), &iter.proxy));
    }
}

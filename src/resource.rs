//! Publishable resources emitted by the adaptor.

use std::fmt;
use std::rc::Rc;

/// One harvested resource: a selected access URL paired with the collaborator
/// handle the downstream pipeline uses to fetch and publish it.
///
/// The adaptor never inspects the proxy. Two resources are equal when their
/// URLs are equal.
pub struct PublishableResource<P> {
    proxy: Rc<P>,
    access_url: String,
}

impl<P> PublishableResource<P> {
    /// Create a resource for `access_url`.
    pub fn new(proxy: Rc<P>, access_url: impl Into<String>) -> Self {
        PublishableResource {
            proxy,
            access_url: access_url.into(),
        }
    }

    /// The collaborator handle shared by every resource of an adaptor.
    #[must_use]
    pub fn proxy(&self) -> &Rc<P> {
        &self.proxy
    }

    /// The selected access URL.
    #[must_use]
    pub fn access_url(&self) -> &str {
        &self.access_url
    }

    /// Split into the proxy handle and the access URL.
    #[must_use]
    pub fn into_parts(self) -> (Rc<P>, String) {
        (self.proxy, self.access_url)
    }
}

impl<P> Clone for PublishableResource<P> {
    fn clone(&self) -> Self {
        PublishableResource {
            proxy: Rc::clone(&self.proxy),
            access_url: self.access_url.clone(),
        }
    }
}

impl<P> PartialEq for PublishableResource<P> {
    fn eq(&self, other: &Self) -> bool {
        self.access_url == other.access_url
    }
}

impl<P> Eq for PublishableResource<P> {}

impl<P> fmt::Debug for PublishableResource<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishableResource")
            .field("access_url", &self.access_url)
            .finish_non_exhaustive()
    }
}

impl<P> fmt::Display for PublishableResource<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.access_url)
    }
}

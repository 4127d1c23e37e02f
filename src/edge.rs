use std::fmt;

use crate::attachment::ApId;

/// An undirected binding between two attachment points.
///
/// Edges are only created by [`Assembly::join`](crate::Assembly::join) or
/// [`Assembly::bind`](crate::Assembly::bind) and are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    a: ApId,
    b: ApId,
}

impl Edge {
    pub(crate) fn new(a: ApId, b: ApId) -> Self {
        debug_assert_ne!(a, b, "an edge needs two distinct attachment points");
        Self { a, b }
    }

    pub fn endpoints(&self) -> (ApId, ApId) {
        (self.a, self.b)
    }

    pub fn contains(&self, ap: ApId) -> bool {
        self.a == ap || self.b == ap
    }

    /// The endpoint that is not `given`.
    ///
    /// Fails when `given` is neither endpoint, which means some AP claims an
    /// edge it is not part of.
    pub fn other_endpoint(&self, given: ApId) -> Result<ApId, UnknownEndpoint> {
        if given == self.a {
            Ok(self.b)
        } else if given == self.b {
            Ok(self.a)
        } else {
            Err(UnknownEndpoint {
                endpoints: (self.a, self.b),
                given,
            })
        }
    }
}

/// An edge was asked for the far side of an AP it does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownEndpoint {
    pub endpoints: (ApId, ApId),
    pub given: ApId,
}

impl fmt::Display for UnknownEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attachment point {} is not an endpoint of edge {}-{}",
            self.given, self.endpoints.0, self.endpoints.1
        )
    }
}

impl std::error::Error for UnknownEndpoint {}

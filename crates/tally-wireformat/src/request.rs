//! The request descriptor contract shared by every API operation.

use serde_json::Value;

/// HTTP method used by a request descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// The method name as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request descriptor: the capability bundle describing one API operation.
///
/// A descriptor supplies the HTTP method, the fully qualified URL built from
/// a caller-supplied base URL, optional query pairs, and an optional JSON
/// body. The sender sets `Content-Type: application/json` exactly when a
/// body is present. URL-encoding of interpolated path identifiers is the
/// caller's responsibility; query pairs are encoded by the transport.
pub trait ApiRequest {
    /// The HTTP method for this operation.
    fn method(&self) -> Method;

    /// The fully qualified URL, formatted from `base_url` and the resource's
    /// path segments.
    fn url(&self, base_url: &str) -> String;

    /// Query pairs appended to the URL, if any.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// The JSON body, if this operation carries one.
    fn body(&self) -> Option<Value> {
        None
    }
}

use std::fmt;

/// An identifier used to correlate log output and registry calls with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId([u8; 8]);

impl RequestId {
    pub fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn to_bytes(self) -> [u8; 8] {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Request scoped values, passed explicitly to everything that handles the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    request_id: RequestId,
    parent_id: Option<RequestId>,
}

impl RequestContext {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            parent_id: None,
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn parent_id(&self) -> Option<RequestId> {
        self.parent_id
    }

    /// Creates a context for a unit of work within this request, with its own id.
    pub fn sub_context(&self) -> Self {
        Self {
            request_id: RequestId::random(),
            parent_id: Some(self.request_id),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(RequestId::random())
    }
}

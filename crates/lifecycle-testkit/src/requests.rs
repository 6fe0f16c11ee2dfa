//! Request types for the mock resource service.
//!
//! Every request can be built two ways: fluently (method chaining) or as a
//! structured literal. The harness runs both construction styles through
//! both invocation styles, so keeping the two paths on one type mirrors how
//! a real client exposes a descriptor and an object-initializer for the
//! same endpoint.

/// Create (or overwrite) a resource.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Resource identifier.
    pub id: String,
    /// Initial payload.
    pub payload: String,
}

impl CreateRequest {
    /// Start a fluent create request.
    pub fn for_resource(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: String::new(),
        }
    }

    /// Set the initial payload.
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }
}

/// Read a resource back.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// Resource identifier.
    pub id: String,
}

impl ReadRequest {
    /// Fluent read request.
    pub fn for_resource(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Replace a resource's payload.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Resource identifier.
    pub id: String,
    /// Replacement payload.
    pub payload: String,
}

impl UpdateRequest {
    /// Start a fluent update request.
    pub fn for_resource(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: String::new(),
        }
    }

    /// Set the replacement payload.
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }
}

/// Check whether a resource exists.
#[derive(Debug, Clone)]
pub struct ExistsRequest {
    /// Resource identifier.
    pub id: String,
}

impl ExistsRequest {
    /// Fluent existence request.
    pub fn for_resource(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Delete a resource.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    /// Resource identifier.
    pub id: String,
}

impl DeleteRequest {
    /// Fluent delete request.
    pub fn for_resource(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

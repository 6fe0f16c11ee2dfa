//! Typed responses returned by the mock resource service.

use std::any::Any;

use lifecycle_harness::ApiResponse;

/// Acknowledgement of a create call.
#[derive(Debug)]
pub struct CreateResponse {
    /// Whether the service accepted the create.
    pub acknowledged: bool,
    /// Identifier the resource was created under.
    pub id: String,
}

impl ApiResponse for CreateResponse {
    fn is_valid(&self) -> bool {
        self.acknowledged
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A read-back of one resource.
#[derive(Debug)]
pub struct ReadResponse {
    /// Whether the resource was found.
    pub found: bool,
    /// The resource's payload, when found.
    pub payload: Option<String>,
    /// The requested identifier.
    pub id: String,
}

impl ApiResponse for ReadResponse {
    fn is_valid(&self) -> bool {
        self.found
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Acknowledgement of an update call.
#[derive(Debug)]
pub struct UpdateResponse {
    /// Whether the resource existed and was updated.
    pub acknowledged: bool,
    /// The updated identifier.
    pub id: String,
}

impl ApiResponse for UpdateResponse {
    fn is_valid(&self) -> bool {
        self.acknowledged
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Result of an existence check. Always a valid response; the answer is in
/// the flag.
#[derive(Debug)]
pub struct ExistsResponse {
    /// Whether the resource exists.
    pub exists: bool,
    /// The queried identifier.
    pub id: String,
}

impl ApiResponse for ExistsResponse {
    fn is_valid(&self) -> bool {
        true
    }
    fn exists(&self) -> Option<bool> {
        Some(self.exists)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Acknowledgement of a delete call. Deleting a missing resource yields an
/// invalid (not-found) response rather than a failure.
#[derive(Debug)]
pub struct DeleteResponse {
    /// Whether the resource existed and was removed.
    pub acknowledged: bool,
    /// The deleted identifier.
    pub id: String,
}

impl ApiResponse for DeleteResponse {
    fn is_valid(&self) -> bool {
        self.acknowledged
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

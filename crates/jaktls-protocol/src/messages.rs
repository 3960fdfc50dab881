//! Payloads of protocol-level notifications.

use jaktls_json::{Object, Value};

use crate::decode::{Dump, Validate};
use crate::jsonrpc::{IdShape, RequestId, check_id, extract_id};

/// Params of a `$/cancelRequest` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelParams {
    id: RequestId,
}

/// Check-phase result for [`CancelParams`].
#[derive(Debug)]
pub struct CancelShape(IdShape);

impl CancelParams {
    pub const METHOD: &'static str = "$/cancelRequest";

    pub fn new(id: impl Into<RequestId>) -> Self {
        Self { id: id.into() }
    }

    /// The id of the request to cancel.
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn into_id(self) -> RequestId {
        self.id
    }
}

impl Validate for CancelParams {
    type Shape = CancelShape;

    fn check(object: &Object) -> Option<CancelShape> {
        check_id("CancelParams", object).map(CancelShape)
    }

    fn extract(shape: CancelShape, object: &mut Object) -> Self {
        Self {
            id: extract_id(shape.0, object),
        }
    }
}

impl Dump for CancelParams {
    fn dump(self) -> Object {
        let mut target = Object::new();
        target.set("id", Value::from(self.id));
        target
    }
}

//! Response bodies

use serde::{Deserialize, Serialize};

/// Body of `GET /api/tags/get-count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCountResponse {
    pub count: usize,
}

/// Body of `GET /api/tags/attributes/get`.
///
/// `attributes` is a set; clients must not rely on its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttributesResponse {
    pub attributes: Vec<String>,
}

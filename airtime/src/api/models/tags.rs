use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::TagId;

/// A resolved tag reference as it appears in composed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

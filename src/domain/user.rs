use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// The caller a mutation is attributed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
}

impl CurrentUser {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

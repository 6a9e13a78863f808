//! Presence checks shared by all record kinds.

use super::EntityKind;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A required field was missing, blank or zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entity: EntityKind,
    pub field: &'static str,
}

impl ValidationError {
    pub fn missing(entity: EntityKind, field: &'static str) -> Self {
        Self { entity, field }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} is required", self.entity, self.field)
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(entity, field));
    }
    Ok(())
}

pub(crate) fn require_amount(
    entity: EntityKind,
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value.is_zero() {
        return Err(ValidationError::missing(entity, field));
    }
    Ok(())
}

//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with a value. Its `Display` form is the
//! three-line pass_persist reply body.

use crate::oid::Oid;
use crate::value::{TypeKeyword, Value};

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VarBind {
    /// The object identifier.
    pub oid: Oid,
    /// The value.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Type keyword of the bound value.
    pub fn type_keyword(&self) -> TypeKeyword {
        self.value.type_keyword()
    }
}

impl std::fmt::Display for VarBind {
    /// Writes `<oid>\n<TYPE>\n<value>` without a trailing newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}\n{}", self.oid, self.type_keyword(), self.value)
    }
}

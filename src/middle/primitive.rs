use strum::{Display, EnumIter, EnumString};

use crate::frontend::ast::TypeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    Int,
    Float,
    Boolean,
    String,
    /// Matches every other type in compatibility checks
    Any,
}

impl From<TypeName> for PrimitiveKind {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Int => Self::Int,
            TypeName::Float => Self::Float,
            TypeName::Bool => Self::Boolean,
            TypeName::String => Self::String,
            TypeName::Any => Self::Any,
        }
    }
}

impl PrimitiveKind {
    pub fn is_numeric(self) -> bool {
        match self {
            PrimitiveKind::Int | PrimitiveKind::Float => true,
            PrimitiveKind::Boolean | PrimitiveKind::String | PrimitiveKind::Any => false,
        }
    }

    /// Scalars can not be subscripted
    pub fn is_scalar(self) -> bool {
        match self {
            PrimitiveKind::Int | PrimitiveKind::Float | PrimitiveKind::Boolean => true,
            PrimitiveKind::String | PrimitiveKind::Any => false,
        }
    }
}

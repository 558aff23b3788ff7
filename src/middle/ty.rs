use itertools::Itertools;

use crate::middle::primitive::PrimitiveKind;

/// Unions with more distinct members than this degrade to `any`
pub const MAX_UNION_MEMBERS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// int, float, boolean, string, any
    Primitive(PrimitiveKind),
    /// [T]
    Array(Box<Type>),
    /// (T, U) -> V
    Function(FunctionType),
    /// T | U
    ///
    /// Never nested and never a single member. Build through [`Type::union`].
    Union(UnionType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn new(params: Vec<Type>, return_type: Type) -> Self {
        Self {
            params,
            return_type: Box::new(return_type),
        }
    }
}

/// A flat, deduplicated set of 2 to [`MAX_UNION_MEMBERS`] types. Members keep
/// the order they were first encountered in but equality ignores it.
#[derive(Debug, Clone)]
pub struct UnionType {
    members: Vec<Type>,
}

impl UnionType {
    pub fn members(&self) -> &[Type] {
        &self.members
    }
}

impl PartialEq for UnionType {
    fn eq(&self, other: &Self) -> bool {
        self.members.len() == other.members.len()
            && self.members.iter().all(|m| other.members.contains(m))
    }
}

impl Type {
    pub const INT: Type = Type::Primitive(PrimitiveKind::Int);
    pub const FLOAT: Type = Type::Primitive(PrimitiveKind::Float);
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveKind::Boolean);
    pub const STRING: Type = Type::Primitive(PrimitiveKind::String);
    pub const ANY: Type = Type::Primitive(PrimitiveKind::Any);

    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn function(params: Vec<Type>, return_type: Type) -> Self {
        Type::Function(FunctionType::new(params, return_type))
    }

    /// Builds the union of the candidate types. Duplicates are removed, a
    /// single distinct type is returned as is, and more than
    /// [`MAX_UNION_MEMBERS`] distinct types fall back to `any`.
    pub fn union(types: impl IntoIterator<Item = Type>) -> Self {
        let mut members = flatten_union(types);

        match members.len() {
            0 => Type::ANY,
            1 => members.remove(0),
            n if n > MAX_UNION_MEMBERS => Type::ANY,
            _ => Type::Union(UnionType { members }),
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Type::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveKind::Any))
    }

    pub fn is_numeric(&self) -> bool {
        self.primitive().is_some_and(PrimitiveKind::is_numeric)
    }

    pub fn is_scalar(&self) -> bool {
        self.primitive().is_some_and(PrimitiveKind::is_scalar)
    }

    /// Equality with `any` acting as a wildcard on either side
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self.is_any() || other.is_any() || self == other
    }

    /// The element type of an array, `any` for everything else
    pub fn element_type(&self) -> Type {
        match self {
            Type::Array(element) => (**element).clone(),
            _ => Type::ANY,
        }
    }
}

/// The common numeric type of two operands: `t1` when both are equal, `float`
/// when one is `int` and the other `float`, otherwise nothing.
pub fn promote(t1: &Type, t2: &Type) -> Option<Type> {
    if t1 == t2 {
        return Some(t1.clone());
    }

    match (t1.primitive()?, t2.primitive()?) {
        (PrimitiveKind::Int, PrimitiveKind::Float) | (PrimitiveKind::Float, PrimitiveKind::Int) => {
            Some(Type::FLOAT)
        }
        _ => None,
    }
}

/// Expands nested unions into a flat list with duplicates removed, keeping
/// the first occurrence of every type.
pub fn flatten_union(types: impl IntoIterator<Item = Type>) -> Vec<Type> {
    fn push_flat(flat: &mut Vec<Type>, ty: Type) {
        match ty {
            Type::Union(union) => {
                for member in union.members {
                    push_flat(flat, member);
                }
            }
            ty => {
                if !flat.contains(&ty) {
                    flat.push(ty);
                }
            }
        }
    }

    let mut flat = Vec::new();

    for ty in types {
        push_flat(&mut flat, ty);
    }

    flat
}

impl core::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(kind) => write!(f, "{kind}"),
            Type::Array(element) => write!(f, "[{element}]"),
            Type::Function(function) => write!(f, "{function}"),
            Type::Union(union) => write!(f, "{}", union.members.iter().join(" | ")),
        }
    }
}

impl core::fmt::Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}) -> {}",
            self.params.iter().join(", "),
            self.return_type
        )
    }
}

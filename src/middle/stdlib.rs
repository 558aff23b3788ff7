//! The frozen standard library every compilation starts from

use std::sync::Arc;

use once_cell::sync::Lazy;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::middle::{
    entity::{Entity, Function, Variable},
    ty::{FunctionType, Type},
};

/// Built once and shared read-only by every compilation. Each root
/// [`Context`](super::context::Context) copies its bindings.
pub static STANDARD_LIBRARY: Lazy<StandardLibrary> = Lazy::new(StandardLibrary::new);

/// Name of the variadic diagnostic print built in
pub const RAISE: &str = "raise";

/// Built in functions which lower to operators instead of calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Intrinsic {
    Sqrt,
    Sin,
    Cos,
    Exp,
    Ln,
    Hypot,
    Max,
    Min,
    Abs,
    Bytes,
    Codepoints,
}

impl Intrinsic {
    pub fn ty(self) -> FunctionType {
        match self {
            Intrinsic::Sqrt
            | Intrinsic::Sin
            | Intrinsic::Cos
            | Intrinsic::Exp
            | Intrinsic::Ln
            | Intrinsic::Abs => FunctionType::new(vec![Type::FLOAT], Type::FLOAT),
            Intrinsic::Hypot | Intrinsic::Max | Intrinsic::Min => {
                FunctionType::new(vec![Type::FLOAT, Type::FLOAT], Type::FLOAT)
            }
            Intrinsic::Bytes | Intrinsic::Codepoints => {
                FunctionType::new(vec![Type::STRING], Type::array(Type::INT))
            }
        }
    }

    /// Math intrinsics reject non numeric arguments
    pub fn requires_numeric_arguments(self) -> bool {
        match self {
            Intrinsic::Sqrt
            | Intrinsic::Sin
            | Intrinsic::Cos
            | Intrinsic::Exp
            | Intrinsic::Ln
            | Intrinsic::Hypot
            | Intrinsic::Max
            | Intrinsic::Min
            | Intrinsic::Abs => true,
            Intrinsic::Bytes | Intrinsic::Codepoints => false,
        }
    }
}

#[derive(Debug)]
pub struct StandardLibrary {
    bindings: Vec<(String, Entity)>,
}

impl StandardLibrary {
    fn new() -> Self {
        let mut bindings = vec![
            constant("π", Type::FLOAT),
            constant("E", Type::FLOAT),
        ];

        for intrinsic in Intrinsic::iter() {
            let name = intrinsic.to_string();
            let function = Function::intrinsic(name.clone(), intrinsic.ty());
            bindings.push((name, Entity::Function(Arc::new(function))));
        }

        bindings.push((
            RAISE.to_string(),
            Entity::Function(Arc::new(Function::variadic_intrinsic(RAISE, Type::ANY))),
        ));

        Self { bindings }
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.bindings
            .iter()
            .map(|(name, entity)| (name.as_str(), entity))
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.bindings()
            .find(|(n, _)| *n == name)
            .map(|(_, entity)| entity)
    }
}

fn constant(name: &str, ty: Type) -> (String, Entity) {
    (
        name.to_string(),
        Entity::Variable(Arc::new(Variable::read_only(name, ty))),
    )
}

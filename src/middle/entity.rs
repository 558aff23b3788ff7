//! Named things which can be bound in a [`Context`](super::context::Context)
//!
//! Entities are shared between the scope chain and every IR node that
//! references them, so they live behind an [`Arc`]. Two references denote the
//! same entity exactly when they point at the same allocation.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::middle::ty::{FunctionType, Type};

#[derive(Debug, Clone)]
pub enum Entity {
    Variable(Arc<Variable>),
    Function(Arc<Function>),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Variable(variable) => &variable.name,
            Entity::Function(function) => &function.name,
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Entity::Variable(variable) => variable.ty.clone(),
            Entity::Function(function) => Type::Function(function.ty()),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub mutable: bool,
    pub ty: Type,
    /// Declared with `all in`. Always immutable.
    pub is_constant: bool,
}

impl Variable {
    /// `hand` bindings and loop iterators
    pub fn mutable(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            mutable: true,
            ty,
            is_constant: false,
        }
    }

    /// Function parameters and built in constants
    pub fn read_only(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            mutable: false,
            ty,
            is_constant: false,
        }
    }

    /// `all in` bindings
    pub fn constant(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            mutable: false,
            ty,
            is_constant: true,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Function {
    pub name: String,
    /// Empty for intrinsics, their arity comes from their type
    pub params: Vec<Arc<Variable>>,
    /// Implemented natively by the target runtime, has no body
    pub intrinsic: bool,
    /// Accepts any number of arguments (only `raise`)
    pub variadic: bool,
    return_annotation: Option<Type>,
    /// Set once the body has been analyzed and the return type reconciled
    resolved_type: OnceCell<FunctionType>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Arc<Variable>>,
        return_annotation: Option<Type>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            intrinsic: false,
            variadic: false,
            return_annotation,
            resolved_type: OnceCell::new(),
        }
    }

    pub fn intrinsic(name: impl Into<String>, ty: FunctionType) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            intrinsic: true,
            variadic: false,
            return_annotation: None,
            resolved_type: OnceCell::with_value(ty),
        }
    }

    pub fn variadic_intrinsic(name: impl Into<String>, return_type: Type) -> Self {
        Self {
            variadic: true,
            ..Self::intrinsic(name, FunctionType::new(Vec::new(), return_type))
        }
    }

    pub fn return_annotation(&self) -> Option<&Type> {
        self.return_annotation.as_ref()
    }

    /// The function's type. Before the body has been analyzed the return type
    /// is the annotation, or `any` without one.
    pub fn ty(&self) -> FunctionType {
        match self.resolved_type.get() {
            Some(ty) => ty.clone(),
            None => FunctionType::new(
                self.params.iter().map(|p| p.ty.clone()).collect(),
                self.return_annotation.clone().unwrap_or(Type::ANY),
            ),
        }
    }

    pub fn return_type(&self) -> Type {
        *self.ty().return_type
    }

    /// Number of arguments a call must pass
    pub fn arity(&self) -> usize {
        if self.intrinsic {
            self.ty().params.len()
        } else {
            self.params.len()
        }
    }

    pub(crate) fn resolve_return_type(&self, return_type: Type) {
        let ty = FunctionType::new(
            self.params.iter().map(|p| p.ty.clone()).collect(),
            return_type,
        );

        // Function entities are only ever resolved by the declaration that
        // created them
        let resolved = self.resolved_type.set(ty);
        debug_assert!(resolved.is_ok(), "{} resolved twice", self.name);
    }
}

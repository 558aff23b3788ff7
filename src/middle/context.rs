use hashbrown::HashMap;

use crate::middle::{entity::Entity, stdlib::StandardLibrary};

/// A lexical scope frame
///
/// Frames form a singly linked chain through borrowed parent references. A
/// child frame borrows its parent for as long as it lives, so the parent is
/// the current scope again as soon as the child is dropped, whichever way the
/// analysis of the enclosed block ends. The loop and function nesting depths
/// travel with the frames for the same reason.
#[derive(Debug)]
pub struct Context<'parent> {
    locals: HashMap<String, Entity>,
    parent: Option<&'parent Context<'parent>>,
    loop_depth: u32,
    function_depth: u32,
}

impl Context<'static> {
    /// The outermost frame, holding only the standard library. Program level
    /// declarations go into a child of this frame so they may shadow built
    /// ins.
    pub fn root(standard_library: &StandardLibrary) -> Self {
        Self {
            locals: standard_library
                .bindings()
                .map(|(name, entity)| (name.to_string(), entity.clone()))
                .collect(),
            parent: None,
            loop_depth: 0,
            function_depth: 0,
        }
    }
}

impl<'parent> Context<'parent> {
    /// Looks for a binding only within this frame
    pub fn has(&self, name: &str) -> bool {
        self.locals.contains_key(name)
    }

    /// Walks the chain from this frame outwards looking for a binding
    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        let mut scope = Some(self);

        while let Some(frame) = scope {
            if let Some(entity) = frame.locals.get(name) {
                return Some(entity);
            }

            scope = frame.parent;
        }

        None
    }

    /// Binds a name in this frame, replacing any binding it already had
    pub fn add(&mut self, name: impl Into<String>, entity: Entity) {
        self.locals.insert(name.into(), entity);
    }

    pub fn new_child(&self) -> Context<'_> {
        Context {
            locals: HashMap::new(),
            parent: Some(self),
            loop_depth: self.loop_depth,
            function_depth: self.function_depth,
        }
    }

    /// A child frame for the body of a loop
    pub fn new_loop_scope(&self) -> Context<'_> {
        let mut child = self.new_child();
        child.loop_depth += 1;
        child
    }

    /// A child frame for the body of a function
    pub fn new_function_scope(&self) -> Context<'_> {
        let mut child = self.new_child();
        child.function_depth += 1;
        child
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }

    pub fn in_function(&self) -> bool {
        self.function_depth > 0
    }
}

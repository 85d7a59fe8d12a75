use crate::ast::{ClassDeclaration, Declaration};

/// Read-only view of the host program's declarations.
///
/// The generator never learns how the host discovered or resolved symbols;
/// it only asks one question per run.
pub trait DeclarationModel {
    /// Class-like declarations carrying at least one annotation with the
    /// given simple name, in model order. Annotated declarations that are
    /// not class-like are silently dropped.
    fn annotated_with(&self, simple_name: &str) -> Vec<&ClassDeclaration>;
}

/// Declaration model backed by an in-memory declaration list
#[derive(Debug, Default)]
pub struct InMemoryModel {
    declarations: Vec<Declaration>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    pub fn add(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn add_class(&mut self, class: ClassDeclaration) {
        self.declarations.push(Declaration::Class(class));
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }
}

impl DeclarationModel for InMemoryModel {
    fn annotated_with(&self, simple_name: &str) -> Vec<&ClassDeclaration> {
        self.declarations
            .iter()
            .filter(|decl| decl.annotations().iter().any(|a| a.name == simple_name))
            .filter_map(|decl| decl.as_class())
            .collect()
    }
}

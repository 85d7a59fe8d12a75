pub mod ast;
pub mod model;
pub mod output;

pub use ast::{
    Annotation, Argument, ClassDeclaration, ClassKind, Declaration, FunctionDeclaration,
    Nullability, Property, ResolvedType, Span, TypeArgument, TypeReference, Value, Variance,
};
pub use model::{DeclarationModel, InMemoryModel};
pub use output::{DiskTarget, Emitter, GeneratedFile, MemoryTarget, OutputTarget};

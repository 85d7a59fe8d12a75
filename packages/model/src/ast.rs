use serde::{Deserialize, Serialize};

/// Span information for source location tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub id: String,
}

impl Span {
    pub fn new(start: usize, end: usize, id: String) -> Self {
        Self { start, end, id }
    }
}

/// Top-level declaration as seen by the host compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Declaration {
    /// Class-like declaration (class, interface, object, enum, annotation)
    Class(ClassDeclaration),

    /// Top-level function; may carry annotations but is never class-like
    Function(FunctionDeclaration),
}

impl Declaration {
    /// The class-like view of this declaration, if it has one
    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match self {
            Declaration::Class(class) => Some(class),
            Declaration::Function(_) => None,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Declaration::Class(class) => &class.annotations,
            Declaration::Function(function) => &function.annotations,
        }
    }
}

/// Kind of a class-like declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
}

/// Class-like declaration: a qualified name, its kind, attached annotations,
/// member properties and the supertype chain they may be inherited through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// Fully qualified name, dot-separated
    pub name: String,
    pub kind: ClassKind,
    pub annotations: Vec<Annotation>,
    pub properties: Vec<Property>,
    pub supertypes: Vec<ClassDeclaration>,
    pub span: Span,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>, kind: ClassKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            annotations: Vec::new(),
            properties: Vec::new(),
            supertypes: Vec::new(),
            span,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_supertype(mut self, supertype: ClassDeclaration) -> Self {
        self.supertypes.push(supertype);
        self
    }

    /// Last segment of the qualified name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// First attached annotation whose simple name matches
    pub fn annotation(&self, simple_name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == simple_name)
    }

    /// All member properties: own first, then the flattened supertype chain,
    /// in declaration order.
    pub fn all_properties(&self) -> Vec<&Property> {
        let mut properties: Vec<&Property> = self.properties.iter().collect();
        for supertype in &self.supertypes {
            properties.extend(supertype.all_properties());
        }
        properties
    }

    /// True iff every member property's type reference is fully resolved.
    /// Declarations failing this need another generation round.
    pub fn validate(&self) -> bool {
        self.all_properties().iter().all(|p| p.validate())
    }
}

/// Top-level function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub span: Span,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            span,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Annotation instance attached to a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Simple name of the annotation class
    pub name: String,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

impl Annotation {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            span,
        }
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// First argument with the given name
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|arg| arg.name.as_deref() == Some(name))
    }
}

/// Named or positional annotation argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Value,
}

impl Argument {
    pub fn named(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    pub fn positional(value: Value) -> Self {
        Self { name: None, value }
    }
}

/// Annotation argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Value {
    String { value: String },
    Int { value: i64 },
    Float { value: f64 },
    Bool { value: bool },
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String { value } => Some(value),
            _ => None,
        }
    }
}

/// Member property of a class-like declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub ty: TypeReference,
    pub span: Span,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeReference, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            span,
        }
    }

    /// True iff the property's type reference is fully resolved,
    /// recursively through nested type arguments.
    pub fn validate(&self) -> bool {
        self.ty.is_fully_resolved()
    }
}

/// Type reference: resolved to a declaration, or still pending resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum TypeReference {
    Resolved(ResolvedType),
    Unresolved { name: String },
}

impl TypeReference {
    pub fn resolve(&self) -> Option<&ResolvedType> {
        match self {
            TypeReference::Resolved(resolved) => Some(resolved),
            TypeReference::Unresolved { .. } => None,
        }
    }

    pub fn is_fully_resolved(&self) -> bool {
        match self {
            TypeReference::Resolved(resolved) => resolved
                .arguments
                .iter()
                .all(|arg| arg.is_fully_resolved()),
            TypeReference::Unresolved { .. } => false,
        }
    }
}

/// Resolved type: declaration identity, nullability and type arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedType {
    /// Fully qualified name of the declaration this type resolves to
    pub name: String,
    pub nullability: Nullability,
    pub arguments: Vec<TypeArgument>,
}

impl ResolvedType {
    pub fn new(name: impl Into<String>, nullability: Nullability) -> Self {
        Self {
            name: name.into(),
            nullability,
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: TypeArgument) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// One generic type argument with its variance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeArgument {
    pub variance: Variance,
    /// Absent for star projections
    pub ty: Option<TypeReference>,
    pub span: Span,
}

impl TypeArgument {
    pub fn new(variance: Variance, ty: Option<TypeReference>, span: Span) -> Self {
        Self { variance, ty, span }
    }

    pub fn invariant(ty: TypeReference, span: Span) -> Self {
        Self::new(Variance::Invariant, Some(ty), span)
    }

    pub fn star(span: Span) -> Self {
        Self::new(Variance::Star, None, span)
    }

    pub fn is_fully_resolved(&self) -> bool {
        match (&self.variance, &self.ty) {
            (Variance::Star, _) => true,
            (_, Some(ty)) => ty.is_fully_resolved(),
            (_, None) => false,
        }
    }
}

/// Variance of a generic type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variance {
    Invariant,
    Covariant,
    Contravariant,
    Star,
}

impl Variance {
    /// Source keyword for the directed variances
    pub fn label(&self) -> &'static str {
        match self {
            Variance::Covariant => "out",
            Variance::Contravariant => "in",
            Variance::Invariant | Variance::Star => "",
        }
    }
}

/// Nullability of a resolved type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nullability {
    Nullable,
    NotNullable,
    /// Nullability undetermined by the host platform; rendered like
    /// `NotNullable`.
    Platform,
}

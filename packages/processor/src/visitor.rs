use crate::diagnostic::Diagnostic;
use crate::error::{GenError, GenResult};
use crate::processor::{NAME_ARGUMENT, TRIGGER_ANNOTATION};
use funcgen_model::ast::{
    ClassDeclaration, ClassKind, Nullability, Property, Span, TypeArgument, Variance,
};
use funcgen_model::output::Emitter;
use tracing::error;

/// Visitor converting one annotated declaration into a generated
/// function block on the shared output stream.
///
/// The emitter is borrowed per visit; there is no buffering and no rollback
/// of partially written text. The interface precondition is checked before
/// any text for that declaration is emitted, so rejections are clean.
pub struct FunctionVisitor<'a> {
    out: &'a mut dyn Emitter,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> FunctionVisitor<'a> {
    pub fn new(out: &'a mut dyn Emitter, diagnostics: &'a mut Vec<Diagnostic>) -> Self {
        Self { out, diagnostics }
    }

    fn report_error(&mut self, message: &str, span: &Span) {
        error!(node = %span.id, "{}", message);
        self.diagnostics.push(Diagnostic::error(message, span.clone()));
    }

    /// Visit one candidate declaration and emit a complete function block,
    /// or reject it with a diagnostic and emit nothing.
    pub fn visit_class(&mut self, class: &ClassDeclaration) -> GenResult<()> {
        if class.kind != ClassKind::Interface {
            self.report_error("Only interface can be annotated with @Function", &class.span);
            return Ok(());
        }

        // The @Function annotation object (first match).
        let annotation = class
            .annotation(TRIGGER_ANNOTATION)
            .ok_or_else(|| GenError::missing_annotation(&class.name, TRIGGER_ANNOTATION))?;

        // The 'name' argument and its text value: the generated function's
        // identifier. A missing or empty value is never substituted.
        let argument = annotation.argument(NAME_ARGUMENT).ok_or_else(|| {
            GenError::missing_argument(&class.name, TRIGGER_ANNOTATION, NAME_ARGUMENT)
        })?;
        let function_name = argument
            .value
            .as_str()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| GenError::invalid_argument(&class.name, NAME_ARGUMENT))?;

        // Member properties, flattened across the supertype chain; only
        // those that validate participate in the signature.
        let properties: Vec<&Property> = class
            .all_properties()
            .into_iter()
            .filter(|property| property.validate())
            .collect();

        self.out.append("\n");
        if !properties.is_empty() {
            self.out.append(&format!("fun {function_name}(\n"));

            for property in &properties {
                self.visit_property(property);
            }
            self.out.append(") {\n");
        } else {
            self.out.append(&format!("fun {function_name}() {{\n"));
        }

        self.out
            .append(&format!("    println(\"Hello from {function_name}\")\n"));
        self.out.append("}\n");

        Ok(())
    }

    /// Per-property emission.
    ///
    /// TODO: translate the property into a `name: Type` parameter line,
    /// rendering the generic payload through `visit_type_argument`. Until
    /// then a property only selects the multi-line header form.
    pub fn visit_property(&mut self, _property: &Property) {}

    /// Render one generic type argument: variance prefix, qualified name,
    /// nested arguments, nullability suffix.
    pub fn visit_type_argument(&mut self, argument: &TypeArgument) {
        match argument.variance {
            Variance::Star => {
                // No type payload follows a star projection.
                self.out.append("*");
                return;
            }
            Variance::Covariant | Variance::Contravariant => {
                self.out.append(argument.variance.label());
                self.out.append(" ");
            }
            Variance::Invariant => {}
        }

        let resolved = match argument.ty.as_ref().and_then(|ty| ty.resolve()) {
            Some(resolved) => resolved,
            None => {
                // Any variance prefix already written stays in the stream.
                self.report_error("Invalid type argument", &argument.span);
                return;
            }
        };

        self.out.append(&resolved.name);
        self.visit_type_arguments(&resolved.arguments);

        if resolved.nullability == Nullability::Nullable {
            self.out.append("?");
        }
    }

    fn visit_type_arguments(&mut self, arguments: &[TypeArgument]) {
        if arguments.is_empty() {
            return;
        }

        self.out.append("<");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.out.append(", ");
            }
            self.visit_type_argument(argument);
        }
        self.out.append(">");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funcgen_model::ast::{Annotation, Argument, ResolvedType, TypeReference, Value};

    fn span() -> Span {
        Span::new(0, 0, "test".to_string())
    }

    fn render(argument: &TypeArgument) -> (String, Vec<Diagnostic>) {
        let mut out = String::new();
        let mut diagnostics = Vec::new();
        let mut visitor = FunctionVisitor::new(&mut out, &mut diagnostics);
        visitor.visit_type_argument(argument);
        (out, diagnostics)
    }

    fn list_of(argument: TypeArgument) -> TypeArgument {
        TypeArgument::invariant(
            TypeReference::Resolved(
                ResolvedType::new("kotlin.collections.List", Nullability::NotNullable)
                    .with_argument(argument),
            ),
            span(),
        )
    }

    #[test]
    fn test_renders_nested_invariant_argument() {
        let argument = list_of(TypeArgument::invariant(
            TypeReference::Resolved(ResolvedType::new("kotlin.String", Nullability::NotNullable)),
            span(),
        ));

        let (out, diagnostics) = render(&argument);
        assert_eq!(out, "kotlin.collections.List<kotlin.String>");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_renders_covariant_argument_with_out_keyword() {
        let argument = list_of(TypeArgument::new(
            Variance::Covariant,
            Some(TypeReference::Resolved(ResolvedType::new(
                "kotlin.Number",
                Nullability::NotNullable,
            ))),
            span(),
        ));

        let (out, _) = render(&argument);
        assert_eq!(out, "kotlin.collections.List<out kotlin.Number>");
    }

    #[test]
    fn test_renders_contravariant_argument_with_in_keyword() {
        let argument = list_of(TypeArgument::new(
            Variance::Contravariant,
            Some(TypeReference::Resolved(ResolvedType::new(
                "kotlin.Number",
                Nullability::NotNullable,
            ))),
            span(),
        ));

        let (out, _) = render(&argument);
        assert_eq!(out, "kotlin.collections.List<in kotlin.Number>");
    }

    #[test]
    fn test_star_projection_emits_no_payload() {
        let argument = list_of(TypeArgument::star(span()));

        let (out, diagnostics) = render(&argument);
        assert_eq!(out, "kotlin.collections.List<*>");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_nullable_argument_gets_question_mark_suffix() {
        let argument = list_of(TypeArgument::invariant(
            TypeReference::Resolved(ResolvedType::new("kotlin.String", Nullability::Nullable)),
            span(),
        ));

        let (out, _) = render(&argument);
        assert_eq!(out, "kotlin.collections.List<kotlin.String?>");
    }

    #[test]
    fn test_platform_nullability_renders_like_not_nullable() {
        let argument = list_of(TypeArgument::invariant(
            TypeReference::Resolved(ResolvedType::new("kotlin.String", Nullability::Platform)),
            span(),
        ));

        let (out, _) = render(&argument);
        assert_eq!(out, "kotlin.collections.List<kotlin.String>");
    }

    #[test]
    fn test_unresolved_argument_leaves_variance_prefix_in_place() {
        // The prefix already written for the failing argument is not
        // retracted, leaving a syntactically incomplete signature.
        let argument = list_of(TypeArgument::new(
            Variance::Covariant,
            Some(TypeReference::Unresolved {
                name: "Missing".to_string(),
            }),
            span(),
        ));

        let (out, diagnostics) = render(&argument);
        assert_eq!(out, "kotlin.collections.List<out ");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Invalid type argument");
    }

    #[test]
    fn test_comma_space_between_sibling_arguments() {
        let argument = TypeArgument::invariant(
            TypeReference::Resolved(
                ResolvedType::new("kotlin.collections.Map", Nullability::NotNullable)
                    .with_argument(TypeArgument::invariant(
                        TypeReference::Resolved(ResolvedType::new(
                            "kotlin.String",
                            Nullability::NotNullable,
                        )),
                        span(),
                    ))
                    .with_argument(TypeArgument::invariant(
                        TypeReference::Resolved(ResolvedType::new(
                            "kotlin.Int",
                            Nullability::NotNullable,
                        )),
                        span(),
                    )),
            ),
            span(),
        );

        let (out, _) = render(&argument);
        assert_eq!(out, "kotlin.collections.Map<kotlin.String, kotlin.Int>");
    }

    #[test]
    fn test_non_interface_is_rejected_before_any_output() {
        let class = ClassDeclaration::new("com.example.NotAnInterface", ClassKind::Class, span())
            .with_annotation(
                Annotation::new("Function", span())
                    .with_argument(Argument::named("name", Value::string("Nope"))),
            );

        let mut out = String::new();
        let mut diagnostics = Vec::new();
        let mut visitor = FunctionVisitor::new(&mut out, &mut diagnostics);
        visitor.visit_class(&class).unwrap();

        assert!(out.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Only interface can be annotated with @Function"
        );
    }

    #[test]
    fn test_missing_name_argument_is_an_error() {
        let class = ClassDeclaration::new("com.example.Nameless", ClassKind::Interface, span())
            .with_annotation(Annotation::new("Function", span()));

        let mut out = String::new();
        let mut diagnostics = Vec::new();
        let mut visitor = FunctionVisitor::new(&mut out, &mut diagnostics);

        let err = visitor.visit_class(&class).unwrap_err();
        assert!(matches!(err, GenError::MissingArgument { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_name_argument_is_an_error() {
        let class = ClassDeclaration::new("com.example.Empty", ClassKind::Interface, span())
            .with_annotation(
                Annotation::new("Function", span())
                    .with_argument(Argument::named("name", Value::string(""))),
            );

        let mut out = String::new();
        let mut diagnostics = Vec::new();
        let mut visitor = FunctionVisitor::new(&mut out, &mut diagnostics);

        let err = visitor.visit_class(&class).unwrap_err();
        assert!(matches!(err, GenError::InvalidArgument { .. }));
        assert!(out.is_empty());
    }
}

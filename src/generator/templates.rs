use askama::Template;

use super::RenderStrategy;
use crate::error::FoggoError;
use crate::parser::FieldDescriptor;

/// First line of every generated file, recognised by Go tooling as the
/// generated-code marker.
pub const GENERATED_HEADER: &str = "// Code generated by foggo; DO NOT EDIT.";

/// Per-field values the option templates interpolate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionField {
    /// Field name as declared
    pub name: String,
    /// Field name with its first character upper-cased
    pub exported: String,
    /// Parameter name used by `With<Field>`
    pub param: String,
    /// Type expression, verbatim
    pub ty: String,
    /// Name of the per-field option type (interface style)
    pub option_type: String,
    /// Composite literal building the per-field option (interface style)
    pub literal: String,
}

impl OptionField {
    /// Template view of an included field of `struct_name`
    pub fn new(struct_name: &str, field: &FieldDescriptor) -> Self {
        let exported = export_name(&field.name);
        // `args` is the closure receiver in the closure templates
        let param = if field.name == "args" {
            "arg".to_string()
        } else {
            field.name.clone()
        };
        let option_type = format!("{struct_name}{exported}Option");
        let literal = format!("{option_type}{{{}: {param}}}", field.name);
        OptionField {
            name: field.name.clone(),
            exported,
            param,
            ty: field.ty.clone(),
            option_type,
            literal,
        }
    }
}

/// Closure options plus a `New<Struct>` constructor
#[derive(Template)]
#[template(path = "fop.go.txt", escape = "none")]
pub struct FopTemplateData<'a> {
    pub header: &'a str,
    pub package_name: &'a str,
    pub struct_name: &'a str,
    pub fields: &'a [OptionField],
}

/// Closure options only
#[derive(Template)]
#[template(path = "fop_without_new.go.txt", escape = "none")]
pub struct FopWithoutNewTemplateData<'a> {
    pub header: &'a str,
    pub package_name: &'a str,
    pub struct_name: &'a str,
    pub fields: &'a [OptionField],
}

/// Per-field option types behind an `apply` interface, plus a constructor
#[derive(Template)]
#[template(path = "afop.go.txt", escape = "none")]
pub struct AfopTemplateData<'a> {
    pub header: &'a str,
    pub package_name: &'a str,
    pub struct_name: &'a str,
    pub fields: &'a [OptionField],
}

/// Per-field option types only
#[derive(Template)]
#[template(path = "afop_without_new.go.txt", escape = "none")]
pub struct AfopWithoutNewTemplateData<'a> {
    pub header: &'a str,
    pub package_name: &'a str,
    pub struct_name: &'a str,
    pub fields: &'a [OptionField],
}

/// Render `strategy` for the included fields of `struct_name`
///
/// Excluded descriptors are dropped here; they never reach a template.
/// The result always ends with exactly one newline.
///
/// # Errors
///
/// Returns `FoggoError::Format` if template expansion fails.
pub fn render(
    strategy: RenderStrategy,
    package_name: &str,
    struct_name: &str,
    fields: &[FieldDescriptor],
) -> Result<String, FoggoError> {
    let fields: Vec<OptionField> = fields
        .iter()
        .filter(|f| !f.excluded)
        .map(|f| OptionField::new(struct_name, f))
        .collect();
    let header = GENERATED_HEADER;
    let fields = fields.as_slice();

    let rendered = match strategy {
        RenderStrategy::ClosureWithConstructor => FopTemplateData {
            header,
            package_name,
            struct_name,
            fields,
        }
        .render(),
        RenderStrategy::Closure => FopWithoutNewTemplateData {
            header,
            package_name,
            struct_name,
            fields,
        }
        .render(),
        RenderStrategy::InterfaceWithConstructor => AfopTemplateData {
            header,
            package_name,
            struct_name,
            fields,
        }
        .render(),
        RenderStrategy::Interface => AfopWithoutNewTemplateData {
            header,
            package_name,
            struct_name,
            fields,
        }
        .render(),
    }
    .map_err(|e| FoggoError::Format(format!("template expansion failed: {e}")))?;

    let mut code = rendered.trim_end().to_string();
    code.push('\n');
    Ok(code)
}

/// Upper-case the first character of a Go identifier
pub fn export_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

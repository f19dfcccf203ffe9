use tracing::{debug, warn};
use tree_sitter::Node;

use super::package::GoFile;
use super::tag::{unquote_tag, ExclusionMarker};
use crate::error::FoggoError;

/// One struct field considered for option generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier as declared
    pub name: String,
    /// Type expression, verbatim from source
    pub ty: String,
    /// Whether the field must not receive an option
    pub excluded: bool,
}

impl FieldDescriptor {
    /// An included field
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            ty: ty.into(),
            excluded: false,
        }
    }

    /// The same field, marked excluded
    pub fn excluded(self) -> Self {
        FieldDescriptor {
            excluded: true,
            ..self
        }
    }
}

/// Find the struct named `struct_name` and describe its fields.
///
/// Files are searched in order and the first top-level declaration wins.
/// Returns the descriptors in declaration order together with the index of
/// the file that declared the struct.
///
/// # Errors
///
/// - `FoggoError::StructNotFound` when no file declares a struct with that name
/// - `FoggoError::GenericStruct` when the struct declares type parameters
pub fn collect_fields(
    struct_name: &str,
    files: &[GoFile],
    marker: &ExclusionMarker,
) -> Result<(Vec<FieldDescriptor>, usize), FoggoError> {
    for (index, file) in files.iter().enumerate() {
        let Some(spec) = find_struct_spec(file, struct_name) else {
            continue;
        };
        if spec.child_by_field_name("type_parameters").is_some() {
            return Err(FoggoError::GenericStruct {
                name: struct_name.to_string(),
            });
        }
        let fields = spec
            .child_by_field_name("type")
            .and_then(|ty| first_child_of_kind(ty, "field_declaration_list"))
            .map(|list| describe_field_list(file, list, marker))
            .unwrap_or_default();
        debug!(
            struct_name,
            file_index = index,
            fields = fields.len(),
            "collected struct fields"
        );
        return Ok((fields, index));
    }
    Err(FoggoError::StructNotFound {
        name: struct_name.to_string(),
    })
}

/// The `type_spec` declaring `name` as a struct at the top level of `file`
fn find_struct_spec<'t>(file: &'t GoFile, name: &str) -> Option<Node<'t>> {
    let root = file.root();
    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor) {
        if decl.kind() != "type_declaration" {
            continue;
        }
        let mut spec_cursor = decl.walk();
        for spec in decl.named_children(&mut spec_cursor) {
            if spec.kind() != "type_spec" {
                continue;
            }
            let declared = spec.child_by_field_name("name").map(|n| file.text(n));
            let is_struct = spec
                .child_by_field_name("type")
                .is_some_and(|ty| ty.kind() == "struct_type");
            if declared == Some(name) && is_struct {
                return Some(spec);
            }
        }
    }
    None
}

fn first_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|n| n.kind() == kind);
    found
}

fn describe_field_list(
    file: &GoFile,
    list: Node<'_>,
    marker: &ExclusionMarker,
) -> Vec<FieldDescriptor> {
    let mut cursor = list.walk();
    let children: Vec<Node<'_>> = list.named_children(&mut cursor).collect();

    let mut fields = Vec::new();
    for (i, decl) in children.iter().enumerate() {
        if decl.kind() != "field_declaration" {
            continue;
        }
        let comments = field_comments(file, list, &children, i);
        fields.extend(describe_field(file, *decl, &comments, marker));
    }
    fields
}

/// Comments attached to the field declaration at `children[i]`: the doc
/// block directly above it, any comment inside it, and a trailing comment on
/// its last line.
///
/// A comment on the line of the opening `{` belongs to the struct, not to
/// the first field.
fn field_comments<'f>(
    file: &'f GoFile,
    list: Node<'_>,
    children: &[Node<'_>],
    i: usize,
) -> Vec<&'f str> {
    let Some(decl) = children.get(i) else {
        return Vec::new();
    };
    let mut comments = Vec::new();

    let mut next_row = decl.start_position().row;
    for j in (0..i).rev() {
        let Some(comment) = children.get(j) else { break };
        if comment.kind() != "comment"
            || comment.end_position().row + 1 < next_row
            || comment.start_position().row == list.start_position().row
        {
            break;
        }
        // a comment sharing its line with the previous field trails that field
        let trails_previous = j
            .checked_sub(1)
            .and_then(|k| children.get(k))
            .is_some_and(|prev| prev.end_position().row == comment.start_position().row);
        if trails_previous {
            break;
        }
        comments.push(file.text(*comment));
        next_row = comment.start_position().row;
    }

    let mut cursor = decl.walk();
    comments.extend(
        decl.named_children(&mut cursor)
            .filter(|n| n.kind() == "comment")
            .map(|n| file.text(n)),
    );

    if let Some(next) = children.get(i + 1) {
        if next.kind() == "comment" && next.start_position().row == decl.end_position().row {
            comments.push(file.text(*next));
        }
    }
    comments
}

fn describe_field(
    file: &GoFile,
    decl: Node<'_>,
    comments: &[&str],
    marker: &ExclusionMarker,
) -> Vec<FieldDescriptor> {
    let Some(ty_node) = decl.child_by_field_name("type") else {
        warn!(
            line = decl.start_position().row + 1,
            "skipping field declaration without a type"
        );
        return Vec::new();
    };
    let tag = decl
        .child_by_field_name("tag")
        .map(|t| unquote_tag(file.text(t)));
    let excluded = marker.excludes(tag.as_deref(), comments);
    if excluded {
        debug!(line = decl.start_position().row + 1, "field excluded by marker");
    }

    let mut cursor = decl.walk();
    let names: Vec<&str> = decl
        .children_by_field_name("name", &mut cursor)
        .map(|n| file.text(n))
        .collect();

    if names.is_empty() {
        let pointer = decl.children(&mut cursor).any(|c| c.kind() == "*");
        let ty_text = file.text(ty_node);
        let ty = if pointer {
            format!("*{ty_text}")
        } else {
            ty_text.to_string()
        };
        return vec![FieldDescriptor {
            name: embedded_name(file, ty_node).to_string(),
            ty,
            excluded,
        }];
    }

    let ty = file.text(ty_node);
    names
        .into_iter()
        .map(|name| FieldDescriptor {
            name: name.to_string(),
            ty: ty.to_string(),
            excluded: excluded || name == "_",
        })
        .collect()
}

/// Name Go gives an embedded field: the bare type name of `pkg.Name[T]`
///
/// The `*` of an embedded pointer is a sibling token, not part of `ty`.
fn embedded_name<'f>(file: &'f GoFile, ty: Node<'_>) -> &'f str {
    match ty.kind() {
        "qualified_type" => ty
            .child_by_field_name("name")
            .map_or_else(|| file.text(ty), |n| file.text(n)),
        "generic_type" => ty
            .child_by_field_name("type")
            .map_or_else(|| file.text(ty), |n| embedded_name(file, n)),
        _ => file.text(ty),
    }
}

//! Type queries over a parsed declaration file.
//!
//! [`TypeSystem`] plays the role the TypeScript checker plays for the
//! original tooling: resolving named types, looking up properties,
//! enumerating union members, extracting literal values and rendering a
//! type back to display text. Everything downstream goes through this
//! narrow surface, so the extraction logic never touches syntax directly.

use std::collections::HashMap;

use crate::ast::{SourceFile, TypeExpr};

/// Type names that exist without an import in any TypeScript file. A
/// rendered input type outside this list must be referenced through the
/// generated bindings alias.
pub const BUILTIN_TYPES: [&str; 8] = [
    "string",
    "number",
    "boolean",
    "undefined",
    "null",
    "object",
    "symbol",
    "bigint",
];

pub struct TypeSystem<'a> {
    aliases: HashMap<&'a str, &'a TypeExpr>,
}

impl<'a> TypeSystem<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        // First declaration wins on a name clash, matching file order.
        let mut aliases = HashMap::new();
        for alias in &file.aliases {
            aliases.entry(alias.name.as_str()).or_insert(&alias.ty);
        }
        Self { aliases }
    }

    /// Follows bare reference chains (`type A = B; type B = {...}`) to the
    /// underlying type. A reference without a known alias, or with generic
    /// arguments, resolves to itself.
    pub fn resolve(&self, ty: &'a TypeExpr) -> &'a TypeExpr {
        let mut current = ty;
        // Alias chains in generated files are short; the bound only guards
        // against `type A = B; type B = A`.
        for _ in 0..32 {
            match current {
                TypeExpr::Reference { name, args } if args.is_empty() => {
                    match self.aliases.get(name.as_str()).copied() {
                        Some(next) => current = next,
                        None => return current,
                    }
                }
                _ => return current,
            }
        }
        current
    }

    /// Looks up a named property on an object type, resolving aliases first.
    pub fn property(&self, ty: &'a TypeExpr, name: &str) -> Option<&'a TypeExpr> {
        match self.resolve(ty) {
            TypeExpr::Object(properties) => properties
                .iter()
                .find(|property| property.name == name)
                .map(|property| &property.ty),
            _ => None,
        }
    }

    /// Union members in declaration order, or `None` when the resolved type
    /// is not a union.
    pub fn union_members(&self, ty: &'a TypeExpr) -> Option<&'a [TypeExpr]> {
        match self.resolve(ty) {
            TypeExpr::Union(members) => Some(members),
            _ => None,
        }
    }

    pub fn literal_string(&self, ty: &'a TypeExpr) -> Option<&'a str> {
        match self.resolve(ty) {
            TypeExpr::StringLiteral(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_never(&self, ty: &'a TypeExpr) -> bool {
        matches!(self.resolve(ty), TypeExpr::Never)
    }

    /// Renders a type to display text.
    ///
    /// String literals render quoted, number literals as written, boolean
    /// literals as `boolean` and unions as their member texts joined with
    /// `" | "`; everything else goes through the generic display form.
    pub fn render(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::StringLiteral(value) => format!("\"{value}\""),
            TypeExpr::NumberLiteral(value) => value.clone(),
            TypeExpr::BooleanLiteral(_) => "boolean".into(),
            TypeExpr::Union(members) => members
                .iter()
                .map(|member| self.render(member))
                .collect::<Vec<_>>()
                .join(" | "),
            TypeExpr::Never => "never".into(),
            TypeExpr::Reference { name, args } => {
                if args.is_empty() {
                    name.clone()
                } else {
                    let args = args
                        .iter()
                        .map(|arg| self.render(arg))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{name}<{args}>")
                }
            }
            TypeExpr::Object(properties) => {
                if properties.is_empty() {
                    return "{}".into();
                }
                let fields = properties
                    .iter()
                    .map(|property| {
                        let optional = if property.optional { "?" } else { "" };
                        format!("{}{optional}: {}", property.name, self.render(&property.ty))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{ {fields} }}")
            }
            TypeExpr::Tuple(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| self.render(field))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{fields}]")
            }
            TypeExpr::Array(inner) => match inner.as_ref() {
                // Postfix `[]` binds tighter than `|`, so a union element
                // type keeps its parentheses.
                TypeExpr::Union(_) => format!("({})[]", self.render(inner)),
                _ => format!("{}[]", self.render(inner)),
            },
        }
    }
}

/// Whether the rendered type text is a bare identifier naming a type that
/// has to be imported from the bindings file. Builtin primitive names never
/// qualify; neither do structural renderings such as inline object types,
/// which are valid without any import.
pub fn is_custom_type(rendered: &str) -> bool {
    if BUILTIN_TYPES.contains(&rendered) {
        return false;
    }
    let mut chars = rendered.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

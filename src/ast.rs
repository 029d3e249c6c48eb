//! Syntax tree for parsed declaration files.

/// Top-level view of one parsed declaration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    /// Type aliases in file order. `interface` declarations are folded in
    /// as aliases of an object type.
    pub aliases: Vec<TypeAlias>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A named type, possibly with generic arguments: `User`, `Array<string>`.
    Reference { name: String, args: Vec<TypeExpr> },
    /// An inline object type: `{ id: string; name?: string }`.
    Object(Vec<ObjectProperty>),
    /// A union of alternatives, in declaration order.
    Union(Vec<TypeExpr>),
    /// A fixed-length tuple: `[string, number]`.
    Tuple(Vec<TypeExpr>),
    /// Postfix array: `User[]`.
    Array(Box<TypeExpr>),
    StringLiteral(String),
    /// Kept as source text so rendering preserves the written form.
    NumberLiteral(String),
    BooleanLiteral(bool),
    Never,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub name: String,
    pub optional: bool,
    pub ty: TypeExpr,
}

impl TypeExpr {
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

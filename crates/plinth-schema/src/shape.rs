//! The composable validator AST for block payloads.
//!
//! A [`Shape`] describes what an editor may store for one block field or
//! for a whole block. Shapes are plain data: registration exports them to
//! JSON Schema and compiles the actual validator, and the synthesizer
//! walks them to produce example values. Builder methods keep block
//! declarations close to how the authoring side writes them.

use serde_json::Value;

/// A node in the shape tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub description: Option<String>,
    /// Example/default value for this node. Wins over synthesis.
    pub default: Option<Value>,
    pub nullable: bool,
}

/// The structural variants a shape node can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    String,
    Number,
    Integer,
    Bool,
    Object(Vec<Field>),
    Array(Box<Shape>),
    /// Closed set of string variants; the first one is the synthesis pick.
    Enum(Vec<String>),
    /// Any one of the listed shapes may match.
    Union(Vec<Shape>),
    /// Indirection to a named definition in the catalog, resolved at use
    /// time. This is how self-referential shapes avoid being infinite.
    Lazy(String),
}

/// One named member of an object shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
    /// Optional fields are omitted from synthesis unless they declare a
    /// default, and are absent from the exported `required` list.
    pub optional: bool,
}

impl Shape {
    const fn of(kind: ShapeKind) -> Self {
        Self {
            kind,
            description: None,
            default: None,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn string() -> Self {
        Self::of(ShapeKind::String)
    }

    #[must_use]
    pub const fn number() -> Self {
        Self::of(ShapeKind::Number)
    }

    #[must_use]
    pub const fn integer() -> Self {
        Self::of(ShapeKind::Integer)
    }

    #[must_use]
    pub const fn boolean() -> Self {
        Self::of(ShapeKind::Bool)
    }

    #[must_use]
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::of(ShapeKind::Object(fields.into_iter().collect()))
    }

    #[must_use]
    pub fn array(item: Self) -> Self {
        Self::of(ShapeKind::Array(Box::new(item)))
    }

    #[must_use]
    pub fn enumeration<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::of(ShapeKind::Enum(
            variants.into_iter().map(Into::into).collect(),
        ))
    }

    #[must_use]
    pub fn one_of(variants: impl IntoIterator<Item = Self>) -> Self {
        Self::of(ShapeKind::Union(variants.into_iter().collect()))
    }

    /// Reference a named definition registered on the catalog.
    #[must_use]
    pub fn lazy(name: impl Into<String>) -> Self {
        Self::of(ShapeKind::Lazy(name.into()))
    }

    #[must_use]
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            optional: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

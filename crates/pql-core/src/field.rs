//! Field models: the typed tree every document schema is declared with.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Semantic type of a field, without its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Long,
    Double,
    String,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Object and array values can't be fetched as stored fields.
    pub fn is_compound(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Long,
    Double,
    String,
    Boolean,
    Array(Box<FieldModel>),
    Object(Vec<FieldModel>),
}

/// One declared field.
///
/// Array elements and anonymous objects have an empty name: their children
/// are addressed through the enclosing field's path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct FieldModel {
    pub name: String,
    pub aliases: Vec<String>,
    pub nested: bool,
    pub identifiable: bool,
    pub kind: FieldKind,
}

impl FieldModel {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            aliases: Vec::new(),
            nested: false,
            identifiable: false,
            kind,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self.kind {
            FieldKind::Long => FieldType::Long,
            FieldKind::Double => FieldType::Double,
            FieldKind::String => FieldType::String,
            FieldKind::Boolean => FieldType::Boolean,
            FieldKind::Array(_) => FieldType::Array,
            FieldKind::Object(_) => FieldType::Object,
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_owned());
        self
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| (*a).to_owned()));
        self
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    /// Marks the field as an id that entity sets can be matched against.
    pub fn identifiable(mut self) -> Self {
        self.identifiable = true;
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

pub fn long(name: &str) -> FieldModel {
    FieldModel::new(name, FieldKind::Long)
}

pub fn double(name: &str) -> FieldModel {
    FieldModel::new(name, FieldKind::Double)
}

pub fn string(name: &str) -> FieldModel {
    FieldModel::new(name, FieldKind::String)
}

pub fn boolean(name: &str) -> FieldModel {
    FieldModel::new(name, FieldKind::Boolean)
}

pub fn identifiable_string(name: &str) -> FieldModel {
    string(name).identifiable()
}

pub fn array_of_strings(name: &str) -> FieldModel {
    FieldModel::new(name, FieldKind::Array(Box::new(string(""))))
}

pub fn object(name: &str, fields: Vec<FieldModel>) -> FieldModel {
    FieldModel::new(name, FieldKind::Object(fields))
}

/// Anonymous object, used as an array element.
pub fn element(fields: Vec<FieldModel>) -> FieldModel {
    object("", fields)
}

pub fn array_of_objects(name: &str, fields: Vec<FieldModel>) -> FieldModel {
    FieldModel::new(name, FieldKind::Array(Box::new(element(fields))))
}

pub fn nested_array_of_objects(name: &str, fields: Vec<FieldModel>) -> FieldModel {
    array_of_objects(name, fields).nested()
}

/// Serialized form of a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawField {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    nested: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    identifiable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element: Option<Box<RawField>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<RawField>,
}

impl TryFrom<RawField> for FieldModel {
    type Error = Error;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match raw.field_type {
            FieldType::Long => FieldKind::Long,
            FieldType::Double => FieldKind::Double,
            FieldType::String => FieldKind::String,
            FieldType::Boolean => FieldKind::Boolean,
            FieldType::Array => {
                let element = raw
                    .element
                    .ok_or_else(|| Error::MissingElement(raw.name.clone()))?;
                FieldKind::Array(Box::new(FieldModel::try_from(*element)?))
            }
            FieldType::Object => FieldKind::Object(
                raw.fields
                    .into_iter()
                    .map(FieldModel::try_from)
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(Self {
            name: raw.name,
            aliases: raw.aliases,
            nested: raw.nested,
            identifiable: raw.identifiable,
            kind,
        })
    }
}

impl From<FieldModel> for RawField {
    fn from(field: FieldModel) -> Self {
        let field_type = field.field_type();
        let (element, fields) = match field.kind {
            FieldKind::Array(element) => (Some(Box::new(RawField::from(*element))), Vec::new()),
            FieldKind::Object(fields) => (None, fields.into_iter().map(RawField::from).collect()),
            _ => (None, Vec::new()),
        };

        Self {
            name: field.name,
            field_type,
            aliases: field.aliases,
            nested: field.nested,
            identifiable: field.identifiable,
            element,
            fields,
        }
    }
}

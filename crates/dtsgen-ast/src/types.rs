//! Flow type annotation nodes.
//!
//! Tags outside the modelled set deserialize to [`FlowType::Unsupported`]
//! carrying the Babel tag, so the emitter can report exactly which
//! annotation kind it refused to translate.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::node::{Identifier, NodeMeta, RawExtra, node_kind, nullable, payload};
use crate::decl::PropertyKey;

/// The `TypeAnnotation` wrapper Babel places on bindings and return types.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAnnotation {
    pub type_annotation: Box<FlowType>,
}

impl TypeAnnotation {
    pub fn new(ty: FlowType) -> Self {
        Self {
            type_annotation: Box::new(ty),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FlowType {
    Generic(GenericType),
    Void,
    Number,
    String,
    Boolean,
    Any,
    Null,
    Union(Vec<FlowType>),
    Intersection(Vec<FlowType>),
    Function(FunctionType),
    Array(Box<FlowType>),
    Tuple(Vec<FlowType>),
    Object(ObjectType),
    Nullable(Box<FlowType>),
    StringLiteral(String),
    NumberLiteral(NumberLiteralType),
    BooleanLiteral(bool),
    Unsupported(String),
}

impl FlowType {
    /// Shorthand for an unparameterised named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Generic(GenericType {
            id: TypeName::Identifier(Identifier::new(name)),
            type_parameters: None,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeList {
    types: Vec<FlowType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArrayRepr {
    element_type: Box<FlowType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NullableRepr {
    type_annotation: Box<FlowType>,
}

#[derive(Deserialize)]
struct ValueRepr<T> {
    value: T,
}

impl<'de> Deserialize<'de> for FlowType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = node_kind(&value)?;
        Ok(match kind.as_str() {
            "GenericTypeAnnotation" => Self::Generic(payload(value)?),
            "VoidTypeAnnotation" => Self::Void,
            "NumberTypeAnnotation" => Self::Number,
            "StringTypeAnnotation" => Self::String,
            "BooleanTypeAnnotation" => Self::Boolean,
            "AnyTypeAnnotation" => Self::Any,
            "NullLiteralTypeAnnotation" => Self::Null,
            "UnionTypeAnnotation" => Self::Union(payload::<TypeList, _>(value)?.types),
            "IntersectionTypeAnnotation" => {
                Self::Intersection(payload::<TypeList, _>(value)?.types)
            }
            "FunctionTypeAnnotation" => Self::Function(payload(value)?),
            "ArrayTypeAnnotation" => Self::Array(payload::<ArrayRepr, _>(value)?.element_type),
            "TupleTypeAnnotation" => Self::Tuple(payload::<TypeList, _>(value)?.types),
            "ObjectTypeAnnotation" => Self::Object(payload(value)?),
            "NullableTypeAnnotation" => {
                Self::Nullable(payload::<NullableRepr, _>(value)?.type_annotation)
            }
            "StringLiteralTypeAnnotation" => {
                Self::StringLiteral(payload::<ValueRepr<String>, _>(value)?.value)
            }
            "NumberLiteralTypeAnnotation" => Self::NumberLiteral(payload(value)?),
            "BooleanLiteralTypeAnnotation" => {
                Self::BooleanLiteral(payload::<ValueRepr<bool>, _>(value)?.value)
            }
            _ => Self::Unsupported(kind),
        })
    }
}

/// `Name` or `Name<Args>`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericType {
    pub id: TypeName,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterInstantiation>,
}

/// Reference target of a generic type: `A` or `ns.A`.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeName {
    Identifier(Identifier),
    Qualified {
        qualification: Box<TypeName>,
        id: Identifier,
    },
    Unsupported(String),
}

#[derive(Deserialize)]
struct QualifiedRepr {
    qualification: Box<TypeName>,
    id: Identifier,
}

impl<'de> Deserialize<'de> for TypeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = node_kind(&value)?;
        Ok(match kind.as_str() {
            "Identifier" => Self::Identifier(payload(value)?),
            "QualifiedTypeIdentifier" => {
                let repr: QualifiedRepr = payload(value)?;
                Self::Qualified {
                    qualification: repr.qualification,
                    id: repr.id,
                }
            }
            _ => Self::Unsupported(kind),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NumberLiteralType {
    pub value: f64,
    #[serde(default)]
    pub extra: Option<RawExtra>,
}

/// `(a: A, b?: B, ...rest: R) => Ret`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionType {
    #[serde(default, deserialize_with = "nullable")]
    pub params: Vec<FunctionTypeParam>,
    #[serde(default)]
    pub rest: Option<Box<FunctionTypeParam>>,
    pub return_type: Box<FlowType>,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterDeclaration>,
}

/// Parameter inside a function type. Flow allows unnamed parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionTypeParam {
    #[serde(default)]
    pub name: Option<Identifier>,
    #[serde(default)]
    pub type_annotation: Option<FlowType>,
    #[serde(default, deserialize_with = "nullable")]
    pub optional: bool,
}

/// `{ k: T, [key: K]: V, (): R }`. Also the body of an interface.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    #[serde(default, deserialize_with = "nullable")]
    pub properties: Vec<ObjectTypeMember>,
    #[serde(default, deserialize_with = "nullable")]
    pub indexers: Vec<ObjectTypeIndexer>,
    #[serde(default, deserialize_with = "nullable")]
    pub call_properties: Vec<ObjectTypeCallProperty>,
}

/// Entry of `ObjectType::properties`; Flow also puts spreads there.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectTypeMember {
    Property(ObjectTypeProperty),
    Unsupported(String),
}

impl<'de> Deserialize<'de> for ObjectTypeMember {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = node_kind(&value)?;
        Ok(match kind.as_str() {
            "ObjectTypeProperty" => Self::Property(payload(value)?),
            _ => Self::Unsupported(kind),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeProperty {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub key: PropertyKey,
    pub value: FlowType,
    #[serde(default, deserialize_with = "nullable")]
    pub optional: bool,
    #[serde(rename = "static", default, deserialize_with = "nullable")]
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeIndexer {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub id: Option<Identifier>,
    pub key: FlowType,
    pub value: FlowType,
    #[serde(rename = "static", default, deserialize_with = "nullable")]
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeCallProperty {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub value: FunctionType,
    #[serde(rename = "static", default, deserialize_with = "nullable")]
    pub is_static: bool,
}

/// `<T, U extends Bound = Default>` on a declaration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TypeParameterDeclaration {
    #[serde(default, deserialize_with = "nullable")]
    pub params: Vec<TypeParameter>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bound: Option<TypeAnnotation>,
    #[serde(default)]
    pub default: Option<FlowType>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// `<A, B>` at a use site (`extends Base<A>`, `Promise<T>`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TypeParameterInstantiation {
    #[serde(default, deserialize_with = "nullable")]
    pub params: Vec<FlowType>,
}

//! Response-shape descriptors for structured generation.
//!
//! Serializes to the OpenAPI subset accepted by Gemini's `responseSchema`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_properties")]
    pub properties: Vec<(String, ResponseSchema)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
}

impl ResponseSchema {
    fn scalar(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: Vec::new(),
            required: Vec::new(),
            property_ordering: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::scalar(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::scalar(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::scalar(SchemaType::Integer)
    }

    pub fn array(items: ResponseSchema) -> Self {
        Self { items: Some(Box::new(items)), ..Self::scalar(SchemaType::Array) }
    }

    /// An object whose listed properties are all required, in the given order.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, ResponseSchema)>,
        K: Into<String>,
    {
        let properties: Vec<(String, ResponseSchema)> =
            properties.into_iter().map(|(key, schema)| (key.into(), schema)).collect();
        let names: Vec<String> = properties.iter().map(|(key, _)| key.clone()).collect();
        Self {
            properties,
            required: names.clone(),
            property_ordering: names,
            ..Self::scalar(SchemaType::Object)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Names of the top-level properties, in order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(key, _)| key.as_str())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn serialize_properties<S>(
    properties: &[(String, ResponseSchema)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(properties.len()))?;
    for (key, schema) in properties {
        map.serialize_entry(key, schema)?;
    }
    map.end()
}

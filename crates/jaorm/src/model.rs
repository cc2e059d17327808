//! Resource and model types consumed by the query compiler.
//!
//! The compiler only needs three things from whatever it is given: a type
//! name, an optional identifier, and (for some operations) an attribute bag.
//! [`Resource`] captures exactly that. It is implemented for bare type names,
//! JSON:API resource identifiers and resource objects, and [`Model`].

use crate::diff::diff;
use crate::error::OrmResult;
use crate::value::{Fields, Value};
use serde::{Deserialize, Serialize};

/// Anything that names a resource type and may carry an id and attributes.
pub trait Resource {
    /// The resource type, e.g. `"company"`.
    fn type_name(&self) -> &str;

    /// The resource identifier, if any.
    fn id(&self) -> Option<&str> {
        None
    }

    /// The attribute bag, if this value carries one.
    fn attributes(&self) -> Option<&Fields> {
        None
    }
}

impl Resource for str {
    fn type_name(&self) -> &str {
        self
    }
}

impl Resource for String {
    fn type_name(&self) -> &str {
        self
    }
}

impl<T: Resource + ?Sized> Resource for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn id(&self) -> Option<&str> {
        (**self).id()
    }

    fn attributes(&self) -> Option<&Fields> {
        (**self).attributes()
    }
}

/// A JSON:API resource identifier object: `{ "type": ..., "id": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }
}

impl Resource for ResourceIdentifier {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// A JSON:API resource object, restricted to the members the compiler reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "attributes_serde"
    )]
    pub attributes: Option<Fields>,
}

impl Resource for ResourceObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn attributes(&self) -> Option<&Fields> {
        self.attributes.as_ref()
    }
}

mod attributes_serde {
    use crate::value::{Fields, Value};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(fields: &Option<Fields>, s: S) -> Result<S::Ok, S::Error> {
        fields
            .as_ref()
            .map(|f| Value::Object(f.clone()).to_json())
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Fields>, D::Error> {
        let map = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(d)?;
        Ok(map.map(|m| m.into_iter().collect()))
    }
}

/// A typed domain entity: type name, optional id, and its attribute bag.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    type_name: String,
    id: Option<String>,
    fields: Fields,
}

impl Model {
    pub fn new(type_name: impl Into<String>, fields: Fields) -> Self {
        Self {
            type_name: type_name.into(),
            id: None,
            fields,
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Build a model from a serializable attribute struct.
    pub fn from_serialize<T: Serialize + ?Sized>(
        type_name: impl Into<String>,
        attributes: &T,
    ) -> OrmResult<Self> {
        Ok(Self::new(type_name, Fields::from_serialize(attributes)?))
    }

    /// Build a model from a flat storage row, taking `id` out of the columns.
    ///
    /// Numeric ids are kept as their decimal text; a NULL id leaves the model without one.
    pub fn from_flat(type_name: impl Into<String>, mut row: Fields) -> Self {
        let id = match row.remove("id") {
            Some(Value::Text(s)) => Some(s),
            Some(Value::Int(v)) => Some(v.to_string()),
            Some(Value::UInt(v)) => Some(v.to_string()),
            Some(Value::Uuid(u)) => Some(u.hyphenated().to_string()),
            _ => None,
        };
        Self {
            type_name: type_name.into(),
            id,
            fields: row,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    /// Decode the attribute bag into a typed struct.
    pub fn attributes_as<T: serde::de::DeserializeOwned>(&self) -> OrmResult<T> {
        self.fields.deserialize()
    }

    /// Apply `f` to a copy of the fields and return what it changed.
    ///
    /// The model itself is left untouched; the result can be passed to
    /// [`update`](crate::update) as an explicit change set.
    pub fn changes<F>(&self, f: F) -> Fields
    where
        F: FnOnce(Fields) -> Fields,
    {
        let after = f(self.fields.clone());
        diff(&after, &self.fields)
    }

    /// Pack into a JSON:API resource object.
    pub fn pack(&self) -> ResourceObject {
        ResourceObject {
            type_name: self.type_name.clone(),
            id: self.id.clone(),
            attributes: Some(self.fields.clone()),
        }
    }
}

impl Resource for Model {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn attributes(&self) -> Option<&Fields> {
        Some(&self.fields)
    }
}

impl From<ResourceObject> for Model {
    fn from(obj: ResourceObject) -> Self {
        Self {
            type_name: obj.type_name,
            id: obj.id,
            fields: obj.attributes.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn bare_type_name_has_no_id_or_fields() {
        let r = "company";
        assert_eq!(r.type_name(), "company");
        assert_eq!(r.id(), None);
        assert!(r.attributes().is_none());
    }

    #[test]
    fn identifier_exposes_id_only() {
        let r = ResourceIdentifier::new("company", "c1");
        assert_eq!(r.id(), Some("c1"));
        assert!(r.attributes().is_none());
    }

    #[test]
    fn from_flat_extracts_id() {
        let row = fields! { "id" => 7, "name" => "acme" };
        let model = Model::from_flat("company", row);
        assert_eq!(model.id(), Some("7"));
        assert_eq!(model.fields(), &fields! { "name" => "acme" });
    }

    #[test]
    fn changes_leaves_model_untouched() {
        let model = Model::new("test", fields! { "key" => "value" }).with_id("x");
        let changes = model.changes(|mut f| {
            f.insert("key", "edited");
            f
        });
        assert_eq!(changes, fields! { "key" => "edited" });
        assert_eq!(model.fields().get("key"), Some(&Value::from("value")));
    }

    #[test]
    fn pack_round_trips_through_json() {
        let model = Model::new("company", fields! { "name" => "acme", "size" => 3 }).with_id("c1");
        let json = serde_json::to_value(model.pack()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "company",
                "id": "c1",
                "attributes": { "name": "acme", "size": 3 }
            })
        );

        let obj: ResourceObject = serde_json::from_value(json).unwrap();
        assert_eq!(Model::from(obj), model);
    }

    #[test]
    fn resource_object_without_attributes() {
        let obj: ResourceObject =
            serde_json::from_value(serde_json::json!({ "type": "company", "id": "c1" })).unwrap();
        assert_eq!(obj.id(), Some("c1"));
        assert!(obj.attributes().is_none());
    }
}

//! Attribute schemas and replacement planning.

use serde::Serialize;
use serde_json::Value;

/// How an attribute's value is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
    /// Set by the user or, when omitted, by the remote side
    OptionalComputed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub mode: AttributeMode,
    /// Changing the value requires destroying and recreating the resource
    pub force_new: bool,
    pub sensitive: bool,
    pub description: &'static str,
}

impl Attribute {
    pub fn required(name: &'static str, description: &'static str) -> Self {
        Self::with_mode(name, AttributeMode::Required, description)
    }

    pub fn optional(name: &'static str, description: &'static str) -> Self {
        Self::with_mode(name, AttributeMode::Optional, description)
    }

    pub fn computed(name: &'static str, description: &'static str) -> Self {
        Self::with_mode(name, AttributeMode::Computed, description)
    }

    pub fn optional_computed(name: &'static str, description: &'static str) -> Self {
        Self::with_mode(name, AttributeMode::OptionalComputed, description)
    }

    fn with_mode(name: &'static str, mode: AttributeMode, description: &'static str) -> Self {
        Self {
            name,
            mode,
            force_new: false,
            sensitive: false,
            description,
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Schema of one resource or data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub type_name: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(type_name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self { type_name, attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes whose planned value differs from the prior state.
    ///
    /// Computed-only attributes are ignored, as are optional-computed ones
    /// left unset (null or empty string) in the plan.
    pub fn changed_attributes(&self, prior: &Value, planned: &Value) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.mode != AttributeMode::Computed)
            .filter(|a| {
                let planned_value = planned.get(a.name).unwrap_or(&Value::Null);
                let unset = planned_value.is_null() || planned_value.as_str() == Some("");
                if a.mode == AttributeMode::OptionalComputed && unset {
                    return false;
                }
                prior.get(a.name).unwrap_or(&Value::Null) != planned_value
            })
            .map(|a| a.name)
            .collect()
    }

    /// Changed attributes that cannot be updated in place
    pub fn requires_replace(&self, prior: &Value, planned: &Value) -> Vec<&'static str> {
        self.changed_attributes(prior, planned)
            .into_iter()
            .filter(|name| self.attribute(name).is_some_and(|a| a.force_new))
            .collect()
    }

    /// Names of sensitive attributes
    pub fn sensitive_attributes(&self) -> Vec<&'static str> {
        self.attributes.iter().filter(|a| a.sensitive).map(|a| a.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new(
            "hcp_example",
            vec![
                Attribute::required("name", "Name").force_new(),
                Attribute::optional("size", "Size"),
                Attribute::optional_computed("project_id", "Project").force_new(),
                Attribute::computed("state", "State"),
                Attribute::optional("secret", "Secret").sensitive(),
            ],
        )
    }

    #[test]
    fn test_force_new_change_requires_replace() {
        let prior = json!({ "name": "a", "size": 1, "state": "RUNNING" });
        let planned = json!({ "name": "b", "size": 2 });

        assert_eq!(schema().changed_attributes(&prior, &planned), vec!["name", "size"]);
        assert_eq!(schema().requires_replace(&prior, &planned), vec!["name"]);
    }

    #[test]
    fn test_mutable_change_updates_in_place() {
        let prior = json!({ "name": "a", "size": 1 });
        let planned = json!({ "name": "a", "size": 3 });

        assert!(schema().requires_replace(&prior, &planned).is_empty());
    }

    #[test]
    fn test_unset_optional_computed_is_not_a_change() {
        let prior = json!({ "name": "a", "project_id": "proj-1" });
        let planned = json!({ "name": "a" });

        assert!(schema().changed_attributes(&prior, &planned).is_empty());
        let empty = json!({ "name": "a", "project_id": "" });
        assert!(schema().changed_attributes(&prior, &empty).is_empty());

        let moved = json!({ "name": "a", "project_id": "proj-2" });
        assert_eq!(schema().requires_replace(&prior, &moved), vec!["project_id"]);
    }

    #[test]
    fn test_sensitive_attributes() {
        assert_eq!(schema().sensitive_attributes(), vec!["secret"]);
    }
}

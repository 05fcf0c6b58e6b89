use serde_json::{Map, Value};

/// Loosely-typed mapping supplied by the caller for a map-valued field.
pub type ValueMap = Map<String, Value>;

/// Validated inputs for one ConfigMap operation.
///
/// Every map field is independently optional: `None` means the caller did not
/// supply it, which is not the same thing as an empty map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMapParams {
    pub name: String,
    /// Empty only when listing across all namespaces.
    pub namespace: String,
    pub data: Option<ValueMap>,
    pub binary_data: Option<ValueMap>,
    pub labels: Option<ValueMap>,
    pub annotations: Option<ValueMap>,
}

impl ConfigMapParams {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }
}

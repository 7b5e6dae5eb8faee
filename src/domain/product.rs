use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog entry: a numeric identity plus an open set of attributes.
///
/// Serialized flat, e.g. `{"id": 3, "title": "Lamp", "price": 20}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    pub fn new(id: u64, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }
    }
}

/// Attributes of a product to be created. The catalog assigns the id.
#[derive(Debug, Clone, Default)]
pub struct ProductCreate {
    pub attributes: Map<String, Value>,
}

/// Field-level changes to a product; each field overwrites the same-named one.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub fields: Map<String, Value>,
}

impl From<Map<String, Value>> for ProductPatch {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

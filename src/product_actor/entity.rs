use serde_json::Value;

use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Product, ProductCreate, ProductPatch};

const ID_FIELD: &str = "id";

impl Entity for Product {
    type Id = u64;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &u64 { &self.id }

    /// Creates a new Product from its attributes.
    ///
    /// # Errors
    /// Rejects attributes carrying an `id`; identifiers are assigned by the catalog.
    fn from_create_params(id: u64, params: ProductCreate) -> Result<Self, FrameworkError> {
        if params.attributes.contains_key(ID_FIELD) {
            return Err(FrameworkError::Validation(
                "product id is assigned by the catalog".to_string(),
            ));
        }
        Ok(Self::new(id, params.attributes))
    }

    /// Shallow-merges the patch into the product.
    ///
    /// Patch fields overwrite same-named attributes, untouched attributes keep
    /// their values and order. A patch may repeat the current `id` but never
    /// change it.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), FrameworkError> {
        if let Some(requested) = patch.fields.get(ID_FIELD) {
            if !same_id(requested, self.id) {
                return Err(FrameworkError::Validation(format!(
                    "product id is immutable: cannot change {} to {}",
                    self.id, requested
                )));
            }
        }

        for (field, value) in patch.fields {
            if field != ID_FIELD {
                self.attributes.insert(field, value);
            }
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), FrameworkError> {
        Ok(())
    }
}

fn same_id(requested: &Value, current: u64) -> bool {
    requested.as_u64() == Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn attributes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn lamp() -> Product {
        Product::new(3, attributes(json!({"title": "Lamp", "price": 20, "stock": 4})))
    }

    #[test]
    fn update_overwrites_given_fields_and_keeps_the_rest() {
        let mut product = lamp();

        product
            .on_update(ProductPatch::from(attributes(json!({"price": 25, "color": "red"}))))
            .unwrap();

        assert_eq!(product.id, 3);
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"id": 3, "title": "Lamp", "price": 25, "stock": 4, "color": "red"})
        );
        let keys: Vec<_> = product.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["title", "price", "stock", "color"]);
    }

    #[test]
    fn update_with_other_id_is_rejected_untouched() {
        let mut product = lamp();

        let err = product
            .on_update(ProductPatch::from(attributes(json!({"id": 4, "price": 1}))))
            .unwrap_err();

        assert!(matches!(err, FrameworkError::Validation(_)));
        assert_eq!(product, lamp());
    }

    #[test]
    fn update_with_non_numeric_id_is_rejected() {
        let mut product = lamp();

        let err = product
            .on_update(ProductPatch::from(attributes(json!({"id": "3"}))))
            .unwrap_err();

        assert!(matches!(err, FrameworkError::Validation(_)));
    }

    #[test]
    fn update_repeating_current_id_is_allowed() {
        let mut product = lamp();

        product
            .on_update(ProductPatch::from(attributes(json!({"id": 3, "title": "Desk lamp"}))))
            .unwrap();

        assert_eq!(product.attributes["title"], json!("Desk lamp"));
        assert!(!product.attributes.contains_key("id"));
    }

    #[test]
    fn create_rejects_caller_supplied_id() {
        let params = ProductCreate { attributes: attributes(json!({"id": 9, "title": "Mug"})) };

        let err = Product::from_create_params(1, params).unwrap_err();
        assert!(matches!(err, FrameworkError::Validation(_)));
    }

    #[test]
    fn product_serializes_flat_with_id_first() {
        let text = serde_json::to_string(&lamp()).unwrap();
        assert_eq!(text, r#"{"id":3,"title":"Lamp","price":20,"stock":4}"#);

        let back: Product = serde_json::from_str(&text).unwrap();
        assert_eq!(back, lamp());
    }
}

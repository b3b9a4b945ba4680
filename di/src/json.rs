//! Bulk parameter loading from JSON objects.

use crate::container::Container;
use crate::core::Value;
use crate::error::{Error, Result};

fn describe(value: &serde_json::Value) -> &'static str {
  match value {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "a boolean",
    serde_json::Value::Number(_) => "a number",
    serde_json::Value::String(_) => "a string",
    serde_json::Value::Array(_) => "an array",
    serde_json::Value::Object(_) => "an object",
  }
}

impl Container {
  /// Sets every member of the JSON object `params` as a plain value, in
  /// document order.
  ///
  /// Members are stored as `serde_json::Value`, except JSON `null`, which is
  /// stored as [`Value::null`].
  pub fn set_json_parameters(&self, params: &serde_json::Value) -> Result<()> {
    let members = params
      .as_object()
      .ok_or_else(|| Error::InvalidParameters(describe(params)))?;

    for (id, member) in members {
      let value = match member {
        serde_json::Value::Null => Value::null(),
        other => Value::new(other.clone()),
      };
      self.set(id.as_str(), value);
    }
    Ok(())
  }

  /// Creates a container holding the parameters of a JSON object document.
  pub fn from_json_str(document: &str) -> Result<Self> {
    let params: serde_json::Value = serde_json::from_str(document)?;
    let container = Self::new();
    container.set_json_parameters(&params)?;
    Ok(container)
  }
}

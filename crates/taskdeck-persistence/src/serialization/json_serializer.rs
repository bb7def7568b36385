use crate::traits::Serializer;
use serde_json::ser::PrettyFormatter;
use taskdeck_core::{TaskdeckError, TaskdeckResult};

/// Pretty JSON with four-space indentation and unescaped UTF-8, matching
/// files written by earlier versions of the tracker.
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned> Serializer<T> for JsonSerializer {
    fn serialize(&self, data: &T) -> TaskdeckResult<Vec<u8>> {
        let mut bytes = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        data.serialize(&mut ser)
            .map_err(|e| TaskdeckError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    fn deserialize(&self, bytes: &[u8]) -> TaskdeckResult<T> {
        serde_json::from_slice(bytes).map_err(|e| TaskdeckError::Serialization(e.to_string()))
    }
}

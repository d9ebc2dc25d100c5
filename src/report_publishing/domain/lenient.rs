use serde::{Deserialize, Deserializer};

/// Deserializes an explicit JSON `null` as the type's default value.
///
/// `#[serde(default)]` only covers absent fields; IQ Server also sends
/// `null` for sections it has no data for, such as the license and security
/// data of an unknown component.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        items: Vec<u32>,
    }

    #[test]
    fn test_null_becomes_default() {
        let sample: Sample = serde_json::from_str(r#"{"name": null, "items": null}"#).unwrap();
        assert_eq!(sample.name, "");
        assert!(sample.items.is_empty());
    }

    #[test]
    fn test_absent_field_still_defaults() {
        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(sample.name, "");
    }

    #[test]
    fn test_present_value_is_kept() {
        let sample: Sample = serde_json::from_str(r#"{"name": "x", "items": [1, 2]}"#).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.items, vec![1, 2]);
    }

    #[test]
    fn test_wrong_type_is_still_an_error() {
        assert!(serde_json::from_str::<Sample>(r#"{"name": 5}"#).is_err());
    }
}

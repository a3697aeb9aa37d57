use crate::exception::HandlerError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Decodes a request body, laying it over `template` when one is given
///
/// The body is parsed before anything else so that malformed input never
/// reaches the controller.
pub(crate) fn decode<E>(body: &[u8], template: Option<E>) -> Result<E, HandlerError>
where
    E: Serialize + DeserializeOwned,
{
    let incoming: Value = serde_json::from_slice(body).map_err(HandlerError::MalformedBody)?;

    let Some(template) = template else {
        return serde_json::from_value(incoming).map_err(HandlerError::MalformedBody);
    };

    let mut merged = serde_json::to_value(template).map_err(|err| {
        HandlerError::contract(format!("template could not be serialized: {}", err))
    })?;
    merge(&mut merged, incoming);
    serde_json::from_value(merged).map_err(HandlerError::MalformedBody)
}

/// Encodes a value for a response body
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Value, HandlerError> {
    serde_json::to_value(value).map_err(HandlerError::Encode)
}

/// Objects merge key by key; anything else in `patch` replaces `base`
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, patch) => *slot = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dimensions {
        width: u32,
        height: u32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Poster {
        title: String,
        price: f64,
        size: Dimensions,
    }

    fn template() -> Poster {
        Poster {
            title: "untitled".into(),
            price: 10.0,
            size: Dimensions {
                width: 40,
                height: 60,
            },
        }
    }

    #[test]
    fn test_decode_without_template() {
        let body = br#"{"title":"Dunes","price":25.5,"size":{"width":50,"height":70}}"#;
        let poster: Poster = decode(body, None).unwrap();
        assert_eq!(poster.title, "Dunes");
        assert_eq!(poster.size.height, 70);
    }

    #[test]
    fn test_missing_fields_without_template_are_rejected() {
        let err = decode::<Poster>(br#"{"title":"Dunes"}"#, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientInputError);
    }

    #[test]
    fn test_template_fills_missing_fields() {
        let poster = decode(br#"{"title":"Dunes","size":{"width":90}}"#, Some(template())).unwrap();
        assert_eq!(
            poster,
            Poster {
                title: "Dunes".into(),
                price: 10.0,
                size: Dimensions {
                    width: 90,
                    height: 60,
                },
            }
        );
    }

    #[test]
    fn test_malformed_json_is_client_error() {
        let err = decode::<Poster>(b"title=Dunes", Some(template())).unwrap_err();
        assert!(matches!(err, HandlerError::MalformedBody(_)));
    }

    #[test]
    fn test_merge_replaces_non_objects() {
        let mut base = json!({"tags": ["a", "b"], "n": 1});
        merge(&mut base, json!({"tags": ["c"], "n": null}));
        assert_eq!(base, json!({"tags": ["c"], "n": null}));
    }
}

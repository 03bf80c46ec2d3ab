use serde_json::Value;
use std::collections::HashMap;

/// Campaign attribution parameters forwarded alongside a transaction or
/// lead-gen call.
///
/// Built from a dynamic scripting-side object; only string-valued fields
/// survive the flattening, everything else is dropped silently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtmParams(HashMap<String, String>);

impl UtmParams {
    pub fn from_value(raw: Option<&Value>) -> Self {
        Self(flatten_strings(raw))
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Prospect details for the lead-gen flow.
///
/// Explicit optional fields rather than an opaque map; a field that is
/// missing or not a string stays `None` and is omitted from the flattened
/// map handed to the native SDK.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub pin_code: Option<String>,
}

impl UserDetails {
    pub fn from_value(raw: Option<&Value>) -> Self {
        let field = |key: &str| {
            raw.and_then(|v| v.get(key))
                .and_then(Value::as_str)
                .map(str::to_owned)
        };

        Self {
            name: field("name"),
            email: field("email"),
            contact: field("contact"),
            pin_code: field("pinCode"),
        }
    }

    /// Flattens to the string map shape the native SDK consumes. Absent
    /// fields are omitted rather than sent empty.
    pub fn into_map(self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Some(name) = self.name {
            map.insert("name".to_owned(), name);
        }
        if let Some(email) = self.email {
            map.insert("email".to_owned(), email);
        }
        if let Some(contact) = self.contact {
            map.insert("contact".to_owned(), contact);
        }
        if let Some(pin_code) = self.pin_code {
            map.insert("pinCode".to_owned(), pin_code);
        }
        map
    }
}

/// Keeps only the string-valued fields of a dynamic object. Anything that
/// is not an object yields an empty map.
pub fn flatten_strings(raw: Option<&Value>) -> HashMap<String, String> {
    let Some(Value::Object(fields)) = raw else {
        return HashMap::new();
    };

    fields
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_owned())))
        .collect()
}

/// Normalizes a dynamic string list: non-array input becomes empty and
/// non-string entries are dropped.
pub fn string_list(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_owned))
        .collect()
}

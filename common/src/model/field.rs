//! Field schema entries and the draft they are filled into.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Type tag of a form field.
///
/// This is the single list of supported tags. Anything else is kept verbatim in
/// `Unknown` so it can still be rendered as a plain text input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    ShortText,
    FullName,
    UsAddress,
    LongText,
    TextWrap,
    Date,
    Email,
    Phone,
    Number,
    Dollar,
    Percent,
    CharList,
    Checkbox,
    RadioGroup,
    Unknown(String),
}

impl FieldKind {
    pub fn tag(&self) -> &str {
        match self {
            FieldKind::ShortText => "shortText",
            FieldKind::FullName => "fullName",
            FieldKind::UsAddress => "usAddress",
            FieldKind::LongText => "longText",
            FieldKind::TextWrap => "textWrap",
            FieldKind::Date => "date",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Number => "number",
            FieldKind::Dollar => "dollar",
            FieldKind::Percent => "percent",
            FieldKind::CharList => "charList",
            FieldKind::Checkbox => "checkbox",
            FieldKind::RadioGroup => "radioGroup",
            FieldKind::Unknown(tag) => tag,
        }
    }

    /// Every known tag, in declaration order.
    pub const KNOWN: [FieldKind; 14] = [
        FieldKind::ShortText,
        FieldKind::FullName,
        FieldKind::UsAddress,
        FieldKind::LongText,
        FieldKind::TextWrap,
        FieldKind::Date,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Number,
        FieldKind::Dollar,
        FieldKind::Percent,
        FieldKind::CharList,
        FieldKind::Checkbox,
        FieldKind::RadioGroup,
    ];
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        FieldKind::KNOWN
            .iter()
            .find(|kind| kind.tag() == tag)
            .cloned()
            .unwrap_or(FieldKind::Unknown(tag))
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A choice offered by a radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    /// Reads a bare string or number, or a `{value, label}` object where either
    /// key may stand in for the other. Anything else yields `None`.
    fn from_json(raw: serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        fn scalar(value: Option<&Value>) -> Option<String> {
            match value? {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            }
        }

        match &raw {
            Value::Object(map) => {
                let value = scalar(map.get("value"));
                let label = scalar(map.get("label")).or_else(|| scalar(map.get("name")));
                match (value, label) {
                    (Some(value), Some(label)) => Some(Self { value, label }),
                    (Some(only), None) | (None, Some(only)) => Some(Self::new(only)),
                    (None, None) => None,
                }
            }
            other => scalar(Some(other)).map(Self::new),
        }
    }
}

/// One entry of a template's field schema.
///
/// Decoding only insists on `id` and `type`. A missing name falls back to the id,
/// a null `required` reads as `false`, and option entries of an unknown shape are
/// skipped, so one odd field never takes the whole form down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFieldDescriptor")]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<FieldOption>,
}

#[derive(Deserialize)]
struct RawFieldDescriptor {
    id: String,
    #[serde(default, alias = "title")]
    name: Option<String>,
    #[serde(rename = "type")]
    kind: FieldKind,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    options: Option<Vec<serde_json::Value>>,
}

impl From<RawFieldDescriptor> for FieldDescriptor {
    fn from(raw: RawFieldDescriptor) -> Self {
        let name = raw
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| raw.id.clone());
        Self {
            id: raw.id,
            name,
            kind: raw.kind,
            required: raw.required.unwrap_or(false),
            options: raw
                .options
                .unwrap_or_default()
                .into_iter()
                .filter_map(FieldOption::from_json)
                .collect(),
        }
    }
}

/// Value held for one field in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Bool(_) => "",
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }
}

/// In-progress mapping of field id to value; serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDraft(BTreeMap<String, FieldValue>);

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.0.get(field_id)
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: FieldValue) {
        self.0.insert(field_id.into(), value);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_map_to_variants() {
        for kind in FieldKind::KNOWN {
            assert_eq!(FieldKind::from(kind.tag().to_string()), kind);
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"id":"f9","name":"Signature","type":"signature"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Unknown("signature".into()));
        assert_eq!(serde_json::to_value(&field.kind).unwrap(), "signature");
    }

    #[test]
    fn descriptor_accepts_title_alias() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"id":"f1","title":"Buyer name","type":"fullName"}"#).unwrap();
        assert_eq!(field.name, "Buyer name");
        assert_eq!(field.kind, FieldKind::FullName);
        assert!(field.options.is_empty());
    }

    #[test]
    fn null_required_reads_as_optional() {
        let fields: Vec<FieldDescriptor> = serde_json::from_str(
            r#"[{"id":"f1","name":"Name","type":"shortText"},
                {"id":"f2","name":"Agree","type":"checkbox","required":null},
                {"id":"f3","name":"Email","type":"email","required":true}]"#,
        )
        .unwrap();
        assert_eq!(fields.len(), 3);
        assert!(!fields[1].required);
        assert!(fields[2].required);
    }

    #[test]
    fn options_accept_strings_and_objects() {
        let field: FieldDescriptor = serde_json::from_str(
            r#"{"id":"r","name":"Choice","type":"radioGroup",
                "options":["plain",{"label":"Yes","value":"yes"},{"value":2},{"label":"Only label"},
                           [1,2],null,{"other":true}]}"#,
        )
        .unwrap();
        assert_eq!(
            field.options,
            vec![
                FieldOption::new("plain"),
                FieldOption {
                    value: "yes".into(),
                    label: "Yes".into()
                },
                FieldOption::new("2"),
                FieldOption::new("Only label"),
            ]
        );
    }

    #[test]
    fn missing_name_defaults_to_id() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"id":"buyer_phone","type":"phone","options":null}"#).unwrap();
        assert_eq!(field.name, "buyer_phone");
        assert_eq!(field.kind, FieldKind::Phone);
        assert!(field.options.is_empty());
    }

    #[test]
    fn draft_serializes_flat_with_native_booleans() {
        let mut draft = FormDraft::new();
        draft.set("f1", FieldValue::Text("Jane".into()));
        draft.set("agree", FieldValue::Bool(true));
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"agree": true, "f1": "Jane"})
        );
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The palette group a block belongs to.
///
/// Blocks carry a denormalized copy of their definition's category; `Triggers` is the
/// one that matters to codegen because it separates execution origins from actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Triggers,
    #[default]
    Actions,
    Messages,
    Moderation,
    Conditions,
    Data,
    Voice,
    Components,
    #[serde(other)]
    Other,
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockCategory::Triggers => "triggers",
            BlockCategory::Actions => "actions",
            BlockCategory::Messages => "messages",
            BlockCategory::Moderation => "moderation",
            BlockCategory::Conditions => "conditions",
            BlockCategory::Data => "data",
            BlockCategory::Voice => "voice",
            BlockCategory::Components => "components",
            BlockCategory::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// The editor widget used for a property, which also fixes its value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Text,
    Textarea,
    Number,
    Boolean,
    Select,
    Color,
}

impl PropertyKind {
    /// The value used when neither the block nor its definition supplies one.
    pub fn neutral_value(&self) -> Value {
        match self {
            PropertyKind::Number => Value::from(0),
            PropertyKind::Boolean => Value::Bool(false),
            _ => Value::String(String::new()),
        }
    }
}

/// Runtime capabilities a block needs from the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFeature {
    /// Needs the platform's voice library and its native codec dependency.
    Voice,
    /// Reads or writes the in-memory key/value store.
    DataStore,
    /// Acts on a member picked by the invoking user.
    TargetMember,
}

/// Describes one configurable property of a block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub key: String,
    pub label: String,
    pub kind: PropertyKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
}

impl PropertySpec {
    pub fn new(key: &str, label: &str, kind: PropertyKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            default: None,
            options: Vec::new(),
            placeholder: None,
            helper_text: None,
        }
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, PropertyKind::Text)
    }

    pub fn textarea(key: &str, label: &str) -> Self {
        Self::new(key, label, PropertyKind::Textarea)
    }

    pub fn number(key: &str, label: &str) -> Self {
        Self::new(key, label, PropertyKind::Number)
    }

    pub fn boolean(key: &str, label: &str) -> Self {
        Self::new(key, label, PropertyKind::Boolean)
    }

    pub fn color(key: &str, label: &str) -> Self {
        Self::new(key, label, PropertyKind::Color)
    }

    pub fn select(key: &str, label: &str, options: &[&str]) -> Self {
        let mut spec = Self::new(key, label, PropertyKind::Select);
        spec.options = options.iter().map(|o| o.to_string()).collect();
        spec
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    pub fn helper(mut self, text: &str) -> Self {
        self.helper_text = Some(text.to_string());
        self
    }

    /// The definition default, falling back to the kind's neutral value.
    pub fn fallback(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.neutral_value())
    }
}

/// An immutable catalog entry describing one block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDefinition {
    pub type_id: String,
    pub label: String,
    pub category: BlockCategory,
    pub inputs: u8,
    /// 0, 1, or 2 (branching blocks expose a `true` and a `false` output).
    pub outputs: u8,
    pub properties: Vec<PropertySpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<BlockFeature>,
}

impl BlockDefinition {
    /// Creates a definition with one input and one output, the shape of most actions.
    pub fn new(type_id: &str, label: &str, category: BlockCategory) -> Self {
        Self {
            type_id: type_id.to_string(),
            label: label.to_string(),
            category,
            inputs: 1,
            outputs: 1,
            properties: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Triggers have no inputs: they originate an execution path.
    pub fn trigger(type_id: &str, label: &str) -> Self {
        let mut def = Self::new(type_id, label, BlockCategory::Triggers);
        def.inputs = 0;
        def
    }

    pub fn branching(mut self) -> Self {
        self.outputs = 2;
        self
    }

    pub fn property(mut self, spec: PropertySpec) -> Self {
        self.properties.push(spec);
        self
    }

    pub fn feature(mut self, feature: BlockFeature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn property_spec(&self, key: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.key == key)
    }

    pub fn has_feature(&self, feature: BlockFeature) -> bool {
        self.features.contains(&feature)
    }
}

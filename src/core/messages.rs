use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::locale::LanguageTag;

/// ARB keys starting with `@` hold metadata (`@@locale`, `@greeting`), not messages.
const ARB_METADATA_PREFIX: char = '@';
const ARB_LOCALE_KEY: &str = "@@locale";

/// Supported message file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Json,
    /// JSON with `//` and `/* */` comments and trailing commas.
    Jsonc,
    /// Flutter Application Resource Bundle.
    Arb,
}

impl MessageFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonc" => Some(Self::Jsonc),
            "arb" => Some(Self::Arb),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Jsonc => "jsonc",
            Self::Arb => "arb",
        }
    }

    /// JSON and JSONC files can stand in for each other.
    pub fn is_json_family(self) -> bool {
        matches!(self, Self::Json | Self::Jsonc)
    }
}

/// A single translatable string, addressed by its dotted key path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUnit {
    pub key: String,
    pub text: String,
}

/// A parsed message file.
///
/// Key order is preserved (`serde_json` is built with `preserve_order`), so a
/// translated document has the same layout as its source.
#[derive(Debug, Clone)]
pub struct MessageDocument {
    format: MessageFormat,
    root: Value,
}

impl MessageDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let Some(format) = MessageFormat::from_path(path) else {
            bail!(
                "Unsupported message file '{}'. Expected a .json, .jsonc or .arb file.",
                path.display()
            );
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read message file: {}", path.display()))?;
        Self::parse(&content, format)
            .with_context(|| format!("Failed to parse message file: {}", path.display()))
    }

    pub fn parse(content: &str, format: MessageFormat) -> Result<Self> {
        let root: Value = match format {
            MessageFormat::Jsonc => serde_json::from_str(&strip_jsonc(content))?,
            MessageFormat::Json | MessageFormat::Arb => serde_json::from_str(content)?,
        };

        if !root.is_object() {
            bail!("Message file root must be a JSON object.");
        }

        Ok(Self { format, root })
    }

    pub fn format(&self) -> MessageFormat {
        self.format
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// All string leaves in document order.
    pub fn flatten(&self) -> Vec<MessageUnit> {
        let mut units = Vec::new();
        flatten_value(&self.root, String::new(), self.format, &mut units);
        units
    }

    /// Source units whose key has no string value in `existing`.
    pub fn missing_from(&self, existing: &MessageDocument) -> Vec<MessageUnit> {
        let present: HashSet<String> = existing
            .flatten()
            .into_iter()
            .map(|unit| unit.key)
            .collect();

        self.flatten()
            .into_iter()
            .filter(|unit| !present.contains(&unit.key))
            .collect()
    }

    /// Build the document for `target` with the shape of `self`.
    ///
    /// Each string takes its value from `translations`, then from `existing`.
    /// Object members with neither are left out; array items fall back to the
    /// source text to keep their positions. Keys that only exist in `existing`
    /// are dropped.
    pub fn translated(
        &self,
        target: &LanguageTag,
        translations: &HashMap<String, String>,
        existing: Option<&MessageDocument>,
    ) -> MessageDocument {
        let builder = TranslatedBuilder {
            format: self.format,
            target,
            translations,
        };
        let root = builder
            .build_root(&self.root, existing.map(|doc| &doc.root))
            .unwrap_or_else(|| Value::Object(Map::new()));

        MessageDocument {
            format: self.format,
            root,
        }
    }

    /// Pretty-printed with 2-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut content =
            serde_json::to_string_pretty(&self.root).context("Failed to serialize JSON")?;
        content.push('\n');
        Ok(content)
    }

    /// Write the document, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path, self.to_pretty_string()?)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }
}

/// Dotted key path. Dots and backslashes inside a key are escaped so a flat
/// `"a.b"` key never collides with the nested path `a` -> `b`.
fn join_key(prefix: &str, key: &str) -> String {
    let key = key.replace('\\', "\\\\").replace('.', "\\.");
    if prefix.is_empty() {
        key
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn is_arb_metadata(format: MessageFormat, prefix: &str, key: &str) -> bool {
    format == MessageFormat::Arb && prefix.is_empty() && key.starts_with(ARB_METADATA_PREFIX)
}

fn flatten_value(value: &Value, prefix: String, format: MessageFormat, units: &mut Vec<MessageUnit>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_arb_metadata(format, &prefix, key) {
                    continue;
                }
                flatten_value(child, join_key(&prefix, key), format, units);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_value(child, join_key(&prefix, &index.to_string()), format, units);
            }
        }
        Value::String(text) => units.push(MessageUnit {
            key: prefix,
            text: text.clone(),
        }),
        _ => {}
    }
}

struct TranslatedBuilder<'a> {
    format: MessageFormat,
    target: &'a LanguageTag,
    translations: &'a HashMap<String, String>,
}

impl TranslatedBuilder<'_> {
    fn build_root(&self, source: &Value, existing: Option<&Value>) -> Option<Value> {
        let Value::Object(map) = source else {
            return self.build(source, "", existing);
        };

        let mut out = Map::new();
        for (key, child) in map {
            if is_arb_metadata(self.format, "", key) {
                let value = if key == ARB_LOCALE_KEY {
                    Value::String(self.target.to_arb_suffix())
                } else {
                    child.clone()
                };
                out.insert(key.clone(), value);
                continue;
            }
            let child_existing = existing.and_then(|e| e.get(key));
            if let Some(value) = self.build(child, &join_key("", key), child_existing) {
                out.insert(key.clone(), value);
            }
        }
        Some(Value::Object(out))
    }

    fn build(&self, source: &Value, key_path: &str, existing: Option<&Value>) -> Option<Value> {
        match source {
            Value::Object(map) => {
                let mut out = Map::new();
                for (key, child) in map {
                    let child_existing = existing.and_then(|e| e.get(key));
                    if let Some(value) = self.build(child, &join_key(key_path, key), child_existing)
                    {
                        out.insert(key.clone(), value);
                    }
                }
                (!out.is_empty()).then_some(Value::Object(out))
            }
            Value::Array(items) => {
                let translated = items
                    .iter()
                    .enumerate()
                    .map(|(index, child)| {
                        let child_existing = existing.and_then(|e| e.get(index));
                        self.build(child, &join_key(key_path, &index.to_string()), child_existing)
                            .unwrap_or_else(|| child.clone())
                    })
                    .collect();
                Some(Value::Array(translated))
            }
            Value::String(_) => self
                .translations
                .get(key_path)
                .cloned()
                .or_else(|| existing.and_then(Value::as_str).map(str::to_string))
                .map(Value::String),
            other => Some(other.clone()),
        }
    }
}

/// Remove `//` and `/* */` comments and trailing commas so the content can be
/// parsed as plain JSON. Line breaks are kept so error positions stay useful.
fn strip_jsonc(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;

    for (index, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[index + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}

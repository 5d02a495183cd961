use serde_yaml::Value;

/// How [`to_flat_list`] treats the scalars it collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatListOptions {
    /// Split every scalar on commas before collecting it.
    pub split_commas: bool,
    /// Keep only the first occurrence of each entry.
    pub dedup: bool,
    /// Drop nulls and entries that are empty once trimmed.
    pub compact: bool,
}

impl Default for FlatListOptions {
    fn default() -> Self {
        Self { split_commas: true, dedup: true, compact: true }
    }
}

/// Converts any value to a string, mapping null to the empty string.
///
/// Sequences and mappings are rendered as compact JSON so that nothing is
/// silently lost.
pub fn to_string_or_empty(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
        Value::Tagged(tagged) => to_string_or_empty(&tagged.value),
    }
}

/// Flattens arbitrarily nested sequences into a list of trimmed strings.
///
/// A scalar becomes a one-element list (or several, when comma splitting is
/// enabled). Insertion order is preserved.
pub fn to_flat_list(value: &Value, options: FlatListOptions) -> Vec<String> {
    let mut out = Vec::new();
    collect(value, options, &mut out);
    out
}

fn collect(value: &Value, options: FlatListOptions, out: &mut Vec<String>) {
    match value {
        Value::Sequence(items) => {
            for item in items {
                collect(item, options, out);
            }
        }
        Value::Tagged(tagged) => collect(&tagged.value, options, out),
        Value::Null if options.compact => {}
        other => {
            let text = to_string_or_empty(other);
            if options.split_commas {
                for part in text.split(',') {
                    push(part, options, out);
                }
            } else {
                push(&text, options, out);
            }
        }
    }
}

fn push(entry: &str, options: FlatListOptions, out: &mut Vec<String>) {
    let entry = entry.trim();
    if options.compact && entry.is_empty() {
        return;
    }
    if options.dedup && out.iter().any(|e| e == entry) {
        return;
    }
    out.push(entry.to_string());
}

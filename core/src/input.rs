use std::collections::HashMap;

use anyhow::{anyhow, Result};

/// Free-form command input: a textual head (requester or collaborator
/// name) plus `key:value` fields in any order.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub fields: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut text_parts = Vec::new();
    let mut fields = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                fields.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    ParsedInput {
        text: text_parts.join(" "),
        fields,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Expand abbreviated field keys against the known set. Unknown or
/// ambiguous keys become warnings rather than failing the whole command;
/// the caller decides whether to print them.
pub fn normalize_fields(
    fields: HashMap<String, String>,
    known: &[&str],
) -> (HashMap<String, String>, Vec<String>) {
    let mut normalized = HashMap::new();
    let mut warnings = Vec::new();

    for (key, value) in fields {
        match expand_key(&key, known) {
            Ok(full_key) => {
                normalized.insert(full_key, value);
            }
            Err(e) => warnings.push(e.to_string()),
        }
    }

    (normalized, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_input() {
        let args = vec![
            "Carlos".to_string(),
            "Mendes".to_string(),
            "from:2024-02-01".to_string(),
            "dest:Salvador".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.text, "Carlos Mendes");
        assert_eq!(parsed.fields.get("from"), Some(&"2024-02-01".to_string()));
        assert_eq!(parsed.fields.get("dest"), Some(&"Salvador".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["collab", "from", "to", "start", "end", "dest", "note", "cc"];

        assert_eq!(expand_key("f", &candidates).unwrap(), "from");
        assert_eq!(expand_key("dest", &candidates).unwrap(), "dest");
        assert_eq!(expand_key("n", &candidates).unwrap(), "note");

        // "c" could be collab or cc; "cc" is exact.
        assert!(expand_key("c", &candidates).is_err());
        assert_eq!(expand_key("cc", &candidates).unwrap(), "cc");

        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_normalize_fields_collects_warnings() {
        let mut fields = HashMap::new();
        fields.insert("f".to_string(), "2024-02-01".to_string());
        fields.insert("bogus".to_string(), "x".to_string());

        let (normalized, warnings) =
            normalize_fields(fields, &["collab", "from", "to", "dest"]);
        assert_eq!(normalized.get("from"), Some(&"2024-02-01".to_string()));
        assert!(!normalized.contains_key("bogus"));
        assert_eq!(warnings.len(), 1);
    }
}

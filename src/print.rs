use chrono::SecondsFormat;
use plist::Value;

use crate::date;

const DATA_PREVIEW_BYTES: usize = 20;

/// Renders a tree as indented text meant for people, not for parsing back.
pub fn pretty_print(value: &Value) -> String {
    render(value, 0)
}

fn render(value: &Value, indentation: usize) -> String {
    let indent = " ".repeat(indentation);
    let inner = " ".repeat(indentation + 2);
    match value {
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| format!("{inner}{}", render(item, indentation + 2)))
                .collect();
            format!("[\n{}\n{indent}]", items.join(",\n"))
        }
        Value::Dictionary(dict) if dict.is_empty() => "{}".to_string(),
        Value::Dictionary(dict) => {
            let items: Vec<String> = dict
                .iter()
                .map(|(k, v)| format!("{inner}{k}: {}", render(v, indentation + 2)))
                .collect();
            format!("{{\n{}\n{indent}}}", items.join(",\n"))
        }
        Value::Boolean(b) => b.to_string(),
        Value::Data(bytes) => {
            let preview = bytes
                .iter()
                .take(DATA_PREVIEW_BYTES)
                .map(|b| format!("{b:02X}"))
                .collect::<Vec<String>>()
                .join(" ");
            let ellipsis = if bytes.len() > DATA_PREVIEW_BYTES {
                "..."
            } else {
                ""
            };
            format!("Data({preview}{ellipsis} Len: {})", bytes.len())
        }
        Value::Date(d) => format!(
            "Date({})",
            date::to_datetime(d).to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        Value::Real(r) => r.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Uid(uid) => format!("Uid({})", uid.get()),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use plist::{Dictionary, Uid};

    #[test]
    fn test_scalars() {
        assert_eq!(pretty_print(&Value::Boolean(true)), "true");
        assert_eq!(pretty_print(&Value::Integer((-7i64).into())), "-7");
        assert_eq!(pretty_print(&Value::String("hi".into())), "\"hi\"");
        assert_eq!(pretty_print(&Value::Uid(Uid::new(9))), "Uid(9)");
        assert_eq!(
            pretty_print(&Value::Date(date::from_unix_secs(0).unwrap())),
            "Date(1970-01-01T00:00:00Z)"
        );
    }

    #[test]
    fn test_data_preview() {
        assert_eq!(
            pretty_print(&Value::Data(vec![0xde, 0xad])),
            "Data(DE AD Len: 2)"
        );
        let long = pretty_print(&Value::Data(vec![0; 32]));
        assert!(long.ends_with("00... Len: 32)"));
    }

    #[test]
    fn test_nested_indentation() {
        let mut dict = Dictionary::new();
        dict.insert(
            "list".to_string(),
            Value::Array(vec![Value::Integer(1i64.into()), Value::Boolean(false)]),
        );
        dict.insert("empty".to_string(), Value::Array(vec![]));
        let expected = "{\n  list: [\n    1,\n    false\n  ],\n  empty: []\n}";
        assert_eq!(pretty_print(&Value::Dictionary(dict)), expected);
    }
}

//! Shared string utilities.

/// The file name portion of a `/`-separated relative path.
pub fn file_name_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// The directory portion of a `/`-separated relative path, including the
/// trailing separator. Empty for a path without directories.
pub fn directory_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..=index],
        None => "",
    }
}

/// The identifier a file name declares: everything before its first `.`.
pub fn identifier_of(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(index) => &file_name[..index],
        None => file_name,
    }
}

/// Convert a TOML value to its string representation
pub fn toml_value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(toml_value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        toml::Value::Table(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("a/b/Foo.java"), "Foo.java");
        assert_eq!(file_name_of("Foo.java"), "Foo.java");
    }

    #[test]
    fn test_directory_of() {
        assert_eq!(directory_of("a/b/Foo.java"), "a/b/");
        assert_eq!(directory_of("Foo.java"), "");
    }

    #[test]
    fn test_identifier_of() {
        assert_eq!(identifier_of("Foo.java"), "Foo");
        assert_eq!(identifier_of("Foo.tmpl.java"), "Foo");
        assert_eq!(identifier_of("Foo"), "Foo");
    }

    #[test]
    fn test_toml_value_to_string() {
        assert_eq!(
            toml_value_to_string(&toml::Value::String("hello".to_string())),
            "hello"
        );
        assert_eq!(toml_value_to_string(&toml::Value::Integer(42)), "42");
        assert_eq!(toml_value_to_string(&toml::Value::Boolean(true)), "true");
        assert_eq!(
            toml_value_to_string(&toml::Value::Array(vec![
                toml::Value::String("a.B".to_string()),
                toml::Value::String("c.D".to_string()),
            ])),
            "a.B,c.D"
        );
    }
}

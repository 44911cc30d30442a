//! Names of named schemas and their namespace resolution.

use std::fmt;

use crate::error::SchemaError;

/// A schema name with its resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub name: String,
    pub namespace: Option<String>,
}

impl Name {
    /// Resolves `name` against an explicit and an enclosing namespace.
    ///
    /// A dotted name carries its own namespace; otherwise the explicit
    /// namespace wins over the enclosing one. Empty namespaces mean none.
    pub fn new(
        name: &str,
        namespace: Option<&str>,
        enclosing: Option<&str>,
    ) -> Result<Self, SchemaError> {
        let (namespace, short) = match name.rsplit_once('.') {
            Some((ns, short)) => (Some(ns), short),
            None => (namespace.or(enclosing), name),
        };
        if !is_valid_identifier(short) {
            return Err(SchemaError::Malformed(format!("invalid name '{name}'")));
        }
        let namespace = namespace.filter(|ns| !ns.is_empty());
        if let Some(ns) = namespace {
            if !ns.split('.').all(is_valid_identifier) {
                return Err(SchemaError::Malformed(format!("invalid namespace '{ns}'")));
            }
        }
        Ok(Self {
            name: short.to_string(),
            namespace: namespace.map(str::to_string),
        })
    }

    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_resolution() {
        let n = Name::new("Md5", None, Some("org.example")).unwrap();
        assert_eq!(n.fullname(), "org.example.Md5");

        let n = Name::new("Md5", Some("com.acme"), Some("org.example")).unwrap();
        assert_eq!(n.fullname(), "com.acme.Md5");

        let n = Name::new("a.b.Md5", Some("ignored"), None).unwrap();
        assert_eq!(n.namespace.as_deref(), Some("a.b"));
        assert_eq!(n.name, "Md5");

        let n = Name::new("Md5", Some(""), Some("org.example")).unwrap();
        assert_eq!(n.fullname(), "Md5");
    }

    #[test]
    fn rejects_invalid_identifiers() {
        assert!(Name::new("", None, None).is_err());
        assert!(Name::new("9lives", None, None).is_err());
        assert!(Name::new("ok", Some("bad..ns"), None).is_err());
        assert_eq!(Name::new("_x1", None, None).unwrap().to_string(), "_x1");
    }
}

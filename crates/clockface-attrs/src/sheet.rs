/// Attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Number(f32),
    /// `[r, g, b, a]` straight-alpha bytes.
    Color([u8; 4]),
    /// Bare identifier, e.g. a font name.
    Ident(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f32> {
        if let Value::Number(n) = self { Some(*n) } else { None }
    }

    pub fn as_color(&self) -> Option<[u8; 4]> {
        if let Value::Color(c) = self { Some(*c) } else { None }
    }

    /// String content of a `Str` or `Ident`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Color(_) => "color",
            Value::Ident(_) => "identifier",
        }
    }
}

/// A `key: value` attribute with the position of its key.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
    pub line: usize,
    pub col: usize,
}

/// A named `Name { ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleBlock {
    pub name: String,
    pub attrs: Vec<Attr>,
    pub line: usize,
    pub col: usize,
}

impl StyleBlock {
    /// Looks up an attribute value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attr(key).map(|a| &a.value)
    }

    pub fn attr(&self, key: &str) -> Option<&Attr> {
        self.attrs.iter().find(|a| a.key == key)
    }
}

/// A parsed attribute sheet: blocks in source order, names unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub blocks: Vec<StyleBlock>,
}

impl StyleSheet {
    pub fn get(&self, name: &str) -> Option<&StyleBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_kind() {
        assert_eq!(Value::Number(2.0).as_number(), Some(2.0));
        assert_eq!(Value::Number(2.0).as_color(), None);
        assert_eq!(Value::Ident("body".into()).as_str(), Some("body"));
        assert_eq!(Value::Color([1, 2, 3, 4]).kind(), "color");
    }

    #[test]
    fn sheet_lookup_by_name() {
        let sheet = crate::parse_str("A { x: 1 } B { y: #000000 }").unwrap();
        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(sheet.get("B").and_then(|b| b.get("y")), Some(&Value::Color([0, 0, 0, 255])));
        assert!(sheet.get("C").is_none());
    }
}

//! The target schema-library expression tree and its renderer.
//!
//! The emitter never builds target-language source text directly;
//! it builds this small AST of fluent `S.*` calls and property
//! objects, then renders it once. Keeping the two separate is what
//! lets [`super::SchemaEmitter`] apply post-emission modifiers
//! (`.optional()`, `.readonly()`, …) uniformly regardless of which
//! subroutine produced the base expression.

/// One node of the rendered expression tree.
#[derive(Clone, Debug)]
pub enum Expression {
    /// A bare identifier, e.g. a previously declared schema's name.
    Name(String),
    /// `path(args)`, e.g. `S.object(...)` or `S.coerce.bigint()`.
    Call { path: String, args: Vec<Expression> },
    /// `target.method(args)`, for fluent chaining.
    Method { target: Box<Expression>, method: String, args: Vec<Expression> },
    Object(Vec<(PropertyKey, Expression)>),
    Array(Vec<Expression>),
    StringLiteral(String),
    /// Pre-rendered numeral text, to preserve the source's exact
    /// representation (`1`, `1.5`, `-2`) rather than reformatting it.
    NumberLiteral(String),
    BoolLiteral(bool),
    /// Text that's already in its final rendered form (a regex
    /// literal, the `null` keyword).
    Raw(String),
    /// `S.lazy(() => name)`: the cycle-breaking back-edge.
    Lazy(String),
}

impl Expression {
    pub fn call(path: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call { path: path.into(), args }
    }

    pub fn method(self, name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Method { target: Box::new(self), method: name.into(), args }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expression::StringLiteral(s.into())
    }

    pub fn bool(b: bool) -> Self {
        Expression::BoolLiteral(b)
    }

    pub fn uint(n: u64) -> Self {
        Expression::NumberLiteral(n.to_string())
    }

    pub fn float(n: f64) -> Self {
        Expression::NumberLiteral(format_float(n))
    }

    pub fn json_number(n: &serde_json::Number) -> Self {
        Expression::NumberLiteral(n.to_string())
    }

    /// A `/pattern/` regex literal; the only metacharacter escaped is
    /// the delimiter itself, since `pattern` is already a regex in the
    /// source schema's own dialect.
    pub fn regex(pattern: &str) -> Self {
        Expression::Raw(format!("/{}/", pattern.replace('/', "\\/")))
    }

    /// Lifts an arbitrary JSON value (a schema's `default`) into the
    /// expression tree verbatim.
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Expression::Raw("null".to_string()),
            serde_json::Value::Bool(b) => Expression::BoolLiteral(*b),
            serde_json::Value::Number(n) => Expression::NumberLiteral(n.to_string()),
            serde_json::Value::String(s) => Expression::StringLiteral(s.clone()),
            serde_json::Value::Array(items) => {
                Expression::Array(items.iter().map(Expression::from_json_value).collect())
            }
            serde_json::Value::Object(map) => Expression::Object(
                map.iter().map(|(k, v)| (sanitize_key(k), Expression::from_json_value(v))).collect(),
            ),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Expression::Name(name) => name.clone(),
            Expression::Call { path, args } => format!("{path}({})", render_args(args)),
            Expression::Method { target, method, args } => {
                format!("{}.{method}({})", target.render(), render_args(args))
            }
            Expression::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let body = props
                        .iter()
                        .map(|(key, value)| format!("{}: {}", key.render(), value.render()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{{ {body} }}")
                }
            }
            Expression::Array(items) => {
                format!("[{}]", items.iter().map(Expression::render).collect::<Vec<_>>().join(","))
            }
            Expression::StringLiteral(s) => quote_single(s),
            Expression::NumberLiteral(n) => n.clone(),
            Expression::BoolLiteral(b) => b.to_string(),
            Expression::Raw(text) => text.clone(),
            Expression::Lazy(name) => format!("S.lazy(() => {name})"),
        }
    }
}

fn render_args(args: &[Expression]) -> String {
    args.iter().map(Expression::render).collect::<Vec<_>>().join(", ")
}

fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn quote_single(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// An object property key, sanitized for the object subroutine:
/// numeric-like keys become bare numeric literal keys; negative
/// numbers and anything matching `/^[0-9]/` mixed with non-digits, or
/// containing a non-word character, are quoted.
#[derive(Clone, Debug)]
pub enum PropertyKey {
    Bare(String),
    Quoted(String),
}

impl PropertyKey {
    pub fn render(&self) -> String {
        match self {
            PropertyKey::Bare(name) => name.clone(),
            PropertyKey::Quoted(name) => quote_single(name),
        }
    }
}

pub fn sanitize_key(name: &str) -> PropertyKey {
    if name.is_empty() {
        return PropertyKey::Quoted(name.to_string());
    }
    let bytes = name.as_bytes();
    let all_digits = bytes.iter().all(u8::is_ascii_digit);
    if all_digits {
        return PropertyKey::Bare(name.to_string());
    }
    let is_negative_number = bytes[0] == b'-' && bytes.len() > 1 && bytes[1..].iter().all(u8::is_ascii_digit);
    if is_negative_number {
        return PropertyKey::Quoted(name.to_string());
    }
    let starts_with_digit = bytes[0].is_ascii_digit();
    let has_non_word_char = name.chars().any(|c| !(c.is_alphanumeric() || c == '_'));
    if starts_with_digit || has_non_word_char {
        PropertyKey::Quoted(name.to_string())
    } else {
        PropertyKey::Bare(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_key_is_bare() {
        assert!(matches!(sanitize_key("123"), PropertyKey::Bare(_)));
    }

    #[test]
    fn negative_numeric_key_is_quoted() {
        assert!(matches!(sanitize_key("-1"), PropertyKey::Quoted(_)));
    }

    #[test]
    fn digit_prefixed_mixed_key_is_quoted() {
        assert!(matches!(sanitize_key("123abc"), PropertyKey::Quoted(_)));
    }

    #[test]
    fn key_with_non_word_char_is_quoted() {
        assert!(matches!(sanitize_key("foo-bar"), PropertyKey::Quoted(_)));
    }

    #[test]
    fn plain_identifier_key_is_bare() {
        assert!(matches!(sanitize_key("name"), PropertyKey::Bare(_)));
    }

    #[test]
    fn object_renders_with_spaced_braces() {
        let expr = Expression::call(
            "S.object",
            vec![Expression::Object(vec![(PropertyKey::Bare("id".into()), Expression::call("S.string", vec![]))])],
        );
        assert_eq!(expr.render(), "S.object({ id: S.string() })");
    }

    #[test]
    fn array_renders_without_inner_spacing() {
        let expr = Expression::Array(vec![Expression::string("red"), Expression::string("green")]);
        assert_eq!(expr.render(), "['red','green']");
    }
}

use jmodel_types::{NameStyle, Type, TypeDisplay, TypeEnv};

use crate::ident::validate_java_identifier;
use crate::{DeclError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// A class literal, `Foo.class`.
    Class(Type),
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Int(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::Str(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::Str(value)
    }
}

impl From<Type> for AnnotationValue {
    fn from(value: Type) -> Self {
        AnnotationValue::Class(value)
    }
}

/// One use of an annotation on a declaration, e.g. `@SuppressWarnings("unchecked")`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationUse {
    annotation: Type,
    params: Vec<(String, AnnotationValue)>,
}

impl AnnotationUse {
    pub fn new(annotation: Type) -> Self {
        Self {
            annotation,
            params: Vec::new(),
        }
    }

    pub fn annotation(&self) -> &Type {
        &self.annotation
    }

    pub fn params(&self) -> &[(String, AnnotationValue)] {
        &self.params
    }

    /// Set member `name`, replacing an earlier value for the same member.
    pub fn param(&mut self, name: &str, value: impl Into<AnnotationValue>) -> Result<&mut Self> {
        validate_java_identifier(name).map_err(|err| DeclError::InvalidIdentifier {
            name: name.to_string(),
            reason: err.reason(),
        })?;

        let value = value.into();
        match self.params.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((name.to_string(), value)),
        }
        Ok(self)
    }

    pub fn render(&self, env: &dyn TypeEnv, style: NameStyle) -> String {
        let mut out = format!("@{}", TypeDisplay::new(env, &self.annotation, style));
        match self.params.as_slice() {
            [] => {}
            [(name, value)] if name == "value" => {
                out.push('(');
                out.push_str(&render_value(env, value, style));
                out.push(')');
            }
            params => {
                out.push('(');
                for (idx, (name, value)) in params.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push_str(" = ");
                    out.push_str(&render_value(env, value, style));
                }
                out.push(')');
            }
        }
        out
    }
}

fn render_value(env: &dyn TypeEnv, value: &AnnotationValue, style: NameStyle) -> String {
    match value {
        AnnotationValue::Bool(b) => b.to_string(),
        AnnotationValue::Int(i) => i.to_string(),
        AnnotationValue::Str(s) => java_string_literal(s),
        AnnotationValue::Class(ty) => format!("{}.class", TypeDisplay::new(env, ty, style)),
    }
}

/// Quote `value` as a Java string literal. Characters outside printable ASCII use
/// `\uXXXX` escapes (surrogate pairs above the BMP).
fn java_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out.push('"');
    out
}

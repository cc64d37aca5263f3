//! Java identifier validation (JLS 3.8).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierError {
    Empty,
    InvalidStartChar,
    InvalidChar,
    Reserved,
}

impl IdentifierError {
    pub fn reason(self) -> &'static str {
        match self {
            IdentifierError::Empty => "name is empty",
            IdentifierError::InvalidStartChar => "must start with a letter, '_' or '$'",
            IdentifierError::InvalidChar => "must contain only letters, digits, '_' or '$'",
            IdentifierError::Reserved => "is a reserved word",
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_ident::is_xid_start(ch)
}

fn is_ident_part(ch: char) -> bool {
    ch == '$' || ch == '_' || unicode_ident::is_xid_continue(ch)
}

/// Keywords plus the `true`, `false` and `null` literals. Contextual keywords such as
/// `var` or `record` are valid variable names and are not listed.
fn is_reserved(ident: &str) -> bool {
    matches!(
        ident,
        "_" | "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "false"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "null"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "true"
            | "try"
            | "void"
            | "volatile"
            | "while"
    )
}

pub fn validate_java_identifier(name: &str) -> Result<(), IdentifierError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(IdentifierError::Empty);
    };
    if !is_ident_start(first) {
        return Err(IdentifierError::InvalidStartChar);
    }
    if !chars.all(is_ident_part) {
        return Err(IdentifierError::InvalidChar);
    }
    if is_reserved(name) {
        return Err(IdentifierError::Reserved);
    }
    Ok(())
}

pub fn is_java_identifier(name: &str) -> bool {
    validate_java_identifier(name).is_ok()
}

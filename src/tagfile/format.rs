//! Display-name construction for index entries.

use crate::models::{ClassifierOptions, ScopeChain, SCOPE_SEPARATOR};

/// Callable signature as recorded in a tag file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Parameter declarations in order, as Doxygen wrote them.
    pub params: Vec<String>,
    /// Text after the closing parenthesis (`const`, `override`, `=0`).
    pub qualifiers: Option<String>,
    /// Return type; absent for constructors and destructors.
    pub return_type: Option<String>,
}

impl Signature {
    /// Builds a signature from the raw `<arglist>` and `<type>` text.
    ///
    /// Parameters are split at commas that are not nested inside `()`,
    /// `<>`, `[]` or `{}`. An arglist whose brackets never balance is kept as
    /// a single parameter.
    pub fn from_arglist(arglist: Option<&str>, return_type: Option<&str>) -> Self {
        let (params, qualifiers) = arglist.map(split_arglist).unwrap_or_default();
        Self {
            params,
            qualifiers,
            return_type: return_type
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }

    /// Return type worth showing: present, non-empty and not `void`.
    ///
    /// Declaration specifiers Doxygen keeps in `<type>` (`virtual void`,
    /// `static void`) do not make a void return worth showing. The text is
    /// returned as written otherwise.
    pub fn shown_return_type(&self) -> Option<&str> {
        self.return_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && !is_void(t))
    }
}

/// Builds the display name for an entry.
///
/// Scope qualification and signature annotation are each applied only when
/// the matching option is enabled. Pure: the same inputs always produce the
/// same string.
pub fn format_name(
    base_name: &str,
    scope: &ScopeChain,
    signature: Option<&Signature>,
    options: &ClassifierOptions,
) -> String {
    let mut name = String::new();

    if options.include_parent_scopes {
        for segment in scope.segments() {
            name.push_str(segment);
            name.push_str(SCOPE_SEPARATOR);
        }
    }
    name.push_str(base_name);

    if options.include_function_signatures {
        if let Some(signature) = signature {
            name.push('(');
            name.push_str(&signature.params.join(", "));
            name.push(')');

            if let Some(qualifiers) = &signature.qualifiers {
                name.push(' ');
                name.push_str(qualifiers);
            }

            if let Some(return_type) = signature.shown_return_type() {
                name.push_str(" -> ");
                name.push_str(return_type);
            }
        }
    }

    name
}

const DECL_SPECIFIERS: &[&str] = &[
    "virtual",
    "static",
    "inline",
    "explicit",
    "constexpr",
    "consteval",
    "friend",
    "extern",
];

fn is_void(return_type: &str) -> bool {
    let mut words = return_type
        .split_whitespace()
        .skip_while(|word| DECL_SPECIFIERS.contains(word));
    words.next() == Some("void") && words.next().is_none()
}

fn split_arglist(arglist: &str) -> (Vec<String>, Option<String>) {
    let text = arglist.trim();
    if text.is_empty() {
        return (Vec::new(), None);
    }

    let Some(body) = text.strip_prefix('(') else {
        return (vec![text.to_string()], None);
    };

    let mut params = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut close = None;

    for (i, c) in body.char_indices() {
        match c {
            '(' | '<' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' if depth == 0 => {
                close = Some(i);
                break;
            }
            ')' | '>' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => params.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    let Some(close) = close else {
        return unbalanced(text);
    };

    if !params.is_empty() || !current.trim().is_empty() {
        params.push(current);
    }

    let params = params.iter().map(|p| p.trim().to_string()).collect();
    (params, qualifiers(&body[close + 1..]))
}

fn unbalanced(text: &str) -> (Vec<String>, Option<String>) {
    match text.rfind(')') {
        Some(end) if end > 0 => {
            let inner = text[1..end].trim();
            let params = if inner.is_empty() {
                Vec::new()
            } else {
                vec![inner.to_string()]
            };
            (params, qualifiers(&text[end + 1..]))
        }
        _ => (vec![text[1..].trim().to_string()], None),
    }
}

fn qualifiers(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

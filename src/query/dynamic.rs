//! Dynamic `where<Field>` method names.

/// A method name resolved against the filter family.
#[derive(Debug, PartialEq, Eq)]
pub enum FilterMethod {
    /// `where(key, value)`
    Where,
    /// `whereIn(key, values...)`
    WhereIn,
    /// `whereHas(relation, value)`
    WhereHas,
    /// `where<Field>(value)`, carrying the snake_cased field.
    WhereField(String),
}

impl FilterMethod {
    /// Resolves a method name. Returns `None` for anything outside the
    /// filter family, including a bare `where` prefix with no field.
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "where" => Some(Self::Where),
            "whereIn" => Some(Self::WhereIn),
            "whereHas" => Some(Self::WhereHas),
            _ => {
                let field = method.strip_prefix("where")?;
                let key = snake_case(field);
                (!key.is_empty()).then_some(Self::WhereField(key))
            }
        }
    }
}

/// `PublicationYear` -> `publication_year`.
///
/// Whitespace is dropped and an underscore is inserted before every
/// uppercase letter except the first, so `DOI` becomes `d_o_i`.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars().filter(|c| !c.is_whitespace()) {
        if c.is_uppercase() && !out.is_empty() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

use crate::basic_types::ModelError;
use crate::basic_types::ModelResult;

/// A clue exactly as it appears in a puzzle definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClueToken {
    Int(i32),
    Text(String),
    List(Vec<ClueToken>),
}

impl From<i32> for ClueToken {
    fn from(value: i32) -> Self {
        ClueToken::Int(value)
    }
}

impl From<&str> for ClueToken {
    fn from(value: &str) -> Self {
        ClueToken::Text(value.to_owned())
    }
}

impl From<String> for ClueToken {
    fn from(value: String) -> Self {
        ClueToken::Text(value)
    }
}

impl<T: Into<ClueToken>> From<Vec<T>> for ClueToken {
    fn from(values: Vec<T>) -> Self {
        ClueToken::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<&ClueToken> for ClueToken {
    fn from(value: &ClueToken) -> Self {
        value.clone()
    }
}

/// One option of a [`ClueValue::Alternatives`] clue.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Alternative {
    Literal(i32),
    Symbol(String),
}

/// The meaning of a clue token.
///
/// Tokens are parsed as follows:
/// - `5` or `"5"`: the literal value 5;
/// - `">5"`, `">=5"`, `"<5"`, `"<=5"`: an unknown value in the given half-open range;
/// - `"1,3,x"` or a list of tokens: an unknown value equal to one of the alternatives;
/// - `"x"`: an unknown value shared by every clue mentioning `x`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClueValue {
    Literal(i32),
    Interval { min: Option<i32>, max: Option<i32> },
    Alternatives(Vec<Alternative>),
    Symbol(String),
}

impl ClueValue {
    pub fn parse(token: &ClueToken) -> ModelResult<ClueValue> {
        match token {
            ClueToken::Int(value) => Ok(ClueValue::Literal(*value)),
            ClueToken::Text(text) => parse_text(text),
            ClueToken::List(items) => parse_list(items),
        }
    }
}

fn parse_text(text: &str) -> ModelResult<ClueValue> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(malformed(text, "empty token"));
    }

    if let Ok(value) = trimmed.parse::<i32>() {
        return Ok(ClueValue::Literal(value));
    }

    if trimmed.contains(',') {
        let alternatives = trimmed
            .split(',')
            .map(|part| parse_alternative(part).ok_or_else(|| malformed(text, "bad alternative")))
            .collect::<ModelResult<Vec<_>>>()?;
        return Ok(ClueValue::Alternatives(deduplicate(alternatives)));
    }

    if let Some(interval) = parse_comparison(trimmed) {
        return interval.ok_or_else(|| malformed(text, "comparison needs an integer bound"));
    }

    if is_symbol(trimmed) {
        return Ok(ClueValue::Symbol(trimmed.to_owned()));
    }

    Err(malformed(text, "unrecognised token"))
}

fn parse_list(items: &[ClueToken]) -> ModelResult<ClueValue> {
    if items.is_empty() {
        return Err(malformed("[]", "empty list"));
    }

    let alternatives = items
        .iter()
        .map(|item| match item {
            ClueToken::Int(value) => Ok(Alternative::Literal(*value)),
            ClueToken::Text(text) => {
                parse_alternative(text).ok_or_else(|| malformed(text, "bad alternative"))
            }
            ClueToken::List(_) => Err(malformed(&format!("{item:?}"), "nested lists")),
        })
        .collect::<ModelResult<Vec<_>>>()?;

    Ok(ClueValue::Alternatives(deduplicate(alternatives)))
}

fn parse_alternative(text: &str) -> Option<Alternative> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i32>() {
        Some(Alternative::Literal(value))
    } else if is_symbol(text) {
        Some(Alternative::Symbol(text.to_owned()))
    } else {
        None
    }
}

/// `None` if `text` is not a comparison at all, `Some(None)` if its bound does not parse.
fn parse_comparison(text: &str) -> Option<Option<ClueValue>> {
    let (operator, bound) = [">=", "<=", ">", "<"]
        .into_iter()
        .find_map(|operator| Some((operator, text.strip_prefix(operator)?)))?;

    let interval = bound.trim().parse::<i32>().ok().map(|bound| match operator {
        ">=" => ClueValue::Interval {
            min: Some(bound),
            max: None,
        },
        ">" => ClueValue::Interval {
            min: Some(bound.saturating_add(1)),
            max: None,
        },
        "<=" => ClueValue::Interval {
            min: None,
            max: Some(bound),
        },
        _ => ClueValue::Interval {
            min: None,
            max: Some(bound.saturating_sub(1)),
        },
    });

    Some(interval)
}

fn is_symbol(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn deduplicate(alternatives: Vec<Alternative>) -> Vec<Alternative> {
    let mut unique = Vec::with_capacity(alternatives.len());
    for alternative in alternatives {
        if !unique.contains(&alternative) {
            unique.push(alternative);
        }
    }
    unique
}

fn malformed(token: &str, reason: &'static str) -> ModelError {
    ModelError::MalformedClue {
        token: token.to_owned(),
        reason,
    }
}

//! Pull `{"remember": [...]}` learnings out of free-form agent output

use serde_json::Value;

const FENCE: &str = "```";
const REMEMBER_KEY: &str = "remember";

/// What [`extract_learnings`] found in a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractResult {
    /// No candidate JSON block carried a `remember` key
    NotFound,
    /// A candidate looked like structured learnings but could not be used
    Malformed(String),
    /// Learnings in source order; may be empty
    Found(Vec<String>),
}

impl ExtractResult {
    /// Learnings, or nothing for the non-`Found` cases
    pub fn into_learnings(self) -> Vec<String> {
        match self {
            Self::Found(learnings) => learnings,
            Self::NotFound | Self::Malformed(_) => Vec::new(),
        }
    }
}

struct Fenced<'a> {
    info: &'a str,
    body: String,
}

/// Scan a response for learnings.
///
/// Candidates are tried in order: ```` ```json ```` fenced blocks, untagged
/// fenced blocks, then the whole response if it is a bare JSON object. The
/// first candidate that is a JSON object with a `remember` key decides the
/// result.
pub fn extract_learnings(response: &str) -> ExtractResult {
    let blocks = fenced_blocks(response);
    let tagged = blocks
        .iter()
        .filter(|b| b.info.eq_ignore_ascii_case("json"))
        .map(|b| b.body.as_str());
    let untagged = blocks
        .iter()
        .filter(|b| b.info.is_empty())
        .map(|b| b.body.as_str());

    let trimmed = response.trim();
    let bare = (trimmed.starts_with('{') && trimmed.ends_with('}')).then_some(trimmed);

    let mut parse_failure = None;

    for candidate in tagged.chain(untagged).chain(bare) {
        let value: Value = match serde_json::from_str(candidate) {
            Ok(value) => value,
            Err(err) => {
                parse_failure.get_or_insert_with(|| format!("invalid JSON: {err}"));
                continue;
            }
        };

        let Some(remember) = value.get(REMEMBER_KEY) else {
            continue;
        };

        return match remember {
            Value::Null => ExtractResult::Found(Vec::new()),
            Value::Array(entries) => ExtractResult::Found(
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            other => ExtractResult::Malformed(format!(
                "\"{REMEMBER_KEY}\" must be an array, got {}",
                json_kind(other)
            )),
        };
    }

    match parse_failure {
        Some(reason) => ExtractResult::Malformed(reason),
        None => ExtractResult::NotFound,
    }
}

/// Fenced code blocks with their info string; an unterminated fence runs to the end
fn fenced_blocks(text: &str) -> Vec<Fenced<'_>> {
    let mut blocks = Vec::new();
    let mut open: Option<Fenced<'_>> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();
        match open.take() {
            None => {
                if let Some(info) = trimmed.strip_prefix(FENCE) {
                    open = Some(Fenced {
                        info: info.trim(),
                        body: String::new(),
                    });
                }
            }
            Some(mut block) => {
                if trimmed.starts_with(FENCE) {
                    blocks.push(block);
                } else {
                    block.body.push_str(line);
                    block.body.push('\n');
                    open = Some(block);
                }
            }
        }
    }

    blocks.extend(open);
    blocks
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

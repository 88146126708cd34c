use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Correct answer of a puzzle as delivered by the remote service.
///
/// The service is free to send either a JSON number or a string, so both are kept
/// as-is and only compared through [`Solution::canonical`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Solution {
    Number(Number),
    Text(String),
}

impl Solution {
    pub fn canonical(&self) -> String {
        match self {
            Self::Number(number) => canonical_number(number),
            Self::Text(text) => text.clone(),
        }
    }

    pub fn matches(&self, answer: &str) -> bool {
        self.canonical() == answer
    }
}

impl From<i64> for Solution {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i32> for Solution {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for Solution {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn canonical_number(number: &Number) -> String {
    if let Some(v) = number.as_i64() {
        return v.to_string();
    }
    if let Some(v) = number.as_u64() {
        return v.to_string();
    }
    match number.as_f64() {
        Some(v) if v.is_finite() => canonical_float(v),
        _ => number.to_string(),
    }
}

/// Renders a float the way a browser prints a number: plain digits between 1e-7 and
/// 1e21, `d.ddde±x` outside that range, and no trailing ".0" on integral values.
fn canonical_float(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    // `{:e}` yields the shortest round-tripping digits, e.g. "1.23456e2".
    let scientific = format!("{:e}", v.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return v.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return v.to_string();
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let len = digits.len() as i32;
    let point = exponent + 1;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(-point as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.abs())
        }
    };

    if v < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// One question instance. Replaced wholesale by the next successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleDescriptor {
    pub image_reference: String,
    pub solution: Solution,
}

impl PuzzleDescriptor {
    pub fn new(image_reference: impl Into<String>, solution: impl Into<Solution>) -> Self {
        Self {
            image_reference: image_reference.into(),
            solution: solution.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Neutral,
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionView {
    SignedIn { identifier: UserIdentity },
    Guest,
}

impl SessionView {
    pub fn from_user(user: Option<UserIdentity>) -> Self {
        match user {
            Some(identifier) => Self::SignedIn { identifier },
            None => Self::Guest,
        }
    }
}

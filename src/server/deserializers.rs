use serde::{Deserialize, Deserializer};

// `?page=` that is missing, empty, zero, negative or not a number means the first page.
// Positive numbers too large for u32 clamp to u32::MAX, which is always past the end.
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_page).unwrap_or(1))
}

fn parse_page(value: &str) -> Option<u32> {
    let digits = value.trim().strip_prefix('+').unwrap_or(value.trim());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.bytes().all(|b| b == b'0') {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

pub fn first_page() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

// the UI keeps select values as strings ("2"), so ids and difficulties come
// either as JSON numbers or as numeric strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NumberOrString")]
pub struct LenientI64(pub i64);

impl TryFrom<NumberOrString> for LenientI64 {
    type Error = String;

    fn try_from(value: NumberOrString) -> Result<Self, Self::Error> {
        match value {
            NumberOrString::Number(v) => Ok(LenientI64(v)),
            NumberOrString::String(s) => match s.trim().parse::<i64>() {
                Ok(v) => Ok(LenientI64(v)),
                Err(_) => Err(format!("Wrong value {s}, can not parse to i64")),
            },
        }
    }
}

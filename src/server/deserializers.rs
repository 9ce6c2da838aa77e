use serde::{Deserialize, Deserializer};

use super::pagination::FIRST_PAGE;

// `?page=` is read the forgiving way: anything that is not a non-negative integer
// falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(FIRST_PAGE))
}

pub fn first_page() -> u64 {
    FIRST_PAGE
}

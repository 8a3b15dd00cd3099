//! Event category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Music,
    Sports,
    Education,
    Technology,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Music,
        Category::Sports,
        Category::Education,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "MUSIC",
            Category::Sports => "SPORTS",
            Category::Education => "EDUCATION",
            Category::Technology => "TECHNOLOGY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "category",
                    "expected one of MUSIC, SPORTS, EDUCATION, TECHNOLOGY",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_category_from_its_name() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn rejects_unknown_or_lowercase() {
        assert!("music".parse::<Category>().is_err());
        assert!("COOKING".parse::<Category>().is_err());
    }
}

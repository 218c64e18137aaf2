use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Expense bucket. The fixed set matches the backend's category names
/// exactly (note the uppercase "EMI"); any other string is treated as a
/// user-defined goal bucket and round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transport,
    Emi,
    Health,
    Fun,
    Other,
    Goal(String),
}

impl Category {
    /// The six built-in buckets, in display order.
    pub fn fixed() -> [Category; 6] {
        [
            Category::Food,
            Category::Transport,
            Category::Emi,
            Category::Health,
            Category::Fun,
            Category::Other,
        ]
    }

    pub fn from_name(name: &str) -> Category {
        match name {
            "Food" => Category::Food,
            "Transport" => Category::Transport,
            "EMI" => Category::Emi,
            "Health" => Category::Health,
            "Fun" => Category::Fun,
            "Other" => Category::Other,
            other => Category::Goal(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Emi => "EMI",
            Category::Health => "Health",
            Category::Fun => "Fun",
            Category::Other => "Other",
            Category::Goal(name) => name,
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Category::Goal(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from_name(s))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Category::from_name(&name))
    }
}

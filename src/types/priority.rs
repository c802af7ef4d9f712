use std::fmt;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Priority {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl Priority {
    /// Wire value expected by the backend.
    pub fn as_wire(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.label();
        match self {
            Priority::Low => label.green().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::High => label.red().bold().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_values() {
        let p: Priority = serde_json::from_str("\"MEDIUM\"").unwrap();
        assert_eq!(p, Priority::Medium);
        assert_eq!(p.as_wire(), "MEDIUM");
        assert_eq!(p.label(), "Medium");
    }
}

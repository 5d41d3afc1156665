//! History data types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryHeader {
    pub names: Vec<String>,
    /// RFC 3339 creation timestamp.
    pub created: String,
}

impl HistoryHeader {
    pub fn now(names: Vec<String>) -> Self {
        Self {
            names,
            created: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub header: HistoryHeader,
    pub samples: Vec<Vec<f64>>,
}

impl History {
    /// One series per quantity, in header order.
    pub fn series(&self) -> Vec<(String, Vec<f64>)> {
        self.header
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values = self.samples.iter().map(|s| s[i]).collect();
                (name.clone(), values)
            })
            .collect()
    }
}

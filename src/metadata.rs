use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMetadata {
    pub title: String,
    pub subtitle: String,
}

impl Default for CalendarMetadata {
    fn default() -> Self {
        Self {
            title: "Academic Calendar".to_string(),
            subtitle: "Odd Semester".to_string(),
        }
    }
}

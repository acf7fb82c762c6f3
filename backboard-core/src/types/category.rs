//! Workflow categories and their fixed render ranking.

use serde::{Deserialize, Serialize};

/// One of the four fixed workflow stages an item moves through.
///
/// The wire representation uses the four fixed strings the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "In Review")]
    InReview,
    Done,
}

impl Category {
    /// All categories, in workflow order.
    pub const ALL: [Category; 4] = [
        Category::Planned,
        Category::InProgress,
        Category::InReview,
        Category::Done,
    ];

    /// Bucket order used by the view projector. With `show_done` the Done
    /// bucket renders first; without it the Done bucket is omitted entirely.
    pub fn render_order(show_done: bool) -> &'static [Category] {
        const WITH_DONE: [Category; 4] = [
            Category::Done,
            Category::InReview,
            Category::InProgress,
            Category::Planned,
        ];
        const WITHOUT_DONE: [Category; 3] = [
            Category::InReview,
            Category::InProgress,
            Category::Planned,
        ];
        if show_done {
            &WITH_DONE
        } else {
            &WITHOUT_DONE
        }
    }

    /// The persisted string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Planned => "Planned",
            Category::InProgress => "In Progress",
            Category::InReview => "In Review",
            Category::Done => "Done",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Category::InProgress).unwrap(),
            "\"In Progress\""
        );
        let parsed: Category = serde_json::from_str("\"In Review\"").unwrap();
        assert_eq!(parsed, Category::InReview);
    }

    #[test]
    fn test_category_default_is_planned() {
        assert_eq!(Category::default(), Category::Planned);
    }

    #[test]
    fn test_render_order() {
        assert_eq!(
            Category::render_order(true),
            &[
                Category::Done,
                Category::InReview,
                Category::InProgress,
                Category::Planned
            ]
        );
        assert_eq!(
            Category::render_order(false),
            &[Category::InReview, Category::InProgress, Category::Planned]
        );
    }
}

//! Parent-facing SMS message templates.
//!
//! Each [`MarkCategory`] maps to exactly one template. The only substitution
//! is `{name}`, the student's display name.

use crate::attendance::MarkCategory;

/// Placeholder replaced with the student's name.
pub const NAME_PLACEHOLDER: &str = "{name}";

pub const DEFAULT_ABSENT_TEMPLATE: &str =
    "Dear Parent, your ward {name} is absent from school today.";

pub const DEFAULT_LATE_TEMPLATE: &str =
    "Dear Parent, your ward {name} arrived late to school today.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplates {
    pub absent: String,
    pub late: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            absent: DEFAULT_ABSENT_TEMPLATE.to_string(),
            late: DEFAULT_LATE_TEMPLATE.to_string(),
        }
    }
}

impl MessageTemplates {
    pub fn template_for(&self, category: MarkCategory) -> &str {
        match category {
            MarkCategory::Absent => &self.absent,
            MarkCategory::Late => &self.late,
        }
    }

    /// Render the message body for `category` and `student_name`.
    pub fn render(&self, category: MarkCategory, student_name: &str) -> String {
        self.template_for(category)
            .replace(NAME_PLACEHOLDER, student_name.trim())
    }
}

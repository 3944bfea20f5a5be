//! Fields shared by problems and plans.

use super::validation::{Field, Text, Violations, Whole};

/// Maximum length of problem and plan content.
pub const NOTE_CONTENT_MAX: usize = 2000;

const DISPLAY_ORDER: Whole<u32> = Whole::non_negative("display order").at_most(u32::MAX as u64);

/// Content and optional position read from a problem or plan request.
pub(crate) struct NoteFields {
    pub(crate) content: String,
    pub(crate) display_order: Option<u32>,
}

/// Read `content` with `rule` and the optional `display_order`.
pub(crate) fn note_fields(
    field: &Field<'_>,
    violations: &mut Violations,
    rule: &Text,
) -> Option<NoteFields> {
    field.object(violations)?;
    let content = field.key("content").required(violations, rule);
    let display_order = field.key("display_order").optional(violations, &DISPLAY_ORDER);
    Some(NoteFields {
        content: content?,
        display_order: display_order?,
    })
}

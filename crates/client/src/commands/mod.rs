//! Commands module - CLI command implementations.

pub mod auth;
pub mod search;
pub mod session;

use tracing::warn;

use crate::context::AppContext;
use crate::validation::FocusTarget;

/// Points the user at the flag behind the first invalid field.
#[derive(Debug, Default)]
pub struct FlagHint {
    pub flag: Option<String>,
}

impl FocusTarget for FlagHint {
    fn focus_field(&mut self, field: &str) {
        let flag = match field {
            "userType" => "--user-type".to_string(),
            other => format!("--{}", other),
        };
        warn!("Check the {} argument", flag);
        self.flag = Some(flag);
    }
}

/// Print whatever notification is showing.
pub(crate) fn print_notification(ctx: &AppContext) {
    if let Some(note) = ctx.notifications().current() {
        println!("[{}] {}", note.kind, note.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_hint_maps_field_names() {
        let mut hint = FlagHint::default();
        hint.focus_field("email");
        assert_eq!(hint.flag.as_deref(), Some("--email"));

        hint.focus_field("userType");
        assert_eq!(hint.flag.as_deref(), Some("--user-type"));
    }
}

//! Per-call letter settings.
//!
//! An explicit value object passed to the composer; nothing here is read
//! from a global store.

/// Sentinel value of `consultant_title_suffix` meaning "no suffix".
pub const TITLE_SUFFIX_NONE: &str = "無し";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LetterSettings {
    /// Emit the centered greeting paragraph before the patient table.
    pub include_greeting: bool,
    /// Append the patient's telephone number to the address cell and use
    /// the combined address/telephone label.
    pub telephone_with_address: bool,
    /// Honorific suffix appended after the consultant doctor line.
    /// Unset, empty, and [`TITLE_SUFFIX_NONE`] all disable it.
    pub consultant_title_suffix: Option<String>,
}

impl LetterSettings {
    /// The effective title suffix, with the sentinel filtered out.
    pub fn title_suffix(&self) -> Option<&str> {
        match self.consultant_title_suffix.as_deref() {
            None | Some("") => None,
            Some(s) if s == TITLE_SUFFIX_NONE => None,
            Some(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_empty_and_unset_disable_the_suffix() {
        let mut settings = LetterSettings::default();
        assert_eq!(settings.title_suffix(), None);
        settings.consultant_title_suffix = Some(String::new());
        assert_eq!(settings.title_suffix(), None);
        settings.consultant_title_suffix = Some(TITLE_SUFFIX_NONE.into());
        assert_eq!(settings.title_suffix(), None);
        settings.consultant_title_suffix = Some("御机下".into());
        assert_eq!(settings.title_suffix(), Some("御机下"));
    }
}

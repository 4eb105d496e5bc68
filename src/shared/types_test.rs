//! Test to trigger ts-rs bindings export
//! Run with: cargo test export_bindings

#[cfg(test)]
mod tests {
    use ts_rs::TS;

    use crate::shared::events::{AppEvent, Notice, NoticeLevel};
    use crate::shared::settings::{AppSettings, UserPreferences};
    use crate::shared::types::*;

    #[test]
    fn export_bindings() {
        LanguagePair::export().expect("Failed to export LanguagePair");
        GlossaryEntry::export().expect("Failed to export GlossaryEntry");
        RuleEntry::export().expect("Failed to export RuleEntry");
        Improvement::export().expect("Failed to export Improvement");
        UserDetails::export().expect("Failed to export UserDetails");
        Ack::export().expect("Failed to export Ack");

        Notice::export().expect("Failed to export Notice");
        NoticeLevel::export().expect("Failed to export NoticeLevel");
        AppEvent::export().expect("Failed to export AppEvent");

        AppSettings::export().expect("Failed to export AppSettings");
        UserPreferences::export().expect("Failed to export UserPreferences");
    }
}

//! Live recomputation of the payload as the user edits.
//!
//! Every edit goes through [`apply`], a pure transition from the prior [`State`] to the
//! next one. A transition re-validates the whole field set and only runs the encoder when
//! validation passes, so a [`State`] never carries a payload derived from invalid input.
//! There is no debouncing and nothing runs in the background: the returned state is final.
//!
//! [`Controller`] wraps the transition for hosts that prefer to hold one mutable object.
//!
//! # Example
//!
//! ```rust
//! use quickqr::config::FieldDefaults;
//! use quickqr::controller::Controller;
//! use quickqr::payload::{Edit, Field, PayloadKind};
//!
//! let mut controller = Controller::new(FieldDefaults::blank(), PayloadKind::SmsIntent);
//! assert_eq!(controller.state().payload(), "");
//!
//! controller.apply(Edit::text(Field::Phone, "555")).unwrap();
//! assert_eq!(controller.state().payload(), "SMSTO:555:");
//! ```
use tracing::{debug, warn};

use crate::config::{FieldDefaults, Settings};
use crate::encode::encode;
use crate::error::EditError;
use crate::i18n::{Message, Translate};
use crate::payload::{Edit, FieldSet, PayloadKind};
use crate::validate::{check, Report};

/// What the output area should show.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Output {
    /// A non-empty payload, ready for the renderer.
    Payload(String),
    /// Nothing to encode; show this message instead.
    Placeholder(Message),
}

impl Output {
    /// The payload, or `""` when there is none.
    pub fn payload(&self) -> &str {
        match self {
            Output::Payload(payload) => payload,
            Output::Placeholder(_) => "",
        }
    }

    pub fn is_payload(&self) -> bool {
        matches!(self, Output::Payload(_))
    }

    /// The "encoded data" preview line: the payload itself, or the same message the
    /// placeholder shows.
    pub fn preview<T: Translate + ?Sized>(&self, translator: &T) -> String {
        match self {
            Output::Payload(payload) => payload.clone(),
            Output::Placeholder(message) => message.render(translator),
        }
    }
}

/// A field set together with its validation report and the output derived from both.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct State {
    fields: FieldSet,
    report: Report,
    output: Output,
}

impl State {
    /// Validates `fields` and, if they pass, encodes them.
    pub fn new(fields: FieldSet) -> Self {
        let kind = fields.kind();
        let (report, output) = match check(&fields) {
            Ok(validated) => {
                let payload = encode(&validated);
                let output = if payload.is_empty() {
                    Output::Placeholder(Message::placeholder(kind))
                } else {
                    Output::Payload(payload)
                };
                (Report::clean(kind), output)
            }
            Err(report) => {
                let message = match report.first_error() {
                    Some((field, error)) => Message::for_error(kind, field, error),
                    None => Message::placeholder(kind),
                };
                (report, Output::Placeholder(message))
            }
        };
        debug!(
            kind = %kind,
            valid = report.is_valid(),
            first_error = ?report.first_error(),
            payload_len = output.payload().len(),
            "recomputed payload"
        );
        State { fields, report, output }
    }

    pub fn kind(&self) -> PayloadKind {
        self.fields.kind()
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Shorthand for `self.output().payload()`.
    pub fn payload(&self) -> &str {
        self.output.payload()
    }
}

/// Computes the state that follows `prior` after `edit`.
///
/// Switching to another kind starts over from that kind's entry in `defaults`, dropping
/// the previous field set and its report. Selecting the kind that is already active, or a
/// field edit that leaves the field set unchanged, returns the prior state as is.
///
/// # Errors
///
/// Returns [`EditError`] when the edit targets a field the active kind does not own. The
/// prior state stays valid and should be kept.
pub fn apply(prior: &State, edit: &Edit, defaults: &FieldDefaults) -> Result<State, EditError> {
    match edit {
        Edit::SwitchKind(kind) if *kind == prior.kind() => Ok(prior.clone()),
        Edit::SwitchKind(kind) => {
            debug!(from = %prior.kind(), to = %kind, "switching payload kind");
            Ok(State::new(defaults.for_kind(*kind)))
        }
        Edit::Field(field_edit) => {
            let mut fields = prior.fields.clone();
            if let Err(err) = fields.apply(field_edit) {
                warn!(kind = %prior.kind(), error = %err, "rejected edit");
                return Err(err);
            }
            if fields == prior.fields {
                return Ok(prior.clone());
            }
            Ok(State::new(fields))
        }
    }
}

/// Owns the active state and the defaults new kinds start from.
#[derive(Clone, Debug)]
pub struct Controller {
    defaults: FieldDefaults,
    state: State,
}

impl Controller {
    /// Starts with `kind` active, seeded from `defaults`.
    pub fn new(defaults: FieldDefaults, kind: PayloadKind) -> Self {
        let state = State::new(defaults.for_kind(kind));
        Controller { defaults, state }
    }

    /// Starts with `kind` active, seeded from the localized defaults in `settings`.
    pub fn from_settings(settings: &Settings, kind: PayloadKind) -> Self {
        Controller::new(settings.field_defaults(), kind)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn defaults(&self) -> &FieldDefaults {
        &self.defaults
    }

    /// Applies one edit and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] if the edit does not fit the active kind; the current state is
    /// kept.
    pub fn apply(&mut self, edit: Edit) -> Result<&State, EditError> {
        self.state = apply(&self.state, &edit, &self.defaults)?;
        Ok(&self.state)
    }

    /// Replaces the defaults (after a language change, say) and resets the active kind to
    /// its new defaults.
    pub fn set_defaults(&mut self, defaults: FieldDefaults) {
        self.defaults = defaults;
        self.state = State::new(self.defaults.for_kind(self.state.kind()));
    }
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Key, Language};
    use crate::payload::{
        ContactFields, EmailFields, Encryption, Field, FieldEdit, SmsFields, TextFields, WifiFields,
    };
    use crate::validate::{validate, ErrorKind};
    use proptest::prelude::*;

    fn any_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just(" \u{FEFF}\t".to_string()),
            "[a-z]{1,6}@[a-z]{1,6}\\.(com|io)",
            "[a-zA-Z0-9;:,@. ]{0,12}",
            "\\PC{0,40}",
            "x{90,170}",
            "\u{1F600}{10,90}",
        ]
    }

    fn any_encryption() -> impl Strategy<Value = Encryption> {
        prop_oneof![Just(Encryption::Wpa), Just(Encryption::Wep), Just(Encryption::NoPass)]
    }

    fn any_field_set() -> impl Strategy<Value = FieldSet> {
        prop_oneof![
            any_value().prop_map(|text| FieldSet::Text(TextFields { text })),
            (any_value(), any_value(), any_encryption(), any::<bool>()).prop_map(
                |(ssid, password, encryption, hidden)| {
                    FieldSet::Wifi(WifiFields { ssid, password, encryption, hidden })
                }
            ),
            (any_value(), any_value(), any_value(), any_value(), any_value(), any_value()).prop_map(
                |(first_name, last_name, phone, email, company, title)| {
                    FieldSet::Contact(ContactFields { first_name, last_name, phone, email, company, title })
                }
            ),
            (any_value(), any_value(), any_value())
                .prop_map(|(to, subject, body)| FieldSet::Email(EmailFields { to, subject, body })),
            (any_value(), any_value()).prop_map(|(phone, body)| FieldSet::Sms(SmsFields { phone, body })),
        ]
    }

    proptest! {
        #[test]
        fn payload_present_iff_valid_for_every_kind(fields in any_field_set()) {
            let state = State::new(fields);
            let report = validate(state.fields());
            prop_assert_eq!(state.output().is_payload(), report.is_valid());
            prop_assert_eq!(state.report(), &report);
            if !report.is_valid() {
                prop_assert_eq!(state.payload(), "");
            }
        }
    }

    fn blank(kind: PayloadKind) -> Controller {
        Controller::new(FieldDefaults::blank(), kind)
    }

    #[test]
    fn test_output_follows_validity() {
        let mut controller = blank(PayloadKind::WifiCredential);
        assert!(!controller.state().output().is_payload());

        controller.apply(Edit::text(Field::Ssid, "Home")).unwrap();
        // Password still missing for WPA.
        let state = controller.state();
        assert_eq!(state.payload(), "");
        assert_eq!(
            state.output(),
            &Output::Placeholder(Message::for_error(
                PayloadKind::WifiCredential,
                Field::Password,
                ErrorKind::Required
            ))
        );

        controller.apply(Edit::text(Field::Password, "secret")).unwrap();
        assert_eq!(controller.state().payload(), "WIFI:T:WPA;S:Home;P:secret;;;");

        controller.apply(Edit::text(Field::Ssid, "")).unwrap();
        assert_eq!(controller.state().payload(), "");
    }

    #[test]
    fn test_payload_present_iff_valid() {
        let mut controller = blank(PayloadKind::ContactCard);
        let edits = [
            Edit::text(Field::Email, "ann@"),
            Edit::text(Field::Email, "ann@example.com"),
            Edit::text(Field::FirstName, "Ann"),
            Edit::text(Field::Title, "x".repeat(101)),
            Edit::text(Field::Title, "CTO"),
            Edit::text(Field::Email, ""),
            Edit::text(Field::FirstName, " "),
        ];
        for edit in edits {
            let state = controller.apply(edit).unwrap();
            assert_eq!(state.output().is_payload(), validate(state.fields()).is_valid());
        }
    }

    #[test]
    fn test_first_error_selects_message() {
        let mut controller = blank(PayloadKind::SmsIntent);
        controller.apply(Edit::text(Field::Body, "x".repeat(161))).unwrap();
        let catalog = Catalog::new(Language::En);
        assert_eq!(
            controller.state().output().preview(&catalog),
            catalog.translate(Key::SmsErrorEmptyPhone, &[])
        );

        controller.apply(Edit::text(Field::Phone, "555")).unwrap();
        assert_eq!(
            controller.state().output().preview(&catalog),
            "The message must not exceed 160 characters."
        );
        assert_eq!(controller.state().report().error(Field::Body), Some(ErrorKind::TooLong));
    }

    #[test]
    fn test_switch_kind_resets_fields_and_errors() {
        let defaults = FieldDefaults::localized(&Catalog::new(Language::En));
        let mut controller = Controller::new(defaults.clone(), PayloadKind::WifiCredential);
        controller.apply(Edit::text(Field::Ssid, "x".repeat(40))).unwrap();
        assert!(!controller.state().report().is_valid());

        let state = controller.apply(Edit::SwitchKind(PayloadKind::PlainText)).unwrap();
        assert_eq!(state.kind(), PayloadKind::PlainText);
        assert_eq!(state.fields(), &defaults.for_kind(PayloadKind::PlainText));
        assert!(state.report().errors().is_empty());
        assert_eq!(state.payload(), "https://example.com");

        // Coming back does not restore the abandoned Wi-Fi edits.
        let state = controller.apply(Edit::SwitchKind(PayloadKind::WifiCredential)).unwrap();
        assert_eq!(state.fields(), &FieldSet::Wifi(WifiFields::default()));
    }

    #[test]
    fn test_reselecting_active_kind_keeps_edits() {
        let mut controller = blank(PayloadKind::SmsIntent);
        controller.apply(Edit::text(Field::Phone, "555")).unwrap();
        let state = controller.apply(Edit::SwitchKind(PayloadKind::SmsIntent)).unwrap();
        assert_eq!(state.payload(), "SMSTO:555:");
    }

    #[test]
    fn test_rejected_edit_keeps_state() {
        let mut controller = blank(PayloadKind::EmailIntent);
        controller.apply(Edit::text(Field::To, "a@b.com")).unwrap();
        let before = controller.state().clone();

        let err = controller.apply(Edit::text(Field::Ssid, "Home")).unwrap_err();
        assert!(matches!(err, EditError::FieldNotInKind { .. }));
        let err = controller.apply(Edit::Field(FieldEdit::Hidden(true))).unwrap_err();
        assert!(matches!(err, EditError::FieldNotInKind { .. }));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_apply_is_pure_and_deterministic() {
        let defaults = FieldDefaults::blank();
        let prior = State::new(defaults.for_kind(PayloadKind::WifiCredential));
        let edit = Edit::text(Field::Ssid, "Cafe");
        let a = apply(&prior, &edit, &defaults).unwrap();
        let b = apply(&prior, &edit, &defaults).unwrap();
        assert_eq!(a, b);
        // The prior state is untouched.
        assert_eq!(prior.fields(), &FieldSet::Wifi(WifiFields::default()));
    }

    #[test]
    fn test_unchanged_edit_returns_prior() {
        let defaults = FieldDefaults::blank();
        let prior = State::new(defaults.for_kind(PayloadKind::WifiCredential));
        let next = apply(&prior, &Edit::Field(FieldEdit::Encryption(Encryption::Wpa)), &defaults).unwrap();
        assert_eq!(next, prior);
    }

    #[test]
    fn test_encryption_change_revalidates() {
        let mut controller = blank(PayloadKind::WifiCredential);
        controller.apply(Edit::text(Field::Ssid, "Open")).unwrap();
        assert_eq!(controller.state().payload(), "");
        controller.apply(Edit::Field(FieldEdit::Encryption(Encryption::NoPass))).unwrap();
        assert_eq!(controller.state().payload(), "WIFI:T:nopass;S:Open;;;");
        controller.apply(Edit::Field(FieldEdit::Hidden(true))).unwrap();
        assert_eq!(controller.state().payload(), "WIFI:T:nopass;S:Open;H:true;;;");
    }

    #[test]
    fn test_set_defaults_relocalizes_active_kind() {
        let ru = FieldDefaults::localized(&Catalog::new(Language::Ru));
        let mut controller = Controller::new(ru, PayloadKind::ContactCard);
        assert!(controller.state().payload().starts_with("MECARD:N:Иванов,Иван;"));

        controller.set_defaults(FieldDefaults::localized(&Catalog::new(Language::En)));
        assert!(controller.state().payload().starts_with("MECARD:N:Doe,John;"));
    }

    #[test]
    fn test_contact_minimal_scenario() {
        let mut controller = blank(PayloadKind::ContactCard);
        assert_eq!(
            controller.state().report().first_error(),
            Some((Field::FirstName, ErrorKind::EmptyContact))
        );
        controller.apply(Edit::text(Field::FirstName, "Ann")).unwrap();
        assert!(controller.state().report().is_valid());
        assert_eq!(controller.state().payload(), "MECARD:N:,Ann;;");
        assert_eq!(
            controller.state().fields(),
            &FieldSet::Contact(ContactFields { first_name: "Ann".into(), ..ContactFields::default() })
        );
    }
}

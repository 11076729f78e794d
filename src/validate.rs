//! Per-kind validation rules.
//!
//! Validation is pure and total: it never fails, it classifies. [`validate`] returns a
//! [`Report`] mapping each problem field to one [`ErrorKind`]; [`check`] additionally hands
//! out a [`Validated`] token for clean input, which is the only way to reach the encoders
//! through [`encode`](crate::encode::encode).
//!
//! All length bounds are counted in UTF-16 code units after trimming leading and
//! trailing whitespace with [`trim_field`], so a character outside the Basic Multilingual
//! Plane counts twice.
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::trim_field;
use crate::payload::{
    ContactFields, EmailFields, Field, FieldSet, PayloadKind, SmsFields, TextFields, WifiFields,
};

/// Maximum SSID length.
pub const SSID_MAX_LEN: usize = 32;
/// Maximum length of any contact card field.
pub const CONTACT_FIELD_MAX_LEN: usize = 100;
/// Maximum SMS body length (one single-part message).
pub const SMS_BODY_MAX_LEN: usize = 160;

// Local part and domain shape, ASCII letters only in either case. Leading dots and consecutive dots are checked separately
// since the regex engine has no look-around.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Everything that can be wrong with a field.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// A required field is empty after trimming.
    Empty,
    /// A field that is only required in some configurations (the Wi-Fi password) is empty.
    Required,
    /// The field exceeds its length bound.
    TooLong,
    /// The contact email is not a syntactically valid address.
    InvalidEmail,
    /// None of the identifying contact fields is filled in.
    EmptyContact,
}

impl ErrorKind {
    /// Ranking used by the contact card when several fields are invalid: the form-level
    /// error first, then the email format, then lengths.
    fn contact_rank(self) -> u8 {
        match self {
            ErrorKind::EmptyContact => 0,
            ErrorKind::InvalidEmail => 1,
            ErrorKind::TooLong => 2,
            ErrorKind::Empty | ErrorKind::Required => 3,
        }
    }
}

/// Outcome of validating one field set.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Report {
    kind: PayloadKind,
    errors: BTreeMap<Field, ErrorKind>,
}

impl Report {
    /// A clean report for `kind`.
    pub fn clean(kind: PayloadKind) -> Self {
        Report { kind, errors: BTreeMap::new() }
    }

    fn flag(&mut self, field: Field, error: ErrorKind) {
        // The form-level contact error outranks a length error on the same field.
        match self.errors.get(&field) {
            Some(existing) if existing.contact_rank() <= error.contact_rank() => {}
            _ => {
                self.errors.insert(field, error);
            }
        }
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All field problems.
    pub fn errors(&self) -> &BTreeMap<Field, ErrorKind> {
        &self.errors
    }

    /// The problem on `field`, if any.
    pub fn error(&self, field: Field) -> Option<ErrorKind> {
        self.errors.get(&field).copied()
    }

    /// The single problem to show the user, chosen by the kind's precedence rules.
    ///
    /// Wi-Fi reports `ssid` before `password`, SMS reports `phone` before `body`. Contact
    /// cards rank by error first (empty contact, then email format, then length) and by
    /// form order among equal errors.
    pub fn first_error(&self) -> Option<(Field, ErrorKind)> {
        let order = self.kind.fields();
        let position = |field: &Field| order.iter().position(|f| f == field).unwrap_or(order.len());
        let rank = |error: ErrorKind| match self.kind {
            PayloadKind::ContactCard => error.contact_rank(),
            _ => 0,
        };
        self.errors
            .iter()
            .min_by_key(|(field, error)| (rank(**error), position(*field)))
            .map(|(field, error)| (*field, *error))
    }
}

/// Proof that a field set passed validation.
///
/// Only [`check`] constructs this, so holding one means the encoder may run.
#[derive(Clone, Copy, Debug)]
pub struct Validated<'a> {
    fields: &'a FieldSet,
}

impl<'a> Validated<'a> {
    pub fn fields(&self) -> &'a FieldSet {
        self.fields
    }
}

/// Validates `fields` against the rules of its kind.
pub fn validate(fields: &FieldSet) -> Report {
    match fields {
        FieldSet::Text(f) => validate_text(f),
        FieldSet::Wifi(f) => validate_wifi(f),
        FieldSet::Contact(f) => validate_contact(f),
        FieldSet::Email(f) => validate_email(f),
        FieldSet::Sms(f) => validate_sms(f),
    }
}

/// Validates `fields` and returns either a [`Validated`] token or the failing report.
///
/// # Errors
///
/// Returns the [`Report`] when at least one field is invalid.
///
/// # Example
///
/// ```rust
/// use quickqr::payload::{FieldSet, SmsFields};
/// use quickqr::validate::{check, ErrorKind};
/// use quickqr::payload::Field;
///
/// let fields = FieldSet::Sms(SmsFields { phone: "".into(), body: "hi".into() });
/// let report = check(&fields).unwrap_err();
/// assert_eq!(report.error(Field::Phone), Some(ErrorKind::Empty));
/// ```
pub fn check(fields: &FieldSet) -> Result<Validated<'_>, Report> {
    let report = validate(fields);
    if report.is_valid() {
        Ok(Validated { fields })
    } else {
        Err(report)
    }
}

/// Syntactic email check, as performed by common web form validators.
pub fn is_valid_email(address: &str) -> bool {
    !address.starts_with('.') && !address.contains("..") && EMAIL_RE.is_match(address)
}

/*---- Per-kind rules ----*/

fn len(value: &str) -> usize {
    trim_field(value).encode_utf16().count()
}

fn is_blank(value: &str) -> bool {
    trim_field(value).is_empty()
}

fn validate_text(f: &TextFields) -> Report {
    let mut report = Report::clean(PayloadKind::PlainText);
    if is_blank(&f.text) {
        report.flag(Field::Text, ErrorKind::Empty);
    }
    report
}

fn validate_wifi(f: &WifiFields) -> Report {
    let mut report = Report::clean(PayloadKind::WifiCredential);
    match len(&f.ssid) {
        0 => report.flag(Field::Ssid, ErrorKind::Empty),
        n if n > SSID_MAX_LEN => report.flag(Field::Ssid, ErrorKind::TooLong),
        _ => {}
    }
    if f.encryption.requires_password() && is_blank(&f.password) {
        report.flag(Field::Password, ErrorKind::Required);
    }
    report
}

fn validate_contact(f: &ContactFields) -> Report {
    let mut report = Report::clean(PayloadKind::ContactCard);
    let values = [
        (Field::FirstName, &f.first_name),
        (Field::LastName, &f.last_name),
        (Field::Phone, &f.phone),
        (Field::Email, &f.email),
        (Field::Company, &f.company),
        (Field::Title, &f.title),
    ];
    for (field, value) in values {
        if len(value) > CONTACT_FIELD_MAX_LEN {
            report.flag(field, ErrorKind::TooLong);
        }
    }

    let email = trim_field(&f.email);
    if !email.is_empty() && !is_valid_email(email) {
        report.flag(Field::Email, ErrorKind::InvalidEmail);
    }

    let identified = [&f.first_name, &f.last_name, &f.phone, &f.email]
        .into_iter()
        .any(|value| !is_blank(value));
    if !identified {
        report.flag(Field::FirstName, ErrorKind::EmptyContact);
    }
    report
}

fn validate_email(f: &EmailFields) -> Report {
    let mut report = Report::clean(PayloadKind::EmailIntent);
    if is_blank(&f.to) {
        report.flag(Field::To, ErrorKind::Empty);
    }
    report
}

fn validate_sms(f: &SmsFields) -> Report {
    let mut report = Report::clean(PayloadKind::SmsIntent);
    if is_blank(&f.phone) {
        report.flag(Field::Phone, ErrorKind::Empty);
    }
    if len(&f.body) > SMS_BODY_MAX_LEN {
        report.flag(Field::Body, ErrorKind::TooLong);
    }
    report
}

//! The payload model: supported kinds, their field sets and the edits that mutate them.
//!
//! A [`FieldSet`] always belongs to exactly one [`PayloadKind`]. Each variant wraps a plain
//! struct holding the raw, untrimmed user input for that kind; validation and encoding read
//! these structs but never mutate them.
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, ParseError};

/*---- Kinds ----*/

/// The five payload shapes a code can carry.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Free text or a URL, encoded verbatim.
    PlainText,
    /// Wi-Fi network credentials (`WIFI:` scheme).
    WifiCredential,
    /// A MeCard contact (`MECARD:` scheme).
    ContactCard,
    /// A `mailto:` intent.
    EmailIntent,
    /// An `SMSTO:` intent.
    SmsIntent,
}

impl PayloadKind {
    /// All kinds, in tab order.
    pub const ALL: [PayloadKind; 5] = [
        PayloadKind::PlainText,
        PayloadKind::WifiCredential,
        PayloadKind::ContactCard,
        PayloadKind::EmailIntent,
        PayloadKind::SmsIntent,
    ];

    /// Short lowercase name, as used by the command line and settings files.
    pub fn name(self) -> &'static str {
        use PayloadKind::*;
        match self {
            PlainText => "text",
            WifiCredential => "wifi",
            ContactCard => "contact",
            EmailIntent => "email",
            SmsIntent => "sms",
        }
    }

    /// The fields owned by this kind, in form order. Form order doubles as the
    /// tie-break order when several fields of one kind report the same error.
    pub fn fields(self) -> &'static [Field] {
        use Field::*;
        match self {
            PayloadKind::PlainText => &[Text],
            PayloadKind::WifiCredential => &[Ssid, Password, Encryption, Hidden],
            PayloadKind::ContactCard => &[FirstName, LastName, Phone, Email, Company, Title],
            PayloadKind::EmailIntent => &[To, Subject, Body],
            PayloadKind::SmsIntent => &[Phone, Body],
        }
    }

    /// Returns `true` if `field` belongs to this kind.
    pub fn owns(self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PayloadKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayloadKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownKind(s.to_string()))
    }
}

/*---- Fields ----*/

/// Names every field of every kind.
///
/// `Phone` and `Body` are shared names: contact and SMS both have a phone, email and SMS
/// both have a body. Which one is meant follows from the active kind.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Field {
    Text,
    Ssid,
    Password,
    Encryption,
    Hidden,
    FirstName,
    LastName,
    Phone,
    Email,
    Company,
    Title,
    To,
    Subject,
    Body,
}

impl Field {
    /// The form name of the field (`firstName`, `ssid`, ...).
    pub fn as_str(self) -> &'static str {
        use Field::*;
        match self {
            Text => "text",
            Ssid => "ssid",
            Password => "password",
            Encryption => "encryption",
            Hidden => "hidden",
            FirstName => "firstName",
            LastName => "lastName",
            Phone => "phone",
            Email => "email",
            Company => "company",
            Title => "title",
            To => "to",
            Subject => "subject",
            Body => "body",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wi-Fi authentication type, as written into the `T:` segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Encryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl Encryption {
    /// The literal token used by the `WIFI:` scheme.
    pub fn as_str(self) -> &'static str {
        match self {
            Encryption::Wpa => "WPA",
            Encryption::Wep => "WEP",
            Encryption::NoPass => "nopass",
        }
    }

    /// Whether a password must accompany this encryption type.
    pub fn requires_password(self) -> bool {
        self != Encryption::NoPass
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encryption {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "WPA" | "wpa" | "WPA2" | "wpa2" => Ok(Encryption::Wpa),
            "WEP" | "wep" => Ok(Encryption::Wep),
            "nopass" | "NOPASS" | "none" => Ok(Encryption::NoPass),
            other => Err(ParseError::UnknownEncryption(other.to_string())),
        }
    }
}

/*---- Per-kind field sets ----*/

/// Fields of [`PayloadKind::PlainText`].
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextFields {
    pub text: String,
}

/// Fields of [`PayloadKind::WifiCredential`].
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WifiFields {
    pub ssid: String,
    pub password: String,
    pub encryption: Encryption,
    pub hidden: bool,
}

/// Fields of [`PayloadKind::ContactCard`].
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub title: String,
}

/// Fields of [`PayloadKind::EmailIntent`].
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailFields {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Fields of [`PayloadKind::SmsIntent`].
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmsFields {
    pub phone: String,
    pub body: String,
}

/// The field set currently being edited, tagged with its kind.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FieldSet {
    Text(TextFields),
    Wifi(WifiFields),
    Contact(ContactFields),
    Email(EmailFields),
    Sms(SmsFields),
}

impl FieldSet {
    /// An all-empty field set for `kind`.
    pub fn empty(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::PlainText => FieldSet::Text(TextFields::default()),
            PayloadKind::WifiCredential => FieldSet::Wifi(WifiFields::default()),
            PayloadKind::ContactCard => FieldSet::Contact(ContactFields::default()),
            PayloadKind::EmailIntent => FieldSet::Email(EmailFields::default()),
            PayloadKind::SmsIntent => FieldSet::Sms(SmsFields::default()),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            FieldSet::Text(_) => PayloadKind::PlainText,
            FieldSet::Wifi(_) => PayloadKind::WifiCredential,
            FieldSet::Contact(_) => PayloadKind::ContactCard,
            FieldSet::Email(_) => PayloadKind::EmailIntent,
            FieldSet::Sms(_) => PayloadKind::SmsIntent,
        }
    }

    /// Reads a text field. Returns `None` for fields the kind does not own and for the
    /// non-text Wi-Fi fields.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match (self, field) {
            (FieldSet::Text(f), Field::Text) => &f.text,
            (FieldSet::Wifi(f), Field::Ssid) => &f.ssid,
            (FieldSet::Wifi(f), Field::Password) => &f.password,
            (FieldSet::Contact(f), Field::FirstName) => &f.first_name,
            (FieldSet::Contact(f), Field::LastName) => &f.last_name,
            (FieldSet::Contact(f), Field::Phone) => &f.phone,
            (FieldSet::Contact(f), Field::Email) => &f.email,
            (FieldSet::Contact(f), Field::Company) => &f.company,
            (FieldSet::Contact(f), Field::Title) => &f.title,
            (FieldSet::Email(f), Field::To) => &f.to,
            (FieldSet::Email(f), Field::Subject) => &f.subject,
            (FieldSet::Email(f), Field::Body) => &f.body,
            (FieldSet::Sms(f), Field::Phone) => &f.phone,
            (FieldSet::Sms(f), Field::Body) => &f.body,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: Field) -> Result<&mut String, EditError> {
        let kind = self.kind();
        match (self, field) {
            (FieldSet::Text(f), Field::Text) => Ok(&mut f.text),
            (FieldSet::Wifi(f), Field::Ssid) => Ok(&mut f.ssid),
            (FieldSet::Wifi(f), Field::Password) => Ok(&mut f.password),
            (FieldSet::Wifi(_), Field::Encryption | Field::Hidden) => {
                Err(EditError::NotATextField(field))
            }
            (FieldSet::Contact(f), Field::FirstName) => Ok(&mut f.first_name),
            (FieldSet::Contact(f), Field::LastName) => Ok(&mut f.last_name),
            (FieldSet::Contact(f), Field::Phone) => Ok(&mut f.phone),
            (FieldSet::Contact(f), Field::Email) => Ok(&mut f.email),
            (FieldSet::Contact(f), Field::Company) => Ok(&mut f.company),
            (FieldSet::Contact(f), Field::Title) => Ok(&mut f.title),
            (FieldSet::Email(f), Field::To) => Ok(&mut f.to),
            (FieldSet::Email(f), Field::Subject) => Ok(&mut f.subject),
            (FieldSet::Email(f), Field::Body) => Ok(&mut f.body),
            (FieldSet::Sms(f), Field::Phone) => Ok(&mut f.phone),
            (FieldSet::Sms(f), Field::Body) => Ok(&mut f.body),
            _ => Err(EditError::FieldNotInKind { field, kind }),
        }
    }

    /// Applies a single field edit in place.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] if the edit targets a field the active kind does not own, or a
    /// text edit targets one of the non-text Wi-Fi fields. The field set is left untouched.
    pub fn apply(&mut self, edit: &FieldEdit) -> Result<(), EditError> {
        match (self, edit) {
            (FieldSet::Wifi(f), FieldEdit::Encryption(encryption)) => {
                f.encryption = *encryption;
                Ok(())
            }
            (FieldSet::Wifi(f), FieldEdit::Hidden(hidden)) => {
                f.hidden = *hidden;
                Ok(())
            }
            (set, FieldEdit::Encryption(_)) => Err(EditError::FieldNotInKind {
                field: Field::Encryption,
                kind: set.kind(),
            }),
            (set, FieldEdit::Hidden(_)) => Err(EditError::FieldNotInKind {
                field: Field::Hidden,
                kind: set.kind(),
            }),
            (set, FieldEdit::Text(field, value)) => {
                let slot = set.text_mut(*field)?;
                slot.clone_from(value);
                Ok(())
            }
        }
    }
}

/*---- Edits ----*/

/// A change to one field of the active field set.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FieldEdit {
    /// Replace the contents of a text field.
    Text(Field, String),
    /// Select a Wi-Fi encryption type.
    Encryption(Encryption),
    /// Toggle the Wi-Fi hidden-network flag.
    Hidden(bool),
}

/// One input event, as dispatched by the host UI.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Edit {
    /// Mutate a field of the active kind.
    Field(FieldEdit),
    /// Make another kind active. Resets the field set to that kind's defaults.
    SwitchKind(PayloadKind),
}

impl Edit {
    /// Shorthand for a text edit.
    pub fn text(field: Field, value: impl Into<String>) -> Self {
        Edit::Field(FieldEdit::Text(field, value.into()))
    }
}

impl From<FieldEdit> for Edit {
    fn from(edit: FieldEdit) -> Self {
        Edit::Field(edit)
    }
}

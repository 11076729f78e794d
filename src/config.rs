//! Settings and per-kind default field values.
//!
//! Defaults are resolved once per language into a [`FieldDefaults`] table and handed to the
//! controller. Validation and encoding never look at the language.
//!
//! A settings file is TOML; every key is optional:
//!
//! ```toml
//! language = "en"
//!
//! [wifi]
//! ssid = "Office"
//! encryption = "WPA"
//!
//! [contact]
//! company = "Acme"
//! ```
//!
//! A per-kind table replaces the defaults of that kind; keys missing from the table are
//! empty.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::i18n::{Catalog, Key, Language, Translate};
use crate::payload::{
    ContactFields, EmailFields, FieldSet, PayloadKind, SmsFields, TextFields, WifiFields,
};

/// Default contents of the text field.
pub const DEFAULT_TEXT: &str = "https://example.com";

/// The field set each kind starts from when it becomes active.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FieldDefaults {
    pub text: TextFields,
    pub wifi: WifiFields,
    pub contact: ContactFields,
    pub email: EmailFields,
    pub sms: SmsFields,
}

impl FieldDefaults {
    /// Every field empty, Wi-Fi on WPA.
    pub fn blank() -> Self {
        FieldDefaults::default()
    }

    /// The stock defaults, with contact placeholders taken from `translator`.
    pub fn localized<T: Translate + ?Sized>(translator: &T) -> Self {
        let t = |key| translator.translate(key, &[]);
        FieldDefaults {
            text: TextFields { text: DEFAULT_TEXT.to_string() },
            wifi: WifiFields::default(),
            contact: ContactFields {
                first_name: t(Key::ContactDefaultFirstName),
                last_name: t(Key::ContactDefaultLastName),
                phone: t(Key::ContactDefaultPhone),
                email: t(Key::ContactDefaultEmail),
                company: t(Key::ContactDefaultCompany),
                title: t(Key::ContactDefaultTitle),
            },
            email: EmailFields::default(),
            sms: SmsFields::default(),
        }
    }

    /// A fresh copy of the defaults for `kind`.
    pub fn for_kind(&self, kind: PayloadKind) -> FieldSet {
        match kind {
            PayloadKind::PlainText => FieldSet::Text(self.text.clone()),
            PayloadKind::WifiCredential => FieldSet::Wifi(self.wifi.clone()),
            PayloadKind::ContactCard => FieldSet::Contact(self.contact.clone()),
            PayloadKind::EmailIntent => FieldSet::Email(self.email.clone()),
            PayloadKind::SmsIntent => FieldSet::Sms(self.sms.clone()),
        }
    }
}

/// User settings, usually read from a TOML file.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub language: Language,
    pub text: Option<TextFields>,
    pub wifi: Option<WifiFields>,
    pub contact: Option<ContactFields>,
    pub email: Option<EmailFields>,
    pub sms: Option<SmsFields>,
}

impl Settings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML, unknown keys or bad values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Settings::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), language = %settings.language, "loaded settings");
        Ok(settings)
    }

    /// The catalog for the configured language.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.language)
    }

    /// Localized defaults with this file's per-kind tables applied on top.
    pub fn field_defaults(&self) -> FieldDefaults {
        let mut defaults = FieldDefaults::localized(&self.catalog());
        if let Some(text) = &self.text {
            defaults.text = text.clone();
        }
        if let Some(wifi) = &self.wifi {
            defaults.wifi = wifi.clone();
        }
        if let Some(contact) = &self.contact {
            defaults.contact = contact.clone();
        }
        if let Some(email) = &self.email {
            defaults.email = email.clone();
        }
        if let Some(sms) = &self.sms {
            defaults.sms = sms.clone();
        }
        defaults
    }
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Encryption;

    #[test]
    fn test_empty_settings() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.language, Language::Ru);
    }

    #[test]
    fn test_localized_contact_defaults() {
        let en = FieldDefaults::localized(&Catalog::new(Language::En));
        assert_eq!(en.contact.first_name, "John");
        let ru = FieldDefaults::localized(&Catalog::new(Language::Ru));
        assert_eq!(ru.contact.first_name, "Иван");
        // Only the contact card is localized.
        assert_eq!(en.text, ru.text);
        assert_eq!(en.text.text, DEFAULT_TEXT);
    }

    #[test]
    fn test_table_replaces_kind_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            language = "en"

            [wifi]
            ssid = "Office"
            encryption = "nopass"
            hidden = true

            [contact]
            company = "Acme"
            "#,
        )
        .unwrap();
        let defaults = settings.field_defaults();
        assert_eq!(defaults.wifi.ssid, "Office");
        assert_eq!(defaults.wifi.encryption, Encryption::NoPass);
        assert!(defaults.wifi.hidden);
        assert_eq!(defaults.contact.company, "Acme");
        assert_eq!(defaults.contact.first_name, "");
        // Untouched kinds keep the stock defaults.
        assert_eq!(defaults.text.text, DEFAULT_TEXT);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(
            Settings::from_toml_str("colour = \"blue\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(Settings::from_toml_str("[wifi]\nssid = 3").is_err());
        assert!(Settings::from_toml_str("language = \"de\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_for_kind_matches_kind() {
        let defaults = FieldDefaults::blank();
        for kind in PayloadKind::ALL {
            assert_eq!(defaults.for_kind(kind), FieldSet::empty(kind));
        }
    }
}

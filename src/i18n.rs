//! Localized labels, placeholders and validation messages.
//!
//! The [`Translate`] trait is the boundary the rest of the crate talks to. [`Catalog`] is
//! the built-in implementation with Russian and English tables. Substitutions use
//! `{{name}}` tokens, replaced by exact match.
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::payload::{Field, PayloadKind};
use crate::validate::{ErrorKind, CONTACT_FIELD_MAX_LEN, SMS_BODY_MAX_LEN, SSID_MAX_LEN};

/// Supported display languages.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            _ => Err(ParseError::UnknownLanguage(s.to_string())),
        }
    }
}

macro_rules! keys {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Every translatable string.
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        pub enum Key {
            $($variant),+
        }

        impl Key {
            pub const ALL: &'static [Key] = &[$(Key::$variant),+];

            /// The table name of this key (`wifi_error_empty_ssid`, ...).
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name),+
                }
            }
        }
    };
}

keys! {
    AppTitle => "app_title",
    TabText => "tab_url_text",
    TabWifi => "tab_wifi",
    TabContact => "tab_contacts",
    TabEmailSms => "tab_email_sms",
    ScanCaption => "url_scan_caption",
    TextPlaceholder => "url_placeholder",
    TextErrorEmpty => "url_error_empty",
    WifiPlaceholder => "wifi_placeholder",
    WifiErrorEmptySsid => "wifi_error_empty_ssid",
    WifiErrorSsidTooLong => "wifi_error_ssid_max_length",
    WifiErrorPasswordRequired => "wifi_error_password_required",
    ContactPlaceholder => "contact_placeholder",
    ContactErrorEmptyData => "contact_error_empty_data",
    ContactErrorInvalidEmail => "contact_error_invalid_email",
    ContactErrorMaxLength => "contact_error_max_length",
    EmailPlaceholder => "email_placeholder",
    EmailErrorEmptyTo => "email_error_empty_to",
    SmsPlaceholder => "sms_placeholder",
    SmsErrorEmptyPhone => "sms_error_empty_phone",
    SmsErrorMaxLength => "sms_error_max_length",
    ContactDefaultFirstName => "contact_default_first_name",
    ContactDefaultLastName => "contact_default_last_name",
    ContactDefaultPhone => "contact_default_phone",
    ContactDefaultEmail => "contact_default_email",
    ContactDefaultCompany => "contact_default_company",
    ContactDefaultTitle => "contact_default_title",
}

impl Key {
    /// Looks a key up by its table name.
    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// Tab label of a payload kind.
    pub fn tab(kind: PayloadKind) -> Key {
        match kind {
            PayloadKind::PlainText => Key::TabText,
            PayloadKind::WifiCredential => Key::TabWifi,
            PayloadKind::ContactCard => Key::TabContact,
            PayloadKind::EmailIntent | PayloadKind::SmsIntent => Key::TabEmailSms,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves keys to display text.
pub trait Translate {
    /// Returns the text for `key` with every `{{name}}` token in `substitutions` replaced.
    fn translate(&self, key: Key, substitutions: &[(&str, &str)]) -> String;

    /// String-keyed lookup. Unknown names come back unchanged.
    fn translate_name(&self, name: &str, substitutions: &[(&str, &str)]) -> String {
        match Key::from_name(name) {
            Some(key) => self.translate(key, substitutions),
            None => name.to_string(),
        }
    }
}

/// Replaces every `{{name}}` token with its value in one left-to-right pass. Substituted
/// values are not scanned again and tokens without a substitution are kept.
///
/// # Example
///
/// ```rust
/// use quickqr::i18n::interpolate;
///
/// assert_eq!(interpolate("max {{max}} chars", &[("max", "160")]), "max 160 chars");
/// ```
pub fn interpolate(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let name = &after[..end];
            substitutions
                .iter()
                .find(|(candidate, _)| *candidate == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            // Not a known token: keep one brace and rescan from the next.
            None => {
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// The built-in translation tables.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Catalog {
    language: Language,
}

impl Catalog {
    pub fn new(language: Language) -> Self {
        Catalog { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The raw template for `key`, before substitution.
    pub fn template(&self, key: Key) -> &'static str {
        match self.language {
            Language::Ru => ru(key),
            Language::En => en(key),
        }
    }
}

impl Translate for Catalog {
    fn translate(&self, key: Key, substitutions: &[(&str, &str)]) -> String {
        interpolate(self.template(key), substitutions)
    }
}

fn ru(key: Key) -> &'static str {
    use Key::*;
    match key {
        AppTitle => "⚡ QuickQR Studio",
        TabText => "Текст / URL",
        TabWifi => "Wi-Fi",
        TabContact => "Контакты (VCard/MeCard)",
        TabEmailSms => "Email / SMS",
        ScanCaption => "Сканируйте этот код, чтобы проверить!",
        TextPlaceholder => "Введите URL или текст для кодирования",
        TextErrorEmpty => "QR-код будет пустым, если не ввести данные.",
        WifiPlaceholder => "Введите имя Wi-Fi сети (SSID)",
        WifiErrorEmptySsid => "SSID не может быть пустым",
        WifiErrorSsidTooLong => "SSID должен быть не длиннее {{max}} символов",
        WifiErrorPasswordRequired => "Пароль обязателен для выбранного типа шифрования.",
        ContactPlaceholder => "Введите контактные данные для кодирования",
        ContactErrorEmptyData => "Укажите имя, фамилию, телефон или email.",
        ContactErrorInvalidEmail => "Введите корректный адрес электронной почты.",
        ContactErrorMaxLength => "Максимальная длина поля: {{max}} символов.",
        EmailPlaceholder => "Укажите адрес получателя",
        EmailErrorEmptyTo => "Адрес получателя не может быть пустым.",
        SmsPlaceholder => "Укажите номер телефона",
        SmsErrorEmptyPhone => "Номер телефона не может быть пустым.",
        SmsErrorMaxLength => "Текст сообщения не должен превышать {{max}} символов.",
        ContactDefaultFirstName => "Иван",
        ContactDefaultLastName => "Иванов",
        ContactDefaultPhone => "+7 900 123-45-67",
        ContactDefaultEmail => "ivan.ivanov@example.com",
        ContactDefaultCompany => "ООО «Пример»",
        ContactDefaultTitle => "Инженер",
    }
}

fn en(key: Key) -> &'static str {
    use Key::*;
    match key {
        AppTitle => "⚡ QuickQR Studio",
        TabText => "Text / URL",
        TabWifi => "Wi-Fi",
        TabContact => "Contacts (VCard/MeCard)",
        TabEmailSms => "Email / SMS",
        ScanCaption => "Scan this code to check!",
        TextPlaceholder => "Enter URL or text to encode",
        TextErrorEmpty => "The QR code will be empty if no data is entered.",
        WifiPlaceholder => "Enter the Wi-Fi network name (SSID)",
        WifiErrorEmptySsid => "SSID cannot be empty",
        WifiErrorSsidTooLong => "SSID must be at most {{max}} characters",
        WifiErrorPasswordRequired => "A password is required for the selected encryption type.",
        ContactPlaceholder => "Enter contact details to encode",
        ContactErrorEmptyData => "Enter a first name, last name, phone or email.",
        ContactErrorInvalidEmail => "Please enter a valid email address.",
        ContactErrorMaxLength => "Maximum field length is {{max}} characters.",
        EmailPlaceholder => "Enter the recipient address",
        EmailErrorEmptyTo => "The recipient cannot be empty.",
        SmsPlaceholder => "Enter a phone number",
        SmsErrorEmptyPhone => "The phone number cannot be empty.",
        SmsErrorMaxLength => "The message must not exceed {{max}} characters.",
        ContactDefaultFirstName => "John",
        ContactDefaultLastName => "Doe",
        ContactDefaultPhone => "+1 555 123 4567",
        ContactDefaultEmail => "john.doe@example.com",
        ContactDefaultCompany => "Example Inc.",
        ContactDefaultTitle => "Engineer",
    }
}

/*---- Messages ----*/

/// A user-facing message: a key plus the length bound it may need to mention.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Message {
    pub key: Key,
    pub max: Option<usize>,
}

impl Message {
    fn plain(key: Key) -> Self {
        Message { key, max: None }
    }

    fn bounded(key: Key, max: usize) -> Self {
        Message { key, max: Some(max) }
    }

    /// The neutral prompt shown while a kind has nothing to encode.
    pub fn placeholder(kind: PayloadKind) -> Self {
        Message::plain(match kind {
            PayloadKind::PlainText => Key::TextPlaceholder,
            PayloadKind::WifiCredential => Key::WifiPlaceholder,
            PayloadKind::ContactCard => Key::ContactPlaceholder,
            PayloadKind::EmailIntent => Key::EmailPlaceholder,
            PayloadKind::SmsIntent => Key::SmsPlaceholder,
        })
    }

    /// The message describing `error` on `field` of `kind`.
    pub fn for_error(kind: PayloadKind, field: Field, error: ErrorKind) -> Self {
        use ErrorKind::*;
        match (kind, field, error) {
            (PayloadKind::PlainText, _, _) => Message::plain(Key::TextErrorEmpty),
            (PayloadKind::WifiCredential, Field::Ssid, TooLong) => {
                Message::bounded(Key::WifiErrorSsidTooLong, SSID_MAX_LEN)
            }
            (PayloadKind::WifiCredential, Field::Ssid, _) => Message::plain(Key::WifiErrorEmptySsid),
            (PayloadKind::WifiCredential, _, _) => Message::plain(Key::WifiErrorPasswordRequired),
            (PayloadKind::ContactCard, _, EmptyContact) => Message::plain(Key::ContactErrorEmptyData),
            (PayloadKind::ContactCard, _, InvalidEmail) => {
                Message::plain(Key::ContactErrorInvalidEmail)
            }
            (PayloadKind::ContactCard, _, _) => {
                Message::bounded(Key::ContactErrorMaxLength, CONTACT_FIELD_MAX_LEN)
            }
            (PayloadKind::EmailIntent, _, _) => Message::plain(Key::EmailErrorEmptyTo),
            (PayloadKind::SmsIntent, Field::Body, _) => {
                Message::bounded(Key::SmsErrorMaxLength, SMS_BODY_MAX_LEN)
            }
            (PayloadKind::SmsIntent, _, _) => Message::plain(Key::SmsErrorEmptyPhone),
        }
    }

    /// Resolves the message through `translator`.
    pub fn render<T: Translate + ?Sized>(&self, translator: &T) -> String {
        match self.max {
            Some(max) => {
                let max = max.to_string();
                translator.translate(self.key, &[("max", max.as_str())])
            }
            None => translator.translate(self.key, &[]),
        }
    }
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_is_translated() {
        for language in [Language::Ru, Language::En] {
            let catalog = Catalog::new(language);
            for key in Key::ALL {
                assert!(!catalog.template(*key).is_empty(), "{} missing in {}", key, language);
            }
        }
    }

    #[test]
    fn test_key_names_are_unique() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(*key));
        }
    }

    #[test]
    fn test_interpolate_exact_tokens() {
        assert_eq!(interpolate("{{max}}/{{max}}", &[("max", "5")]), "5/5");
        // Only the exact token form is replaced.
        assert_eq!(interpolate("{{ max }}", &[("max", "5")]), "{{ max }}");
        assert_eq!(interpolate("{{other}}", &[("max", "5")]), "{{other}}");
        assert_eq!(interpolate("none", &[]), "none");
        assert_eq!(interpolate("{{{max}}", &[("max", "5")]), "{5");
        assert_eq!(interpolate("{{max", &[("max", "5")]), "{{max");
    }

    #[test]
    fn test_interpolate_values_are_not_rescanned() {
        let subs = [("a", "{{b}}"), ("b", "x")];
        assert_eq!(interpolate("{{a}}-{{b}}", &subs), "{{b}}-x");
        assert_eq!(interpolate("{{b}}{{a}}", &subs), "x{{b}}");
    }

    #[test]
    fn test_translate_name_falls_back_to_key() {
        let catalog = Catalog::new(Language::En);
        assert_eq!(catalog.translate_name("tab_wifi", &[]), "Wi-Fi");
        assert_eq!(catalog.translate_name("no_such_key", &[]), "no_such_key");
    }

    #[test]
    fn test_bounded_messages_mention_limit() {
        let catalog = Catalog::new(Language::En);
        let message = Message::for_error(PayloadKind::SmsIntent, Field::Body, ErrorKind::TooLong);
        assert_eq!(message.render(&catalog), "The message must not exceed 160 characters.");

        let message = Message::for_error(PayloadKind::WifiCredential, Field::Ssid, ErrorKind::TooLong);
        assert!(Message::render(&message, &Catalog::new(Language::Ru)).contains("32"));
    }

    #[test]
    fn test_error_message_selection() {
        assert_eq!(
            Message::for_error(PayloadKind::ContactCard, Field::FirstName, ErrorKind::EmptyContact).key,
            Key::ContactErrorEmptyData
        );
        assert_eq!(
            Message::for_error(PayloadKind::SmsIntent, Field::Phone, ErrorKind::Empty).key,
            Key::SmsErrorEmptyPhone
        );
        assert_eq!(
            Message::for_error(PayloadKind::WifiCredential, Field::Password, ErrorKind::Required).key,
            Key::WifiErrorPasswordRequired
        );
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::Ru);
    }
}

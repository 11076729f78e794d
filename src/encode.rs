//! Payload encoders, one per kind.
//!
//! Every encoder is a pure function of its field struct. The per-kind functions assume
//! their input already passed validation; [`encode`] enforces that by taking a
//! [`Validated`] token.
//!
//! Grammars produced:
//!
//! | Kind    | Payload                                                          |
//! |---------|------------------------------------------------------------------|
//! | text    | trimmed text                                                     |
//! | Wi-Fi   | `WIFI:T:<enc>;S:<ssid>;[P:<password>;][H:true;];;`               |
//! | contact | `MECARD:[N:<last>,<first>;][TEL:..;][EMAIL:..;][ORG:..;][TITLE:..;];` |
//! | email   | `mailto:<to>[?subject=..][&body=..]`                             |
//! | SMS     | `SMSTO:<phone>:<body>`                                           |
use crate::escape::{escape_wifi, percent_encode, trim_field};
use crate::payload::{ContactFields, EmailFields, FieldSet, SmsFields, TextFields, WifiFields};
use crate::validate::Validated;

/// Encodes a validated field set into its payload string.
///
/// The result may still be empty for a contact card with nothing to encode; callers treat
/// an empty payload as "no output".
///
/// # Example
///
/// ```rust
/// use quickqr::encode::encode;
/// use quickqr::payload::{FieldSet, SmsFields};
/// use quickqr::validate::check;
///
/// let fields = FieldSet::Sms(SmsFields { phone: "555".into(), body: "On my way".into() });
/// let validated = check(&fields).unwrap();
/// assert_eq!(encode(&validated), "SMSTO:555:On%20my%20way");
/// ```
pub fn encode(validated: &Validated<'_>) -> String {
    match validated.fields() {
        FieldSet::Text(f) => text(f),
        FieldSet::Wifi(f) => wifi(f),
        FieldSet::Contact(f) => contact(f),
        FieldSet::Email(f) => email(f),
        FieldSet::Sms(f) => sms(f),
    }
}

/// Plain text is encoded verbatim, minus surrounding whitespace.
pub fn text(f: &TextFields) -> String {
    trim_field(&f.text).to_string()
}

/// Encodes Wi-Fi credentials.
///
/// The password segment is dropped for open networks and the hidden flag is only written
/// when set.
pub fn wifi(f: &WifiFields) -> String {
    let mut out = format!("WIFI:T:{};S:{};", f.encryption, escape_wifi(&f.ssid));
    if f.encryption.requires_password() {
        out.push_str("P:");
        out.push_str(&escape_wifi(&f.password));
        out.push(';');
    }
    if f.hidden {
        out.push_str("H:true;");
    }
    out.push_str(";;");
    out
}

/// Encodes a MeCard.
///
/// Field values are trimmed but not escaped, so a `;` inside a company name ends up as a
/// field separator in the output.
pub fn contact(f: &ContactFields) -> String {
    let first_name = trim_field(&f.first_name);
    let last_name = trim_field(&f.last_name);

    let mut parts: Vec<String> = Vec::with_capacity(5);
    if !first_name.is_empty() || !last_name.is_empty() {
        parts.push(format!("N:{},{}", last_name, first_name));
    }
    let optional = [
        ("TEL", &f.phone),
        ("EMAIL", &f.email),
        ("ORG", &f.company),
        ("TITLE", &f.title),
    ];
    for (tag, value) in optional {
        let value = trim_field(value);
        if !value.is_empty() {
            parts.push(format!("{}:{}", tag, value));
        }
    }

    if parts.is_empty() {
        return String::new();
    }
    format!("MECARD:{};;", parts.join(";"))
}

/// Encodes a `mailto:` link. Subject and body are percent-encoded and left out when empty.
pub fn email(f: &EmailFields) -> String {
    let mut out = format!("mailto:{}", trim_field(&f.to));
    let params = [("subject", &f.subject), ("body", &f.body)];
    let mut separator = '?';
    for (name, value) in params {
        let encoded = percent_encode(trim_field(value));
        if encoded.is_empty() {
            continue;
        }
        out.push(separator);
        out.push_str(name);
        out.push('=');
        out.push_str(&encoded);
        separator = '&';
    }
    out
}

/// Encodes an `SMSTO:` intent. The body segment is always present, even when empty.
pub fn sms(f: &SmsFields) -> String {
    format!("SMSTO:{}:{}", trim_field(&f.phone), percent_encode(trim_field(&f.body)))
}

//! # quickqr
//!
//! A Rust library for building the data that goes inside a QR code: plain text, Wi-Fi
//! credentials, MeCard contacts, `mailto:` links and `SMSTO:` intents.
//!
//! `quickqr` takes raw, possibly half-typed form input, validates it per payload kind and,
//! only when it is valid, encodes it into the exact string scanners expect. Drawing the code
//! itself is left to a [`Renderer`](render::Renderer) of your choice.
//!
//! ## Features
//!
//! - Five payload kinds with their own field sets and validation rules.
//! - Byte-exact `WIFI:`, `MECARD:`, `mailto:` and `SMSTO:` encoders with correct escaping.
//! - A pure `(state, edit) -> state` controller that re-validates and re-encodes on every
//!   keystroke and never surfaces a payload built from invalid input.
//! - Russian and English messages, localized default values and TOML settings.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! quickqr = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Drive the controller the way a form would:
//!
//! ```rust
//! use quickqr::config::FieldDefaults;
//! use quickqr::controller::Controller;
//! use quickqr::i18n::{Catalog, Language};
//! use quickqr::payload::{Edit, Field, PayloadKind};
//!
//! let catalog = Catalog::new(Language::En);
//! let mut controller = Controller::new(FieldDefaults::localized(&catalog), PayloadKind::WifiCredential);
//!
//! controller.apply(Edit::text(Field::Ssid, "Home Net;")).unwrap();
//! assert_eq!(controller.state().payload(), "");
//! assert_eq!(
//!     controller.state().output().preview(&catalog),
//!     "A password is required for the selected encryption type."
//! );
//!
//! controller.apply(Edit::text(Field::Password, "p@ss:1")).unwrap();
//! assert_eq!(controller.state().payload(), r"WIFI:T:WPA;S:Home Net\;;P:p@ss\:1;;;");
//! ```
//!
//! Or call the encoders directly:
//!
//! ```rust
//! use quickqr::encode;
//! use quickqr::payload::EmailFields;
//!
//! let fields = EmailFields { to: "a@b.com".into(), subject: "Hi".into(), body: "".into() };
//! assert_eq!(encode::email(&fields), "mailto:a@b.com?subject=Hi");
//! ```
//!
//! ## Modules
//!
//! - [`payload`]: Payload kinds, field sets and edits.
//! - [`escape`]: Wi-Fi escaping and URI percent-encoding.
//! - [`validate`]: Per-kind validation and error precedence.
//! - [`encode`]: Per-kind payload encoders.
//! - [`controller`]: Live recomputation of the payload.
//! - [`render`]: The boundary to the code renderer.
//! - [`i18n`]: Messages and labels.
//! - [`config`]: Settings and default field values.
//! - [`error`]: Operational error types.
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod encode;
pub mod error;
pub mod escape;
pub mod i18n;
pub mod payload;
pub mod render;
pub mod validate;

pub use controller::{Controller, Output, State};
pub use error::{ConfigError, EditError, ParseError};
pub use payload::{Edit, Field, FieldSet, PayloadKind};
pub use validate::{ErrorKind, Report};

//! The hand-off to whatever draws the code.
//!
//! Drawing is not done here: a [`Renderer`] receives a non-empty payload and produces
//! whatever the host displays (a raster, an SVG string, a terminal block). [`present`] decides
//! between calling the renderer and showing the placeholder message.
use crate::controller::Output;
use crate::i18n::Translate;

/// Turns a payload into something displayable.
pub trait Renderer {
    type Output;

    /// Called only with a non-empty payload.
    fn render_code(&mut self, payload: &str) -> Self::Output;
}

impl<F, O> Renderer for F
where
    F: FnMut(&str) -> O,
{
    type Output = O;

    fn render_code(&mut self, payload: &str) -> O {
        self(payload)
    }
}

/// What the output area shows.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum View<T> {
    /// The rendered code.
    Code(T),
    /// A translated prompt or validation message.
    Placeholder(String),
}

/// Renders `output`, or translates its placeholder message when there is no payload.
///
/// # Example
///
/// ```rust
/// use quickqr::controller::Output;
/// use quickqr::i18n::{Catalog, Language};
/// use quickqr::render::{present, View};
///
/// let output = Output::Payload("hello".to_string());
/// let mut renderer = |payload: &str| payload.len();
/// assert_eq!(present(&output, &mut renderer, &Catalog::new(Language::En)), View::Code(5));
/// ```
pub fn present<R, T>(output: &Output, renderer: &mut R, translator: &T) -> View<R::Output>
where
    R: Renderer + ?Sized,
    T: Translate + ?Sized,
{
    match output {
        Output::Payload(payload) if !payload.is_empty() => View::Code(renderer.render_code(payload)),
        Output::Payload(_) => View::Placeholder(String::new()),
        Output::Placeholder(message) => View::Placeholder(message.render(translator)),
    }
}

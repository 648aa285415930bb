//! Recoverable heading markers.
//!
//! Headings lose their identity when markup is rendered to a paginated
//! document. This crate plants a link with a reserved URI prefix next to
//! each heading so its rendered location can be found again, and encodes
//! resolved destinations into the same scheme for the second rendering pass.
//!
//! - [`Tagger`]: rewrites markup and collects the ordered heading list
//! - [`MarkerScheme`]: builds and parses marker URIs
//! - [`encode_destination`] / [`decode_destination`]: the token codec
//! - [`display_text`]: plain labels from heading markup

mod error;
mod scheme;
mod tagger;
mod text;
mod token;

pub use error::MarkerError;
pub use scheme::{DEFAULT_MARKER_PREFIX, MarkerScheme};
pub use tagger::{SYNTHETIC_ID_PREFIX, TaggedMarkup, Tagger};
pub use text::display_text;
pub use token::{decode_destination, encode_destination};

use crate::error::RenderError;
use crate::types::{RenderRequest, TocDocument};
use lopdf::Document;

/// The external layout engine: turns a markup file into a paginated
/// document whose link annotations carry hit-testable rectangles.
///
/// `render` is a blocking call. It returns only once the renderer has
/// signalled completion, and there is no timeout.
pub trait DocumentRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Document, RenderError>;
}

/// Turns structured table of contents data into presentational markup.
pub trait TocTransform {
    fn transform(&self, toc: &TocDocument) -> Result<String, RenderError>;
}

impl<R: DocumentRenderer + ?Sized> DocumentRenderer for Box<R> {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Document, RenderError> {
        (**self).render(request)
    }
}

impl<T: TocTransform + ?Sized> TocTransform for Box<T> {
    fn transform(&self, toc: &TocDocument) -> Result<String, RenderError> {
        (**self).transform(toc)
    }
}

//! Rendering several independent requests at once.

use crate::pipeline::{DocumentPipeline, DocumentRequest, RenderedDocument};

/// Renders every request with `pipeline`. Results are in request order.
///
/// With the `rayon-executor` feature the requests are spread over rayon's
/// global thread pool; without it they are rendered one after another.
#[cfg(feature = "rayon-executor")]
pub fn render_unit_documents(
    pipeline: &DocumentPipeline,
    requests: &[DocumentRequest],
) -> Vec<RenderedDocument> {
    use rayon::prelude::*;

    log::debug!(
        "Rendering {} documents on {} threads",
        requests.len(),
        rayon::current_num_threads()
    );
    requests
        .par_iter()
        .map(|request| pipeline.render(request))
        .collect()
}

#[cfg(not(feature = "rayon-executor"))]
pub fn render_unit_documents(
    pipeline: &DocumentPipeline,
    requests: &[DocumentRequest],
) -> Vec<RenderedDocument> {
    log::debug!("Rendering {} documents sequentially", requests.len());
    requests
        .iter()
        .map(|request| pipeline.render(request))
        .collect()
}

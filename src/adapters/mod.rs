// Adapters layer: concrete input sources (local files, http).

pub mod http;
pub mod local;

pub use http::HttpInputs;
pub use local::LocalInputs;

use crate::domain::ports::InputSource;
use crate::utils::error::Result;
use crate::utils::validation::is_url_base;
use std::sync::Arc;

/// Picks the input source for a configured `input_base`.
pub fn input_source_for(base: &str) -> Result<Arc<dyn InputSource>> {
    if is_url_base(base) {
        Ok(Arc::new(HttpInputs::new(base)?))
    } else {
        Ok(Arc::new(LocalInputs::new(base)))
    }
}

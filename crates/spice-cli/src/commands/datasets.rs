//! Dataset listing command.

use std::io::Write;

use crate::error::CliError;
use crate::fetch::fetch_and_render;
use crate::output::OutputFormat;
use crate::runtime::RuntimeContext;
use crate::spec::DatasetSpec;

/// Runtime path serving the dataset listing.
const DATASETS_PATH: &str = "/v1/datasets";

/// Datasets command executor.
pub struct DatasetsCommand {
    rtcontext: RuntimeContext,
}

impl DatasetsCommand {
    /// Create a new datasets command.
    #[must_use]
    pub fn new(rtcontext: RuntimeContext) -> Self {
        Self { rtcontext }
    }

    /// Execute the datasets command.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime is unreachable or the listing
    /// cannot be decoded or rendered.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        fetch_and_render::<DatasetSpec, W>(&self.rtcontext, DATASETS_PATH, format, writer).await
    }
}

//! Block templates: images new blocks are provisioned from.

use crate::error::Result;
use crate::http::HttpTransport;
use crate::resource::{Resource, Service};
use crate::types::{Template, TemplateCreationStatus, TemplateParams};

/// The `/block_templates` collection.
///
/// Creating a template snapshots an existing block. The server queues the
/// job and answers with a `TemplateCreationStatus`, not a `Template`.
#[derive(Debug, Clone, Copy)]
pub struct Templates;

impl Resource for Templates {
    const PATH: &'static str = "/block_templates";

    type Entity = Template;
    type Params = TemplateParams;
    type Created = TemplateCreationStatus;

    /// The server decides whether the source block exists.
    fn validate(_params: &TemplateParams) -> Result<()> {
        Ok(())
    }

    fn encode(params: &TemplateParams) -> Result<String> {
        params.to_form()
    }
}

impl<T: HttpTransport> Service<'_, Templates, T> {
    /// Queues a template snapshot of `block_id`.
    pub fn create_from_block(&self, block_id: &str) -> Result<TemplateCreationStatus> {
        self.create(&TemplateParams::new(block_id))
    }
}

//! Blocks: on-demand virtual compute instances.

use crate::error::Result;
use crate::resource::Resource;
use crate::types::{Block, BlockParams};

/// The `/blocks` collection.
#[derive(Debug, Clone, Copy)]
pub struct Blocks;

impl Resource for Blocks {
    const PATH: &'static str = "/blocks";

    type Entity = Block;
    type Params = BlockParams;
    type Created = Block;

    fn validate(params: &BlockParams) -> Result<()> {
        params.validate()
    }

    fn encode(params: &BlockParams) -> Result<String> {
        params.to_form()
    }
}

//! GetInitialDialplanHandler - Query handler for the opening dialplan.

use std::sync::Arc;

use crate::domain::voice::{VerbSequence, VerbSequenceBuilder};

/// Query for the dialplan played when the call is answered.
#[derive(Debug, Clone, Default)]
pub struct GetInitialDialplanQuery;

/// Handler returning the greeting and the first collect round.
pub struct GetInitialDialplanHandler {
    builder: Arc<VerbSequenceBuilder>,
}

impl GetInitialDialplanHandler {
    pub fn new(builder: Arc<VerbSequenceBuilder>) -> Self {
        Self { builder }
    }

    pub fn handle(&self, _query: GetInitialDialplanQuery) -> VerbSequence {
        self.builder.initial()
    }
}

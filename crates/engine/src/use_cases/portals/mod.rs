//! Portal use cases.

mod list;
mod submit;

pub use list::ListPortals;
pub use submit::{PortalSubmission, SubmitPortal, SubmitPortalError};

use std::sync::Arc;

/// Container for portal use cases.
pub struct PortalUseCases {
    pub submit: Arc<SubmitPortal>,
    pub list: Arc<ListPortals>,
}

impl PortalUseCases {
    pub fn new(submit: Arc<SubmitPortal>, list: Arc<ListPortals>) -> Self {
        Self { submit, list }
    }
}

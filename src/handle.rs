use log::{debug, warn};
use std::sync::Arc;

use crate::backend::Backend;
use crate::descriptor::Descriptor;
use crate::error::{ResolveError, Result};

/// An opened dictionary: owns its backend until closed or dropped.
///
/// Handles are independent values; two handles on the same descriptor each
/// own their own backend, and closing one leaves the other usable.
#[derive(Debug)]
pub struct DictionaryHandle {
    descriptor: Arc<Descriptor>,
    backend: Option<Box<dyn Backend>>,
}

impl DictionaryHandle {
    /// Internal constructor (called by Resolver after a successful load).
    pub(crate) fn new(descriptor: Arc<Descriptor>, backend: Box<dyn Backend>) -> Self {
        Self {
            descriptor,
            backend: Some(backend),
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn language(&self) -> &str {
        &self.descriptor.language
    }

    pub fn variant(&self) -> &str {
        &self.descriptor.variant
    }

    /// Canonical tag of the opened dictionary, if it has one.
    pub fn language_tag(&self) -> Option<String> {
        self.descriptor.language_tag()
    }

    /// The loaded backend; None after close().
    pub fn backend(&self) -> Option<&dyn Backend> {
        self.backend.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Release the backend. Calling close() again is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut backend) = self.backend.take() else {
            return Ok(());
        };
        debug!("handle: release {}", self.descriptor.dir.display());
        backend.release().map_err(|source| ResolveError::Release {
            dir: self.descriptor.dir.clone(),
            source,
        })
    }
}

impl Drop for DictionaryHandle {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            // release errors on drop cannot be returned
            warn!("handle: {e}");
        }
    }
}

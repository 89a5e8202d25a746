//! Consumer side of the registration channel.

use std::sync::{Mutex, PoisonError};

use crate::model::ImplementorTable;

/// Component that consumes implementor tables once they are published.
///
/// Called synchronously by the publisher; the return value is not consulted
/// and a failing registrar is expected to panic rather than report.
pub trait Registrar: Send + Sync {
    fn register_implementors(&self, table: ImplementorTable);
}

impl<F> Registrar for F
where
    F: Fn(ImplementorTable) + Send + Sync,
{
    fn register_implementors(&self, table: ImplementorTable) {
        self(table)
    }
}

/// Registrar that keeps every table it receives, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    calls: Mutex<Vec<ImplementorTable>>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ImplementorTable> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Registrar for RecordingRegistrar {
    fn register_implementors(&self, table: ImplementorTable) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(table);
    }
}

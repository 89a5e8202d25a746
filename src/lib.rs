//! # implementors
//!
//! Publishing and consuming the implementor tables behind the "Implementors"
//! section of generated API documentation.
//!
//! A table maps each library (crate) to the trait implementations it provides
//! ([`model`]). It is published once, at load time, on a registration channel
//! ([`channel`]): if a registrar ([`registrar`]) is already installed it gets
//! the table right away, otherwise the table waits in a one-slot mailbox
//! ([`slot`]) that the registrar claims when it is installed.
//!
//! ```text
//! asset file ──> ImplementorTable ──> publish ──> Registrar (e.g. ImplementorsPanel)
//!                                         └─────> pending slot ──> install_registrar
//! ```
//!
//! Tables are data assets ([`asset`]), either plain JSON or the generator's
//! script form. [`panel`] is a registrar that lays the records out the way
//! documentation pages show them, configured through [`config`].

pub mod asset;
pub mod channel;
pub mod config;
pub mod error;
pub mod markup;
pub mod model;
pub mod panel;
pub mod registrar;
pub mod slot;

// Re-exports
pub use channel::{global, publish, Delivery, RegistrationChannel};
pub use error::*;
pub use model::{ImplementationRecord, ImplementorTable, LibraryId};
pub use panel::{ImplementorsPanel, PanelEntry};
pub use registrar::{RecordingRegistrar, Registrar};
pub use slot::PendingSlot;

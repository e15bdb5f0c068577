//! Opaque native runtime interface.
//!
//! Construction, checked casting and signal connection of native objects are not
//! implemented by this library; they are delegated to an embedding-provided
//! [`Runtime`]. The repository only needs three operations, all keyed by
//! descriptor handles and native type ids it already tracks.
//!
//! How calls are marshaled and how native memory is reclaimed are properties of
//! the runtime implementation and deliberately invisible here.

use std::fmt;

use crate::{
    metadata::{
        descriptor::{Descriptor, NativeTypeId},
        typesystem::{Signal, Value},
    },
    Result,
};

/// Callback invoked when a connected signal fires: the emitting instance plus
/// the marshaled signal arguments.
pub type SignalCallback<V> = Box<dyn FnMut(&V, &[Value]) + Send>;

/// The minimal surface the embedding runtime must provide.
///
/// `Value` is the runtime's own opaque object handle; it must be `Debug` so a
/// failed cast can name the source value in its error message.
pub trait Runtime: Send + Sync {
    /// The runtime's opaque object/value handle
    type Value: fmt::Debug;
    /// Handle identifying one signal connection, for later disconnection
    type Subscription;

    /// Construct an instance of the type described by `desc`, applying the
    /// given construct-time property assignments.
    fn instantiate(&self, desc: Descriptor, properties: &[(String, Value)]) -> Result<Self::Value>;

    /// Checked cast of `value` to the type registered under `target`.
    ///
    /// A rejected cast is `None`; the caller raises the descriptive error.
    fn cast(&self, value: &Self::Value, target: NativeTypeId) -> Option<Self::Value>;

    /// Connect `callback` to `signal` on `instance`.
    ///
    /// `detail` narrows the subscription where the notification mechanism
    /// supports detailed emissions; `after` requests invocation after the
    /// default handler.
    fn connect(
        &self,
        instance: &Self::Value,
        signal: &Signal,
        callback: SignalCallback<Self::Value>,
        detail: Option<&str>,
        after: bool,
    ) -> Self::Subscription;
}

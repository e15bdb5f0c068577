//! Integration tests for the object layer: instantiation, checked casts and
//! signal connection through a scripted runtime implementation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use introscope::prelude::*;

/// Opaque handle the scripted runtime hands out for instances.
#[derive(Debug, Clone, PartialEq)]
struct Handle {
    type_id: NativeTypeId,
    label: String,
}

/// Runtime that accepts casts only between type ids it was told are related.
struct ScriptedRuntime {
    compatible: Vec<(NativeTypeId, NativeTypeId)>,
    connections: AtomicU32,
}

impl ScriptedRuntime {
    fn new(compatible: &[(NativeTypeId, NativeTypeId)]) -> Self {
        ScriptedRuntime {
            compatible: compatible.to_vec(),
            connections: AtomicU32::new(0),
        }
    }
}

impl Runtime for ScriptedRuntime {
    type Value = Handle;
    type Subscription = u32;

    fn instantiate(&self, desc: Descriptor, properties: &[(String, Value)]) -> Result<Handle> {
        Ok(Handle {
            type_id: NativeTypeId::default(),
            label: format!("instance:{desc}:{}", properties.len()),
        })
    }

    fn cast(&self, value: &Handle, target: NativeTypeId) -> Option<Handle> {
        if value.type_id == target
            || self.compatible.contains(&(value.type_id, target))
        {
            Some(Handle {
                type_id: target,
                label: value.label.clone(),
            })
        } else {
            None
        }
    }

    fn connect(
        &self,
        _instance: &Handle,
        _signal: &Signal,
        _callback: SignalCallback<Handle>,
        _detail: Option<&str>,
        _after: bool,
    ) -> u32 {
        self.connections.fetch_add(1, Ordering::Relaxed) + 1
    }
}

fn widget_repository() -> Repository {
    let mut provider = MemoryProvider::new();
    provider.add_namespace("Gtk", "4.0", &[]);
    let widget = provider.add_class("Gtk", "Widget", NativeTypeId::new(0x10));
    provider.add_signal(widget, "destroy");
    let button = provider.add_class("Gtk", "Button", NativeTypeId::new(0x11));
    provider.set_parent(button, widget);
    Repository::new(Arc::new(provider))
}

#[test]
fn test_instantiate_passes_properties_through() -> Result<()> {
    let repository = widget_repository();
    let runtime = ScriptedRuntime::new(&[]);

    let symbol = repository.lookup("Gtk", "Button")?.unwrap();
    let button = symbol.as_compound().unwrap();
    let instance = button.instantiate(
        &runtime,
        &[("label".to_string(), Value::Str("Ok".to_string()))],
    )?;
    assert!(instance.label.ends_with(":1"));
    Ok(())
}

#[test]
fn test_cast_accepts_compatible_and_rejects_others() -> Result<()> {
    let repository = widget_repository();
    // a Button value may be seen as a Widget, nothing else
    let runtime = ScriptedRuntime::new(&[(NativeTypeId::new(0x11), NativeTypeId::new(0x10))]);
    let value = Handle {
        type_id: NativeTypeId::new(0x11),
        label: "btn".to_string(),
    };

    let widget = repository.lookup("Gtk", "Widget")?.unwrap();
    let widget = widget.as_compound().unwrap();
    let upcast = widget.cast(&runtime, &value)?;
    assert_eq!(upcast.type_id, NativeTypeId::new(0x10));

    let stranger = Handle {
        type_id: NativeTypeId::new(0x99),
        label: "mystery".to_string(),
    };
    match widget.cast(&runtime, &stranger) {
        Err(Error::CastFailed { value, target }) => {
            assert!(value.contains("mystery"));
            assert_eq!(target, "Gtk.Widget");
        }
        other => panic!("expected cast failure, got {:?}", other.is_ok()),
    }
    Ok(())
}

#[test]
fn test_connect_resolves_inherited_signal() -> Result<()> {
    let repository = widget_repository();
    let runtime = ScriptedRuntime::new(&[]);
    let instance = Handle {
        type_id: NativeTypeId::new(0x11),
        label: "btn".to_string(),
    };

    let symbol = repository.lookup("Gtk", "Button")?.unwrap();
    let button = symbol.as_compound().unwrap();

    // `destroy` is declared on Widget; connection resolves it through the
    // parent edge
    let subscription = button.connect(
        repository.provider(),
        &runtime,
        &instance,
        "on_destroy",
        Box::new(|_, _| {}),
        None,
        false,
    )?;
    assert_eq!(subscription, 1);
    Ok(())
}

#[test]
fn test_connect_unknown_signal_is_an_error() -> Result<()> {
    let repository = widget_repository();
    let runtime = ScriptedRuntime::new(&[]);
    let instance = Handle {
        type_id: NativeTypeId::new(0x11),
        label: "btn".to_string(),
    };

    let symbol = repository.lookup("Gtk", "Button")?.unwrap();
    let button = symbol.as_compound().unwrap();
    match button.connect(
        repository.provider(),
        &runtime,
        &instance,
        "on_vanish",
        Box::new(|_, _| {}),
        None,
        false,
    ) {
        Err(Error::MemberNotFound { container, name }) => {
            assert_eq!(container, "Gtk.Button");
            assert_eq!(name, "on_vanish");
        }
        other => panic!("expected missing member error, got {:?}", other.is_ok()),
    }
    Ok(())
}

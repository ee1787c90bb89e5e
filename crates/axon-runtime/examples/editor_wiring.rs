//! Markdown Editor Core Wiring
//!
//! Demonstrates the full coordination stack:
//! - Services (settings, document store) resolved through the registry
//! - Components created by the factory with injected dependencies
//! - Deferred initialization subscribing components to the bus
//! - Cross-component events and lifecycle announcements
//!
//! # Usage
//!
//! ```bash
//! cargo run --example editor_wiring
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axon_component::{
    BaseComponent, BusAware, Component, ComponentError, Destroyable, EventBus, Initializable,
};
use axon_registry::{ServiceFactory, service_value};
use axon_runtime::{Axon, COMPONENT_CREATED, COMPONENT_DESTROYED, ComponentOptions};
use parking_lot::Mutex;
use serde_json::{Value, json};

/// Registry-managed document content.
#[derive(Default)]
struct DocumentStore {
    content: Mutex<String>,
    revision: AtomicU64,
}

impl DocumentStore {
    fn append(&self, text: &str) -> u64 {
        let mut content = self.content.lock();
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(text);
        self.revision.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn chars(&self) -> usize {
        self.content.lock().len()
    }

    fn content(&self) -> String {
        self.content.lock().clone()
    }
}

/// Turns raw editor input into document changes.
struct DocumentModel {
    base: BaseComponent,
    store: Arc<DocumentStore>,
    autosave: bool,
}

impl Component for DocumentModel {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }

    fn as_destroyable(&self) -> Option<&dyn Destroyable> {
        Some(self)
    }

    fn as_bus_aware(&self) -> Option<&dyn BusAware> {
        Some(self)
    }
}

#[async_trait]
impl Initializable for DocumentModel {
    async fn initialize(&self) -> Result<(), ComponentError> {
        println!(
            "  [document-model] ready (autosave {})",
            if self.autosave { "on" } else { "off" }
        );

        let Some(bus) = self.base.bus() else {
            return Err(ComponentError::Init {
                reason: "bus not wired".into(),
            });
        };
        let store = Arc::clone(&self.store);
        self.base
            .on("editor:input", move |envelope| {
                let store = Arc::clone(&store);
                let bus = bus.clone();
                async move {
                    let text = envelope.data["text"].as_str().unwrap_or_default().to_string();
                    let revision = store.append(&text);
                    bus.publish_from(
                        "document:changed",
                        json!({"revision": revision, "chars": store.chars()}),
                        "document-model",
                    )
                    .await;
                    Ok(())
                }
            })
            .map_err(|error| ComponentError::Init {
                reason: error.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl Destroyable for DocumentModel {
    async fn destroy(&self) -> Result<(), ComponentError> {
        println!("  [document-model] closing document");
        self.base.destroy();
        Ok(())
    }
}

impl BusAware for DocumentModel {
    fn set_event_bus(&self, bus: EventBus) {
        self.base.set_event_bus(bus);
    }
}

/// Mirrors document state into the status line.
struct StatusBar {
    base: BaseComponent,
}

impl Component for StatusBar {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }

    fn as_destroyable(&self) -> Option<&dyn Destroyable> {
        Some(self)
    }

    fn as_bus_aware(&self) -> Option<&dyn BusAware> {
        Some(self)
    }
}

#[async_trait]
impl Initializable for StatusBar {
    async fn initialize(&self) -> Result<(), ComponentError> {
        self.base
            .on("document:changed", |envelope| async move {
                println!(
                    "  [status-bar] revision {}, {} chars",
                    envelope.data["revision"], envelope.data["chars"]
                );
                Ok(())
            })
            .map_err(|error| ComponentError::Init {
                reason: error.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl Destroyable for StatusBar {
    async fn destroy(&self) -> Result<(), ComponentError> {
        println!("  [status-bar] goodbye");
        self.base.destroy();
        Ok(())
    }
}

impl BusAware for StatusBar {
    fn set_event_bus(&self, bus: EventBus) {
        self.base.set_event_bus(bus);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for output
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    println!("=== Markdown Editor Core Wiring ===\n");

    // Composition root: one bus, one registry, one factory.
    let axon = Axon::builder().with_source_name("editor").build();

    // Watch component lifecycle announcements.
    axon.bus().subscribe(COMPONENT_CREATED, |envelope| async move {
        println!("  [lifecycle] created {}", envelope.data["name"]);
        Ok(())
    })?;
    axon.bus()
        .subscribe(COMPONENT_DESTROYED, |envelope| async move {
            println!("  [lifecycle] destroyed {}", envelope.data["name"]);
            Ok(())
        })?;

    // Services live in the registry.
    axon.registry().register_instance(
        "settings",
        service_value(json!({"autosave": true, "theme": "dark"})),
    )?;
    axon.registry().register_factory(
        "document-store",
        ServiceFactory::new(|_deps| Ok(service_value(DocumentStore::default()))),
    )?;

    // Component classes, with their dependency wiring.
    println!("--- registering components ---");
    axon.factory().register(
        "document-model",
        |_config, deps| {
            let store = deps
                .first()
                .and_then(|dep| dep.clone().downcast::<DocumentStore>().ok())
                .ok_or_else(|| "document-store dependency missing".to_string())?;
            let settings = deps
                .get(1)
                .and_then(|dep| dep.clone().downcast::<Value>().ok())
                .ok_or_else(|| "settings dependency missing".to_string())?;
            Ok(Arc::new(DocumentModel {
                base: BaseComponent::new("document-model"),
                store,
                autosave: settings["autosave"].as_bool().unwrap_or(false),
            }) as Arc<dyn Component>)
        },
        ComponentOptions {
            singleton: true,
            dependencies: vec!["document-store".into(), "settings".into()],
            ..Default::default()
        },
    )?;
    axon.factory().register(
        "status-bar",
        |_config, _deps| {
            Ok(Arc::new(StatusBar {
                base: BaseComponent::new("status-bar"),
            }) as Arc<dyn Component>)
        },
        ComponentOptions {
            singleton: true,
            ..Default::default()
        },
    )?;

    println!("\n--- creating components ---");
    axon.factory().create("status-bar", json!({})).await?;
    axon.factory().create("document-model", json!({})).await?;

    // Deferred initialization installs the subscriptions.
    tokio::time::sleep(Duration::from_millis(50)).await;

    println!("\n--- typing ---");
    for line in ["# Meeting Notes", "- ship the parser", "- fix the cache"] {
        axon.bus()
            .publish_from("editor:input", json!({"text": line}), "keyboard")
            .await;
    }

    let store = axon
        .registry()
        .resolve_as::<DocumentStore>("document-store")
        .await?;
    println!("\n--- document ---\n{}", store.content());

    println!("--- shutting down ---");
    axon.shutdown().await;

    println!("\n=== Done ===");
    Ok(())
}

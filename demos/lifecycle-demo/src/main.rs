//! Lifecycle demo binary
//!
//! Mounts a provider over a simulated registration subsystem and prints
//! every status change until the script goes offline.

use lifecycle_demo::SimulatedRegistrar;
use std::time::Duration;
use sw_lifecycle::{ProviderConfig, RegistrationOptions, ServiceWorkerProvider, Status};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifecycle_demo=debug,sw_lifecycle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Service Worker Lifecycle Demo ===\n");

    let provider = ServiceWorkerProvider::new(SimulatedRegistrar::typical());
    let scope = provider.mount(
        ProviderConfig::default()
            .with_registration_options(RegistrationOptions::new().with("scope", "/")),
    );

    let mut rx = scope.watch();
    println!("Initial status: {}", rx.borrow_and_update().status);

    let watched = tokio::time::timeout(Duration::from_secs(5), async {
        while rx.changed().await.is_ok() {
            let record = rx.borrow_and_update().clone();
            let registration_scope = record
                .registration
                .as_ref()
                .map_or("-", |registration| registration.scope());
            println!("Status: {:<10} registration scope: {registration_scope}", record.status);
            if record.status == Status::Offline {
                break;
            }
        }
    })
    .await;

    if watched.is_err() {
        tracing::warn!("Timed out waiting for the simulated script to finish");
    }

    scope.unmount();
    println!("\nProvider unmounted; subscription deactivated.");
}

//! Test doubles for the provider's collaborators
//!
//! - Stub application and locator that record launches
//! - Discovery whose results are released by the test
//! - Notifier and registry that record what they were asked to do
//! - Waiting for a child process to be reaped

pub mod mocks;

pub use mocks::{
    solutions, RecordingNotifier, RecordingRegistry, RegistryEvent, StubApp, StubDiscovery,
    StubLocator,
};

#[cfg(target_os = "linux")]
pub use mocks::wait_for_reap;

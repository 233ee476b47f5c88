//! Service Factory
//!
//! Wires the infrastructure adapters behind the domain ports.
//! This is the dependency injection point for the command layer.

use crate::application::{strategy_for, DeployLayout, DeployPipeline, HostStrategy};
use crate::domain::ports::{DeployEventSink, FileSystem, TaskExecutor};
use crate::domain::services::ReadinessPoller;
use crate::domain::value_objects::{Platform, Verbosity};
use crate::infrastructure::net::local_ip_towards;
use crate::infrastructure::{HostExecutor, JsonEventSink, LocalFs, ProcessRunner, ThreadPause};

/// Process, filesystem and clock adapters for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Services {
    pub runner: ProcessRunner,
    pub fs: LocalFs,
    pub pause: ThreadPause,
}

impl Services {
    /// Adapters for a session at `verbosity`. JSON sessions never echo
    /// command output, so stdout stays machine-readable.
    pub fn new(verbosity: Verbosity, json: bool) -> Self {
        let runner = ProcessRunner::new(verbosity);
        Self {
            runner: if json { runner.silent() } else { runner },
            fs: LocalFs::new(),
            pause: ThreadPause,
        }
    }

    pub fn executor(&self) -> HostExecutor<'_> {
        HostExecutor::new(&self.runner, &self.fs)
    }
}

/// Host strategy for `platform`, probing routes through a UDP socket.
pub fn create_host_strategy(platform: Platform) -> Box<dyn HostStrategy> {
    strategy_for(platform, local_ip_towards)
}

/// Deploy pipeline polling with the default interval and limit.
pub fn create_deploy_pipeline<'a>(
    services: &'a Services,
    executor: &'a dyn TaskExecutor,
    events: &'a dyn DeployEventSink,
    layout: DeployLayout,
) -> DeployPipeline<'a> {
    let fs: &'a dyn FileSystem = &services.fs;
    DeployPipeline::new(
        executor,
        fs,
        ReadinessPoller::new(&services.pause),
        events,
        layout,
    )
}

/// NDJSON deploy events on stdout.
pub fn create_json_event_sink() -> JsonEventSink {
    JsonEventSink::stdout()
}

//! Poller: periodic refresh of the status endpoints.
//!
//! Every schedule runs on its own timer. Each tick issues an independent
//! request: ticks never wait for the previous request of the same target,
//! and the sequence gate in the dashboard decides which response wins.

use std::time::Duration;

use eigerdash_domain::endpoint::StatusTarget;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{MissedTickBehavior, interval};

use super::status_service::StatusService;
use crate::ports::StatusApi;

/// One target polled at a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub target: StatusTarget,
    pub interval: Duration,
}

/// Polling periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Detector config and status.
    pub detector_interval: Duration,
    /// Frame receiver and frame processor unit lists.
    pub units_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            detector_interval: Duration::from_millis(100),
            units_interval: Duration::from_millis(500),
        }
    }
}

impl PollerConfig {
    #[must_use]
    pub fn schedules(&self) -> Vec<PollSchedule> {
        let every = |target, interval| PollSchedule { target, interval };
        vec![
            every(StatusTarget::DetectorConfig, self.detector_interval),
            every(StatusTarget::DetectorStatus, self.detector_interval),
            every(StatusTarget::Receivers, self.units_interval),
            every(StatusTarget::Processors, self.units_interval),
        ]
    }
}

/// Owns the polling tasks: started on load, stopped on teardown.
///
/// Dropping a running poller stops it.
pub struct Poller<A> {
    service: StatusService<A>,
    schedules: Vec<PollSchedule>,
    handles: Vec<JoinHandle<()>>,
}

impl<A: StatusApi> Poller<A> {
    pub fn new(service: StatusService<A>, config: &PollerConfig) -> Self {
        Self {
            service,
            schedules: config.schedules(),
            handles: Vec::new(),
        }
    }

    #[must_use]
    pub fn schedules(&self) -> &[PollSchedule] {
        &self.schedules
    }

    /// Spawn one task per schedule. Does nothing when already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.handles = self
            .schedules
            .iter()
            .map(|schedule| tokio::spawn(run(self.service.clone(), *schedule)))
            .collect();
        tracing::info!(tasks = self.handles.len(), "polling started");
    }

    /// Abort every timer together with its in-flight requests.
    pub fn stop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        tracing::info!("polling stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handles.iter().any(|handle| !handle.is_finished())
    }
}

impl<A> Drop for Poller<A> {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

async fn run<A: StatusApi>(service: StatusService<A>, schedule: PollSchedule) {
    let mut ticker = interval(schedule.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // dropping the set on abort cancels the requests still in flight
    let mut in_flight = JoinSet::new();
    loop {
        ticker.tick().await;
        while in_flight.try_join_next().is_some() {}
        in_flight.spawn(service.refresh_task(schedule.target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};
    use crate::testing::{FakeApi, detector_config};
    use crate::update_bus::UpdateBus;
    use eigerdash_domain::render::ids;
    use std::sync::Arc;
    use tokio::time::sleep;

    const CONFIG: &str = "/api/0.1/eiger/detector/api/1.6.0/config";
    const STATUS: &str = "/api/0.1/eiger/detector/api/1.6.0/status";
    const RECEIVERS: &str = "/api/0.1/fr/status/";
    const PROCESSORS: &str = "/api/0.1/fp/status/";

    fn make_poller(api: &Arc<FakeApi>) -> Poller<FakeApi> {
        let dashboard = Dashboard::new(DashboardSettings::default(), UpdateBus::default());
        let service = StatusService::new(Arc::clone(api), Arc::new(dashboard));
        Poller::new(service, &PollerConfig::default())
    }

    #[test]
    fn should_poll_detector_fast_and_units_slow() {
        let schedules = PollerConfig::default().schedules();

        assert_eq!(schedules.len(), 4);
        assert_eq!(schedules[0].target, StatusTarget::DetectorConfig);
        assert_eq!(schedules[1].interval, Duration::from_millis(100));
        assert_eq!(schedules[2].target, StatusTarget::Receivers);
        assert_eq!(schedules[3].interval, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn should_issue_one_request_per_tick() {
        let api = Arc::new(FakeApi::default());
        let mut poller = make_poller(&api);

        poller.start();
        sleep(Duration::from_millis(350)).await;

        // ticks at 0, 100, 200 and 300 ms; units only at 0 ms
        assert_eq!(api.count(CONFIG), 4);
        assert_eq!(api.count(STATUS), 4);
        assert_eq!(api.count(RECEIVERS), 1);
        assert_eq!(api.count(PROCESSORS), 1);
        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn should_issue_nothing_after_stop() {
        let api = Arc::new(FakeApi::default());
        let mut poller = make_poller(&api);

        poller.start();
        sleep(Duration::from_millis(150)).await;
        poller.stop();
        let issued = api.calls().len();
        sleep(Duration::from_secs(2)).await;

        assert!(!poller.is_running());
        assert_eq!(api.calls().len(), issued);
    }

    #[tokio::test(start_paused = true)]
    async fn should_ignore_second_start() {
        let api = Arc::new(FakeApi::default());
        let mut poller = make_poller(&api);

        poller.start();
        poller.start();
        sleep(Duration::from_millis(50)).await;

        assert_eq!(api.count(CONFIG), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_when_requests_fail() {
        let api = Arc::new(FakeApi::default());
        let mut poller = make_poller(&api);

        poller.start();
        sleep(Duration::from_millis(150)).await;
        api.respond(CONFIG, detector_config(0.5));
        sleep(Duration::from_millis(100)).await;

        let page = poller.service.dashboard().snapshot().page;
        assert_eq!(page.text(ids::EXPOSURE), "0.5");
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_dropped() {
        let api = Arc::new(FakeApi::default());
        let mut poller = make_poller(&api);

        poller.start();
        sleep(Duration::from_millis(10)).await;
        drop(poller);
        let issued = api.calls().len();
        sleep(Duration::from_secs(1)).await;

        assert_eq!(api.calls().len(), issued);
    }
}

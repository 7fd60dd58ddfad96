// ticker.rs - Background task advancing the board at the current update period

use conway::Controller;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Spawn the generation loop on `runtime`.
///
/// Each tick sleeps for the controller's current interval, then advances one
/// generation on the blocking pool (the advance holds the controller lock and
/// runs its own worker threads). `on_advance` runs after every generation that
/// actually happened, typically to request a repaint.
pub fn spawn_ticker<F>(runtime: &Handle, controller: Controller, on_advance: F) -> JoinHandle<()>
where
    F: Fn() + Send + Sync + 'static,
{
    runtime.spawn(async move {
        debug!("ticker started");
        loop {
            tokio::time::sleep(controller.interval()).await;

            let worker = controller.clone();
            match tokio::task::spawn_blocking(move || worker.advance()).await {
                Ok(outcome) if outcome.is_applied() => on_advance(),
                Ok(_) => {}
                Err(err) => {
                    error!(error = %err, "generation advance failed, stopping ticker");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use conway::SimulationConfig;

    use super::*;

    fn fast_controller() -> Controller {
        let config = SimulationConfig { width: 8, height: 8, workers: 2, interval_ms: 10, ..Default::default() };
        Controller::new(&config).unwrap()
    }

    // Paused clock: sleeps resolve on virtual time, and the clock does not jump
    // ahead while an advance is still running on the blocking pool.
    #[tokio::test(start_paused = true)]
    async fn advances_while_running() {
        let controller = fast_controller();
        controller.set_paused(false);
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&repaints);

        let ticker = spawn_ticker(&Handle::current(), controller.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(300)).await;
        ticker.abort();

        assert!(controller.generation() > 0);
        assert!(repaints.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_while_paused() {
        let controller = fast_controller();
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&repaints);

        let ticker = spawn_ticker(&Handle::current(), controller.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        ticker.abort();

        assert_eq!(controller.generation(), 0);
        assert_eq!(repaints.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_a_full_period_between_generations() {
        let config = SimulationConfig { width: 8, height: 8, workers: 2, interval_ms: 1000, ..Default::default() };
        let controller = Controller::new(&config).unwrap();
        controller.set_paused(false);

        let ticker = spawn_ticker(&Handle::current(), controller.clone(), || {});
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(controller.generation(), 0);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        ticker.abort();
        assert_eq!(controller.generation(), 2);
    }
}

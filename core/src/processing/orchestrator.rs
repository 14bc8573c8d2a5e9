use crate::clock::Clock;
use crate::inference::{RawImage, UploadResult};
use crate::prelude::{InferenceService, VisionError, VisionResult};
use crate::telemetry::notice::{MSG_NOTHING_SELECTED, MSG_UPLOAD_FAILED};
use crate::telemetry::{LogManager, MetricsRecorder, Notice, Notifier};
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of a batch that ran to completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub successes: Vec<UploadResult>,
    pub failure_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchRun {
    Completed(BatchOutcome),
    /// Another batch was already in flight; nothing was submitted.
    Skipped,
}

/// Clears the busy flag on every exit path of a batch.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives one image at a time through the inference service.
pub struct UploadOrchestrator<C: Clock> {
    clock: C,
    busy: AtomicBool,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<C: Clock> UploadOrchestrator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            busy: AtomicBool::new(false),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("orchestrator"),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Submits `images` strictly in order, one request outstanding at a time.
    ///
    /// A failed image is reported once through `notifier`, counted, and
    /// skipped; it never aborts the batch. An empty `images` slice is
    /// rejected before any request is made.
    pub async fn run<S>(
        &self,
        images: &[RawImage],
        service: &S,
        notifier: &dyn Notifier,
    ) -> VisionResult<BatchRun>
    where
        S: InferenceService + ?Sized,
    {
        if images.is_empty() {
            notifier.notify(Notice::warning(MSG_NOTHING_SELECTED));
            return Err(VisionError::NothingSelected(MSG_NOTHING_SELECTED.into()));
        }

        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            self.logger.trace("batch already in flight, ignoring trigger");
            return Ok(BatchRun::Skipped);
        };

        self.metrics.record_batch();
        self.logger
            .record(&format!("starting batch of {} image(s)", images.len()));

        let mut outcome = BatchOutcome::default();
        for (position, image) in images.iter().enumerate() {
            match service.predict(image).await {
                Ok(prediction) => {
                    let result = prediction.received_at(self.clock.timestamp());
                    self.logger.trace(&format!(
                        "image {} ({}) -> {} detection(s)",
                        position + 1,
                        image.filename,
                        result.detections.len()
                    ));
                    self.metrics.record_success();
                    outcome.successes.push(result);
                }
                Err(err) => {
                    self.logger.diagnostic(&format!(
                        "error uploading {}: {}",
                        image.filename, err
                    ));
                    self.metrics.record_failure();
                    notifier.notify(Notice::warning(MSG_UPLOAD_FAILED));
                    outcome.failure_count += 1;
                }
            }
        }

        self.logger.record(&format!(
            "batch finished: {} succeeded, {} failed",
            outcome.successes.len(),
            outcome.failure_count
        ));
        Ok(BatchRun::Completed(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::inference::{Detection, ModelCatalog, Prediction};
    use crate::telemetry::{MemoryNotifier, NoticeLevel};
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    /// Answers from a script keyed by filename; `fail-*` names error out.
    #[derive(Default)]
    struct ScriptedService {
        calls: RefCell<Vec<String>>,
        in_flight: Cell<usize>,
        max_in_flight: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl InferenceService for ScriptedService {
        async fn list_models(&self) -> VisionResult<ModelCatalog> {
            unreachable!("not used by the orchestrator")
        }

        async fn predict(&self, image: &RawImage) -> VisionResult<Prediction> {
            self.calls.borrow_mut().push(image.filename.clone());
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));
            tokio::task::yield_now().await;
            self.in_flight.set(self.in_flight.get() - 1);

            if image.filename.starts_with("fail") {
                return Err(VisionError::Transport("500 Internal Server Error".into()));
            }
            Ok(Prediction::new(vec![Detection::new("box")]))
        }

        async fn set_model(&self, _model_id: &str) -> VisionResult<()> {
            unreachable!("not used by the orchestrator")
        }
    }

    fn images(names: &[&str]) -> Vec<RawImage> {
        names
            .iter()
            .map(|name| RawImage::new(*name, vec![1, 2, 3]))
            .collect()
    }

    #[tokio::test]
    async fn failed_image_does_not_abort_batch() {
        let orchestrator = UploadOrchestrator::new(FixedClock::new("t"));
        let service = ScriptedService::default();
        let notifier = MemoryNotifier::new();

        let run = orchestrator
            .run(&images(&["one.png", "fail-two.png", "three.png"]), &service, &notifier)
            .await
            .unwrap();

        let BatchRun::Completed(outcome) = run else {
            panic!("batch should have completed");
        };
        assert_eq!(outcome.successes.len(), 2);
        assert_eq!(outcome.failure_count, 1);
        assert_eq!(
            notifier.notices(),
            vec![Notice::warning(MSG_UPLOAD_FAILED)]
        );
        assert!(!orchestrator.is_busy());
        assert_eq!(
            *service.calls.borrow(),
            vec!["one.png", "fail-two.png", "three.png"]
        );
        assert_eq!(orchestrator.metrics().snapshot().failed, 1);
    }

    #[tokio::test]
    async fn empty_selection_is_rejected_without_requests() {
        let orchestrator = UploadOrchestrator::new(FixedClock::new("t"));
        let service = ScriptedService::default();
        let notifier = MemoryNotifier::new();

        let err = orchestrator.run(&[], &service, &notifier).await.unwrap_err();

        assert!(matches!(err, VisionError::NothingSelected(_)));
        assert!(service.calls.borrow().is_empty());
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Warning);
        assert_eq!(notifier.notices()[0].message, MSG_NOTHING_SELECTED);
        assert_eq!(orchestrator.metrics().snapshot().batches, 0);
    }

    #[tokio::test]
    async fn submissions_never_overlap() {
        let orchestrator = UploadOrchestrator::new(FixedClock::new("t"));
        let service = ScriptedService::default();
        let notifier = MemoryNotifier::new();

        orchestrator
            .run(&images(&["a.png", "b.png", "c.png", "d.png"]), &service, &notifier)
            .await
            .unwrap();

        assert_eq!(service.max_in_flight.get(), 1);
    }

    #[tokio::test]
    async fn second_trigger_while_busy_is_ignored() {
        let orchestrator = UploadOrchestrator::new(FixedClock::new("t"));
        let service = ScriptedService::default();
        let notifier = MemoryNotifier::new();
        let first_batch = images(&["a.png", "b.png"]);
        let second_batch = images(&["c.png"]);

        let (first, second) = tokio::join!(
            orchestrator.run(&first_batch, &service, &notifier),
            orchestrator.run(&second_batch, &service, &notifier),
        );

        assert!(matches!(first.unwrap(), BatchRun::Completed(_)));
        assert_eq!(second.unwrap(), BatchRun::Skipped);
        assert_eq!(*service.calls.borrow(), vec!["a.png", "b.png"]);
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn results_are_stamped_at_receipt() {
        struct CountingClock(Cell<u32>);
        impl Clock for CountingClock {
            fn timestamp(&self) -> String {
                self.0.set(self.0.get() + 1);
                format!("t{}", self.0.get())
            }
        }

        let orchestrator = UploadOrchestrator::new(CountingClock(Cell::new(0)));
        let service = ScriptedService::default();
        let notifier = MemoryNotifier::new();

        let run = orchestrator
            .run(&images(&["a.png", "fail.png", "b.png"]), &service, &notifier)
            .await
            .unwrap();

        let BatchRun::Completed(outcome) = run else {
            panic!("batch should have completed");
        };
        let stamps: Vec<&str> = outcome
            .successes
            .iter()
            .map(|result| result.timestamp.as_str())
            .collect();
        assert_eq!(stamps, vec!["t1", "t2"]);
    }
}

//! The scheduled typing effect.

use crate::sink::TextSink;
use crate::stop::{StopHandle, StopSignal};
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};
use typewrite_core::{Phase, TypingMachine};

#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error("typing effect task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Why the effect loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A [`StopHandle`] was used, or the effect was dropped.
    Requested,
    /// The sink returned an error; the display surface is gone.
    SinkClosed,
}

/// Counters reported once the loop exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// States executed, pauses included.
    pub steps: u64,
    /// Texts written to the sink.
    pub frames: u64,
    /// Words fully typed, deleted, and held.
    pub words_completed: u64,
    pub reason: StopReason,
}

/// A typing effect running on the current tokio runtime.
///
/// The effect owns its stop handle for as long as it runs. Dropping the
/// effect stops it.
#[derive(Debug)]
pub struct TypingEffect {
    stop: StopOnDrop,
    task: JoinHandle<RunSummary>,
}

/// Stops the effect when the owning [`TypingEffect`] (or its pending
/// `join`) goes away.
#[derive(Debug)]
struct StopOnDrop(StopHandle);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.stop();
    }
}

impl TypingEffect {
    /// Spawn the effect loop.
    ///
    /// Must be called from within a tokio runtime. The machine runs from
    /// whatever state it is in; fresh machines start at the first word.
    pub fn start<S>(machine: TypingMachine, sink: S) -> Self
    where
        S: TextSink + Send + 'static,
    {
        let (stop, signal) = StopHandle::new();
        debug!(
            words = machine.words().len(),
            timings = ?machine.timings(),
            "starting typing effect"
        );
        let task = tokio::spawn(run(machine, sink, signal));
        Self {
            stop: StopOnDrop(stop),
            task,
        }
    }

    /// A handle that can stop this effect from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.0.clone()
    }

    /// Stop the effect. No sink write happens after this returns.
    pub fn stop(&self) {
        self.stop.0.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.0.is_stopped()
    }

    /// Wait for the loop to end, which only happens after a stop.
    ///
    /// Dropping the returned future before it completes stops the effect.
    pub async fn join(self) -> Result<RunSummary, EffectError> {
        let TypingEffect { stop, task } = self;
        let summary = task.await;
        drop(stop);
        Ok(summary?)
    }

    /// Stop, then wait for the loop to wind down.
    pub async fn stop_and_join(self) -> Result<RunSummary, EffectError> {
        self.stop();
        self.join().await
    }
}

async fn run<S: TextSink>(
    mut machine: TypingMachine,
    mut sink: S,
    mut signal: StopSignal,
) -> RunSummary {
    let mut summary = RunSummary {
        steps: 0,
        frames: 0,
        words_completed: 0,
        reason: StopReason::Requested,
    };

    loop {
        let step = machine.step();
        let state = machine.state();

        match &step.text {
            Some(text) => match signal.write_unless_stopped(|| sink.display(text)) {
                None => break,
                Some(Ok(())) => summary.frames += 1,
                Some(Err(error)) => {
                    warn!(%error, "display sink failed; stopping typing effect");
                    signal.stop();
                    summary.reason = StopReason::SinkClosed;
                    break;
                }
            },
            None if signal.is_stopped() => break,
            None => {}
        }

        summary.steps += 1;
        if step.phase == Phase::PauseAfterDelete {
            summary.words_completed += 1;
        }
        trace!(
            phase = ?step.phase,
            word_index = state.word_index,
            char_count = state.char_count,
            delay_ms = step.delay.as_millis() as u64,
            "typing step"
        );

        tokio::select! {
            biased;
            _ = signal.stopped() => break,
            _ = pause(step.delay) => {}
        }
    }

    info!(
        steps = summary.steps,
        frames = summary.frames,
        words_completed = summary.words_completed,
        reason = ?summary.reason,
        "typing effect stopped"
    );
    summary
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        // Zero-delay steps still hand control back between states.
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Recorder, SharedText};
    use std::io;
    use tokio::time::{Instant, advance, sleep};

    fn go_rust() -> TypingMachine {
        TypingMachine::from_parts(["Go", "Rust"], 10, 5, 0, 0).unwrap()
    }

    struct FailAfter {
        remaining: usize,
        recorder: Recorder,
    }

    impl TextSink for FailAfter {
        fn display(&mut self, text: &str) -> io::Result<()> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "surface removed"));
            }
            self.remaining -= 1;
            self.recorder.display(text)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn writes_canonical_trace_in_virtual_time() {
        let recorder = Recorder::new();
        let effect = TypingEffect::start(go_rust(), recorder.clone());

        sleep(Duration::from_millis(119)).await;
        assert_eq!(
            recorder.frames(),
            [
                "", "G", "Go", "Go", "G", "", "", "R", "Ru", "Rus", "Rust", "Rust", "Rus", "Ru",
                "R", ""
            ]
        );

        let summary = effect.stop_and_join().await.unwrap();
        assert_eq!(summary.frames, 16);
        assert_eq!(summary.reason, StopReason::Requested);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_mid_cycle_freezes_output() {
        let slot = SharedText::new();
        let effect = TypingEffect::start(go_rust(), slot.clone());

        sleep(Duration::from_millis(62)).await;
        assert_eq!(slot.get(), "R");
        let writes = slot.writes();

        effect.stop();
        advance(Duration::from_secs(10)).await;
        sleep(Duration::from_secs(10)).await;

        assert_eq!(slot.get(), "R");
        assert_eq!(slot.writes(), writes);

        let summary = effect.join().await.unwrap();
        assert_eq!(summary.frames, writes);
        assert_eq!(summary.reason, StopReason::Requested);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_interrupts_a_pending_pause() {
        let machine = TypingMachine::from_parts(["Go"], 10, 5, 60_000, 0).unwrap();
        let slot = SharedText::new();
        let effect = TypingEffect::start(machine, slot.clone());

        sleep(Duration::from_secs(1)).await;
        assert_eq!(slot.get(), "Go");

        let before = Instant::now();
        let summary = effect.stop_and_join().await.unwrap();
        assert_eq!(Instant::now(), before);
        assert_eq!(summary.frames, 3);
        assert_eq!(slot.get(), "Go");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_handle_works_from_elsewhere() {
        let slot = SharedText::new();
        let effect = TypingEffect::start(go_rust(), slot.clone());
        let handle = effect.stop_handle();

        let stopper = tokio::spawn(async move {
            sleep(Duration::from_millis(33)).await;
            handle.stop();
        });
        stopper.await.unwrap();

        assert!(effect.is_stopped());
        advance(Duration::from_secs(1)).await;
        assert_eq!(slot.get(), "Go");
        effect.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_effect_stops_it() {
        let slot = SharedText::new();
        let effect = TypingEffect::start(go_rust(), slot.clone());

        sleep(Duration::from_millis(25)).await;
        drop(effect);
        let writes = slot.writes();

        sleep(Duration::from_secs(5)).await;
        assert_eq!(slot.get(), "Go");
        assert_eq!(slot.writes(), writes);
    }

    #[tokio::test(start_paused = true)]
    async fn sink_failure_stops_with_reason() {
        let recorder = Recorder::new();
        let sink = FailAfter {
            remaining: 3,
            recorder: recorder.clone(),
        };
        let effect = TypingEffect::start(go_rust(), sink);
        let handle = effect.stop_handle();

        let summary = effect.join().await.unwrap();
        assert_eq!(summary.reason, StopReason::SinkClosed);
        assert_eq!(summary.frames, 3);
        assert_eq!(recorder.frames(), ["", "G", "Go"]);
        assert!(handle.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn counts_completed_words() {
        let effect = TypingEffect::start(go_rust(), Recorder::new());

        // deletion pauses run at 45, 120, 165 and 240ms
        sleep(Duration::from_millis(250)).await;
        let summary = effect.stop_and_join().await.unwrap();
        assert_eq!(summary.words_completed, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delays_still_make_progress_and_stop() {
        let machine = TypingMachine::from_parts(["ab", "c"], 0, 0, 0, 0).unwrap();
        let slot = SharedText::new();
        let effect = TypingEffect::start(machine, slot.clone());

        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
        let summary = effect.stop_and_join().await.unwrap();
        assert!(summary.frames > 0);
        assert_eq!(slot.writes(), summary.frames);
    }

    #[tokio::test(start_paused = true)]
    async fn join_waits_without_stopping() {
        let slot = SharedText::new();
        let effect = TypingEffect::start(go_rust(), slot.clone());
        let handle = effect.stop_handle();
        let joined = tokio::spawn(effect.join());

        sleep(Duration::from_millis(62)).await;
        assert!(!handle.is_stopped());
        assert_eq!(slot.get(), "R");

        handle.stop();
        let summary = joined.await.unwrap().unwrap();
        assert_eq!(summary.reason, StopReason::Requested);
        assert_eq!(slot.get(), "R");
    }

    #[tokio::test(start_paused = true)]
    async fn abandoning_join_stops_the_effect() {
        let slot = SharedText::new();
        let effect = TypingEffect::start(go_rust(), slot.clone());
        let handle = effect.stop_handle();
        let joined = tokio::spawn(effect.join());

        sleep(Duration::from_millis(25)).await;
        joined.abort();
        assert!(joined.await.unwrap_err().is_cancelled());
        assert!(handle.is_stopped());

        let writes = slot.writes();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(slot.get(), "Go");
        assert_eq!(slot.writes(), writes);
    }

    #[tokio::test(start_paused = true)]
    async fn summary_serializes_for_reporting() {
        let effect = TypingEffect::start(go_rust(), Recorder::new());
        sleep(Duration::from_millis(50)).await;
        let summary = effect.stop_and_join().await.unwrap();

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["reason"], "requested");
        assert_eq!(json["frames"], 7);
        assert_eq!(json["wordsCompleted"], 1);
        assert!(json["steps"].as_u64().is_some());
    }
}

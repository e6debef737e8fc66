//! Timed traces: what the display shows, and when, without sleeping.

use crate::error::TypewriteError;
use crate::machine::{Phase, TypingMachine};
use serde::Serialize;
use std::time::Duration;

/// One emitted text with its offset from the start of the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceFrame {
    pub at_ms: u64,
    pub phase: Phase,
    pub word_index: usize,
    pub text: String,
}

/// Upper bound on the steps (or, for [`trace_frames`], frames) of one trace.
pub const MAX_TRACE_STEPS: u64 = 1_000_000;

/// Record the next `frames` emitted texts of `machine`.
pub fn trace_frames(
    machine: &mut TypingMachine,
    frames: usize,
) -> Result<Vec<TraceFrame>, TypewriteError> {
    if !u64::try_from(frames).is_ok_and(|n| n <= MAX_TRACE_STEPS) {
        return Err(TypewriteError::TraceTooLong {
            requested: format!("{frames} frames"),
            limit: MAX_TRACE_STEPS,
        });
    }
    let mut out = Vec::with_capacity(frames);
    let mut elapsed = Duration::ZERO;
    while out.len() < frames {
        record(machine, &mut elapsed, &mut out);
    }
    Ok(out)
}

/// Record `passes` full trips through the word list, pauses included.
pub fn trace_cycles(
    machine: &mut TypingMachine,
    passes: usize,
) -> Result<Vec<TraceFrame>, TypewriteError> {
    let steps = u64::try_from(passes)
        .ok()
        .and_then(|passes| machine.steps_per_pass().checked_mul(passes))
        .filter(|steps| *steps <= MAX_TRACE_STEPS)
        .ok_or_else(|| TypewriteError::TraceTooLong {
            requested: format!("{passes} passes"),
            limit: MAX_TRACE_STEPS,
        })?;
    let mut out = Vec::new();
    let mut elapsed = Duration::ZERO;
    for _ in 0..steps {
        record(machine, &mut elapsed, &mut out);
    }
    Ok(out)
}

fn record(machine: &mut TypingMachine, elapsed: &mut Duration, out: &mut Vec<TraceFrame>) {
    let step = machine.step();
    if let Some(text) = step.text {
        out.push(TraceFrame {
            at_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            phase: step.phase,
            word_index: step.word_index,
            text,
        });
    }
    *elapsed = elapsed.saturating_add(step.delay);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_rust() -> TypingMachine {
        TypingMachine::from_parts(["Go", "Rust"], 10, 5, 0, 0).unwrap()
    }

    fn render(frames: &[TraceFrame]) -> String {
        frames
            .iter()
            .map(|f| format!("{} {:?}", f.at_ms, f.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn one_pass_offsets_accumulate_configured_delays() {
        let frames = trace_cycles(&mut go_rust(), 1).unwrap();
        insta::assert_snapshot!(render(&frames), @r#"
        0 ""
        10 "G"
        20 "Go"
        30 "Go"
        35 "G"
        40 ""
        45 ""
        55 "R"
        65 "Ru"
        75 "Rus"
        85 "Rust"
        95 "Rust"
        100 "Rus"
        105 "Ru"
        110 "R"
        115 ""
        "#);
    }

    #[test]
    fn pauses_shift_offsets_without_emitting() {
        let mut m = TypingMachine::from_parts(["a"], 100, 50, 2000, 500).unwrap();
        let frames = trace_frames(&mut m, 5).unwrap();
        let offsets: Vec<u64> = frames.iter().map(|f| f.at_ms).collect();
        // "" "a" | hold 2000 | "a" "" | hold 500 | ""
        assert_eq!(offsets, [0, 100, 2200, 2250, 2800]);
    }

    #[test]
    fn two_passes_are_identical_in_text() {
        let frames = trace_cycles(&mut go_rust(), 2).unwrap();
        assert_eq!(frames.len(), 32);
        let (first, second) = frames.split_at(16);
        let first: Vec<&str> = first.iter().map(|f| f.text.as_str()).collect();
        let second: Vec<&str> = second.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(first, second);
        assert_eq!(frames[16].at_ms, 120);
    }

    #[test]
    fn frames_serialize_with_camel_case_keys() {
        let frames = trace_frames(&mut go_rust(), 2).unwrap();
        let json = serde_json::to_string(&frames[1]).unwrap();
        assert_eq!(
            json,
            r#"{"atMs":10,"phase":"typing","wordIndex":0,"text":"G"}"#
        );
    }

    #[test]
    fn oversized_traces_are_rejected_before_stepping() {
        let mut m = TypingMachine::from_parts(["a"], 1, 1, 0, 0).unwrap();

        let err = trace_cycles(&mut m, usize::MAX).unwrap_err();
        assert!(matches!(err, TypewriteError::TraceTooLong { .. }));
        let err = trace_frames(&mut m, usize::MAX).unwrap_err();
        assert!(matches!(err, TypewriteError::TraceTooLong { .. }));
        assert_eq!(m.steps_taken(), 0);
    }

    #[test]
    fn trace_at_the_step_limit_is_allowed() {
        // one pass of "a" is six steps
        let passes = (MAX_TRACE_STEPS / 6) as usize;
        let mut m = TypingMachine::from_parts(["a"], 0, 0, 0, 0).unwrap();
        let frames = trace_cycles(&mut m, passes).unwrap();
        assert_eq!(frames.len(), passes * 4);

        let err = trace_cycles(&mut m, passes + 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "requested trace is too long: {} passes exceeds the limit of 1000000",
                passes + 1
            )
        );
    }
}

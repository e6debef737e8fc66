use crate::cli::EffectArgs;
use crate::support::{build_machine_or_exit, millis, print_json, resolve_config_or_exit};
use serde_json::json;
use std::time::Duration;

pub fn run(effect: EffectArgs, json_output: bool) {
    let (config, source) = resolve_config_or_exit(&effect);
    let machine = build_machine_or_exit(&config);
    let timings = machine.timings();
    let pass = machine.pass_duration();
    let pass_ms = millis(pass);

    if json_output {
        print_json(&json!({
            "source": source.describe(),
            "valid": true,
            "words": machine.words(),
            "timings": {
                "typingMs": millis(timings.typing),
                "deletingMs": millis(timings.deleting),
                "pauseAfterTypedMs": millis(timings.pause_after_typed),
                "pauseAfterDeletedMs": millis(timings.pause_after_deleted),
            },
            "stepsPerPass": machine.steps_per_pass(),
            "passMs": pass_ms,
        }));
        return;
    }

    println!("typewrite check");
    println!("  Source: {}", source.describe());
    println!("  Words: {}", machine.words().len());
    for word in machine.words().iter() {
        println!("    - {word:?}");
    }
    println!(
        "  Timing: type {}ms, delete {}ms, hold typed {}ms, hold deleted {}ms",
        timings.typing.as_millis(),
        timings.deleting.as_millis(),
        timings.pause_after_typed.as_millis(),
        timings.pause_after_deleted.as_millis(),
    );
    println!("  Steps per pass: {}", machine.steps_per_pass());
    if pass == Duration::MAX {
        println!("  Pass duration: overflows (longer than {pass_ms}ms)");
    } else {
        println!("  Pass duration: {pass_ms}ms");
    }
}

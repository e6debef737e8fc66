use crate::cli::EffectArgs;
use crate::support::{build_machine_or_exit, print_json, resolve_config_or_exit};
use typewrite_core::{TraceFrame, trace_cycles, trace_frames};

pub struct Args {
    pub effect: EffectArgs,
    pub cycles: usize,
    pub frames: Option<usize>,
    pub json: bool,
}

pub fn run(args: Args) {
    let (config, _) = resolve_config_or_exit(&args.effect);
    let mut machine = build_machine_or_exit(&config);

    let frames = match args.frames {
        Some(count) => trace_frames(&mut machine, count),
        None => trace_cycles(&mut machine, args.cycles),
    }
    .unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if args.json {
        print_json(&frames);
    } else {
        for line in render_lines(&frames) {
            println!("{line}");
        }
    }
}

/// `<offset>ms <word>:<phase> "<text>"`, offset right-aligned.
pub fn render_lines(frames: &[TraceFrame]) -> Vec<String> {
    let width = frames
        .last()
        .map(|f| f.at_ms.to_string().len())
        .unwrap_or(1);
    frames
        .iter()
        .map(|f| {
            format!(
                "{:>width$}ms {}:{} {:?}",
                f.at_ms, f.word_index, f.phase, f.text
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use typewrite_core::TypingMachine;

    #[test]
    fn lines_are_aligned_and_quoted() {
        let mut machine = TypingMachine::from_parts(["Go", "Rust"], 10, 5, 0, 0).unwrap();
        let frames = trace_cycles(&mut machine, 1).unwrap();
        let lines = render_lines(&frames);
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "  0ms 0:typing \"\"");
        assert_eq!(lines[3], " 30ms 0:deleting \"Go\"");
        assert_eq!(lines[15], "115ms 1:deleting \"\"");
    }
}

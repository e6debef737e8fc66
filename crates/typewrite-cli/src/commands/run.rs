use crate::cli::EffectArgs;
use crate::support::{build_machine_or_exit, print_json, resolve_config_or_exit};
use std::io::{self, Write};
use std::process;
use std::time::Duration;
use tracing::info;
use typewrite_core::DisplayConfig;
use typewrite_runtime::{TerminalLine, TypingEffect};

pub struct Args {
    pub effect: EffectArgs,
    pub for_ms: Option<u64>,
    pub no_caret: bool,
    pub json: bool,
}

pub fn terminal_sink<W: Write>(
    out: W,
    display: &DisplayConfig,
    no_caret: bool,
) -> TerminalLine<W> {
    let caret = if no_caret {
        String::new()
    } else {
        display.caret.clone().unwrap_or_default()
    };
    TerminalLine::new(out)
        .with_prefix(display.prefix.clone().unwrap_or_default())
        .with_suffix(display.suffix.clone().unwrap_or_default())
        .with_caret(caret)
}

pub fn run(args: Args) {
    let (config, source) = resolve_config_or_exit(&args.effect);
    let machine = build_machine_or_exit(&config);
    let sink = terminal_sink(io::stdout(), &config.display, args.no_caret);
    info!(source = %source.describe(), "loaded typewrite config");

    // One cooperative thread is all the effect needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });

    runtime.block_on(async move {
        let effect = TypingEffect::start(machine, sink);
        let handle = effect.stop_handle();

        let limit = async {
            match args.for_ms {
                Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    eprintln!("error: failed to listen for ctrl-c: {e}");
                }
            }
            _ = limit => {}
        }
        handle.stop();

        match effect.join().await {
            Ok(summary) => {
                println!();
                if args.json {
                    print_json(&summary);
                }
                info!(
                    steps = summary.steps,
                    frames = summary.frames,
                    words_completed = summary.words_completed,
                    "typewrite run finished"
                );
            }
            Err(e) => {
                println!();
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    });
}

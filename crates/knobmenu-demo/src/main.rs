#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use knobmenu_demo::app::{DemoApp, Input};
use knobmenu_demo::cli::Opts;
use tracing_subscriber::EnvFilter;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env("KNOBMENU_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_frame(app: &mut DemoApp, out: &mut impl Write) -> io::Result<()> {
    let (pass, lines) = app.frame();
    let width = lines.first().map_or(0, |l| knobmenu_render::display_width(l));
    writeln!(out, "+{}+ {}/{}", "-".repeat(width), pass.active_index + 1, pass.level_len)?;
    for line in &lines {
        writeln!(out, "|{line}|")?;
    }
    writeln!(out, "+{}+", "-".repeat(width))?;
    out.flush()
}

fn run(opts: &Opts) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = DemoApp::new(opts)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(script) = &opts.script {
        app.run_script(script)?;
        print_frame(&mut app, &mut out)?;
        return Ok(());
    }

    print_frame(&mut app, &mut out)?;
    for line in io::stdin().lock().lines() {
        for input in line?.chars().filter_map(Input::from_symbol) {
            if !app.handle(input)? {
                return Ok(());
            }
            print_frame(&mut app, &mut out)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    init_logging(opts.log_json);

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "demo failed");
            ExitCode::FAILURE
        }
    }
}

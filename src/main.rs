/*!
 * Command-line interface for ctxpack
 */

use std::io;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use ctxpack::config::{Args, Config, CHAT_URL, OUTPUT_FILENAME, USER_PROMPT};
use ctxpack::report::{ReportFormat, Reporter, RunReport};
use ctxpack::scanner::Packer;
use ctxpack::writer::MarkdownWriter;
use ctxpack::{clipboard, launch};

fn main() {
    let args = Args::parse();

    // Shell completion generation short-circuits everything else
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    // Only an invalid root or a failed output write reaches here;
    // everything else is a per-file skip or a warning
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> ctxpack::Result<()> {
    let config = Config::from_args(args);
    config.validate()?;

    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        eprintln!("Warning: failed to set thread pool size: {e}");
    }

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)",
            )
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("Packing");
    progress.set_message(format!("Scanning project at {}", config.root.display()));

    let scan_rule = config.build_rules();
    let output_name = config
        .output_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from(OUTPUT_FILENAME));

    let packer = Packer::new(scan_rule, Arc::new(progress.clone())).exclude_output(output_name);
    let writer = MarkdownWriter::new(config.output_file.clone());

    let start_time = Instant::now();
    let (document, stats) = packer.pack(&config.root)?;
    progress.finish_and_clear();

    if document.is_empty() {
        println!("No matching files found to pack.");
        return Ok(());
    }

    writer.write(&document)?;
    let duration = start_time.elapsed();

    if config.clip {
        match clipboard::copy_to_clipboard(USER_PROMPT) {
            Ok(()) => println!("Instruction prompt copied to clipboard."),
            Err(e) => eprintln!("Warning: could not copy prompt to clipboard: {e}"),
        }
        // Mirror the prompt to a file for environments without a clipboard
        let prompt_path = config.prompt_file();
        if let Err(e) = std::fs::write(&prompt_path, USER_PROMPT) {
            eprintln!("Warning: could not write {}: {}", prompt_path.display(), e);
        }
    }

    if config.open {
        if let Err(e) = launch::open_url(CHAT_URL) {
            eprintln!("Warning: could not open browser: {e}");
        }
        if let Err(e) = launch::reveal(&config.output_file) {
            eprintln!("Warning: could not open file manager: {e}");
        }
    }

    let report = RunReport {
        output_file: config.output_file.display().to_string(),
        duration,
        stats,
    };
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}

mod cli;
mod tracing;

use clap::Parser;
use kira_stainscheme::engine::{LogObserver, StainingEngine};
use kira_stainscheme::report::json::render_schemes_json;
use kira_stainscheme::report::text::{render_antibody_list, render_schemes_text};
use kira_stainscheme::report::{RunSummary, write_reports};
use kira_stainscheme::scheme::SearchOutcome;

use crate::cli::{Cli, Command, OutputFormat, RunConfig};

fn main() {
    crate::tracing::init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(RunConfig::from(args)),
        Command::List(args) => list(&args.library),
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: RunConfig) -> Result<(), String> {
    let mut engine = StainingEngine::new(config.engine);
    engine.register(LogObserver);

    let library = engine
        .load_library_file(&config.library)
        .map_err(|e| format!("failed to import library {}: {e}", config.library.display()))?;

    let similarity = match &config.similarity {
        Some(path) => Some(
            engine
                .load_similarity_file(path)
                .map_err(|e| format!("failed to import similarity {}: {e}", path.display()))?,
        ),
        None => None,
    };

    let unknown_selections = apply_selection(&mut engine, &config);
    let SearchOutcome { schemes, truncated } = engine.generate();

    let rendered = match config.format {
        OutputFormat::Text => render_schemes_text(&schemes, config.limit),
        OutputFormat::Json => {
            let shown = config.limit.unwrap_or(schemes.len()).min(schemes.len());
            render_schemes_json(&schemes[..shown]).map_err(|e| e.to_string())?
        }
    };
    println!("{}", rendered.trim_end());

    if let Some(out_dir) = &config.out_dir {
        let summary = RunSummary::new(
            library,
            similarity,
            config.engine.score_policy,
            engine.catalog().selected_list(),
            unknown_selections,
        )
        .with_schemes(&schemes, truncated);
        write_reports(out_dir, &schemes, &summary).map_err(|e| e.to_string())?;
        ::tracing::info!(out = %out_dir.display(), "reports written");
    }

    Ok(())
}

/// Applies `--select-all` or the `--select` names; returns the names the library does not know.
fn apply_selection(engine: &mut StainingEngine, config: &RunConfig) -> Vec<String> {
    if config.select_all {
        engine.select_all();
        Vec::new()
    } else {
        engine.select_many(&config.select)
    }
}

fn list(library: &std::path::Path) -> Result<(), String> {
    let mut engine = StainingEngine::new(Default::default());
    engine.register(LogObserver);
    engine
        .load_library_file(library)
        .map_err(|e| format!("failed to import library {}: {e}", library.display()))?;
    print!("{}", render_antibody_list(&engine.catalog().available_list()));
    Ok(())
}

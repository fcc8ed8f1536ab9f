//! # Asset Minifier - Main Entry Point
//!
//! Questo è il punto di ingresso della command line.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti con `clap`
//! - Inizializzazione del logging con `tracing`
//! - Costruzione dei `Settings` e avvio della pipeline di compressione
//! - Codici di uscita: 0 su successo, non-zero su errore propagato
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (compressor, input, output, opzioni JSON)
//! 2. Mostra l'help se mancano i flag obbligatori
//! 3. Risolve i settings in un piano eseguibile
//! 4. Esegue il piano con spinner e statistiche (salvo `--silence`)
//!
//! ## Esempio di utilizzo:
//! ```bash
//! asset-minifier -c oxc -i "public/js/*.js" -o "dist/$1.min.js"
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::path::PathBuf;

use asset_minifier::progress::{CompressionStats, ProgressManager};
use asset_minifier::{
    compressors, Dispatcher, InputSpec, MinifiedOutput, PlanTask, Settings, SettingsResolver,
};

const COMPRESSOR_HELP: &str = "List of compressors:

  - esbuild
  - gcc
  - oxc
  - yui
";

#[derive(Parser)]
#[command(name = "asset-minifier")]
#[command(about = "Minify JS and CSS files through external compressors", version)]
#[command(after_help = COMPRESSOR_HELP)]
struct Args {
    /// Compressor to use
    #[arg(short, long)]
    compressor: Option<String>,

    /// Input file path, wildcards allowed (repeatable)
    #[arg(short, long)]
    input: Vec<String>,

    /// Output file path, $1 placeholder allowed
    #[arg(short, long)]
    output: Option<String>,

    /// Path prefix applied to relative inputs and outputs
    #[arg(short, long)]
    public_folder: Option<String>,

    /// Write each output next to its input
    #[arg(long)]
    in_place: bool,

    /// Process batch items sequentially
    #[arg(long)]
    sync: bool,

    /// No output will be printed
    #[arg(short, long)]
    silence: bool,

    /// Option for the compressor as JSON object
    #[arg(short = 'O', long = "option", default_value = "")]
    option: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Show help if missing mandatory flags
    if args.compressor.is_none() || args.input.is_empty() || args.output.is_none() {
        Args::command().print_help()?;
        std::process::exit(0);
    }

    let options: HashMap<String, serde_json::Value> = if args.option.is_empty() {
        HashMap::new()
    } else {
        serde_json::from_str(&args.option)
            .map_err(|err| anyhow::anyhow!("Invalid --option JSON: {}", err))?
    };

    let input = if args.input.len() == 1 {
        InputSpec::Single(args.input[0].clone())
    } else {
        InputSpec::Many(args.input.clone())
    };

    let settings = Settings {
        compressor: args.compressor.clone().expect("checked above"),
        input: Some(input),
        output: args.output.clone(),
        public_folder: args.public_folder.clone(),
        replace_in_place: args.in_place,
        sync: args.sync,
        options,
        ..Default::default()
    };

    let plan = SettingsResolver::resolve(&settings)?;
    let compressor = compressors::lookup(&plan.compressor)?;

    let spinner = (!args.silence).then(|| {
        ProgressManager::spinner(&format!("Compressing file(s) with {}...", plan.compressor))
    });

    let input_bytes = match &plan.task {
        PlanTask::Files { inputs, .. } => total_size(inputs).await,
        PlanTask::InMemory { .. } => 0,
    };

    let result = Dispatcher::new().execute(&plan, compressor).await;

    match result {
        Ok(MinifiedOutput::Files(written)) => {
            if let Some(spinner) = spinner {
                let stats = CompressionStats {
                    files_written: written.len(),
                    total_input_bytes: input_bytes,
                    total_output_bytes: total_size(&written).await,
                };
                spinner.finish(&format!("✅ {}", stats.format_summary()));
            }
            Ok(())
        }
        Ok(MinifiedOutput::Content(code)) => {
            if let Some(spinner) = spinner {
                spinner.clear();
            }
            println!("{}", code);
            Ok(())
        }
        Err(err) => {
            if let Some(spinner) = spinner {
                spinner.finish("❌ Compression failed");
            }
            Err(err.into())
        }
    }
}

async fn total_size(paths: &[PathBuf]) -> u64 {
    let mut total = 0;
    for path in paths {
        if let Ok(metadata) = tokio::fs::metadata(path).await {
            total += metadata.len();
        }
    }
    total
}

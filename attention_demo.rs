// attention_demo.rs
// Console walkthrough of one toy multi-head self-attention pass.
//
// Usage:
//   attention_demo [config.json] [--json <out.json>]
//
// Without a config file the default sentence and settings are used. Every
// intermediate matrix (embeddings, per-head attention weights, concatenated
// heads, projected output) is printed with token labels. With --json the
// full run, including Q/K/V and raw scores, is also written as JSON.

use attention_explorer::analysis::{row_entropy, strongest_links};
use attention_explorer::config::{load_config, validate_config, ExplorerConfig};
use attention_explorer::pipeline::{run, AttentionRun};
use attention_explorer::utils::Matrix;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;

// Column width used when printing matrix entries.
const CELL_WIDTH: usize = 8;
// Token labels longer than this are shortened in row headers.
const LABEL_WIDTH: usize = 10;

// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct DemoOptions {
    config_path: Option<String>,
    json_path: Option<String>,
}

// Scan arguments: an optional positional config path and an optional
// `--json <path>` pair.
fn options_from_args(args: &[String]) -> Result<DemoOptions, String> {
    let mut options = DemoOptions::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--json" {
            let path = iter
                .next()
                .ok_or_else(|| "--json requires an output path".to_string())?;
            options.json_path = Some(path.clone());
        } else if arg.starts_with("--") {
            return Err(format!("Unknown option {}", arg));
        } else if options.config_path.is_none() {
            options.config_path = Some(arg.clone());
        } else {
            return Err(format!("Unexpected argument {}", arg));
        }
    }
    Ok(options)
}

// Load the config file if one was given, else the defaults.
fn config_from_options(options: &DemoOptions) -> Result<ExplorerConfig, String> {
    let config = match &options.config_path {
        Some(path) => load_config(path)
            .map_err(|e| format!("Could not load config {}: {}", path, e))?,
        None => ExplorerConfig::default(),
    };
    validate_config(&config).map_err(|e| e.to_string())?;
    Ok(config)
}

fn short_label(token: &str) -> String {
    if token.chars().count() > LABEL_WIDTH {
        let head: String = token.chars().take(LABEL_WIDTH - 1).collect();
        format!("{}~", head)
    } else {
        token.to_string()
    }
}

// Render a matrix with one labelled row per token.
fn format_matrix(title: &str, tokens: &[String], matrix: &Matrix) -> String {
    let mut out = format!("{} ({}x{})\n", title, matrix.rows(), matrix.cols());
    for i in 0..matrix.rows() {
        let label = tokens.get(i).map(|t| short_label(t)).unwrap_or_default();
        out.push_str(&format!("  {:>width$} |", label, width = LABEL_WIDTH));
        for &value in matrix.row(i) {
            out.push_str(&format!("{:>width$.3}", value, width = CELL_WIDTH));
        }
        out.push('\n');
    }
    out
}

fn print_run(config: &ExplorerConfig, result: &AttentionRun) {
    println!("Configuration:");
    println!("  Text: {:?}", config.text);
    println!(
        "  Heads: {} (d_model={}), causal={}, positional={}, seed={}",
        config.heads,
        config.d_model(),
        config.causal,
        config.use_positional,
        config.seed
    );
    println!("  Tokens ({}): {:?}", result.seq_len(), result.tokens);
    println!();

    if result.seq_len() == 0 {
        println!("No tokens to attend over.");
        return;
    }

    print!("{}", format_matrix("Embeddings E", &result.tokens, &result.embeddings));
    if let Some(positional) = &result.positional {
        print!("{}", format_matrix("Positional encoding P", &result.tokens, positional));
    }
    println!();

    for (h, head) in result.heads.iter().enumerate() {
        print!(
            "{}",
            format_matrix(&format!("Head {} attention weights", h), &result.tokens, &head.weights)
        );
        let entropy = row_entropy(&head.weights);
        for (link, e) in strongest_links(head, &result.tokens).iter().zip(entropy) {
            println!(
                "  {} -> {} ({:.3}, entropy {:.3})",
                link.query_token, link.key_token, link.weight, e
            );
        }
        println!();
    }

    print!("{}", format_matrix("Concatenated heads", &result.tokens, &result.concat));
    print!("{}", format_matrix("Multi-head output", &result.tokens, &result.output));
}

fn write_json(path: &str, result: &AttentionRun) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = options_from_args(&args).unwrap_or_else(|e| {
        eprintln!("{}", e);
        eprintln!("Usage: attention_demo [config.json] [--json <out.json>]");
        process::exit(1);
    });
    let config = config_from_options(&options).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    println!("=== Toy Multi-Head Self-Attention ===");
    let start = Instant::now();
    let result = run(&config);
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    print_run(&config, &result);
    println!();
    println!("Computed in {:.3} ms", elapsed);

    if let Some(path) = &options.json_path {
        if let Err(e) = write_json(path, &result) {
            eprintln!("Failed writing {}: {}", path, e);
            process::exit(1);
        }
        println!("Full run saved to {}", path);
    }
}

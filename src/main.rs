mod debug_report;

use std::io::{self, BufRead, IsTerminal, Read, Write};
use tasador::{Dictionary, Error, Options, Product, extract_batch, extract_verbose_with};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging();

    let (options, dictionary) = match load_options(config.options_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config, &options, &dictionary) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig, options: &Options, dictionary: &Dictionary) -> tasador::Result<()> {
    match config.mode {
        Mode::Batch => run_batch(options, dictionary),
        Mode::Json | Mode::Report => {
            let input = match &config.input {
                Some(value) => value.clone(),
                None => read_stdin_input()?,
            };
            let title = input.trim();
            if title.is_empty() {
                eprintln!("error: no input provided\n\n{}", help_text());
                std::process::exit(2);
            }

            let mut product = Product::new(title);
            product.declared_category = config.category.clone();
            let res = extract_verbose_with(&product, dictionary, options);

            if config.mode == Mode::Json {
                println!("{}", serde_json::to_string_pretty(&res.extraction)?);
            } else {
                debug_report::print_run(&res, config.color);
            }
            Ok(())
        }
    }
}

/// One product object per stdin line in, one extraction object per line out.
fn run_batch(options: &Options, dictionary: &Dictionary) -> tasador::Result<()> {
    let mut products = Vec::new();
    for (idx, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let product: Product =
            serde_json::from_str(&line).map_err(|source| Error::Product { line: idx + 1, source })?;
        products.push(product);
    }
    tracing::info!(count = products.len(), "batch loaded");

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for extraction in extract_batch(&products, dictionary, options) {
        serde_json::to_writer(&mut out, &extraction)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

fn load_options(path: Option<&str>) -> tasador::Result<(Options, Dictionary)> {
    let options = match path {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let dictionary = Dictionary::from_options(&options)?;
    Ok((options, dictionary))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Report,
    Json,
    Batch,
}

struct CliConfig {
    input: Option<String>,
    category: Option<String>,
    options_path: Option<String>,
    mode: Mode,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut category: Option<String> = None;
    let mut options_path: Option<String> = None;
    let mut mode = Mode::Report;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("tasador {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => mode = Mode::Json,
            "--jsonl" => mode = Mode::Batch,
            "--category" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --category expects a value".to_string())?;
                category = Some(value);
            }
            "--config" => {
                let value = args.next().ok_or_else(|| "error: --config expects a path".to_string())?;
                options_path = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--category=") => {
                category = Some(arg.trim_start_matches("--category=").to_string());
            }
            _ if arg.starts_with("--config=") => {
                options_path = Some(arg.trim_start_matches("--config=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    if mode == Mode::Batch && (input.is_some() || category.is_some()) {
        return Err("error: --jsonl reads products from stdin; drop the title/--category arguments".to_string());
    }

    Ok(CliConfig { input, category, options_path, mode, color })
}

fn read_stdin_input() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "tasador {version}

Attribute extraction for jewelry catalog titles.

Usage:
  tasador [OPTIONS] [--] <title...>
  tasador [OPTIONS] --jsonl < products.jsonl

Options:
  -c, --category <name>      Declared product category (overrides title keywords).
  --config <path>            TOML options file (pair_policy, purity_policy,
                             extra_stones, record_conflicts).
  --json                     Print the extraction as JSON instead of a report.
  --jsonl                    Batch mode: one product JSON object per stdin line
                             ({{\"description\": ..., \"declared_category\": ...}}),
                             one extraction JSON object per output line.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=tasador=debug) to see
rule activation and resolution.

Exit codes:
  0  Success.
  1  Internal error (I/O, malformed batch input).
  2  Invalid arguments, configuration or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}

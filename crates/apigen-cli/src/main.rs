mod config;

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde_json::Value;

use apigen_core::{FileManifest, GenerateOptions, Language, parse};
use config::{ApigenConfig, CONFIG_FILE_NAME};

#[derive(Parser)]
#[command(name = "apigen", about = "Multi-language API client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate API clients from an API description
    Generate {
        /// Path to the API description (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Target language id (repeatable); defaults to the config file
        #[arg(short, long)]
        language: Vec<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name for the generated package
        #[arg(long)]
        package_name: Option<String>,

        /// Emit a test scaffold alongside the client
        #[arg(long)]
        include_tests: bool,

        /// Skip the generated README
        #[arg(long)]
        no_docs: bool,

        /// Write a zip archive at this path instead of a directory tree
        #[arg(long)]
        archive: Option<PathBuf>,
    },

    /// Validate an API description
    Validate {
        /// Path to the API description
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the parsed IR of an API description
    Inspect {
        /// Path to the API description
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// List supported target languages
    Languages,

    /// Initialize a new apigen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            language,
            output,
            package_name,
            include_tests,
            no_docs,
            archive,
        } => cmd_generate(
            input,
            language,
            output,
            package_name,
            include_tests,
            no_docs,
            archive,
        ),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Inspect { input, format } => cmd_inspect(&input, format),

        Commands::Languages => cmd_languages(),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apigen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApigenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Decode a spec file into a JSON-shaped mapping. The core never parses
/// text itself; YAML documents go through key stringification first since
/// YAML allows bare integer keys (status codes).
fn load_value(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display())),
        _ => {
            let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(&content)
                .with_context(|| format!("invalid YAML in {}", path.display()))?;
            Ok(yaml_to_json(yaml))
        }
    }
}

fn yaml_to_json(value: serde_yaml_ng::Value) -> Value {
    use serde_yaml_ng::Value as Yaml;
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                Value::from(n.as_f64().unwrap_or(0.0))
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml_ng::Value) -> String {
    match key {
        serde_yaml_ng::Value::String(s) => s,
        other => match yaml_to_json(other) {
            Value::String(s) => s,
            json => json.to_string(),
        },
    }
}

/// Validate, bail with the full error list on failure.
fn validated(raw: &Value) -> Result<()> {
    let errors = parse::validate(raw);
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        eprintln!("  {error}");
    }
    anyhow::bail!("invalid API description ({} problems)", errors.len());
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, manifest: &FileManifest) -> Result<()> {
    for (rel_path, content) in manifest.iter() {
        let path = base.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Package manifests into a single zip; each entry is (prefix, manifest).
fn write_archive(path: &Path, entries: &[(String, &FileManifest)]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create archive {}", path.display()))?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (prefix, manifest) in entries {
        for (rel_path, content) in manifest.iter() {
            let name = if prefix.is_empty() {
                rel_path.to_string()
            } else {
                format!("{prefix}/{rel_path}")
            };
            writer.start_file(name, options)?;
            writer.write_all(content.as_bytes())?;
        }
    }

    writer.finish()?;
    eprintln!("  wrote {}", path.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    input: Option<PathBuf>,
    languages: Vec<String>,
    output: Option<PathBuf>,
    package_name: Option<String>,
    include_tests: bool,
    no_docs: bool,
    archive: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();

    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let languages = if languages.is_empty() {
        cfg.languages.clone()
    } else {
        languages
    };

    let options = GenerateOptions {
        package_name: package_name.unwrap_or(cfg.package_name),
        include_tests: include_tests || cfg.include_tests,
        include_docs: !no_docs && cfg.include_docs,
    };

    let raw = load_value(&input)?;
    validated(&raw)?;
    let ir = parse::parse(&raw);

    let mut generated = Vec::new();
    for language in &languages {
        eprintln!("Generating {language} client");
        let manifest = apigen_generators::generate(language, &ir, &options)?;
        generated.push((language.clone(), manifest));
    }

    if let Some(archive_path) = archive {
        let entries: Vec<(String, &FileManifest)> = if generated.len() == 1 {
            vec![(String::new(), &generated[0].1)]
        } else {
            generated
                .iter()
                .map(|(language, manifest)| (language.clone(), manifest))
                .collect()
        };
        write_archive(&archive_path, &entries)?;
    } else {
        for (language, manifest) in &generated {
            let base = if generated.len() == 1 {
                output.clone()
            } else {
                output.join(language)
            };
            fs::create_dir_all(&base)
                .with_context(|| format!("failed to create output directory {}", base.display()))?;
            write_files(&base, manifest)?;
        }
    }

    let total: usize = generated.iter().map(|(_, manifest)| manifest.len()).sum();
    eprintln!(
        "Generated {total} files for {} language(s)",
        generated.len()
    );
    eprintln!("\nGenerated code should not be edited manually — changes will be overwritten.");
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let raw = load_value(input)?;
    validated(&raw)?;

    let ir = parse::parse(&raw);
    eprintln!("Valid API description: {}", ir.info.title);
    eprintln!("  Version: {}", ir.info.version);
    eprintln!("  Operations: {}", ir.operations.len());
    eprintln!("  Schemas: {}", ir.components.schemas.len());
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: &Path, format: InspectFormat) -> Result<()> {
    let raw = load_value(input)?;
    validated(&raw)?;
    let ir = parse::parse(&raw);

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{yaml}");
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &apigen_core::SpecDocument) -> Value {
    let operations: Vec<Value> = ir
        .operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "id": op.operation_id,
                "method": op.method.as_str(),
                "path": op.path,
                "tags": op.tags,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "servers": ir.servers.iter().map(|s| s.url.as_str()).collect::<Vec<_>>(),
        "operations": operations,
        "schemas": ir.components.schemas.keys().collect::<Vec<_>>(),
        "retry": ir.retry,
        "timeout": ir.timeout,
    })
}

fn cmd_languages() -> Result<()> {
    for lang in Language::ALL {
        println!("{:<12} {}", lang.id(), lang.display_name());
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

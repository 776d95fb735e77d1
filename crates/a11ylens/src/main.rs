use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use a11ylens_core::{ReportPlan, ResultDecorator, StaticTitle, UuidGenerator, run_report};
use a11ylens_domain::{MessageTemplate, Registries, compile_registries};
use a11ylens_types::{
    CardSelectionViewData, ConfigFile, ConversionMode, EngineScanResult, LinkConfig, RuleConfig,
};

mod config_loader;
mod env_expand;

use config_loader::{load_config_with_includes, merge_configs, read_config_file};
use env_expand::expand_env_vars;

const DEFAULT_CONFIG_FILE: &str = "a11ylens.toml";

#[derive(Parser)]
#[command(name = "a11ylens")]
#[command(about = "Accessibility scan result decoration and reporting", long_about = None)]
struct Cli {
    /// Path to a config file. If omitted, uses ./a11ylens.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable the built-in rule table; only use the config file.
    #[arg(long, global = true)]
    no_default_rules: bool,

    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decorate an engine result with configured messages, guidance and help URLs.
    Decorate(DecorateArgs),

    /// Convert an engine result to the unified rules/results export.
    Unify(UnifyArgs),

    /// Build the card view model for an engine result.
    Cards(CardsArgs),

    /// Print the effective configuration (built-in + optional config merge).
    Rules(RulesArgs),

    /// Show detailed information about a specific rule.
    Explain(ExplainArgs),

    /// Validate the configuration file (ids, guidance keys and message templates).
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Engine scan result JSON ('-' for stdin).
    #[arg(long, value_name = "PATH")]
    input: PathBuf,

    /// Title of the scanned page (defaults to config defaults, else empty).
    #[arg(long)]
    title: Option<String>,

    /// Write output here instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DecorateArgs {
    #[command(flatten)]
    io: InputArgs,
}

#[derive(Parser, Debug)]
struct UnifyArgs {
    #[command(flatten)]
    io: InputArgs,

    /// Convert violations and incomplete results for manual review.
    #[arg(long)]
    needs_review: bool,
}

#[derive(Parser, Debug)]
struct CardsArgs {
    #[command(flatten)]
    io: InputArgs,

    /// Convert violations and incomplete results for manual review.
    #[arg(long)]
    needs_review: bool,

    /// Card selection state JSON (selected uids, expanded rules, highlights).
    #[arg(long, value_name = "PATH")]
    selection: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RulesArgs {
    #[arg(long, value_enum, default_value_t = RulesFormat::Toml)]
    format: RulesFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RulesFormat {
    Toml,
    Json,
}

#[derive(Parser, Debug)]
struct ExplainArgs {
    /// The rule ID to explain (e.g., "image-alt").
    rule_id: String,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Also report rules that have no help text or checks.
    #[arg(long)]
    strict: bool,

    /// Output format for validation results.
    #[arg(long, value_enum, default_value_t = ValidateFormat::Text)]
    format: ValidateFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValidateFormat {
    Text,
    Json,
}

/// Options shared by every command that loads configuration.
struct ConfigSource {
    path: Option<PathBuf>,
    no_default_rules: bool,
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    let source = ConfigSource {
        path: cli.config,
        no_default_rules: cli.no_default_rules,
    };

    match cli.command {
        Commands::Decorate(args) => {
            cmd_decorate(&source, args)?;
            Ok(0)
        }
        Commands::Unify(args) => {
            cmd_unify(&source, args)?;
            Ok(0)
        }
        Commands::Cards(args) => {
            cmd_cards(&source, args)?;
            Ok(0)
        }
        Commands::Rules(args) => {
            cmd_rules(&source, args)?;
            Ok(0)
        }
        Commands::Explain(args) => {
            cmd_explain(&source, args)?;
            Ok(0)
        }
        Commands::Validate(args) => cmd_validate(&source, args),
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn cmd_decorate(source: &ConfigSource, args: DecorateArgs) -> Result<()> {
    let cfg = load_config(source)?;
    let registries = compile_registries(&cfg).context("compile configuration")?;

    let text = read_input(&args.io.input)?;
    let engine: EngineScanResult =
        serde_json::from_str(&text).context("parse engine scan result")?;

    let title = resolve_title(args.io.title, &cfg);
    let decorator = ResultDecorator::new(&registries, StaticTitle(title));
    let scan_results = decorator
        .decorate_results(Some(&engine))
        .context("decoration produced no results")?;

    info!(
        "decorated {} passes, {} violations, {} incomplete, {} inapplicable",
        scan_results.passes.len(),
        scan_results.violations.len(),
        scan_results.incomplete.len(),
        scan_results.inapplicable.len()
    );

    emit_json(args.io.out.as_deref(), &scan_results)
}

fn cmd_unify(source: &ConfigSource, args: UnifyArgs) -> Result<()> {
    let cfg = load_config(source)?;
    let plan = ReportPlan {
        mode: resolve_mode(args.needs_review, &cfg),
        title: resolve_title(args.io.title, &cfg),
        selection: None,
    };

    let text = read_input(&args.io.input)?;
    let run = run_report(&plan, &cfg, &text, UuidGenerator)?;

    emit_json(args.io.out.as_deref(), &run.unified)
}

fn cmd_cards(source: &ConfigSource, args: CardsArgs) -> Result<()> {
    let cfg = load_config(source)?;
    let selection = match &args.selection {
        Some(path) => Some(load_selection(path)?),
        None => None,
    };
    let plan = ReportPlan {
        mode: resolve_mode(args.needs_review, &cfg),
        title: resolve_title(args.io.title, &cfg),
        selection,
    };

    let text = read_input(&args.io.input)?;
    let run = run_report(&plan, &cfg, &text, UuidGenerator)?;

    emit_json(args.io.out.as_deref(), &run.cards)
}

fn cmd_rules(source: &ConfigSource, args: RulesArgs) -> Result<()> {
    let cfg = load_config(source)?;

    match args.format {
        RulesFormat::Toml => {
            let s = toml::to_string_pretty(&cfg).context("render toml")?;
            print!("{s}");
        }
        RulesFormat::Json => {
            let s = serde_json::to_string_pretty(&cfg).context("render json")?;
            println!("{s}");
        }
    }

    Ok(())
}

fn cmd_validate(source: &ConfigSource, args: ValidateArgs) -> Result<i32> {
    info!("Validating configuration file");

    let config_path = source.path.clone().or_else(|| {
        let p = PathBuf::from(DEFAULT_CONFIG_FILE);
        if p.exists() { Some(p) } else { None }
    });

    let Some(path) = config_path else {
        bail!("No configuration file found. Specify --config or create {DEFAULT_CONFIG_FILE}");
    };

    debug!("Loading config from: {}", path.display());

    let file = read_config_file(&path, expand_env_vars)?;
    let effective = load_config(&ConfigSource {
        path: Some(path.clone()),
        no_default_rules: source.no_default_rules,
    });

    // Without an effective config, links resolve against this file and the built-ins.
    let built_in = ConfigFile::built_in();
    let link_sources: Vec<&LinkConfig> = match &effective {
        Ok(cfg) => cfg.link.iter().collect(),
        Err(_) if source.no_default_rules => file.link.iter().collect(),
        Err(_) => built_in.link.iter().chain(&file.link).collect(),
    };
    let known_links: HashSet<&str> = link_sources.iter().map(|l| l.id.as_str()).collect();
    let (mut errors, warnings) = check_config_structure(&file, &known_links, args.strict);

    // Structural problems would only resurface as the first load or compile error.
    if errors.is_empty() {
        match &effective {
            Ok(cfg) => {
                if let Err(e) = compile_registries(cfg) {
                    errors.push(format!("Configuration compile error: {e}"));
                }
            }
            Err(e) => errors.push(format!("Configuration load error: {e:#}")),
        }
    }

    match args.format {
        ValidateFormat::Json => {
            let result = serde_json::json!({
                "valid": errors.is_empty(),
                "path": path.display().to_string(),
                "rules_count": file.rule.len(),
                "links_count": file.link.len(),
                "errors": errors,
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        ValidateFormat::Text => {
            println!("Validating {}...", path.display());
            println!();

            if !warnings.is_empty() {
                println!("Warnings ({}):", warnings.len());
                for (i, warn) in warnings.iter().enumerate() {
                    println!("  {}. {}", i + 1, warn);
                }
                println!();
            }

            if errors.is_empty() {
                println!("Configuration is valid!");
                println!("  {} rule(s) defined", file.rule.len());
                println!("  {} guidance link(s) defined", file.link.len());
            } else {
                println!("Configuration has {} error(s):", errors.len());
                println!();
                for (i, err) in errors.iter().enumerate() {
                    println!("  {}. {}", i + 1, err);
                }
            }
        }
    }

    if errors.is_empty() { Ok(0) } else { Ok(1) }
}

/// Collect every structural problem in one config file, rather than
/// stopping at the first like `compile_registries` does.
fn check_config_structure(
    cfg: &ConfigFile,
    known_links: &HashSet<&str>,
    strict: bool,
) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut seen_links = HashSet::new();
    for link in &cfg.link {
        if !seen_links.insert(link.id.as_str()) {
            errors.push(format!("Link '{}': duplicate link ID", link.id));
        }
    }

    let mut seen_rules = HashSet::new();
    for rule in &cfg.rule {
        debug!("Validating rule: {}", rule.id);

        if !seen_rules.insert(rule.id.as_str()) {
            errors.push(format!("Rule '{}': duplicate rule ID", rule.id));
        }

        for key in &rule.guidance {
            if !known_links.contains(key.as_str()) {
                errors.push(format!(
                    "Rule '{}': unknown guidance link '{}'",
                    rule.id, key
                ));
            }
        }

        let mut seen_checks = HashSet::new();
        for check in &rule.checks {
            if !seen_checks.insert(check.id.as_str()) {
                errors.push(format!(
                    "Rule '{}': duplicate check ID '{}'",
                    rule.id, check.id
                ));
            }
            let templates = [
                ("pass_message", &check.pass_message),
                ("fail_message", &check.fail_message),
            ];
            for (field, template) in templates {
                if let Some(text) = template {
                    if let Err(e) = MessageTemplate::parse(text) {
                        errors.push(format!(
                            "Rule '{}': check '{}' has invalid {} '{}': {}",
                            rule.id, check.id, field, text, e
                        ));
                    }
                }
            }
        }

        if strict {
            if rule.help.is_none() {
                warnings.push(format!("Rule '{}': no help text provided", rule.id));
            }
            if rule.checks.is_empty() {
                warnings.push(format!(
                    "Rule '{}': no checks defined (engine messages are used as-is)",
                    rule.id
                ));
            }
        }
    }

    (errors, warnings)
}

fn cmd_explain(source: &ConfigSource, args: ExplainArgs) -> Result<()> {
    let cfg = load_config(source)?;
    let registries = compile_registries(&cfg).context("compile configuration")?;

    match cfg.rule.iter().find(|r| r.id == args.rule_id) {
        Some(r) => {
            print!("{}", format_rule_explanation(r, &registries));
            Ok(())
        }
        None => {
            let suggestions = find_similar_rules(&args.rule_id, &cfg.rule);
            let mut msg = format!("Rule '{}' not found.", args.rule_id);

            if !suggestions.is_empty() {
                msg.push_str("\n\nDid you mean one of these?\n");
                for s in &suggestions {
                    msg.push_str(&format!("  - {}\n", s));
                }
            }

            msg.push_str("\nUse 'a11ylens rules' to list all configured rules.");

            bail!("{}", msg);
        }
    }
}

/// Format rule explanation for display.
fn format_rule_explanation(rule: &RuleConfig, registries: &Registries) -> String {
    let mut out = String::new();

    out.push_str(&format!("Rule: {}\n", rule.id));
    if let Some(description) = &rule.description {
        out.push_str(&format!("Description: {}\n", description));
    }
    if let Some(help) = &rule.help {
        out.push_str(&format!("Help: {}\n", help));
    }

    out.push_str("\nDecoration:\n");
    out.push_str(&format!(
        "  - Help URL: {}\n",
        rule.help_url.as_deref().unwrap_or("(engine provided)")
    ));
    out.push_str(&format!(
        "  - How to check: {}\n",
        if rule.how_to_check { "yes" } else { "no" }
    ));
    if let Some(decorator) = rule.decorate_node {
        out.push_str(&format!("  - Node decorator: {}\n", decorator.as_str()));
    }

    if !rule.checks.is_empty() {
        out.push_str("\nChecks:\n");
        for check in &rule.checks {
            out.push_str(&format!("  - {}\n", check.id));
            out.push_str(&format!(
                "      pass: {}\n",
                check.pass_message.as_deref().unwrap_or("(engine message)")
            ));
            out.push_str(&format!(
                "      fail: {}\n",
                check.fail_message.as_deref().unwrap_or("(engine message)")
            ));
        }
    }

    if let Some(links) = registries.guidance.links_for(&rule.id) {
        out.push_str("\nGuidance:\n");
        for link in links {
            if link.is_best_practice() {
                out.push_str(&format!("  - {}\n", link.text));
                continue;
            }
            let tags = link
                .tags
                .iter()
                .flatten()
                .map(|t| t.display_text.as_str())
                .collect::<Vec<_>>();
            if tags.is_empty() {
                out.push_str(&format!("  - {} <{}>\n", link.text, link.href));
            } else {
                out.push_str(&format!(
                    "  - {} <{}> [{}]\n",
                    link.text,
                    link.href,
                    tags.join(", ")
                ));
            }
        }
    }

    out
}

/// How a configured rule id relates to an unknown one. Closer variants sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Closeness {
    Prefix,
    Substring,
    Typo(usize),
}

impl Closeness {
    const MAX_TYPOS: usize = 3;

    /// Both ids are expected lowercased.
    fn between(wanted: &str, candidate: &str) -> Option<Self> {
        let (short, long) = if wanted.len() <= candidate.len() {
            (wanted, candidate)
        } else {
            (candidate, wanted)
        };
        if long.starts_with(short) {
            Some(Self::Prefix)
        } else if long.contains(short) {
            Some(Self::Substring)
        } else {
            let edits = levenshtein(wanted, candidate);
            (edits <= Self::MAX_TYPOS).then_some(Self::Typo(edits))
        }
    }
}

/// Up to five configured rule ids close to `wanted`, closest first.
/// Equally close ids keep their configured order.
fn find_similar_rules(wanted: &str, rules: &[RuleConfig]) -> Vec<String> {
    const MAX_SUGGESTIONS: usize = 5;

    let wanted = wanted.to_lowercase();
    let mut ranked: Vec<(Closeness, &str)> = rules
        .iter()
        .filter_map(|rule| {
            let closeness = Closeness::between(&wanted, &rule.id.to_lowercase())?;
            Some((closeness, rule.id.as_str()))
        })
        .collect();
    ranked.sort_by_key(|(closeness, _)| *closeness);

    ranked
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, id)| id.to_string())
        .collect()
}

/// Single-character inserts, deletes and substitutions turning `a` into `b`.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    // row[j] holds the distance from the part of `a` seen so far to b[..j].
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = diag + usize::from(ca != *cb);
            diag = row[j + 1];
            row[j + 1] = substitute.min(diag + 1).min(row[j] + 1);
        }
    }

    row[b.len()]
}

fn resolve_title(arg: Option<String>, cfg: &ConfigFile) -> String {
    arg.or_else(|| cfg.defaults.title.clone())
        .unwrap_or_default()
}

fn resolve_mode(needs_review: bool, cfg: &ConfigFile) -> ConversionMode {
    if needs_review {
        ConversionMode::NeedsReview
    } else {
        cfg.defaults.mode.unwrap_or_default()
    }
}

fn load_config(source: &ConfigSource) -> Result<ConfigFile> {
    let user_path = source.path.clone().or_else(|| {
        let p = PathBuf::from(DEFAULT_CONFIG_FILE);
        if p.exists() { Some(p) } else { None }
    });

    let Some(path) = user_path else {
        debug!("No config file found, using built-in rules");
        return Ok(ConfigFile::built_in());
    };

    info!("Loading config from: {}", path.display());

    let parsed = load_config_with_includes(&path, expand_env_vars)?;

    debug!(
        "Loaded {} rule(s) and {} link(s) from config",
        parsed.rule.len(),
        parsed.link.len()
    );

    if source.no_default_rules {
        return Ok(parsed);
    }

    Ok(merge_configs(ConfigFile::built_in(), parsed))
}

fn load_selection(path: &Path) -> Result<CardSelectionViewData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read selection {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse selection {}", path.display()))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read engine scan result from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("read input {}", path.display()))
}

fn emit_json(out: Option<&Path>, value: &impl serde::Serialize) -> Result<()> {
    match out {
        Some(path) => {
            write_json(path, value)?;
            info!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            let s = serde_json::to_string_pretty(value).context("serialize output")?;
            println!("{s}");
            Ok(())
        }
    }
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }

    let bytes = serde_json::to_vec_pretty(value).context("serialize output")?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

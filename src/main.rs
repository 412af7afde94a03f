use anyhow::{bail, Context};
use csscomp::completion::{CompletionEngine, CssCompleter};
use csscomp::logging::{LogLevel, Logger};
use csscomp::{CompError, CompletionConfig};
use std::path::PathBuf;

const USAGE: &str = "usage: csscomp [--config FILE] [--keywords FILE] [--max N] [--no-aliases] \
[--count] [--log-level LEVEL] (--context TEXT | PREFIX [VALUE_PREFIX])";

fn main() {
    if let Err(error) = run() {
        match error.downcast_ref::<CompError>() {
            Some(comp_error) => {
                let (message, level) = comp_error.user_message();
                eprintln!("{:?}: {}", level, message);
            }
            None => eprintln!("error: {:#}", error),
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;
    let query = options.query()?;

    let mut config = match &options.config {
        Some(path) => CompletionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CompletionConfig::load_default()?,
    };
    options.apply(&mut config);
    config.validate()?;

    if Logger::new(config.log_level).init().is_err() {
        eprintln!("warning: logger already initialised");
    }

    let completer = config.build_completer()?;
    let items = run_query(&query, &completer)?;
    print!("{}", render(&items, options.count_only));
    Ok(())
}

/// 問い合わせの種類
#[derive(Debug, PartialEq)]
enum Query<'a> {
    Context(&'a str),
    Properties(&'a str),
    Values(&'a str, &'a str),
}

/// 問い合わせを実行。自動補完が無効なら常に候補なし
fn run_query(query: &Query<'_>, completer: &CssCompleter) -> anyhow::Result<Vec<String>> {
    if !completer.is_enabled() {
        log::info!("Autocompletion disabled; {:?} yields no items", query);
        return Ok(Vec::new());
    }

    let matcher = completer.matcher();
    let items = match *query {
        Query::Context(text) => completer.complete(text)?,
        Query::Properties(prefix) => owned(matcher.suggest_properties(prefix)),
        Query::Values(property, prefix) => owned(matcher.suggest_values(property, prefix)?),
    };
    Ok(items)
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

fn render(items: &[String], count_only: bool) -> String {
    if count_only {
        return format!("{}\n", items.len());
    }
    items.iter().map(|item| format!("{}\n", item)).collect()
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    keywords: Option<PathBuf>,
    max_suggestions: Option<usize>,
    no_aliases: bool,
    count_only: bool,
    log_level: Option<LogLevel>,
    context: Option<String>,
    positional: Vec<String>,
}

impl CliOptions {
    /// コマンドライン指定で設定を上書き
    fn apply(&self, config: &mut CompletionConfig) {
        if let Some(path) = &self.keywords {
            config.keywords = Some(path.clone());
        }
        if let Some(max) = self.max_suggestions {
            config.max_suggestions = max;
        }
        if self.no_aliases {
            config.include_aliases = false;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }

    fn query(&self) -> anyhow::Result<Query<'_>> {
        match (self.context.as_deref(), self.positional.as_slice()) {
            (Some(text), []) => Ok(Query::Context(text)),
            (None, [prefix]) => Ok(Query::Properties(prefix)),
            (None, [property, prefix]) => Ok(Query::Values(property, prefix)),
            _ => bail!(USAGE),
        }
    }
}

fn parse_args(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--keywords" => options.keywords = Some(PathBuf::from(value("--keywords")?)),
            "--max" => {
                let raw = value("--max")?;
                let max = raw
                    .parse()
                    .with_context(|| format!("--max expects a number, got {}", raw))?;
                options.max_suggestions = Some(max);
            }
            "--log-level" => options.log_level = Some(value("--log-level")?.parse()?),
            "--context" => options.context = Some(value("--context")?),
            "--no-aliases" => options.no_aliases = true,
            "--count" => options.count_only = true,
            "-h" | "--help" => bail!(USAGE),
            _ => options.positional.push(arg.clone()),
        }
    }

    Ok(options)
}

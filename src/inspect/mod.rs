pub(crate) mod logger;

use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, warn};
use regex_lite::Regex;

use strings_rs::{IoError, Localization, Record};

#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliOptions {
    pub(crate) csv: bool,
    pub(crate) files: Vec<PathBuf>,
    pub(crate) key_pattern: Option<String>,
    pub(crate) strict: bool,
    pub(crate) verbose: bool,
    pub(crate) version: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RuntimeError {
    #[error("{0}: {1}")]
    Io(String, #[source] io::Error),
    #[error("{0}: {1}")]
    Load(String, #[source] IoError),
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("invalid key pattern: {0}")]
    Pattern(#[from] regex_lite::Error),
}

pub(crate) fn help() {
    println!(
        "Usage:
strings-rs --version
strings-rs [-v|--verbose] [--csv] [--strict] [--match REGEX] FILE..."
    );
}

pub(crate) fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut cfg = CliOptions::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match &arg[..] {
            "--csv" => cfg.csv = true,
            "--match" => match args.next() {
                Some(pattern) => cfg.key_pattern = Some(pattern),
                None => return Err("Missing pattern after --match".into()),
            },
            "--strict" => cfg.strict = true,
            "--verbose" | "-v" => cfg.verbose = true,
            "--version" => cfg.version = true,
            _ if arg.starts_with('-') => return Err(format!("Unknown argument: {arg}")),
            _ => cfg.files.push(arg.into()),
        }
    }

    if cfg.files.is_empty() && !cfg.version {
        return Err("Missing input files".into());
    }

    Ok(cfg)
}

pub(crate) fn run<W: Write>(cfg: &CliOptions, out: &mut W) -> Result<(), RuntimeError> {
    let key_filter = cfg.key_pattern.as_deref().map(Regex::new).transpose()?;

    let mut localizations = Vec::with_capacity(cfg.files.len());
    for path in &cfg.files {
        let localization = if cfg.strict {
            Localization::load_from_path(path)
                .map_err(|e| RuntimeError::Load(format!("error loading {path:?}"), e))?
        } else {
            match Localization::load_from_path_lenient(path) {
                Ok(localization) => localization,
                Err(e) => {
                    warn!("Error loading {path:?}, ignoring: {e}");
                    continue;
                }
            }
        };
        debug!("{path:?}: {} entries", localization.len());
        localizations.push(localization);
    }

    let selected = |record: &Record| {
        key_filter
            .as_ref()
            .map_or(true, |filter| filter.is_match(&record.key))
    };

    if cfg.csv {
        write_csv(&localizations, selected, out)
    } else {
        write_text(&localizations, selected, out)
            .map_err(|e| RuntimeError::Io("error writing output".into(), e))
    }
}

fn write_text<W, F>(localizations: &[Localization], selected: F, out: &mut W) -> io::Result<()>
where
    W: Write,
    F: Fn(&Record) -> bool,
{
    for localization in localizations {
        match localization.path() {
            Some(path) => writeln!(out, "{} ({}):", path.display(), localization.language())?,
            None => writeln!(out, "({}):", localization.language())?,
        }
        for record in localization.records().filter(|&r| selected(r)) {
            writeln!(out, "  {record}")?;
        }
    }

    Ok(())
}

fn write_csv<W, F>(localizations: &[Localization], selected: F, out: &mut W) -> Result<(), RuntimeError>
where
    W: Write,
    F: Fn(&Record) -> bool,
{
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["language", "key", "value", "message"])?;

    for localization in localizations {
        for record in localization.records().filter(|&r| selected(r)) {
            writer.write_record([
                localization.language(),
                record.key.as_str(),
                record.value.as_str(),
                record.message.as_deref().unwrap_or_default(),
            ])?;
        }
    }

    writer
        .flush()
        .map_err(|e| RuntimeError::Io("error writing output".into(), e))
}

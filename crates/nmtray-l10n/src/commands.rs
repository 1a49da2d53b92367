//! Subcommand implementations.
//!
//! Every command writes its result to the given writer and reports through
//! the returned flag whether the run counts as a success for the exit code.

use crate::cli::Command;
use crate::error::L10nResult;
use nmtray_config::Settings;
use nmtray_i18n::{
    check, has_errors, placeholder, Catalog, LoadOptions, Severity, Translator, TsDocument,
};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Run one subcommand.
pub fn run(command: &Command, settings: &Settings, out: &mut dyn Write) -> L10nResult<bool> {
    match command {
        Command::Stats {
            file,
            no_unfinished,
            remove_identical,
            json,
        } => {
            let options = LoadOptions {
                include_unfinished: !no_unfinished,
                remove_identical: *remove_identical,
            };
            stats(file, &options, *json, out)
        }
        Command::Lookup {
            file,
            context,
            source,
            comment,
            count,
            args,
        } => {
            let translator = match file {
                Some(file) => Translator::from_catalog(Catalog::from_path(
                    file,
                    &LoadOptions::from(&settings.i18n),
                )?),
                None => Translator::try_load(&settings.i18n)?,
            };
            let text = lookup(&translator, context, source, comment.as_deref(), *count, args);
            writeln!(out, "{text}")?;
            Ok(true)
        }
        Command::Check { file, json, quiet } => run_check(file, *json, *quiet, out),
        Command::Dump {
            file,
            context,
            json,
        } => dump(file, context.as_deref(), *json, out),
        Command::Fmt {
            file,
            output,
            check,
        } => format_file(file, output.as_deref(), *check, out),
    }
}

fn stats(file: &Path, options: &LoadOptions, json: bool, out: &mut dyn Write) -> L10nResult<bool> {
    let catalog = Catalog::from_path(file, options)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, catalog.stats())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", catalog.stats())?;
    }
    Ok(true)
}

/// Translate, pick the numerus form and fill in placeholders.
pub fn lookup(
    translator: &Translator,
    context: &str,
    source: &str,
    comment: Option<&str>,
    count: Option<i64>,
    args: &[String],
) -> String {
    let text = match count {
        Some(n) => translator.translate_plural(context, source, comment, n),
        None => translator.translate(context, source, comment).to_string(),
    };

    if args.is_empty() {
        text
    } else {
        placeholder::args(&text, args)
    }
}

fn run_check(file: &Path, json: bool, quiet: bool, out: &mut dyn Write) -> L10nResult<bool> {
    let document = TsDocument::from_path(file)?;
    let findings: Vec<_> = check(&document)
        .into_iter()
        .filter(|f| !quiet || f.severity > Severity::Info)
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &findings)?;
        writeln!(out)?;
    } else {
        for finding in &findings {
            writeln!(out, "{finding}")?;
        }
    }

    let failed = has_errors(&findings);
    if failed {
        warn!("{} has inconsistent messages", file.display());
    } else {
        info!("{}: {} finding(s), no errors", file.display(), findings.len());
    }
    Ok(!failed)
}

fn dump(file: &Path, context: Option<&str>, json: bool, out: &mut dyn Write) -> L10nResult<bool> {
    let mut document = TsDocument::from_path(file)?;
    if let Some(name) = context {
        document.contexts.retain(|c| c.name == name);
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out)?;
        return Ok(true);
    }

    for message in document.messages() {
        let translation = &message.translation;
        let text = if message.numerus {
            format!("{:?}", translation.forms)
        } else {
            format!("{:?}", translation.text())
        };
        write!(out, "{} => {text}", message.key())?;
        if let Some(kind) = translation.kind.as_attr() {
            write!(out, " [{kind}]")?;
        }
        writeln!(out)?;
    }
    Ok(true)
}

fn format_file(
    file: &Path,
    output: Option<&Path>,
    check_only: bool,
    out: &mut dyn Write,
) -> L10nResult<bool> {
    let original = std::fs::read_to_string(file)?;
    let formatted = TsDocument::parse(&original)?.to_xml();

    if check_only {
        let unchanged = formatted == original;
        if unchanged {
            debug!("{} is formatted", file.display());
        } else {
            writeln!(out, "{} is not formatted", file.display())?;
        }
        return Ok(unchanged);
    }

    match output {
        Some(path) => {
            std::fs::write(path, formatted)?;
            info!("Wrote {}", path.display());
        }
        None => out.write_all(formatted.as_bytes())?,
    }
    Ok(true)
}

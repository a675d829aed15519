// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dotproject::{
    config::{CodecConfig, LineSeparator},
    path::default_config_path,
    ProjectDescription, ProjectDescriptionReader, ProjectDescriptionWriter,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::{
    fmt::Write as _,
    fs::File,
    io::{stdout, BufReader, BufWriter},
    path::{Path, PathBuf},
    process::exit,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "dotproject [options] <dotproject-command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = match self.config {
            Some(path) => CodecConfig::load(path)?,
            None => CodecConfig::load(default_config_path()?)?,
        };

        match self.command {
            Command::Check(opts) => run_check(opts, &config),
            Command::Show(opts) => run_show(opts),
            Command::Format(opts) => run_format(opts, &config),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Check project description files for problems.
    #[command(override_usage = "dotproject check [options] <file>...")]
    Check(CheckOptions),

    /// Show summary of project description.
    #[command(override_usage = "dotproject show [options] <file>")]
    Show(ShowOptions),

    /// Rewrite project description in canonical layout.
    #[command(override_usage = "dotproject format [options] <file>")]
    Format(FormatOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct CheckOptions {
    /// Project description files to check.
    #[arg(required = true, value_name = "file")]
    pub files: Vec<PathBuf>,

    /// Fail on any recorded read problem.
    #[arg(short, long)]
    pub strict: bool,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct ShowOptions {
    /// Project description file to show.
    #[arg(required = true, value_name = "file")]
    pub file: PathBuf,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct FormatOptions {
    /// Project description file to format.
    #[arg(required = true, value_name = "file")]
    pub file: PathBuf,

    /// Write result to file instead of standard output.
    #[arg(short, long, value_name = "path")]
    pub output: Option<PathBuf>,

    /// Line separator to use: lf, crlf, or native.
    #[arg(short, long, value_name = "separator")]
    pub line_separator: Option<LineSeparator>,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}

fn read_file(
    reader: &mut ProjectDescriptionReader,
    path: &Path,
) -> Result<Option<ProjectDescription>> {
    let file = File::open(path).with_context(|| format!("cannot open {:?}", path.display()))?;
    reader
        .read(BufReader::new(file))
        .with_context(|| format!("cannot read {:?}", path.display()))
}

fn run_check(opts: CheckOptions, config: &CodecConfig) -> Result<()> {
    let strict = opts.strict || config.reader.strict;
    let mut reader = ProjectDescriptionReader::new();
    let mut failures = 0usize;

    for path in &opts.files {
        let Some(_) = read_file(&mut reader, path)? else {
            error!("{:?} is not a project description", path.display());
            failures += 1;
            continue;
        };

        for problem in reader.problems() {
            warn!("{}: {problem}", path.display());
        }

        if strict && !reader.problems().is_empty() {
            failures += 1;
        } else {
            info!("{:?} ok", path.display());
        }
    }

    if failures > 0 {
        bail!("{failures} of {} file(s) failed check", opts.files.len());
    }

    Ok(())
}

fn run_show(opts: ShowOptions) -> Result<()> {
    let mut reader = ProjectDescriptionReader::new();
    let Some(description) = read_file(&mut reader, &opts.file)? else {
        bail!("{:?} is not a project description", opts.file.display());
    };

    print!("{}", summary(&description)?);

    Ok(())
}

fn run_format(opts: FormatOptions, config: &CodecConfig) -> Result<()> {
    let mut reader = ProjectDescriptionReader::new();
    let Some(description) = read_file(&mut reader, &opts.file)? else {
        bail!("{:?} is not a project description", opts.file.display());
    };

    let separator = opts
        .line_separator
        .unwrap_or(config.writer.line_separator);
    let writer = ProjectDescriptionWriter::new(separator.as_str());

    match opts.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot create {:?}", path.display()))?;
            writer.write(&description, BufWriter::new(file))?;
            info!("formatted {:?} into {:?}", opts.file.display(), path.display());
        }
        None => writer.write(&description, stdout().lock())?,
    }

    Ok(())
}

fn summary(description: &ProjectDescription) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "name: {}", description.name.as_deref().unwrap_or("<none>"))?;
    if !description.comment.is_empty() {
        writeln!(out, "comment: {}", description.comment)?;
    }

    if !description.referenced_projects.is_empty() {
        writeln!(out, "projects:")?;
        for project in &description.referenced_projects {
            writeln!(out, "  {project}")?;
        }
    }

    if !description.build_spec.is_empty() {
        writeln!(out, "builders:")?;
        for command in &description.build_spec {
            writeln!(out, "  {}", command.builder_name)?;
            for (key, value) in &command.arguments {
                writeln!(out, "    {key} = {}", value.as_deref().unwrap_or_default())?;
            }
        }
    }

    if !description.nature_ids.is_empty() {
        writeln!(out, "natures:")?;
        for nature in &description.nature_ids {
            writeln!(out, "  {nature}")?;
        }
    }

    if description.has_links() {
        writeln!(out, "links:")?;
        for link in description.links() {
            let kind = link
                .resource_type
                .map_or_else(|| "unknown".to_owned(), |kind| kind.to_string());
            writeln!(out, "  {} ({kind}) -> {}", link.path, link.location)?;
        }
    }

    if !description.filters.is_empty() {
        writeln!(out, "filters:")?;
        for filter in &description.filters {
            let matcher = filter
                .matcher
                .as_ref()
                .map(|matcher| format!("{} {}", matcher.id, matcher.arguments))
                .unwrap_or_default();
            writeln!(out, "  [{}] {:?} type {} {matcher}", filter.id, filter.name, filter.filter_type)?;
        }
    }

    Ok(out)
}

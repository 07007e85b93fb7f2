// ABOUTME: CLI binary for prdscribe: cleans PRD markup and extracts Gherkin steps.
// ABOUTME: Reads files or stdin, writes results to stdout or a file, and logs diagnostics to stderr.

mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use prdscribe_gherkin::{
    extract_steps, normalize_generated, summarize, StepKeyword, Submission, TestCaseRequest,
    TestScriptRequest,
};
use prdscribe_markup::{Cleaned, Cleaner, ProseStyle, DEFAULT_VERBATIM_TAG};
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "prdscribe")]
#[command(about = "Clean wiki PRD markup and extract Gherkin test steps", long_about = None)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    #[value(alias = "txt")]
    Text,
    #[value(alias = "md")]
    Markdown,
}

impl From<StyleArg> for ProseStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Text => ProseStyle::Text,
            StyleArg::Markdown => ProseStyle::Markdown,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert storage-format markup into clean text
    Clean {
        /// Markup file to read; "-" or omitted reads stdin
        input: Option<PathBuf>,

        /// Prose style for the text outside verbatim blocks
        #[arg(short = 's', long = "style", value_enum, default_value_t = StyleArg::Text)]
        style: StyleArg,

        /// Tag whose content is copied verbatim
        #[arg(long = "verbatim-tag", default_value = DEFAULT_VERBATIM_TAG)]
        verbatim_tag: String,

        /// Output file path (default: stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Keep only the Given/When/Then/And lines of generated Gherkin
    Steps {
        /// Gherkin file to read; "-" or omitted reads stdin
        input: Option<PathBuf>,

        /// Print the BDD test-script request body instead of raw steps
        #[arg(long = "json")]
        json_output: bool,

        /// Output file path (default: stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Print the test-case and test-script request bodies for generated Gherkin
    Payload {
        /// Gherkin file to read; "-" or omitted reads stdin
        input: Option<PathBuf>,

        /// PRD title used to name the test case
        #[arg(long = "title")]
        title: String,

        /// Test-management project key
        #[arg(long = "project-key")]
        project_key: String,

        /// Test case objective
        #[arg(long = "objective", default_value = "")]
        objective: String,

        /// Folder to file the test case in (default: root level)
        #[arg(long = "folder-id")]
        folder_id: Option<u64>,

        /// Output file path (default: stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("error reading file {:?}", path)),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("error reading stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("error writing to {:?}", path))
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn run_clean(
    input: Option<&Path>,
    style: StyleArg,
    verbatim_tag: &str,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let raw = read_input(input)?;
    let cleaner = Cleaner::builder()
        .prose_style(style.into())
        .verbatim_tag(verbatim_tag)
        .build();

    match cleaner.clean(&raw) {
        Cleaned::Text(text) => {
            debug!(
                verbatim_blocks = text.verbatim().len(),
                has_prose = text.prose().is_some(),
                "cleaned document"
            );
            write_output(output, &text.joined())?;
            Ok(ExitCode::SUCCESS)
        }
        Cleaned::EmptyInput => {
            error!("no markup supplied");
            Ok(ExitCode::from(1))
        }
        Cleaned::EmptyResult => {
            error!("PRD content is empty after cleaning");
            Ok(ExitCode::from(1))
        }
    }
}

fn run_steps(input: Option<&Path>, json_output: bool, output: Option<&Path>) -> Result<ExitCode> {
    let generated = normalize_generated(&read_input(input)?);
    let summary = summarize(&generated);
    info!(
        features = summary.features,
        scenarios = summary.scenarios,
        steps = summary.steps,
        "read generated gherkin"
    );

    let steps = extract_steps(&generated);
    if steps.is_empty() {
        warn!("no Given/When/Then/And steps extracted; nothing to emit");
        return Ok(ExitCode::SUCCESS);
    }
    debug!(
        given = steps.count(StepKeyword::Given),
        when = steps.count(StepKeyword::When),
        then = steps.count(StepKeyword::Then),
        and = steps.count(StepKeyword::And),
        "extracted steps"
    );

    let rendered = if json_output {
        let script = TestScriptRequest::from_steps(&steps)?;
        serde_json::to_string_pretty(&script)?
    } else {
        steps.to_script()
    };
    write_output(output, &rendered)?;
    Ok(ExitCode::SUCCESS)
}

fn run_payload(
    input: Option<&Path>,
    title: &str,
    project_key: &str,
    objective: &str,
    folder_id: Option<u64>,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let generated = normalize_generated(&read_input(input)?);
    let steps = extract_steps(&generated);

    let test_case = TestCaseRequest::new(title, project_key, chrono::Local::now().naive_local())?
        .with_objective(objective)
        .with_folder(folder_id);
    if folder_id.is_none() {
        info!("no folder selected; test case goes to the root level");
    }

    let submission = Submission::new(test_case, &steps);
    write_output(output, &submission.to_json_pretty()?)?;
    Ok(ExitCode::SUCCESS)
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Clean {
            input,
            style,
            verbatim_tag,
            output,
        } => run_clean(input.as_deref(), style, &verbatim_tag, output.as_deref()),
        Command::Steps {
            input,
            json_output,
            output,
        } => run_steps(input.as_deref(), json_output, output.as_deref()),
        Command::Payload {
            input,
            title,
            project_key,
            objective,
            folder_id,
            output,
        } => run_payload(
            input.as_deref(),
            &title,
            &project_key,
            &objective,
            folder_id,
            output.as_deref(),
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(1)
        }
    }
}

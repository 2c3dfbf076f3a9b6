use crate::clipboard::copy_to_clipboard;
use crate::defaults;
use anyhow::{bail, Context};
use application::compare_service::{
    ComparisonOutcome, ComparisonRequest, ComparisonSettings, ComparisonWorkflow,
};
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Editor, Input};
use domain::models::{Criteria, PlanDocument};
use infrastructure::{
    config::Config, embedding_storage::EmbeddingStorage, openai_client::OpenAiClient,
    pdf_loader::PdfToTextLoader, staging::DataDir,
};
use shared::confirmation::ask_confirmation;
use shared::telemetry::Telemetry;
use shared::types::Result;
use shared::utils::{is_pdf_file, non_empty_lines};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "plan-compare")]
#[command(about = "Compare two insurance plan PDFs question by question and get a recommendation")]
pub struct Cli {
    /// First plan PDF
    #[arg(long, value_name = "PDF")]
    pub plan_a: Option<PathBuf>,

    /// Second plan PDF
    #[arg(long, value_name = "PDF")]
    pub plan_b: Option<PathBuf>,

    /// Display name of the first plan
    #[arg(long, default_value = defaults::DEFAULT_NAME_A)]
    pub name_a: String,

    /// Display name of the second plan
    #[arg(long, default_value = defaults::DEFAULT_NAME_B)]
    pub name_b: String,

    /// Who the insurance is for
    #[arg(long, default_value = defaults::DEFAULT_COMPANY)]
    pub company: String,

    /// Newline-delimited questions asked of both plans
    #[arg(long, value_name = "PATH")]
    pub questions_file: Option<PathBuf>,

    /// Newline-delimited comparison criteria
    #[arg(long, value_name = "PATH")]
    pub criteria_file: Option<PathBuf>,

    /// Prompt for anything not given on the command line
    #[arg(long)]
    pub interactive: bool,

    /// Configuration file (defaults to config.yml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip the confirmation before any API call is made
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Copy the final answer to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub struct CliApp {
    telemetry: Telemetry,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self {
            telemetry: Telemetry::new(),
        }
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        let request = if cli.interactive {
            Self::prompt_request(&cli)?
        } else {
            Self::build_request(&cli)?
        };

        if let Some(missing) = missing_plans(&request) {
            println!(
                "{} {}",
                "Upload both plans to start the comparison. Missing:".yellow(),
                missing.join(", ")
            );
            return Ok(());
        }

        let config = Config::load(cli.config.as_deref())?;
        debug!(
            chat_model = %config.chat_model,
            embedding_model = %config.embedding_model,
            "configuration loaded"
        );

        if !cli.yes {
            let questions = request.questions.len();
            let prompt = format!(
                "Ask {} questions of both plans ({} completion calls)?",
                questions,
                questions * 2 + 1
            );
            let proceed = ask_confirmation(&prompt, true)?;
            if !proceed {
                println!("{}", "Comparison cancelled.".yellow());
                return Ok(());
            }
        }

        let client = OpenAiClient::from_config(&config);
        let mut workflow = ComparisonWorkflow::new(
            PdfToTextLoader,
            client.clone(),
            client,
            DataDir::new(&config.data_dir),
            ComparisonSettings::from_config(&config),
        );
        if let Some(cache_db) = &config.cache_db {
            workflow = workflow.with_cache(EmbeddingStorage::new(cache_db)?);
        }

        println!("{}", "Comparing plans...".cyan());
        let Some(outcome) = workflow.run(&request).await? else {
            return Ok(());
        };

        self.render(&outcome, cli.verbose);

        if cli.copy {
            if let Err(err) = copy_to_clipboard(&outcome.recommendation.text) {
                eprintln!("{} {}", "Clipboard copy failed:".red(), err);
            } else {
                println!("{}", "Copied to clipboard.".green());
            }
        }

        println!(
            "{}",
            format!("Done in {:.1}s", self.telemetry.elapsed().as_secs_f64()).dimmed()
        );
        Ok(())
    }

    /// Assemble the request from flags and files only.
    pub fn build_request(cli: &Cli) -> Result<ComparisonRequest> {
        let questions = match &cli.questions_file {
            Some(path) => non_empty_lines(&read_list(path)?),
            None => non_empty_lines(&defaults::questions_text()),
        };
        let criteria = match &cli.criteria_file {
            Some(path) => non_empty_lines(&read_list(path)?),
            None => non_empty_lines(&defaults::criteria_text()),
        };

        Ok(ComparisonRequest {
            plan_a: plan_document(&cli.name_a, cli.plan_a.as_deref())?,
            plan_b: plan_document(&cli.name_b, cli.plan_b.as_deref())?,
            company_description: cli.company.clone(),
            questions,
            criteria: Criteria::new(criteria),
        })
    }

    fn prompt_request(cli: &Cli) -> Result<ComparisonRequest> {
        let theme = ColorfulTheme::default();
        let mut request = Self::build_request(cli)?;

        if request.plan_a.is_none() {
            request.plan_a = prompt_plan(&theme, "First plan PDF", &cli.name_a)?;
        }
        if request.plan_b.is_none() {
            request.plan_b = prompt_plan(&theme, "Second plan PDF", &cli.name_b)?;
        }
        for plan in [&mut request.plan_a, &mut request.plan_b].into_iter().flatten() {
            plan.name = Input::with_theme(&theme)
                .with_prompt(format!("Name for {}", plan.pdf_path.display()))
                .default(plan.name.clone())
                .interact_text()?;
        }

        request.company_description = Input::with_theme(&theme)
            .with_prompt("Describe your company")
            .default(request.company_description)
            .interact_text()?;

        if let Some(edited) = Editor::new().edit(&request.questions.join("\n"))? {
            request.questions = non_empty_lines(&edited);
        }
        if let Some(edited) = Editor::new().edit(&request.criteria.items().join("\n"))? {
            request.criteria = Criteria::new(non_empty_lines(&edited));
        }
        Ok(request)
    }

    fn render(&self, outcome: &ComparisonOutcome, verbose: bool) {
        if verbose {
            println!("\n{}", "Answers".bold().blue());
            print!("{}", outcome.transcript.render());
        }
        println!("\n{}", "Final answer".bold().green());
        println!("{}", outcome.recommendation.text);
    }
}

/// Human-readable labels of the plans still missing, if any.
pub fn missing_plans(request: &ComparisonRequest) -> Option<Vec<&'static str>> {
    let mut missing = Vec::new();
    if request.plan_a.is_none() {
        missing.push("--plan-a");
    }
    if request.plan_b.is_none() {
        missing.push("--plan-b");
    }
    if missing.is_empty() {
        None
    } else {
        Some(missing)
    }
}

fn plan_document(name: &str, path: Option<&Path>) -> Result<Option<PlanDocument>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !is_pdf_file(path) {
        bail!("{:?} is not a PDF file", path);
    }
    if !path.is_file() {
        bail!("Plan file {:?} does not exist", path);
    }
    Ok(Some(PlanDocument::new(name, path)))
}

fn prompt_plan(theme: &ColorfulTheme, prompt: &str, name: &str) -> Result<Option<PlanDocument>> {
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    plan_document(name, Some(Path::new(answer)))
}

fn read_list(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

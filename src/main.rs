use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use stepsurvey::config::{SelectionScope, SubmitLabelRule, SurveyConfig};
use stepsurvey::core::controller::FormController;
use stepsurvey::core::notification::{JsonLinesSink, NotificationSink};
use stepsurvey::data::StepCollection;
use stepsurvey::replay::{self, Action};
use stepsurvey::runtime::Runtime;
use stepsurvey::state::app_state::AppState;
use stepsurvey::terminal::{RenderMode, Terminal};
use stepsurvey::ui::renderer::Renderer;
use stepsurvey::ui::theme::Theme;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stepsurvey")]
#[command(version)]
#[command(about = "Multi-step checkbox survey for the terminal")]
struct Cli {
    /// Write logs to this file instead of stderr (filter with RUST_LOG)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the survey interactively
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Draw below the prompt instead of on the alternate screen
        #[arg(long)]
        inline: bool,

        /// Disable colors and text attributes
        #[arg(long)]
        no_color: bool,

        /// Also append every submission as a JSON line to this file
        #[arg(long, value_name = "PATH")]
        emit: Option<PathBuf>,
    },

    /// Print the steps of a data file and any problems found in it
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Run scripted actions without a terminal and print submissions as JSON lines
    Replay {
        #[command(flatten)]
        source: SourceArgs,

        /// `toggle:<id>` or `submit`; repeat in the order to apply them
        #[arg(short, long = "action", value_name = "ACTION", required = true)]
        actions: Vec<Action>,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Step data (.json, .yaml or .yml); the bundled steps when omitted
    data: Option<PathBuf>,

    /// YAML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    selection_scope: Option<SelectionScope>,

    #[arg(long, value_enum)]
    label_rule: Option<SubmitLabelRule>,

    /// Item checked when the form opens; repeatable, replaces the default
    #[arg(long = "select", value_name = "ID")]
    select: Vec<String>,

    /// Open the form with nothing checked
    #[arg(long, conflicts_with = "select")]
    no_default_selection: bool,
}

impl SourceArgs {
    fn config(&self) -> Result<SurveyConfig> {
        let mut config = match &self.config {
            Some(path) => SurveyConfig::load(path)?,
            None => SurveyConfig::default(),
        };
        if let Some(scope) = self.selection_scope {
            config.selection_scope = scope;
        }
        if let Some(rule) = self.label_rule {
            config.label_rule = rule;
        }
        if self.no_default_selection {
            config.initial_selection.clear();
        } else if !self.select.is_empty() {
            config.initial_selection = self.select.clone();
        }
        Ok(config)
    }

    fn steps(&self) -> Result<Arc<StepCollection>> {
        match &self.data {
            Some(path) => Ok(Arc::new(StepCollection::load(path)?)),
            None => Ok(StepCollection::bundled()?),
        }
    }

    fn controller(&self) -> Result<(FormController, SurveyConfig)> {
        let config = self.config()?;
        let steps = self.steps()?;
        Ok((FormController::new(steps, &config), config))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Run {
            source,
            inline,
            no_color,
            emit,
        } => run(&source, inline, no_color, emit.as_deref()),
        Commands::Inspect { source, json } => inspect(&source, json),
        Commands::Replay { source, actions } => replay_actions(&source, &actions),
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run(source: &SourceArgs, inline: bool, no_color: bool, emit: Option<&Path>) -> Result<()> {
    let (form, config) = source.controller()?;
    let mode = if inline {
        RenderMode::Inline
    } else {
        RenderMode::AltScreen
    };
    let theme = if no_color {
        Theme::plain()
    } else {
        Theme::default()
    };

    let terminal = Terminal::new()
        .context("failed to open the terminal")?
        .with_mode(mode);
    let mut runtime = Runtime::new(AppState::new(form), terminal, config.toast_timeout())
        .with_renderer(Renderer::new(theme));
    if let Some(path) = emit {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        runtime = runtime.with_sink(Box::new(JsonLinesSink::new(file)));
    }

    runtime.run().context("terminal session failed")?;

    let form = runtime.into_state().into_form();
    tracing::info!(
        submitted = form.history().len(),
        complete = form.is_complete(),
        "session finished"
    );
    let mut out = JsonLinesSink::new(io::stdout().lock());
    for notification in form.history() {
        out.notify(notification)?;
    }
    Ok(())
}

fn inspect(source: &SourceArgs, json: bool) -> Result<()> {
    let steps = source.steps()?;
    let warnings = steps.lint();

    if json {
        let report = serde_json::json!({
            "steps": steps.steps(),
            "warnings": warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} step(s)", steps.size());
    for (index, step) in steps.steps().iter().enumerate() {
        println!(
            "{index:>3}  {}  {}  ({} items)",
            step.key,
            step.definition.title,
            step.definition.items.len()
        );
    }
    for warning in &warnings {
        println!("warning: {warning}");
    }
    Ok(())
}

fn replay_actions(source: &SourceArgs, actions: &[Action]) -> Result<()> {
    let (mut form, _) = source.controller()?;
    let mut sink = JsonLinesSink::new(io::stdout().lock());
    let mut errors = io::stderr().lock();
    let summary = replay::replay(&mut form, actions, &mut sink, &mut errors)?;
    tracing::info!(
        submitted = summary.submitted,
        rejected = summary.rejected,
        complete = summary.completed,
        "replay finished"
    );
    Ok(())
}

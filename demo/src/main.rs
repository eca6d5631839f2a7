//! Scout agent discovery demo CLI
//!
//! Drives the location selector, the agent search screen and the profile
//! location editor against the bundled taxonomy and the in-memory backend.
//!
//! Usage:
//!   cargo run -p scout-demo -- states
//!   cargo run -p scout-demo -- cascade --state Texas --county Travis-Texas
//!   cargo run -p scout-demo -- search --query austin --category "Buyer Agent"
//!   cargo run -p scout-demo -- edit-profile --agent agent-jane --state Texas

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scout_contracts::{
    agent::{AgentId, AgentRecord},
    alert::Alert,
    error::{ScoutError, ScoutResult},
    location::{CountyOptionKey, LocationTaxonomy, OptionItem},
};
use scout_core::{
    config::{CascadeMode, DiscoveryConfig},
    context::AgentContext,
};
use scout_location::{taxonomy, CascadingLocationSelector, ProfileLocationEditor, SubmitOutcome};
use scout_memory::{fixtures, InMemoryBackend};
use scout_search::AgentSearchScreen;

/// Gap between simulated keystrokes. Shorter than any allowed debounce window.
const KEYSTROKE_GAP: Duration = Duration::from_millis(120);

// ── CLI definition ────────────────────────────────────────────────────────────

/// Scout: find real-estate agents by coverage area and specialization.
#[derive(Parser)]
#[command(
    name = "scout-demo",
    about = "Scout agent discovery demo",
    long_about = "Exercises the cascading location selector, the debounced agent\n\
                  search and the profile location editor with fictional data."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the state options of the taxonomy.
    States {
        /// Taxonomy JSON file. Defaults to the bundled one.
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
    /// Select states (and optionally counties) and print the derived options.
    Cascade {
        #[arg(long = "state", required = true)]
        states: Vec<String>,
        /// County keys in `<county>-<state>` form.
        #[arg(long = "county")]
        counties: Vec<CountyOptionKey>,
        #[arg(long, value_enum, default_value_t = ModeArg::Edit)]
        mode: ModeArg,
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
    /// Type a query keystroke by keystroke and print the matching agents.
    Search {
        #[arg(long, default_value = "")]
        query: String,
        /// Category chip to tap before typing.
        #[arg(long)]
        category: Option<String>,
        /// Agent documents JSON file. Defaults to the fixtures.
        #[arg(long)]
        agents: Option<PathBuf>,
        /// Discovery config TOML file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Save an agent's location coverage through the profile editor.
    EditProfile {
        #[arg(long)]
        agent: String,
        #[arg(long = "state")]
        states: Vec<String>,
        #[arg(long = "county")]
        counties: Vec<CountyOptionKey>,
        #[arg(long = "zipcode")]
        zipcodes: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Create,
    Edit,
}

impl From<ModeArg> for CascadeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Create => CascadeMode::Create,
            ModeArg::Edit => CascadeMode::Edit,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to watch the cascade and debounce decisions.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::States { taxonomy } => run_states(taxonomy.as_deref()),
        Command::Cascade { states, counties, mode, taxonomy } => {
            run_cascade(states, counties, mode.into(), taxonomy.as_deref())
        }
        Command::Search { query, category, agents, config } => {
            run_search(&query, category.as_deref(), agents.as_deref(), config.as_deref())
        }
        Command::EditProfile { agent, states, counties, zipcodes } => {
            run_edit_profile(agent, states, counties, zipcodes)
        }
    };

    if let Err(e) = result {
        let alert = Alert::from(&e);
        eprintln!("{}: {}", alert.title, alert.message);
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_states(path: Option<&Path>) -> ScoutResult<()> {
    let locations = load_taxonomy(path)?;
    print_options("States", &taxonomy::state_options(&locations));
    Ok(())
}

fn run_cascade(
    states: Vec<String>,
    counties: Vec<CountyOptionKey>,
    mode: CascadeMode,
    path: Option<&Path>,
) -> ScoutResult<()> {
    let taxonomy = Arc::new(load_taxonomy(path)?);
    let mut selector = CascadingLocationSelector::new(taxonomy, mode);

    selector.select_states(states);
    if !counties.is_empty() {
        selector.select_counties(counties);
    }

    print_options("Counties", selector.county_options());
    print_options("Zipcodes", selector.zipcode_options());

    let selection = selector.selection();
    println!("Selected states:   {}", selection.states.join(", "));
    println!(
        "Selected counties: {}",
        selection.counties.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

fn run_search(
    query: &str,
    category: Option<&str>,
    agents: Option<&Path>,
    config: Option<&Path>,
) -> ScoutResult<()> {
    let config = match config {
        Some(path) => DiscoveryConfig::from_file(path)?,
        None => DiscoveryConfig::default(),
    };

    let backend = match agents {
        Some(path) => {
            let backend = InMemoryBackend::new();
            backend.load_agent_documents(read_json(path)?)?;
            backend.load_category_document(fixtures::category_document())?;
            backend
        }
        None => fixtures::seeded_backend()?,
    };
    simulate_search(&backend, &config, query, category)
}

fn simulate_search(
    backend: &InMemoryBackend,
    config: &DiscoveryConfig,
    query: &str,
    category: Option<&str>,
) -> ScoutResult<()> {
    let mut screen = AgentSearchScreen::mount(backend, backend, &config.search);
    if let Some(alert) = screen.alert() {
        return Err(ScoutError::FetchFailed {
            what: "search data".to_string(),
            reason: alert.message.clone(),
        });
    }
    println!("Categories: {}", screen.categories().chips().join(" | "));

    if let Some(label) = category {
        if !screen.tap_category(label) && !screen.categories().is_active(label) {
            println!("Category {label:?} is not offered; showing every category.");
        }
    }

    // Each prefix of the query is one keystroke; ticks between them never
    // reach the quiet window, so only the final query settles.
    let mut now = Instant::now();
    let mut recomputes = 0;
    let mut typed = String::new();
    for ch in query.chars() {
        typed.push(ch);
        screen.type_text(typed.clone(), now);
        now += KEYSTROKE_GAP;
        if screen.tick(now) {
            recomputes += 1;
        }
    }
    if let Some(deadline) = screen.next_deadline() {
        if screen.tick(deadline) {
            recomputes += 1;
        }
    }
    info!(keystrokes = query.chars().count(), recomputes, "typing simulated");

    println!(
        "Query {:?} settled after {} keystroke(s), {} recompute(s)",
        screen.settled_query(),
        query.chars().count(),
        recomputes
    );
    print_agents(screen.filtered());
    screen.unmount();
    Ok(())
}

fn run_edit_profile(
    agent: String,
    states: Vec<String>,
    counties: Vec<CountyOptionKey>,
    zipcodes: Vec<String>,
) -> ScoutResult<()> {
    let backend = InMemoryBackend::new();
    let config = DiscoveryConfig::default();
    let agent_id = AgentId::new(agent);

    let mut editor = ProfileLocationEditor::mount(
        Arc::new(taxonomy::bundled()?),
        Box::new(backend.clone()),
        AgentContext::new(agent_id.clone()),
        config.locations.default_mode,
        &config.locations,
    );

    let selector = editor.selector_mut();
    selector.select_states(states);
    selector.select_counties(counties);
    selector.select_zipcodes(zipcodes);

    match editor.submit() {
        SubmitOutcome::Saved { route } => {
            println!("Saved. Navigating to {route:?}.");
        }
        SubmitOutcome::Rejected { error, .. } | SubmitOutcome::Failed { error, .. } => {
            return Err(error);
        }
    }

    if let Some(saved) = backend.saved_profile(&agent_id) {
        let body = serde_json::to_string_pretty(&saved).map_err(|e| ScoutError::EncodeFailed {
            what: "saved profile".to_string(),
            reason: e.to_string(),
        })?;
        println!("{body}");
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_taxonomy(path: Option<&Path>) -> ScoutResult<LocationTaxonomy> {
    match path {
        Some(path) => taxonomy::from_file(path),
        None => taxonomy::bundled(),
    }
}

fn read_json(path: &Path) -> ScoutResult<serde_json::Value> {
    let fetch_failed = |reason: String| ScoutError::FetchFailed {
        what: path.display().to_string(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| fetch_failed(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| fetch_failed(e.to_string()))
}

fn print_options(heading: &str, options: &[OptionItem]) {
    println!("{heading} ({}):", options.len());
    for option in options {
        if option.label == option.value {
            println!("  {}", option.label);
        } else {
            println!("  {:<20} {}", option.label, option.value);
        }
    }
}

fn print_agents(agents: &[AgentRecord]) {
    println!("Agents ({}):", agents.len());
    for agent in agents {
        let tags = if agent.specializations.is_empty() {
            agent.specialization.clone()
        } else {
            agent.specializations.join(", ")
        };
        println!(
            "  {:<18} {:<24} [{}] {}",
            agent.id.as_str(),
            agent.full_name,
            tags,
            agent.states.join(", ")
        );
    }
}

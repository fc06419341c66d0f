use caffeine_core::*;
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cafsim")]
#[command(about = "Personal caffeine intake simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override caffeine source catalog JSON path
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Override persona presets JSON path
    #[arg(long, global = true)]
    personas: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the day's caffeine curve (default)
    Chart {
        /// Consumption event as SOURCE[:QTY]@HH:MM (repeatable)
        #[arg(long = "event")]
        events: Vec<String>,

        /// Apply a persona preset by key
        #[arg(long)]
        persona: Option<String>,

        /// Start with an empty journal instead of the sample day
        #[arg(long)]
        no_seed: bool,

        /// Add and remove entries interactively
        #[arg(long)]
        interactive: bool,

        /// Sampling step in minutes
        #[arg(long)]
        step: Option<i64>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Show personalized daily and sleep-impact limits
    Limits {
        /// Apply a persona preset by key
        #[arg(long)]
        persona: Option<String>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// List the caffeine source catalog by category
    Sources,

    /// List available persona presets
    Personas,
}

/// Individual settings overrides (applied after any persona preset)
#[derive(clap::Args)]
struct SettingsArgs {
    /// Gender (male or female)
    #[arg(long)]
    gender: Option<String>,

    /// Body weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// Age in years
    #[arg(long)]
    age: Option<f64>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<f64>,

    /// Wake time as HH:MM
    #[arg(long)]
    wake: Option<String>,

    /// Sleep time as HH:MM
    #[arg(long)]
    sleep: Option<String>,
}

fn main() -> Result<()> {
    caffeine_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let catalog_path = cli.catalog.clone().or(config.data.catalog_path.clone());
    let personas_path = cli.personas.clone().or(config.data.personas_path.clone());

    let catalog = Catalog::load_or_default(catalog_path.as_deref());
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let personas = Personas::load_or_empty(personas_path.as_deref());

    match cli.command {
        Some(Commands::Chart {
            events,
            persona,
            no_seed,
            interactive,
            step,
            settings,
        }) => cmd_chart(
            &catalog,
            &personas,
            &config,
            events,
            persona,
            no_seed,
            interactive,
            step,
            settings,
        ),
        Some(Commands::Limits { persona, settings }) => {
            cmd_limits(&personas, &config, persona, settings)
        }
        Some(Commands::Sources) => cmd_sources(&catalog),
        Some(Commands::Personas) => cmd_personas(&personas),
        None => {
            // Default to the chart command with the sample day
            cmd_chart(
                &catalog,
                &personas,
                &config,
                vec![],
                None,
                false,
                false,
                None,
                SettingsArgs {
                    gender: None,
                    weight: None,
                    age: None,
                    height: None,
                    wake: None,
                    sleep: None,
                },
            )
        }
    }
}

/// Resolve user settings from persona preset plus individual overrides
fn resolve_settings(
    personas: &Personas,
    config: &Config,
    persona: Option<String>,
    args: &SettingsArgs,
) -> Result<UserSettings> {
    let mut settings = UserSettings::default();

    let persona_key = persona.or_else(|| config.persona.default.clone());
    if let Some(key) = persona_key {
        match personas.get(&key) {
            Some(preset) => settings = preset.clone(),
            None => {
                return Err(Error::Settings(format!(
                    "unknown persona '{}' (try the personas command)",
                    key
                )))
            }
        }
    }

    if let Some(ref gender) = args.gender {
        settings.gender = gender.parse()?;
    }
    if let Some(weight) = args.weight {
        settings.weight = weight;
    }
    if let Some(age) = args.age {
        settings.age = age;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(ref wake) = args.wake {
        settings.wake_time = types::hhmm::parse(wake).map_err(Error::Settings)?;
    }
    if let Some(ref sleep) = args.sleep {
        settings.sleep_time = types::hhmm::parse(sleep).map_err(Error::Settings)?;
    }

    let problems = settings.validate();
    if !problems.is_empty() {
        return Err(Error::Settings(problems.join("; ")));
    }

    Ok(settings)
}

/// Parsed form of a SOURCE[:QTY]@HH:MM event argument
struct EventSpec {
    source_id: String,
    quantity: f64,
    time: NaiveTime,
}

fn parse_event_spec(spec: &str) -> Result<EventSpec> {
    let (head, time_str) = spec
        .rsplit_once('@')
        .ok_or_else(|| Error::Consumption(format!("invalid event '{}' (expected SOURCE[:QTY]@HH:MM)", spec)))?;

    let (source_id, quantity) = match head.rsplit_once(':') {
        Some((id, qty_str)) => {
            let quantity: f64 = qty_str.parse().map_err(|_| {
                Error::Consumption(format!("invalid quantity '{}' in event '{}'", qty_str, spec))
            })?;
            (id.to_string(), quantity)
        }
        None => (head.to_string(), 1.0),
    };

    let time = types::hhmm::parse(time_str).map_err(Error::Consumption)?;

    Ok(EventSpec {
        source_id,
        quantity,
        time,
    })
}

/// Form boundary: validate and record one entry into the journal
fn add_entry(
    journal: &mut ConsumptionJournal,
    catalog: &Catalog,
    settings: &UserSettings,
    spec: &EventSpec,
    date: NaiveDate,
) -> Result<()> {
    let source = catalog.get(&spec.source_id).ok_or_else(|| {
        Error::Consumption(format!(
            "unknown source '{}' (try the sources command)",
            spec.source_id
        ))
    })?;

    if !schedule::in_waking_window(spec.time, settings.wake_time, settings.sleep_time) {
        return Err(Error::Consumption(format!(
            "{} is outside the waking window {}-{}",
            spec.time.format("%H:%M"),
            settings.wake_time.format("%H:%M"),
            settings.sleep_time.format("%H:%M")
        )));
    }

    let consumed_at = date.and_time(spec.time).and_utc();
    journal.add(source, spec.quantity, consumed_at)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_chart(
    catalog: &Catalog,
    personas: &Personas,
    config: &Config,
    events: Vec<String>,
    persona: Option<String>,
    no_seed: bool,
    interactive: bool,
    step: Option<i64>,
    settings_args: SettingsArgs,
) -> Result<()> {
    let settings = resolve_settings(personas, config, persona, &settings_args)?;
    let step_minutes = step.unwrap_or(config.chart.step_minutes);
    if step_minutes <= 0 {
        return Err(Error::Config(format!(
            "sampling step must be positive, got {}",
            step_minutes
        )));
    }

    let date = Utc::now().date_naive();

    let mut journal = if events.is_empty() && !no_seed {
        seed_sample_day(catalog, date)
    } else {
        ConsumptionJournal::new()
    };

    for raw in &events {
        let spec = parse_event_spec(raw)?;
        add_entry(&mut journal, catalog, &settings, &spec, date)?;
    }

    tracing::debug!(
        "Charting {} entries at {}min steps",
        journal.len(),
        step_minutes
    );

    if interactive {
        interactive_loop(
            &mut journal,
            catalog,
            &settings,
            date,
            step_minutes,
            config.chart.height,
        )
    } else {
        display_day(&journal, &settings, date, step_minutes, config.chart.height);
        Ok(())
    }
}

fn interactive_loop(
    journal: &mut ConsumptionJournal,
    catalog: &Catalog,
    settings: &UserSettings,
    date: NaiveDate,
    step_minutes: i64,
    height: usize,
) -> Result<()> {
    loop {
        display_day(journal, settings, date, step_minutes, height);

        let suggested = schedule::round_to_slot(Utc::now().time());
        println!("─────────────────────────────────────────");
        println!("  'a SOURCE[:QTY]@HH:MM' to add (now ≈ {})", suggested.format("%H:%M"));
        println!("  'r N' to remove entry N");
        println!("  't' to list valid entry times");
        println!("  'q' to quit");
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(()); // EOF
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let mut parts = input.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("");

        match command {
            "q" => return Ok(()),
            "t" => {
                let slots = schedule::time_slots(settings.wake_time, settings.sleep_time);
                let formatted: Vec<_> =
                    slots.iter().map(|t| t.format("%H:%M").to_string()).collect();
                println!("\nValid entry times:\n  {}\n", formatted.join(" "));
            }
            "a" => match parse_event_spec(rest.trim()) {
                Ok(spec) => {
                    if let Err(e) = add_entry(journal, catalog, settings, &spec, date) {
                        eprintln!("Not added: {}", e);
                    }
                }
                Err(e) => eprintln!("Not added: {}", e),
            },
            "r" => match rest.trim().parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if journal.remove(n - 1).is_none() {
                        eprintln!("No entry {}", n);
                    }
                }
                _ => eprintln!("Usage: r N (1-based entry number)"),
            },
            _ => eprintln!("Unknown command '{}'", input),
        }
    }
}

fn cmd_limits(
    personas: &Personas,
    config: &Config,
    persona: Option<String>,
    settings_args: SettingsArgs,
) -> Result<()> {
    let settings = resolve_settings(personas, config, persona, &settings_args)?;
    let limits = personal_limits(settings.weight, settings.age, settings.gender);

    println!(
        "Personalized limits ({:?}, {}kg, {}y):",
        settings.gender, settings.weight, settings.age
    );
    println!("  Max daily:    {} mg", format_mg(limits.max_daily_mg));
    println!("  Sleep impact: {} mg", format_mg(limits.sleep_impact_mg));

    Ok(())
}

fn cmd_sources(catalog: &Catalog) -> Result<()> {
    for (category, sources) in catalog.by_category() {
        println!("{}", category);
        for source in sources {
            println!(
                "  {:<24} {} ({}mg)",
                source.id,
                source.name,
                format_mg(source.caffeine_mg)
            );
        }
        println!();
    }
    Ok(())
}

fn cmd_personas(personas: &Personas) -> Result<()> {
    if personas.is_empty() {
        println!("No persona presets available.");
        return Ok(());
    }

    for key in personas.keys() {
        if let Some(p) = personas.get(key) {
            println!(
                "{:<16} {:?}, {}kg, {}y, awake {}-{}",
                key,
                p.gender,
                p.weight,
                p.age,
                p.wake_time.format("%H:%M"),
                p.sleep_time.format("%H:%M")
            );
        }
    }
    Ok(())
}

/// Render the chart, thresholds and consumption list for one day
fn display_day(
    journal: &ConsumptionJournal,
    settings: &UserSettings,
    date: NaiveDate,
    step_minutes: i64,
    height: usize,
) {
    let model = build_chart_model(journal.entries(), settings, date, step_minutes);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CAFFEINE LEVEL ({})", date);
    println!("╰─────────────────────────────────────────╯");

    render_chart(&model, height, step_minutes);

    println!();
    println!(
        "  Max daily: {} mg   Sleep impact: {} mg   Sleep cutoff: {}",
        format_mg(model.max_daily_mg),
        format_mg(model.sleep_impact_mg),
        model.sleep_cutoff_label
    );

    println!();
    println!("  Today's consumptions ({} mg total):", format_mg(journal.daily_total_mg()));
    if journal.is_empty() {
        println!("    (none)");
    } else {
        for (i, entry) in journal.entries().iter().enumerate() {
            println!(
                "    {}. {} ({}mg) × {} at {}",
                i + 1,
                entry.source_name,
                format_mg(entry.total_mg()),
                entry.quantity,
                entry.consumed_at.format("%H:%M")
            );
        }
    }
    println!();
}

/// Draw the sampled curve as a terminal area chart
///
/// The daily ceiling shows as '═', the sleep-impact level as '─' and the
/// sleep cutoff as a '¦' column; the curve itself fills from below.
fn render_chart(model: &ChartModel, height: usize, step_minutes: i64) {
    if model.labels.is_empty() {
        println!();
        println!("  No samples in the waking window (is sleep time after wake time?).");
        return;
    }

    let peak = model.levels.iter().cloned().fold(0.0_f64, f64::max);
    let y_max = peak.max(model.max_daily_mg).max(model.sleep_impact_mg) * 1.05;
    let band = y_max / height as f64;

    let cutoff_col = model
        .labels
        .iter()
        .position(|l| *l == model.sleep_cutoff_label);

    println!();
    for row in (0..height).rev() {
        let lo = band * row as f64;
        let hi = band * (row + 1) as f64;
        let daily_here = model.max_daily_mg >= lo && model.max_daily_mg < hi;
        let sleep_here = model.sleep_impact_mg >= lo && model.sleep_impact_mg < hi;

        let mut line = String::with_capacity(model.levels.len());
        for (col, &mg) in model.levels.iter().enumerate() {
            let ch = if mg >= hi {
                '█'
            } else if mg > lo {
                '▄'
            } else if daily_here {
                '═'
            } else if sleep_here {
                '─'
            } else if Some(col) == cutoff_col {
                '¦'
            } else {
                ' '
            };
            line.push(ch);
        }
        println!("{:>5.0} ┤{}", hi, line);
    }

    // X axis with a label every two hours of samples
    let cols = model.labels.len();
    println!("      └{}", "─".repeat(cols));
    let label_every = ((120 / step_minutes).max(6)) as usize;
    let mut axis = String::from("       ");
    let mut col = 0;
    while col < cols {
        let label = &model.labels[col];
        axis.push_str(label);
        col += label_every;
        if col < cols {
            let pad = label_every.saturating_sub(label.len());
            axis.push_str(&" ".repeat(pad));
        }
    }
    println!("{}", axis);
}

/// Format a milligram value, keeping one decimal only when needed
fn format_mg(mg: f64) -> String {
    if (mg - mg.round()).abs() < 1e-9 {
        format!("{:.0}", mg)
    } else {
        format!("{:.1}", mg)
    }
}

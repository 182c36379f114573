use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_shared::{ChannelPerformance, ChannelRanking, IntentLevel, LeadSort, Stage};
use leadflow_core::{
    analytics, format, leads, nurture, CoreConfig, FixtureStore, LeadFilter, NurtureCatalog,
    SuggestionService,
};

#[derive(Parser)]
#[command(name = "leadflow")]
#[command(about = "Leadflow CRM demo CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List leads
    Leads {
        /// Funnel stage (Lead, MQL, SQL, Customer, Nurtured)
        #[arg(long)]
        stage: Option<Stage>,
        /// Intent level (High, Mid, Low)
        #[arg(long)]
        intent: Option<IntentLevel>,
        /// Exact industry name
        #[arg(long)]
        industry: Option<String>,
        /// Substring over name, company, email and industry
        #[arg(long)]
        search: Option<String>,
        /// Ordering (last_engaged, name)
        #[arg(long, default_value = "last_engaged")]
        sort: LeadSort,
    },
    /// Show stage counts and the funnel
    Summary,
    /// Show marketing channel performance
    Channels {
        /// Only show the best N channels
        #[arg(long)]
        top: Option<usize>,
        /// Ranking key (roi, leads)
        #[arg(long, default_value = "roi")]
        by: ChannelRanking,
    },
    /// List nurture flows
    Flows,
    /// Ask for a follow-up suggestion
    Suggest {
        /// Lead scenario; a stock prompt for the intent level is used when omitted
        prompt: Option<String>,
        /// Intent level for the stock prompt
        #[arg(long, default_value = "high")]
        intent: IntentLevel,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("leadflow=warn".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::from_env()?;

    match cli.command {
        Some(Commands::Leads {
            stage,
            intent,
            industry,
            search,
            sort,
        }) => {
            let store = FixtureStore::load(cfg.fixture_dir())?;
            let filter = LeadFilter {
                stage,
                intent_level: intent,
                industry,
                search,
            };
            let matched = leads::query_leads(store.leads(), &filter, sort);
            if matched.is_empty() {
                println!("No leads found.");
            } else {
                let now = chrono::Utc::now();
                for lead in &matched {
                    println!(
                        "{} | {} | {} | {} | {} | {}",
                        lead.name,
                        lead.company,
                        lead.industry,
                        lead.stage,
                        lead.intent_level,
                        format::relative_label(lead.last_engaged, now)
                    );
                }
            }
            println!("Showing {} of {} leads", matched.len(), store.leads().len());
        }
        Some(Commands::Summary) => {
            let store = FixtureStore::load(cfg.fixture_dir())?;
            let summary = leads::summarise(store.leads());
            println!("Total leads: {}", summary.total);
            for entry in &summary.stages {
                println!("  {}: {}", entry.stage, entry.count);
            }
            println!("Active pipeline: {}", summary.active_pipeline);
            println!("Conversion rate: {}%", summary.conversion_rate);
            println!("Industries: {}", summary.industries.join(", "));
            println!("Funnel:");
            for stage in &store.analytics().funnel.stages {
                println!(
                    "  {}: {} ({}, {}%)",
                    stage.name,
                    stage.count,
                    format::format_usd(stage.value),
                    stage.conversion_rate
                );
            }
        }
        Some(Commands::Channels { top, by }) => {
            let store = FixtureStore::load(cfg.fixture_dir())?;
            let channels = &store.analytics().marketing_channels;
            match top {
                Some(n) => {
                    let ranked =
                        analytics::top_channels(channels, by, analytics::ranking_limit(Some(n)));
                    for (rank, channel) in ranked.iter().enumerate() {
                        print!("{}. ", rank + 1);
                        print_channel(channel);
                    }
                }
                None => {
                    for channel in &analytics::channel_performance(channels) {
                        print_channel(channel);
                    }
                    let totals = analytics::channel_totals(channels);
                    println!(
                        "Total: {} leads, {} conversions, {} spent, {}% conversion",
                        totals.leads,
                        totals.conversions,
                        format::format_inr(totals.cost_incurred),
                        totals.conversion_rate
                    );
                }
            }
        }
        Some(Commands::Flows) => {
            let store = FixtureStore::load(cfg.fixture_dir())?;
            let catalog = NurtureCatalog::standard();
            for overview in catalog.overview(store.leads()) {
                let flow = &overview.flow;
                println!(
                    "{} [{}] {} intent, {} eligible leads",
                    flow.name, flow.id, flow.intent, overview.eligible_leads
                );
                for step in &flow.steps {
                    println!("  {}. day {}: {}", step.order, step.delay_days, step.action);
                }
            }
        }
        Some(Commands::Suggest { prompt, intent }) => {
            let prompt = prompt.unwrap_or_else(|| nurture::default_prompt(intent));
            let service = SuggestionService::from_config(&cfg)?;
            let res = service.suggest(Some(&prompt)).await;
            println!("{}", res.message);
        }
        None => {
            println!("Use 'leadflow --help' for commands");
        }
    }

    Ok(())
}

fn print_channel(channel: &ChannelPerformance) {
    let roi = channel
        .roi
        .map(|r| format!("{}%", r))
        .unwrap_or_else(|| "n/a".into());
    println!(
        "{}: {} leads, {} conversions, cost {}, ROI {}",
        channel.metrics.channel,
        channel.metrics.leads,
        channel.metrics.conversions,
        format::format_inr(channel.metrics.cost_incurred),
        roi
    );
}

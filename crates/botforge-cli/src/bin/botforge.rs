//! CLI for botforge

use botforge::BotforgeApp;
use botforge_cli::{GlobalArgs, commands, error::CliError, logging};
use clap::Parser;

#[derive(Parser)]
#[command(name = "botforge")]
#[command(about = "Question bank, retraining and multilingual replies for intent-based chatbots", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create the data files, model directory and a default config
    Init,
    /// Add a question to the question bank
    Add {
        /// Intent name
        intent: String,
        /// Question text
        text: String,
        /// Classifier confidence recorded with the example
        #[arg(long)]
        confidence: Option<f64>,
    },
    /// List questions grouped by intent
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert the question bank into NLU training data
    Convert {
        /// Question bank file (defaults to the configured one)
        #[arg(long, short = 's')]
        source: Option<String>,
        /// Training data output file (defaults to the configured one)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
    /// Run one training cycle
    Train,
    /// Retrain now and then periodically until interrupted
    Schedule {
        /// Minutes between runs (defaults to the configured interval)
        #[arg(long, short = 'i')]
        interval_minutes: Option<u64>,
    },
    /// Reply to a message in its detected language
    Respond {
        /// User message
        message: String,
        /// Intent predicted for the message
        #[arg(long)]
        intent: Option<String>,
        /// Confidence of the predicted intent
        #[arg(long, default_value = "1.0")]
        confidence: f64,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// List trained models, newest first
    Models,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = cli.global.load_config()?;
    let _guard = logging::setup_logging(&config)?;
    let app = BotforgeApp::new(config);

    match cli.command {
        Some(Commands::Init) => {
            commands::run_init(&app).await?;
        }
        Some(Commands::Add {
            intent,
            text,
            confidence,
        }) => {
            commands::run_add(&app, &intent, &text, confidence).await?;
        }
        Some(Commands::List { json }) => {
            commands::run_list(&app, json).await?;
        }
        Some(Commands::Convert { source, output }) => {
            commands::run_convert(&app, source, output).await?;
        }
        Some(Commands::Train) => {
            commands::run_train(&app).await?;
        }
        Some(Commands::Schedule { interval_minutes }) => {
            commands::run_schedule(&app, interval_minutes).await?;
        }
        Some(Commands::Respond {
            message,
            intent,
            confidence,
            json,
        }) => {
            commands::run_respond(&app, &message, intent, confidence, json).await?;
        }
        Some(Commands::Models) => {
            commands::run_models(&app).await?;
        }
        None => {
            println!("botforge");
            println!("Use --help for more information");
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use vocab_quiz::config::{DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, GatewayConfig, LogConfig};
use vocab_quiz::logging::init_tracing;
use vocab_quiz::protocol::DEFAULT_GATEWAY_URL;
use vocab_quiz::{Config, Difficulty, VocabQuiz};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the quiz generation gateway
    #[arg(long, env = "VOCAB_QUIZ_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    gateway_url: String,

    /// Seconds to wait for a gateway response (0 waits forever)
    #[arg(long, env = "VOCAB_QUIZ_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Starting level, e.g. "primary-upper" or "Secondary 1-3 (Lower)"
    #[arg(short, long, env = "VOCAB_QUIZ_DIFFICULTY", default_value_t = Difficulty::default())]
    difficulty: Difficulty,

    /// File whose contents prefill the word list
    #[arg(short, long, env = "VOCAB_QUIZ_WORDS")]
    words: Option<PathBuf>,

    /// Log filter directive, e.g. "info" or "vocab_quiz=debug"
    #[arg(long, env = "VOCAB_QUIZ_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Directory for the rolling log file
    #[arg(long, env = "VOCAB_QUIZ_LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,
}

impl Args {
    fn into_config(self) -> Config {
        Config {
            gateway: GatewayConfig {
                base_url: self.gateway_url,
                timeout: None,
            },
            log: LogConfig {
                level: self.log_level,
                dir: self.log_dir,
            },
            difficulty: self.difficulty,
            words_file: self.words,
        }
        .with_timeout_secs(self.timeout_secs)
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Args::parse().into_config();

    let _log_guard = match init_tracing(&config.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging in {}: {}", config.log.dir.display(), e);
            std::process::exit(1);
        }
    };
    info!(gateway = %config.gateway.base_url, difficulty = %config.difficulty, "vocab-quiz starting");

    let quiz = match VocabQuiz::from_config(&config) {
        Ok(quiz) => quiz,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("Error starting quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        error!(error = %e, "quiz exited with an error");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

use anyhow::Result;
use babelcast::{
    AzureTranslator, Config, ConsoleRecognizer, ConsoleSynthesizer, EchoFilter, FeedbackGuard,
    NatsTransport, ParticipantIdentity, RecognitionLoop, RelayTransport, SpeechSynthesizer,
    SubscriptionLoop, Supervisor, TranslationRelay, Translator, UtterancePublisher,
};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Real-time speech translation relay: speak in your own language, hear
/// everyone else's speech in it.
#[derive(Parser, Debug)]
#[command(name = "babelcast", version)]
struct Args {
    /// The input/output language for this side of the relay (e.g. "en")
    #[arg(short, long)]
    language: Option<String>,

    /// Declare a headset so spoken output cannot be re-captured by the
    /// microphone, leaving recognition on while translations play
    #[arg(long)]
    headset: bool,

    /// Path to the configuration file, without extension
    #[arg(long, default_value = "config/babelcast")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut cfg = Config::load(&args.config)?;
    if let Some(language) = args.language {
        cfg.participant.language = language;
    }
    if args.headset {
        cfg.participant.headset = true;
    }
    cfg.validate()?;

    info!("babelcast v{}", env!("CARGO_PKG_VERSION"));
    info!("Users language is {}", cfg.participant.language);
    info!("Using headset is {}", cfg.participant.headset);

    let identity = ParticipantIdentity::generate();
    info!("Participant identity: {}", identity);

    let transport: Arc<dyn RelayTransport> = Arc::new(NatsTransport::connect(&cfg.nats).await?);
    let translator: Arc<dyn Translator> = Arc::new(AzureTranslator::new(&cfg.translator));
    let synthesizer: Arc<dyn SpeechSynthesizer> =
        Arc::new(ConsoleSynthesizer::new(cfg.participant.language.clone()));
    let recognizer = Box::new(ConsoleRecognizer::new());

    let (listen_tx, listen_rx) = mpsc::channel(8);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let guard = Arc::new(FeedbackGuard::new(
        synthesizer,
        listen_tx,
        cfg.participant.headset,
    ));
    let publisher = UtterancePublisher::new(
        Arc::clone(&transport),
        identity.clone(),
        cfg.participant.language.clone(),
    );
    let relay = TranslationRelay::new(
        translator,
        guard,
        cfg.participant.language.clone(),
        cfg.relay.bypass_same_language,
    );
    let echo = EchoFilter::new(identity);

    let recognition = RecognitionLoop::new(recognizer, publisher, listen_rx, shutdown_rx.clone());
    let subscription = SubscriptionLoop::new(transport, echo, relay, shutdown_rx);

    Supervisor::new(recognition, subscription, shutdown_tx)
        .run()
        .await?;

    Ok(())
}

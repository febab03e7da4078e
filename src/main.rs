use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use giratempo::voice::{AudioPlayback, AudioSink};
use giratempo::{
    Config, Cue, GameDifficulty, GameMode, GameSession, Language, RhymeSource, Services,
    SpeakOutcome,
};

/// Giratempo - spin the wheel, learn the days and months
#[derive(Parser)]
#[command(name = "giratempo", version, about)]
struct Cli {
    /// Game language: it, en, IT, en-US... (overrides GIRATEMPO_LANGUAGE and config)
    #[arg(short, long, value_parser = parse_language)]
    lang: Option<Language>,

    /// Start with narration muted
    #[arg(long)]
    mute: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play the game in the terminal
    Play {
        /// Days of the week or months of the year
        #[arg(short, long, value_enum, default_value_t = GameMode::Days)]
        mode: GameMode,
        /// Quiz difficulty
        #[arg(short, long, value_enum, default_value_t = GameDifficulty::Easy)]
        difficulty: GameDifficulty,
    },
    /// Speak a phrase through the audio cache
    Speak {
        /// Text to speak
        text: String,
    },
    /// Fetch and cache audio for the whole vocabulary
    Preload,
    /// Print the rhyme for a day or month
    Rhyme {
        /// Day or month label (e.g. "Lunedì")
        label: String,
    },
    /// Play a sound cue
    Cue {
        #[arg(value_enum)]
        cue: Cue,
    },
    /// Test speaker output
    TestSpeaker,
    /// Interactive first-run setup
    Setup,
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,giratempo=info",
        1 => "info,giratempo=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Command::Play {
        mode: GameMode::default(),
        difficulty: GameDifficulty::default(),
    });

    match command {
        Command::Setup => return giratempo::setup::run_setup(),
        Command::TestSpeaker => return test_speaker().await,
        _ => {}
    }

    let config = Config::load();
    tracing::debug!(?config, "loaded configuration");

    let language = cli.lang.unwrap_or(config.language);
    let services = Services::from_config(&config)?;
    if cli.mute {
        services.settings.set_muted(true);
    }

    match command {
        Command::Play { mode, difficulty } => play(services, language, mode, difficulty).await,
        Command::Speak { text } => speak(&services, &text, language).await,
        Command::Preload => preload(&services).await,
        Command::Rhyme { label } => {
            println!("{}", services.rhymes.rhyme(&label, language).await);
            Ok(())
        }
        Command::Cue { cue } => {
            match services.audio.play_cue(cue) {
                Some(handle) => handle.await?,
                None => println!("Cues are muted"),
            }
            Ok(())
        }
        Command::Setup | Command::TestSpeaker => Ok(()),
    }
}

/// Warm the cache in the background and start the game loop
async fn play(
    services: Services,
    language: Language,
    mode: GameMode,
    difficulty: GameDifficulty,
) -> anyhow::Result<()> {
    let warm = services.audio.clone();
    let warm_up = tokio::spawn(async move { warm.warm_up(giratempo::game::vocabulary()).await });

    tracing::info!(%language, ?mode, ?difficulty, "starting game");

    let rhymes: Arc<dyn RhymeSource> = services.rhymes;
    let mut session = GameSession::new(services.audio, rhymes, language);
    let result = giratempo::play::run_game(&mut session, mode, difficulty).await;

    warm_up.abort();
    result
}

/// Speak once, waiting for any backfill so it lands in the store
async fn speak(services: &Services, text: &str, language: Language) -> anyhow::Result<()> {
    match services.audio.speak(text, language).await {
        SpeakOutcome::Muted => println!("Muted"),
        SpeakOutcome::Played => println!("Played from cache"),
        SpeakOutcome::Narrated { backfill } => {
            println!("Narrated by the system voice");
            if let Some(handle) = backfill {
                let outcome = handle.await?;
                println!("Backfill: {outcome:?}");
            }
        }
    }
    Ok(())
}

/// Fetch audio for every vocabulary entry
async fn preload(services: &Services) -> anyhow::Result<()> {
    let vocabulary = giratempo::game::vocabulary();
    println!("Preloading {} phrases...", vocabulary.len());

    let report = services.audio.warm_up(vocabulary).await;

    println!("\n---");
    println!("Already in memory:   {}", report.memory);
    println!("Restored from disk:  {}", report.persistent);
    println!("Fetched:             {}", report.fetched);
    println!("Unavailable:         {}", report.unavailable);

    if report.unavailable > 0 {
        println!("\nSome phrases could not be fetched. Check GEMINI_API_KEY or run `giratempo setup`.");
    }

    Ok(())
}

/// Test speaker output with the success chime
async fn test_speaker() -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a three-note chime\n");

    let playback = AudioPlayback::new();
    playback.ensure_running().await?;

    let buffer = Cue::Success.buffer();
    println!(
        "Playing {} samples at {} Hz...",
        buffer.len(),
        buffer.sample_rate
    );

    playback.play(&buffer).await?;

    println!("\n---");
    println!("If you heard the chime, your speakers are working!");
    println!("If you didn't hear anything, check:");
    println!("  1. Run: pactl info | grep 'Default Sink'");
    println!("  2. Run: pactl list sinks short");
    println!("  3. Try: pavucontrol (to check output levels)");

    Ok(())
}

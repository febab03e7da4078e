//! Interactive first-run setup wizard (`giratempo setup`)

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};

use crate::config::file::{
    AudioFileConfig, GameFileConfig, GeminiFileConfig, GiratempoConfigFile, write_config_file,
};
use crate::config::{DEFAULT_TTS_MODEL, DEFAULT_VOICE};

/// Run the interactive setup wizard
///
/// # Errors
///
/// Returns error if user input fails or config cannot be written
pub fn run_setup() -> anyhow::Result<()> {
    println!("Giratempo Setup\n");

    // Load existing config if present
    let existing = crate::config::file::load_config_file();
    let config_path = crate::config::file::config_file_path()
        .unwrap_or_else(|| PathBuf::from("~/.config/giratempo/config.toml"));

    if config_path.exists() {
        println!("Existing config found at {}\n", config_path.display());
    }

    // 1. Language
    let languages = ["Italiano", "English"];
    let default_language = match existing.game.language.as_deref() {
        Some(l) if l.eq_ignore_ascii_case("en") => 1,
        _ => 0,
    };
    let language_idx = Select::new()
        .with_prompt("Game language")
        .items(&languages)
        .default(default_language)
        .interact()?;
    let language = if language_idx == 1 { "EN" } else { "IT" };

    // 2. Gemini API key
    let existing_key = existing.gemini.api_key.as_deref();
    let masked = existing_key.map(mask_key);

    let prompt = masked.as_ref().map_or_else(
        || "Gemini API key (GEMINI_API_KEY, leave blank for offline voices)".to_string(),
        |m| format!("Gemini API key (current: {m}, leave blank to keep)"),
    );

    let api_key_input: String = Input::new()
        .with_prompt(&prompt)
        .allow_empty(true)
        .interact_text()?;

    let api_key = if api_key_input.is_empty() {
        existing_key.map(str::to_string)
    } else {
        Some(api_key_input)
    };

    // 3. Speech model and voice
    let tts_model: String = Input::new()
        .with_prompt("Speech model")
        .default(
            existing
                .gemini
                .tts_model
                .clone()
                .unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string()),
        )
        .interact_text()?;

    let voice: String = Input::new()
        .with_prompt("Voice")
        .default(
            existing
                .gemini
                .voice
                .clone()
                .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
        )
        .interact_text()?;

    // 4. Cue policy
    let cues_honor_mute = Confirm::new()
        .with_prompt("Silence sound effects while muted?")
        .default(existing.audio.cues_honor_mute.unwrap_or(false))
        .interact()?;

    // 5. Build and write config
    let config_file = GiratempoConfigFile {
        gemini: GeminiFileConfig {
            api_key,
            tts_model: Some(tts_model),
            voice: Some(voice),
            ..existing.gemini
        },
        game: GameFileConfig {
            language: Some(language.to_string()),
        },
        audio: AudioFileConfig {
            muted: existing.audio.muted,
            cues_honor_mute: Some(cues_honor_mute),
        },
        storage: existing.storage,
    };

    write_config_file(&config_path, &config_file)?;
    println!("\nConfig written to {}", config_path.display());
    println!("\nSetup complete! Run `giratempo preload` to fetch the voices, then `giratempo play`.");

    Ok(())
}

/// Show only the first and last four characters of a key
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 8 {
        return "****".to_string();
    }
    let head: String = key.chars().take(4).collect();
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("AIzaSyExample1234"), "AIza...1234");
        assert_eq!(mask_key("short"), "****");
    }

    #[test]
    fn test_mask_key_non_ascii() {
        assert_eq!(mask_key("ñññññçççççàààà"), "ññññ...àààà");
        assert_eq!(mask_key("èèèèèèèè"), "****");
    }
}

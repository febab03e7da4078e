//! Fallback narrator using the system speech command

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use super::AudioSettings;
use crate::game::Language;
use crate::{Error, Result};

/// Immediate, uncached speech
///
/// Called synchronously from the playback path; implementations must not
/// block on the utterance finishing.
pub trait Narrator: Send + Sync {
    /// Stop any current utterance and start speaking `text`
    fn say(&self, text: &str, language: Language);
}

/// Speech command flavors found on common desktops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    /// speech-dispatcher (`spd-say`)
    SpeechDispatcher,
    /// `espeak-ng`
    Espeak,
    /// macOS `say`
    Say,
}

impl Backend {
    const CANDIDATES: [(Self, &'static str); 3] = [
        (Self::SpeechDispatcher, "spd-say"),
        (Self::Espeak, "espeak-ng"),
        (Self::Say, "say"),
    ];

    /// Build the command line speaking `text` in `locale`
    fn command(self, program: &Path, text: &str, locale: &str) -> Command {
        let mut cmd = Command::new(program);
        let lang = locale.split('-').next().unwrap_or(locale);
        match self {
            // --wait keeps the client alive for the utterance
            Self::SpeechDispatcher => {
                cmd.args(["--wait", "-l", lang, "-r", "0", "--"]).arg(text);
            }
            Self::Espeak => {
                cmd.args(["-v", lang, "-s", "160", "--"]).arg(text);
            }
            Self::Say => {
                cmd.args(["-v", say_voice(locale)]).arg(text);
            }
        }
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        cmd
    }

    /// Command that drops whatever the speech server still has queued
    fn cancel(self, program: &Path) -> Option<Command> {
        match self {
            Self::SpeechDispatcher => {
                let mut cmd = Command::new(program);
                cmd.arg("-C").stdout(Stdio::null()).stderr(Stdio::null());
                Some(cmd)
            }
            // Killing the child stops these
            Self::Espeak | Self::Say => None,
        }
    }
}

/// Stock macOS voice for a locale
fn say_voice(locale: &str) -> &'static str {
    if locale.starts_with("it") { "Alice" } else { "Samantha" }
}

/// Narrates through whichever system speech command is installed
pub struct SystemNarrator {
    backend: Option<(Backend, PathBuf)>,
    settings: AudioSettings,
    current: Mutex<Option<Child>>,
}

impl std::fmt::Debug for SystemNarrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemNarrator")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl SystemNarrator {
    /// Detect the system speech command
    #[must_use]
    pub fn new(settings: AudioSettings) -> Self {
        let backend = Backend::CANDIDATES
            .iter()
            .find_map(|(backend, bin)| which::which(bin).ok().map(|path| (*backend, path)));

        match &backend {
            Some((kind, path)) => {
                tracing::debug!(backend = ?kind, path = %path.display(), "system narrator found");
            }
            None => tracing::warn!("no system speech command found (tried spd-say, espeak-ng, say)"),
        }

        Self {
            backend,
            settings,
            current: Mutex::new(None),
        }
    }

    fn speak(&self, text: &str, language: Language) -> Result<()> {
        let (backend, program) = self
            .backend
            .as_ref()
            .ok_or_else(|| Error::Narrator("no system speech command".to_string()))?;

        let mut current = self
            .current
            .lock()
            .map_err(|_| Error::Narrator("narrator state poisoned".to_string()))?;

        if let Some(mut previous) = current.take() {
            if matches!(previous.try_wait(), Ok(None)) {
                let _ = previous.kill();
            }
            let _ = previous.wait();

            if let Some(mut cancel) = backend.cancel(program)
                && let Err(e) = cancel.status()
            {
                tracing::debug!(error = %e, "speech cancel failed");
            }
        }

        let child = backend.command(program, text, language.locale()).spawn()?;
        *current = Some(child);
        Ok(())
    }
}

impl Narrator for SystemNarrator {
    fn say(&self, text: &str, language: Language) {
        if self.settings.is_muted() {
            return;
        }

        tracing::debug!(text, locale = language.locale(), "narrating with system speech");
        if let Err(e) = self.speak(text, language) {
            tracing::warn!(error = %e, "system narration failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_espeak_command_line() {
        let cmd = Backend::Espeak.command(Path::new("espeak-ng"), "Lunedì", "it-IT");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["-v", "it", "-s", "160", "--", "Lunedì"]);
    }

    #[test]
    fn test_spd_say_command_line() {
        let cmd = Backend::SpeechDispatcher.command(Path::new("spd-say"), "Monday", "en-US");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["--wait", "-l", "en", "-r", "0", "--", "Monday"]);
    }

    #[test]
    fn test_say_picks_voice_for_locale() {
        let cmd = Backend::Say.command(Path::new("say"), "Lunedì", "it-IT");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["-v", "Alice", "Lunedì"]);

        let cmd = Backend::Say.command(Path::new("say"), "Monday", "en-US");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["-v", "Samantha", "Monday"]);
    }

    #[test]
    fn test_only_speech_dispatcher_needs_cancel() {
        let cancel = Backend::SpeechDispatcher
            .cancel(Path::new("spd-say"))
            .unwrap();
        let args: Vec<_> = cancel.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["-C"]);

        assert!(Backend::Espeak.cancel(Path::new("espeak-ng")).is_none());
        assert!(Backend::Say.cancel(Path::new("say")).is_none());
    }

    #[test]
    fn test_muted_narrator_is_silent() {
        let settings = AudioSettings::new(true, false);
        let narrator = SystemNarrator::new(settings);

        narrator.say("Monday", Language::En);
        assert!(narrator.current.lock().unwrap().is_none());
    }
}

//! Rhyme reward generation
//!
//! Asks the text model for a tiny rhyme about the winning day or month, and
//! falls back to a built-in rhyme table whenever that is not possible.

use async_trait::async_trait;

use crate::Result;
use crate::game::{Language, strings};
use crate::gemini::{GeminiClient, GenerateRequest};

/// Source of generated rhymes
#[async_trait]
pub trait RhymeSource: Send + Sync {
    /// A short rhyme about `label`; never fails
    async fn rhyme(&self, label: &str, language: Language) -> String;
}

static RHYMES_IT: [(&str, &str); 19] = [
    ("Lunedì", "Lunedì con il sole o con l'ombrello, inizia la settimana ed è tutto bello!"),
    ("Martedì", "Martedì è un giorno birichino, saltiamo insieme come un pulcino!"),
    ("Mercoledì", "Mercoledì è proprio a metà, portiamo a tutti tanta felicità!"),
    ("Giovedì", "Giovedì è il giorno del gioco, facciamo un ballo per un poco!"),
    ("Venerdì", "Venerdì arriva in un momento, siamo felici e pieni di talento!"),
    ("Sabato", "Sabato è festa e si può riposare, corriamo fuori insieme a giocare!"),
    ("Domenica", "Domenica dolce come un biscotto, giochiamo insieme di sopra e di sotto!"),
    ("Gennaio", "Gennaio con il ghiaccio e il cappello, un pupazzo di neve è sempre bello!"),
    ("Febbraio", "Febbraio è corto e molto carino, mette la maschera ogni bambino!"),
    ("Marzo", "Marzo è pazzerello e divertente, fiorisce il prato e ride la gente!"),
    ("Aprile", "Aprile dolce dormire sul prato, un fiore nuovo è appena nato!"),
    ("Maggio", "Maggio è un raggio di sole splendente, tutto è verde e molto ridente!"),
    ("Giugno", "Giugno porta la scuola alla fine, tuffi nel mare e giochi senza confine!"),
    ("Luglio", "Luglio col sole che scotta la pelle, mangiamo il gelato sotto le stelle!"),
    ("Agosto", "Agosto è caldo e ci fa sguazzare, quanto è bello restare sul mare!"),
    ("Settembre", "Settembre riporta lo zaino in spalla, vola felice una farfalla!"),
    ("Ottobre", "Ottobre con le castagne nel cesto, il sole va a nanna molto presto!"),
    ("Novembre", "Novembre con la pioggia e il vento, leggiamo un libro in un momento!"),
    ("Dicembre", "Dicembre arriva col gran festone, Babbo Natale è un bel vecchione!"),
];

static RHYMES_EN: [(&str, &str); 19] = [
    ("Monday", "Monday is here with a sunny start, keep a big smile inside your heart!"),
    ("Tuesday", "Tuesday is fun and full of play, let's hop and skip all through the day!"),
    ("Wednesday", "Wednesday is middle, right in the spot, let's give the world all that we've got!"),
    ("Thursday", "Thursday is great, let's dance and sing, joy to everyone we shall bring!"),
    ("Friday", "Friday is fast, the week is near done, let's go outside and have some fun!"),
    ("Saturday", "Saturday means it's time to rest, being with friends is simply the best!"),
    ("Sunday", "Sunday is sweet like a chocolate cake, let's see what magic we can make!"),
    ("January", "January's cold with ice and snow, wear your boots and off we go!"),
    ("February", "February's short and very sweet, love is the magic on every street!"),
    ("March", "March is windy, watch the kite fly, high up above in the bright blue sky!"),
    ("April", "April showers bring flowers to see, jump in a puddle with you and me!"),
    ("May", "May is bright with flowers so fair, sweet perfume is in the air!"),
    ("June", "June is sunny, school is all done, hello to summer and hello to fun!"),
    ("July", "July is hot, let's swim in the pool, eating ice cream to keep us cool!"),
    ("August", "August is warm, the beach is so wide, let's catch a wave on the ocean tide!"),
    ("September", "September is back with a school bag so new, learning is fun for me and for you!"),
    ("October", "October brings leaves of orange and red, wear a funny hat upon your head!"),
    ("November", "November is cozy, stay inside warm, safe from the wind and the winter storm!"),
    ("December", "December is magic, lights everywhere, joy and kindness are in the air!"),
];

/// Built-in rhyme for an exact label
#[must_use]
pub fn local_rhyme(label: &str, language: Language) -> Option<&'static str> {
    let table: &[(&str, &str)] = match language {
        Language::It => &RHYMES_IT,
        Language::En => &RHYMES_EN,
    };
    table.iter().find(|(l, _)| *l == label).map(|(_, rhyme)| *rhyme)
}

/// Built-in rhyme, or a templated cheer when the label is unknown
#[must_use]
pub fn fallback_rhyme(label: &str, language: Language) -> String {
    local_rhyme(label, language).map_or_else(
        || format!("{} {label}!", strings(language).rhyme_fallback),
        str::to_string,
    )
}

/// Prompt for a child-sized rhyme
#[must_use]
pub fn rhyme_prompt(label: &str, language: Language) -> String {
    match language {
        Language::It => format!("Scrivi una rima brevissima (max 10 parole) per un bambino su: \"{label}\"."),
        Language::En => format!("Write a tiny rhyme (max 10 words) for a kid about: \"{label}\"."),
    }
}

/// Generates rhymes with a Gemini text model
#[derive(Debug, Clone)]
pub struct RhymeGenerator {
    client: GeminiClient,
    model: String,
}

impl RhymeGenerator {
    /// Create a generator sharing `client`
    #[must_use]
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    async fn generate_remote(&self, label: &str, language: Language) -> Result<String> {
        let prompt = rhyme_prompt(label, language);
        let response = self
            .client
            .generate(&self.model, &GenerateRequest::text(&prompt))
            .await?;

        response
            .text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| crate::Error::Rhyme("empty response".to_string()))
    }

    /// A rhyme about `label`, remote when possible
    pub async fn generate(&self, label: &str, language: Language) -> String {
        if !self.client.has_credential() {
            return fallback_rhyme(label, language);
        }

        match self.generate_remote(label, language).await {
            Ok(rhyme) => {
                tracing::debug!(label, language = %language, "rhyme generated");
                rhyme
            }
            Err(e) => {
                tracing::warn!(label, error = %e, "rhyme generation failed, using local rhyme");
                fallback_rhyme(label, language)
            }
        }
    }
}

#[async_trait]
impl RhymeSource for RhymeGenerator {
    async fn rhyme(&self, label: &str, language: Language) -> String {
        self.generate(label, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;
    use crate::game::{GameMode, items};

    #[test]
    fn test_every_label_has_a_rhyme() {
        for language in Language::ALL {
            for mode in GameMode::ALL {
                for item in items(mode, language) {
                    assert!(
                        local_rhyme(item.label, language).is_some(),
                        "missing rhyme for {}",
                        item.label
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(local_rhyme("giovedì", Language::It).is_none());
        assert!(local_rhyme("Giovedì", Language::En).is_none());
    }

    #[test]
    fn test_template_for_unknown_label() {
        assert_eq!(fallback_rhyme("Natale", Language::It), "Evviva Natale!");
        assert_eq!(fallback_rhyme("Christmas", Language::En), "Hooray for Christmas!");
    }

    #[test]
    fn test_prompts() {
        assert_eq!(
            rhyme_prompt("May", Language::En),
            "Write a tiny rhyme (max 10 words) for a kid about: \"May\"."
        );
        assert!(rhyme_prompt("Maggio", Language::It).contains("\"Maggio\""));
    }

    #[tokio::test]
    async fn test_no_credential_uses_local_table() {
        let config = GeminiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GeminiConfig::default()
        };
        let generator = RhymeGenerator::new(GeminiClient::new(&config), "unused");

        assert_eq!(
            generator.generate("Giovedì", Language::It).await,
            "Giovedì è il giorno del gioco, facciamo un ballo per un poco!"
        );
    }
}

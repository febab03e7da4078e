//! Interactive game loop (`giratempo play`)

use dialoguer::Select;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::{GameDifficulty, GameMode, GameSession, GameState, Strings, strings};

/// Play rounds until the player stops
///
/// # Errors
///
/// Returns error if terminal input fails
pub async fn run_game(
    session: &mut GameSession,
    mode: GameMode,
    difficulty: GameDifficulty,
) -> anyhow::Result<()> {
    let mut rng = StdRng::from_entropy();
    session.set_difficulty(difficulty);
    session.choose_mode(mode).await;

    loop {
        let text = strings(session.language());

        session.start();
        wait_for_spin(session, text)?;

        let winner = session.spin(&mut rng).await;
        println!("\n  >>> {} <<<\n", winner.label);

        let options = session.options(&mut rng);
        let labels: Vec<&str> = options.iter().map(|o| o.label).collect();

        while session.state() == GameState::Question {
            let prev = Select::new()
                .with_prompt(text.before)
                .items(&labels)
                .default(0)
                .interact()?;
            session.pick(labels[prev]).await;

            let next = Select::new()
                .with_prompt(text.after)
                .items(&labels)
                .default(0)
                .interact()?;
            session.pick(labels[next]).await;

            if session.answer(labels[prev], labels[next]) {
                println!("{}", text.correct);
            } else {
                println!("{}", text.wrong);
                session.clear_picks();
            }
        }

        println!("{}", text.writing_magic);
        if let Some(rhyme) = session.reward().await {
            println!("\n  {rhyme}\n");
        }

        let again = after_round(session, text).await?;
        session.reset();
        if !again {
            return Ok(());
        }
    }
}

/// Spin prompt, with the mute switch alongside
fn wait_for_spin(session: &GameSession, text: &Strings) -> anyhow::Result<()> {
    loop {
        let mute_label = if session.audio().settings().is_muted() {
            text.unmute
        } else {
            text.mute
        };

        let choice = Select::new()
            .with_prompt(text.spin)
            .items(&[text.spin, mute_label])
            .default(0)
            .interact()?;

        if choice == 0 {
            return Ok(());
        }
        session.toggle_mute();
    }
}

/// Replay the rhyme as often as asked; `true` to play another round
async fn after_round(session: &GameSession, text: &Strings) -> anyhow::Result<bool> {
    loop {
        let choice = Select::new()
            .with_prompt(text.play_again)
            .items(&[text.play_again, text.listen_again, text.stop])
            .default(0)
            .interact()?;

        match choice {
            0 => return Ok(true),
            1 => {
                session.replay_rhyme().await;
            }
            _ => return Ok(false),
        }
    }
}

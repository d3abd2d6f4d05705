//! siren - terminal dub siren trigger surface
//!
//! Run with: cargo run
//!
//! Space or Enter fires a randomized siren; 1-4 force a waveform; q quits.
//! The audio context is opened once at startup and torn down on every exit
//! path (including panics, via the engine's Drop).

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

use dub_siren::dsp::oscillator::Waveform;
use dub_siren::{params, SirenEngine};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let mut engine = SirenEngine::new();
    engine.ensure_context();

    println!("space/enter: random siren   1-4: sine/square/sawtooth/triangle   p: pause   q: quit");

    terminal::enable_raw_mode()?;
    let result = run(&mut engine);
    terminal::disable_raw_mode()?;

    engine.teardown();
    result
}

fn run(engine: &mut SirenEngine) -> color_eyre::Result<()> {
    loop {
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char(' ') | KeyCode::Enter => engine.trigger(params::random_siren()),
            KeyCode::Char('1') => engine.trigger(params::random_siren().waveform(Waveform::Sine)),
            KeyCode::Char('2') => engine.trigger(params::random_siren().waveform(Waveform::Square)),
            KeyCode::Char('3') => {
                engine.trigger(params::random_siren().waveform(Waveform::Sawtooth))
            }
            KeyCode::Char('4') => {
                engine.trigger(params::random_siren().waveform(Waveform::Triangle))
            }
            // Suspend playback; the next trigger resumes it implicitly
            KeyCode::Char('p') => engine.suspend(),
            _ => {}
        }
    }
}

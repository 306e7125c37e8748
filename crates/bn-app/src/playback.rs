use std::time::{Duration, Instant};

use anyhow::Result;
use bn_anim::{AnimationConfig, RevealScheduler, SessionState};
use bn_core::grid::StyledGrid;
use bn_render::{ColorDepth, TerminalPresenter};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

/// Joue la séquence de révélation plein écran.
///
/// Cadence sans dérive : la frame n est présentée à `start + n·dt`, jamais
/// relativement à la frame précédente, donc une frame lente ne décale pas
/// les suivantes. Toute touche interrompt ; un resize force un redraw
/// complet de la frame suivante.
///
/// Rend la main au menu avec l'état final (`Finished` ou `Cancelled`).
///
/// # Errors
/// Retourne une erreur si une écriture terminal échoue.
pub fn play(
    terminal: &mut DefaultTerminal,
    target: StyledGrid,
    config: AnimationConfig,
    origin: (u16, u16),
) -> Result<SessionState> {
    terminal.clear()?;
    let fps = config.fps.max(1);
    let dt = Duration::from_secs_f64(1.0 / f64::from(fps));

    let mut presenter = TerminalPresenter::new(std::io::stdout(), ColorDepth::detect(), origin);
    let mut scheduler = RevealScheduler::new(target, config);
    let start = Instant::now();
    let mut emitted = 0u32;

    'frames: while let Some(frame) = scheduler.next_frame() {
        presenter.present(&frame)?;
        emitted += 1;

        let deadline = start + dt.saturating_mul(emitted);
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if event::poll(deadline - now)? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        kind: KeyEventKind::Press,
                        ..
                    }) => {
                        scheduler.cancel();
                        break 'frames;
                    }
                    Event::Resize(..) => presenter.invalidate(),
                    _ => {}
                }
            }
        }
    }

    if scheduler.state() == SessionState::Finished {
        hold_until_keypress(&mut presenter, &mut scheduler)?;
    }

    terminal.clear()?;
    Ok(scheduler.state())
}

/// Tient la frame finale à l'écran jusqu'à une touche, en survivant aux
/// resize.
fn hold_until_keypress(
    presenter: &mut TerminalPresenter<std::io::Stdout>,
    scheduler: &mut RevealScheduler,
) -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(KeyEvent {
                    kind: KeyEventKind::Press,
                    ..
                }) => return Ok(()),
                Event::Resize(..) => {
                    presenter.invalidate();
                    presenter.present(scheduler.target())?;
                }
                _ => {}
            }
        }
    }
}

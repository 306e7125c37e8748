use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use bn_anim::{AnimationConfig, RevealScheduler, SessionState};
use bn_core::charset::CHARSET_KEYS;
use bn_core::error::{ExportError, SourceError};
use bn_core::gradient::{DIRECTION_NAMES, GRADIENT_NAMES};
use bn_core::grid::CharGrid;
use bn_core::grid::StyledGrid;
use bn_core::profile::{MODE_NAMES, Profile};
use bn_core::theme::{THEME_NAMES, apply_theme};
use bn_export::{ExportOutcome, export_animation};
use bn_source::{FontCatalog, render_image, render_text};
use bn_style::{StyleSpec, compose};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::playback;
use crate::ui;

/// Effet d'une touche du menu sur la session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Le profil a changé, les grilles dérivées sont à reconstruire.
    Redraw,
    /// Lancer la lecture plein écran.
    Play,
    /// Lancer un export en arrière-plan.
    Export,
    /// Persister le profil.
    Save,
    /// Quitter l'application.
    Quit,
    /// Touche sans effet.
    None,
}

/// Transition pure d'une touche : mute le profil, ne touche ni au
/// terminal ni au disque. Toute la logique des raccourcis est ici, donc
/// testable sans TUI.
pub fn apply_key(
    profile: &mut Profile,
    catalog: &FontCatalog,
    theme_idx: &mut usize,
    code: KeyCode,
) -> KeyAction {
    match code {
        KeyCode::Char('f') => {
            profile.font = catalog.next_after(&profile.font).to_string();
            KeyAction::Redraw
        }
        KeyCode::Char('g') => {
            profile.gradient = cycle(GRADIENT_NAMES, &profile.gradient);
            KeyAction::Redraw
        }
        KeyCode::Char('d') => {
            profile.gradient_dir = cycle(DIRECTION_NAMES, &profile.gradient_dir);
            KeyAction::Redraw
        }
        KeyCode::Char('m') => {
            profile.mode = cycle(MODE_NAMES, &profile.mode);
            KeyAction::Redraw
        }
        KeyCode::Char('k') => {
            profile.charset_key = cycle(CHARSET_KEYS, &profile.charset_key);
            KeyAction::Redraw
        }
        KeyCode::Char('c') => {
            profile.auto_center = !profile.auto_center;
            KeyAction::Redraw
        }
        KeyCode::Char('o') => {
            profile.outline = !profile.outline;
            KeyAction::Redraw
        }
        KeyCode::Char('s') => {
            profile.shadow = !profile.shadow;
            KeyAction::Redraw
        }
        KeyCode::Char('n') => {
            profile.monochrome = !profile.monochrome;
            KeyAction::Redraw
        }
        KeyCode::Char('t') => {
            *theme_idx = (*theme_idx + 1) % THEME_NAMES.len();
            apply_theme(profile, THEME_NAMES[*theme_idx]);
            KeyAction::Redraw
        }
        KeyCode::Char('p') | KeyCode::Enter => KeyAction::Play,
        KeyCode::Char('x') => KeyAction::Export,
        KeyCode::Char('w') => KeyAction::Save,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

/// Valeur suivante du cycle (wrap). Valeur absente → première.
fn cycle(names: &[&str], current: &str) -> String {
    let idx = names
        .iter()
        .position(|n| *n == current)
        .map_or(0, |i| (i + 1) % names.len());
    names[idx].to_string()
}

/// Rend la grille source selon le profil : image si `use_image`, FIGlet
/// sinon.
///
/// # Errors
/// Propage l'erreur de la source ; l'appelant garde la grille précédente.
pub fn build_grid(profile: &Profile, catalog: &FontCatalog) -> Result<CharGrid, SourceError> {
    if profile.use_image
        && let Some(ref path) = profile.image_path
    {
        return render_image(Path::new(path), profile.image_width);
    }
    render_text(
        &profile.message,
        &profile.font,
        profile.width,
        &profile.align,
        catalog,
    )
}

/// Export complet sans session interactive (`--export`).
///
/// # Errors
/// Échec de la source, de la rasterisation ou de l'encodeur.
pub fn headless_export(
    profile: &Profile,
    catalog: &FontCatalog,
    path: &Path,
) -> Result<ExportOutcome> {
    let grid = build_grid(profile, catalog)?;
    let styled = compose(&grid, &StyleSpec::from_profile(profile));
    let config = AnimationConfig::from_profile(profile);
    let fps = config.fps;
    let frames = RevealScheduler::new(styled, config).materialize();
    Ok(export_animation(&frames, fps, path)?)
}

/// État de l'application : profil courant, grilles dérivées, export en
/// cours. Les grilles sont reconstruites à chaque mutation du profil,
/// jamais pendant le dessin.
pub struct App {
    pub profile: Profile,
    pub profile_path: PathBuf,
    pub catalog: FontCatalog,
    /// Grille source dérivée (conservée si la source suivante échoue).
    pub grid: CharGrid,
    /// Grille stylée dérivée, affichée dans l'aperçu.
    pub styled: StyledGrid,
    /// Ligne de statut transiente du menu.
    pub status: String,
    theme_idx: usize,
    export_rx: Option<flume::Receiver<Result<ExportOutcome, ExportError>>>,
    quitting: bool,
}

impl App {
    #[must_use]
    pub fn new(profile: Profile, profile_path: PathBuf, catalog: FontCatalog) -> Self {
        let mut app = Self {
            profile,
            profile_path,
            catalog,
            grid: CharGrid::new(0, 0),
            styled: StyledGrid::new(0, 0),
            status: "prêt".to_string(),
            theme_idx: 0,
            export_rx: None,
            quitting: false,
        };
        app.rebuild();
        app
    }

    /// Boucle principale du menu.
    ///
    /// # Errors
    /// Retourne une erreur si une opération terminal échoue.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            if self.quitting {
                break;
            }
            self.poll_export();
            terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) = event::read()?
            {
                self.handle_key(code, &mut terminal)?;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, terminal: &mut DefaultTerminal) -> Result<()> {
        match apply_key(&mut self.profile, &self.catalog, &mut self.theme_idx, code) {
            KeyAction::Redraw => {
                self.profile.clamp_all();
                self.rebuild();
            }
            KeyAction::Play => self.play(terminal)?,
            KeyAction::Export => self.start_export(),
            KeyAction::Save => match self.profile.save(&self.profile_path) {
                Ok(()) => {
                    self.status = format!("profil sauvegardé : {}", self.profile_path.display());
                }
                Err(e) => {
                    log::warn!("sauvegarde du profil impossible : {e}");
                    self.status = format!("sauvegarde échouée : {e}");
                }
            },
            KeyAction::Quit => self.quitting = true,
            KeyAction::None => {}
        }
        Ok(())
    }

    /// Reconstruit les grilles dérivées. Une source en échec conserve la
    /// grille précédente et le signale dans le statut.
    fn rebuild(&mut self) {
        match build_grid(&self.profile, &self.catalog) {
            Ok(grid) => {
                self.grid = grid;
                self.status = summary_line(&self.profile);
            }
            Err(e) => {
                log::warn!("source indisponible : {e}");
                self.status = format!("source indisponible : {e}");
            }
        }
        self.styled = compose(&self.grid, &StyleSpec::from_profile(&self.profile));
    }

    /// Lecture plein écran. La grille est re-clippée aux dimensions
    /// réelles du terminal au moment du lancement.
    fn play(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let size = terminal.size()?;
        let grid = self.grid.clipped(size.width);
        let styled = compose(&grid, &StyleSpec::from_profile(&self.profile));
        let origin = if self.profile.auto_center {
            (
                size.width.saturating_sub(styled.width) / 2,
                size.height.saturating_sub(styled.height) / 2,
            )
        } else {
            (0, 0)
        };
        let config = AnimationConfig::from_profile(&self.profile);
        let outcome = playback::play(terminal, styled, config, origin)?;
        self.status = match outcome {
            SessionState::Cancelled => "lecture interrompue".to_string(),
            _ => "lecture terminée".to_string(),
        };
        Ok(())
    }

    /// Export en arrière-plan : matérialisation et encodage sur un thread
    /// dédié, résultat récupéré par polling dans la boucle du menu.
    fn start_export(&mut self) {
        if self.export_rx.is_some() {
            self.status = "export déjà en cours".to_string();
            return;
        }
        let path = PathBuf::from(
            self.profile
                .export_path
                .clone()
                .unwrap_or_else(|| "banscii.gif".to_string()),
        );
        let styled = self.styled.clone();
        let config = AnimationConfig::from_profile(&self.profile);
        let fps = config.fps;
        let (tx, rx) = flume::bounded(1);
        let thread_path = path.clone();
        std::thread::spawn(move || {
            let frames = RevealScheduler::new(styled, config).materialize();
            let _ = tx.send(export_animation(&frames, fps, &thread_path));
        });
        self.export_rx = Some(rx);
        self.status = format!("export vers {} en cours", path.display());
    }

    fn poll_export(&mut self) {
        if let Some(ref rx) = self.export_rx
            && let Ok(result) = rx.try_recv()
        {
            self.status = match result {
                Ok(outcome) => {
                    let mut line = format!(
                        "export terminé : {} ({} frames)",
                        outcome.path.display(),
                        outcome.frames
                    );
                    if outcome.software_fallback
                        && let Some(encoder) = outcome.encoder
                    {
                        line.push_str(&format!(" [encodeur logiciel {encoder}]"));
                    }
                    line
                }
                Err(e) => {
                    log::warn!("export échoué : {e}");
                    format!("export échoué : {e}")
                }
            };
            self.export_rx = None;
        }
    }
}

/// Résumé une ligne du profil pour le statut.
fn summary_line(profile: &Profile) -> String {
    format!(
        "{} · {} · {}/{} · {} fps · graine {}",
        profile.font, profile.mode, profile.gradient, profile.gradient_dir, profile.fps, profile.seed
    )
}

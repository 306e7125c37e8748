use anyhow::Result;
use bn_core::profile::Profile;
use bn_source::FontCatalog;
use clap::Parser;

pub mod app;
pub mod cli;
pub mod playback;
pub mod ui;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger le profil
    let profile_path = cli.profile.clone().unwrap_or_else(Profile::default_path);
    let mut profile = Profile::load_or_default(&profile_path);

    // 3b. Appliquer les overrides CLI
    if let Some(ref message) = cli.message {
        profile.message = message.clone();
        profile.use_image = false;
    }
    if let Some(ref image) = cli.image {
        profile.use_image = true;
        profile.image_path = Some(image.to_string_lossy().into_owned());
    }
    profile.clamp_all();

    // 4. Découvrir les polices FIGlet
    let catalog = FontCatalog::discover(&cli.fonts);

    // 5. Export direct sans session interactive
    if let Some(ref export) = cli.export {
        let outcome = app::headless_export(&profile, &catalog, export)?;
        println!(
            "export : {} ({} frames)",
            outcome.path.display(),
            outcome.frames
        );
        if outcome.software_fallback
            && let Some(encoder) = outcome.encoder
        {
            println!("encodeur matériel indisponible, {encoder} utilisé");
        }
        return Ok(());
    }

    // 6. Initialiser le terminal ratatui et lancer la session
    let terminal = ratatui::init();
    let mut app_instance = app::App::new(profile, profile_path, catalog);
    let result = app_instance.run(terminal);

    // 7. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();
    result
}

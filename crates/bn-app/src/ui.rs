use bn_render::canvas::render_grid;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;

const HELP_LINE: &str = " f police  g gradient  d direction  m mode  k charset  o contour  \
s ombre  c centrage  n mono  t thème  p lecture  x export  w sauvegarder  q quitter";

/// Dessine le menu : entête, aperçu stylé, statut, barre de raccourcis.
pub fn draw(frame: &mut Frame, app: &App) {
    let [header, preview, status, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(header_line(app), header);

    let block = Block::bordered().title(" aperçu ");
    let inner = block.inner(preview);
    frame.render_widget(block, preview);
    render_grid(frame.buffer_mut(), preview_area(app, inner), &app.styled);

    frame.render_widget(
        Paragraph::new(app.status.as_str()).style(Style::new().dim()),
        status,
    );
    frame.render_widget(
        Paragraph::new(HELP_LINE).style(Style::new().fg(Color::DarkGray)),
        help,
    );
}

/// Zone d'aperçu : centrée si le profil le demande, coin haut-gauche sinon.
fn preview_area(app: &App, inner: Rect) -> Rect {
    if !app.profile.auto_center {
        return inner;
    }
    let w = app.styled.width.min(inner.width);
    let h = app.styled.height.min(inner.height);
    Rect {
        x: inner.x + (inner.width - w) / 2,
        y: inner.y + (inner.height - h) / 2,
        width: w,
        height: h,
    }
}

fn header_line(app: &App) -> Paragraph<'_> {
    let p = &app.profile;
    let flag = |on: bool, label: &'static str| {
        if on {
            Span::styled(format!(" {label}"), Style::new().fg(Color::Green))
        } else {
            Span::styled(format!(" {label}"), Style::new().fg(Color::DarkGray))
        }
    };
    let line = Line::from(vec![
        Span::styled(" banscii ", Style::new().bold().reversed()),
        Span::raw(format!(
            " {} · {} · {}/{} · {} fps · {:.1}s · graine {}",
            p.font, p.mode, p.gradient, p.gradient_dir, p.fps, p.duration, p.seed
        )),
        flag(p.outline, "contour"),
        flag(p.shadow, "ombre"),
        flag(p.monochrome, "mono"),
    ]);
    Paragraph::new(line)
}

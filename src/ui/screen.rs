//! ratatui presentation of the arena
//!
//! Arena space (y down, 1024x576 by default) maps onto a braille canvas with
//! y up. Fighters draw as their sprite box with the body box inside, labelled
//! with action and frame.

use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect as Area};
use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line, Rectangle};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use ratatui::{Frame, Terminal};

use crate::core::config::ArenaConfig;
use crate::core::error::{DuelError, Result};
use crate::core::types::{Rect, Slot};
use crate::render::colors::{self, Color};
use crate::render::{HealthBand, Overlay, Presentation, SpriteFrame};
use crate::ui::state::Scene;

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb(r, g, b)
}

/// Presentation sink drawing to any ratatui backend
pub struct TerminalPresentation<B: Backend> {
    terminal: Terminal<B>,
    scene: Scene,
}

impl<B: Backend> TerminalPresentation<B> {
    pub fn new(terminal: Terminal<B>, scene: Scene) -> Self {
        Self { terminal, scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Presentation for TerminalPresentation<B> {
    fn render_background(&mut self, arena: &ArenaConfig) {
        self.scene.arena = arena.clone();
        self.scene.sprites.clear();
        self.scene.hitboxes.clear();
    }

    fn render_sprite(&mut self, sprite: &SpriteFrame) {
        self.scene.sprites.push(sprite.clone());
    }

    fn render_hitbox(&mut self, slot: Slot, rect: Rect) {
        self.scene.hitboxes.push((slot, rect));
    }

    fn render_overlay(&mut self, overlay: &Overlay) {
        self.scene.overlay = *overlay;
    }

    fn set_health_display(&mut self, slot: Slot, health: u8, band: HealthBand) {
        self.scene.health[slot.index()] = (health, band);
    }

    fn set_score_display(&mut self, slot: Slot, score: u32) {
        self.scene.scores[slot.index()] = score;
    }

    fn show_result_screen(&mut self, winner_label: &str) {
        self.scene.result = Some(winner_label.to_string());
    }

    fn hide_result_screen(&mut self) {
        self.scene.result = None;
    }

    fn finish_frame(&mut self) -> Result<()> {
        let scene = &self.scene;
        self.terminal
            .draw(|frame| draw_scene(frame, scene))
            .map_err(|e| DuelError::Terminal(format!("draw failed: {e}")))?;
        Ok(())
    }
}

/// Lay out and draw one full frame
pub fn draw_scene(frame: &mut Frame, scene: &Scene) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.size());

    draw_hud(frame, rows[0], scene);
    draw_arena(frame, rows[1], scene);
    draw_footer(frame, rows[2], scene);
    draw_overlay(frame, rows[1], scene);
}

fn draw_hud(frame: &mut Frame, area: Area, scene: &Scene) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for slot in Slot::ALL {
        let (health, band) = scene.health[slot.index()];
        let title = format!(
            " {}  wins: {} ",
            scene.names[slot.index()],
            scene.scores[slot.index()]
        );
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(Style::default().fg(term_color(band.color())))
            .percent(u16::from(health.min(100)))
            .label(format!("{health}"));
        frame.render_widget(gauge, columns[slot.index()]);
    }
}

fn draw_arena(frame: &mut Frame, area: Area, scene: &Scene) {
    let width = f64::from(scene.arena.width);
    let height = f64::from(scene.arena.height);
    // Canvas y grows upward
    let flip = |y: f32, h: f32| height - f64::from(y) - f64::from(h);
    let ground = height - f64::from(scene.arena.ground_y());

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .background_color(term_color(colors::BACKGROUND))
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            ctx.draw(&Line {
                x1: 0.0,
                y1: ground,
                x2: width,
                y2: ground,
                color: term_color(colors::GROUND),
            });

            for sprite in &scene.sprites {
                let color = term_color(colors::slot_color(sprite.slot));
                let body = sprite.body;
                ctx.draw(&Rectangle {
                    x: f64::from(body.x),
                    y: flip(body.y, body.height),
                    width: f64::from(body.width),
                    height: f64::from(body.height),
                    color,
                });

                let facing = if sprite.mirrored { "<" } else { ">" };
                ctx.print(
                    f64::from(body.x),
                    flip(body.y, 0.0) + 12.0,
                    TextLine::from(Span::styled(
                        format!(
                            "{facing} {} {}/{}",
                            sprite.action.name(),
                            sprite.frame + 1,
                            sprite.frame_count
                        ),
                        Style::default().fg(color),
                    )),
                );
            }

            for (slot, rect) in &scene.hitboxes {
                ctx.draw(&Rectangle {
                    x: f64::from(rect.x),
                    y: flip(rect.y, rect.height),
                    width: f64::from(rect.width),
                    height: f64::from(rect.height),
                    color: term_color(colors::slot_color(*slot).darken(0.6)),
                });
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_footer(frame: &mut Frame, area: Area, scene: &Scene) {
    let mut lines: Vec<TextLine> = scene
        .recent(2)
        .map(|entry| TextLine::from(format!("[{:>6}] {}", entry.tick, entry.message)))
        .collect();
    lines.push(TextLine::from(vec![
        Span::styled(
            "←/→ move  ↑ jump  space attack  esc pause  enter confirm  q quit",
            Style::default().fg(TermColor::DarkGray),
        ),
        Span::raw("   "),
        Span::raw(scene.status.clone()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(Block::default()), area);
}

/// Centered box of the given size inside `area`
fn centered(area: Area, width: u16, height: u16) -> Area {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Area::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_overlay(frame: &mut Frame, area: Area, scene: &Scene) {
    let (text, style, width) = match scene.overlay {
        Overlay::None => return,
        Overlay::Countdown(value) => (
            value.to_string(),
            Style::default()
                .fg(term_color(colors::COUNTDOWN))
                .add_modifier(Modifier::BOLD),
            9,
        ),
        Overlay::FightBanner { progress } => {
            // Grows by 30% over the banner's lifetime
            let width = (14.0 * (1.0 + 0.3 * progress)).round() as u16;
            (
                "FIGHT!".to_string(),
                Style::default()
                    .fg(term_color(colors::BANNER))
                    .add_modifier(Modifier::BOLD),
                width,
            )
        }
        Overlay::Paused => (
            "PAUSED\nenter to resume".to_string(),
            Style::default().fg(TermColor::White),
            21,
        ),
        Overlay::RoundOver => {
            let label = scene.result.clone().unwrap_or_else(|| "K.O.".to_string());
            let width = label.chars().count().max(24) as u16 + 4;
            (
                format!("K.O.\n{label}\nenter for next round"),
                Style::default()
                    .fg(TermColor::Yellow)
                    .add_modifier(Modifier::BOLD),
                width,
            )
        }
    };

    let height = text.lines().count() as u16 + 2;
    let popup = centered(area, width, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

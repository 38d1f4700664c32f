use crate::config::Viewport;
use crate::entities::{BulletOwner, Enemy, EnemyType, GameState};
use crate::game::Game;
use crate::world::World;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph,
        canvas::{Canvas, Painter, Shape},
    },
};

const BACKGROUND: Color = Color::Rgb(0x00, 0x00, 0x33);
const STAR_COLOR: Color = Color::Rgb(0xff, 0xff, 0xff);
const PLAYER_COLOR: Color = Color::Rgb(0x88, 0xaa, 0xff);
const PLAYER_BULLET_COLOR: Color = Color::Rgb(0x88, 0xff, 0xff);
const ENEMY_BULLET_COLOR: Color = Color::Rgb(0xff, 0x88, 0x88);

/// Sampling step in logical units when filling a rectangle.
const SAMPLE_STEP: f64 = 0.5;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub world: &'a World,
    pub viewport: Viewport,
    pub score: u32,
    pub health: i32,
    pub area: Rect,
}

impl<'a> RenderView<'a> {
    pub fn new(game: &'a Game, area: Rect) -> Self {
        Self {
            game_state: game.state(),
            world: game.world(),
            viewport: game.config().viewport,
            score: game.score(),
            health: game.health(),
            area,
        }
    }
}

fn enemy_color(enemy_type: EnemyType) -> Color {
    match enemy_type {
        EnemyType::Small => Color::Rgb(0xff, 0x55, 0x55),
        EnemyType::Medium => Color::Rgb(0xff, 0xaa, 0x55),
        EnemyType::Large => Color::Rgb(0xff, 0x55, 0x99),
    }
}

/// Fins on the trailing edge as (y offset, length), one per size class.
fn enemy_fins(enemy: &Enemy) -> Vec<(f32, f32)> {
    let height = enemy.height;
    match enemy.enemy_type {
        EnemyType::Small => vec![(height / 2.0 - 1.0, 3.0)],
        EnemyType::Medium => vec![(height / 3.0, 4.0), (height * 2.0 / 3.0, 4.0)],
        EnemyType::Large => vec![
            (height / 4.0, 5.0),
            (height / 2.0, 5.0),
            (height * 3.0 / 4.0, 5.0),
        ],
    }
}

/// Solid rectangle given in viewport coordinates (origin top-left).
#[derive(Debug, Clone, Copy)]
struct FilledRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
    /// Needed to flip y, the canvas origin is bottom-left.
    viewport_height: f64,
}

impl FilledRect {
    fn new(viewport: Viewport, x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
            width: f64::from(width),
            height: f64::from(height),
            color,
            viewport_height: f64::from(viewport.height),
        }
    }
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        let columns = (self.width / SAMPLE_STEP).ceil().max(1.0) as usize;
        let rows = (self.height / SAMPLE_STEP).ceil().max(1.0) as usize;

        for column in 0..columns {
            let x = self.x + column as f64 * SAMPLE_STEP;
            for row in 0..rows {
                let y = self.viewport_height - (self.y + row as f64 * SAMPLE_STEP);
                // Anything off the canvas is clipped by get_point.
                if let Some((grid_x, grid_y)) = painter.get_point(x, y) {
                    painter.paint(grid_x, grid_y, self.color);
                }
            }
        }
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Idle => self.render_title(frame, view),
            GameState::Running => self.render_game(frame, view),
            GameState::Over => self.render_game_over(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let [hud_area, field_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(view.area);

        self.render_hud(frame, view, hud_area);
        self.render_playfield(frame, view, field_area, true);
    }

    /// Score and health line published from the session.
    fn render_hud(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let health = view.health.max(0);
        let health_color = if health > 50 {
            Color::Green
        } else if health > 25 {
            Color::Yellow
        } else {
            Color::Red
        };

        let hud = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Health: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}%", health),
                Style::default()
                    .fg(health_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        frame.render_widget(Paragraph::new(hud), area);
    }

    /// Draws the star field and, when `with_entities` is set, every ship and
    /// bullet onto a canvas spanning the logical viewport.
    fn render_playfield(&self, frame: &mut Frame, view: &RenderView, area: Rect, with_entities: bool) {
        let viewport = view.viewport;
        let world = view.world;

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .marker(Marker::HalfBlock)
            .background_color(BACKGROUND)
            .x_bounds([0.0, f64::from(viewport.width)])
            .y_bounds([0.0, f64::from(viewport.height)])
            .paint(|ctx| {
                for star in &world.stars {
                    ctx.draw(&FilledRect::new(
                        viewport, star.x, star.y, star.size, star.size, STAR_COLOR,
                    ));
                }

                if !with_entities {
                    return;
                }

                let player = &world.player;
                ctx.draw(&FilledRect::new(
                    viewport,
                    player.x,
                    player.y,
                    player.width,
                    player.height,
                    PLAYER_COLOR,
                ));
                // Engine glow behind the ship
                ctx.draw(&FilledRect::new(
                    viewport,
                    player.x - 4.0,
                    player.y + player.height / 2.0 - 1.0,
                    4.0,
                    2.0,
                    PLAYER_COLOR,
                ));

                for shot in world.player_bullets.iter().chain(&world.enemy_bullets) {
                    let color = match shot.owner {
                        BulletOwner::Player => PLAYER_BULLET_COLOR,
                        BulletOwner::Enemy => ENEMY_BULLET_COLOR,
                    };
                    ctx.draw(&FilledRect::new(
                        viewport,
                        shot.x,
                        shot.y,
                        shot.width,
                        shot.height,
                        color,
                    ));
                }

                for enemy in &world.enemies {
                    let color = enemy_color(enemy.enemy_type);
                    ctx.draw(&FilledRect::new(
                        viewport,
                        enemy.x,
                        enemy.y,
                        enemy.width,
                        enemy.height,
                        color,
                    ));

                    for (offset, length) in enemy_fins(enemy) {
                        ctx.draw(&FilledRect::new(
                            viewport,
                            enemy.x + enemy.width,
                            enemy.y + offset,
                            length,
                            2.0,
                            color,
                        ));
                    }
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_title(&self, frame: &mut Frame, view: &RenderView) {
        self.render_playfield(frame, view, view.area, false);

        let title_text = vec![
            Line::from(""),
            Line::from("S T A R S T R I K E").centered().bold().cyan(),
            Line::from(""),
            Line::from("[Arrows/WASD: Move] [Space: Fire]")
                .centered()
                .dark_gray(),
            Line::from(""),
            Line::from("Press Enter to start").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let title_area = centered_rect(view.area, 40, 9);
        frame.render_widget(Clear, title_area);
        frame.render_widget(
            Paragraph::new(title_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .alignment(Alignment::Center),
            title_area,
        );
    }

    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        // Freeze the last frame behind the overlay
        self.render_game(frame, view);

        let game_over_text = vec![
            Line::from(""),
            Line::from("GAME OVER").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Your score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let over_area = centered_rect(view.area, 32, 9);
        frame.render_widget(Clear, over_area);
        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            over_area,
        );
    }
}

/// Rectangle of at most `width`×`height` centered in `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

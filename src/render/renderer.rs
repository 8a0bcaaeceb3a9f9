use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::game::{GameState, Position};
use crate::player::{AudioOutput, PlaylistController, track::format_clock};

const DESKTOP: Color = Color::Rgb(0, 128, 128);
const LCD_GREEN: Color = Color::Rgb(136, 157, 25);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<A: AudioOutput, R: Rng>(
        &self,
        frame: &mut Frame,
        game: &GameState,
        player: &PlaylistController<A, R>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Desktop title
                Constraint::Min(0),    // Windows
                Constraint::Length(1), // Taskbar
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(" RetroDeck 95")
                .style(Style::default().bg(DESKTOP).fg(Color::White).add_modifier(Modifier::BOLD)),
            chunks[0],
        );

        let grid_width = u16::try_from(game.grid_size())
            .unwrap_or(u16::MAX)
            .saturating_mul(2)
            .saturating_add(2);
        let windows = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(grid_width), Constraint::Min(30)])
            .split(chunks[1]);

        self.render_snake_window(frame, windows[0], game);
        self.render_player_window(frame, windows[1], player);

        frame.render_widget(self.render_taskbar(), chunks[2]);
    }

    fn render_snake_window(&self, frame: &mut Frame, area: Rect, game: &GameState) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(
                    u16::try_from(game.grid_size())
                        .unwrap_or(u16::MAX)
                        .saturating_add(2),
                ),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_widget(self.render_grid(game), rows[0]);
        frame.render_widget(self.render_scores(game), rows[1]);

        if let Some(reason) = game.game_over() {
            let popup = centered(rows[0], 30, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(game, &reason.to_string()), popup);
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_size());
        let head = state.snake.head();

        for y in 0..state.grid_size() {
            let mut spans = Vec::with_capacity(state.grid_size());

            for x in 0..state.grid_size() {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "██",
                        Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(pos) {
                    Span::styled("▓▓", Style::default().fg(Color::Black))
                } else if pos == state.food {
                    Span::styled(
                        "<>",
                        Style::default().fg(Color::Black).add_modifier(Modifier::SLOW_BLINK),
                    )
                } else {
                    Span::raw("  ")
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).style(Style::default().bg(LCD_GREEN)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Snake.exe "),
        )
    }

    fn render_scores(&self, state: &GameState) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("SCORE: ", Style::default().fg(Color::Green)),
            Span::styled(
                state.score.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("HI: ", Style::default().fg(Color::Red)),
            Span::styled(
                state.high_score.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]);

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, state: &GameState, reason: &str) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("The snake {reason}.")),
            Line::from(format!("Total Pts: {}", state.score)),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw(" retry  "),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::raw(" quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error 404 "),
        )
    }

    fn render_player_window<A: AudioOutput, R: Rng>(
        &self,
        frame: &mut Frame,
        area: Rect,
        player: &PlaylistController<A, R>,
    ) {
        let track = player.current_track();
        let accent = hex_color(&track.accent_color).unwrap_or(Color::Cyan);

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(" WinBeats Player v1.0 ");
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Display
                Constraint::Length(1), // Position
                Constraint::Length(1), // Status
                Constraint::Min(0),    // Playlist
            ])
            .split(inner);

        let display = vec![
            Line::from(Span::styled(
                track.title.to_uppercase(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(track.artist.as_str(), Style::default().fg(Color::Green))),
            Line::from(Span::styled(
                track.description.as_deref().unwrap_or(""),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(format!(
                "{} / {}",
                format_clock(player.elapsed().as_secs() as u32),
                track.duration_label()
            )),
        ];
        frame.render_widget(
            Paragraph::new(display)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL)),
            rows[0],
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
            .label("POS")
            .ratio((player.progress_percent() / 100.0).clamp(0.0, 1.0));
        frame.render_widget(gauge, rows[1]);

        let status = if player.is_generating() {
            Span::styled(
                "GENERATING...",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
            )
        } else if player.is_playing() {
            Span::styled("▶ PLAYING", Style::default().fg(Color::Green))
        } else {
            Span::styled("❚❚ PAUSED", Style::default().fg(Color::Gray))
        };
        frame.render_widget(Paragraph::new(Line::from(status)), rows[2]);

        let items: Vec<ListItem> = player
            .tracks()
            .iter()
            .map(|t| {
                let color = hex_color(&t.accent_color).unwrap_or(Color::White);
                ListItem::new(Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::raw(format!("{} - {} ({})", t.title, t.artist, t.duration_label())),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::TOP).title(" Playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(player.selected_index()));
        frame.render_stateful_widget(list, rows[3], &mut list_state);
    }

    fn render_taskbar(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = Line::from(vec![
            Span::styled("↑↓←→/WASD", key),
            Span::raw(" move | "),
            Span::styled("R", key),
            Span::raw(" retry | "),
            Span::styled("Space", key),
            Span::raw(" play | "),
            Span::styled("N/P", key),
            Span::raw(" skip | "),
            Span::styled("G", key),
            Span::raw(" compose | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(text).style(Style::default().bg(Color::Gray).fg(Color::Black))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `#rgb` or `#rrggbb` to a terminal colour
pub fn hex_color(value: &str) -> Option<Color> {
    let digits = value.trim().strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match digits.len() {
        6 => Some(Color::Rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = channel(&digits[i..i + 1])? * 17;
            }
            Some(Color::Rgb(rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

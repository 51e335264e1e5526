use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::{Duration, Instant};
use std::{error::Error, io};

use blackjack::{Card, RoundResult};

mod app;
use app::{App, Screen};

mod config;
use config::Config;

mod tui_logger;
use tui_logger::TuiLogger;

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    let level = if config.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let (logger, log_buffer) = TuiLogger::new(level);
    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(&config, log_buffer);
    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    loop {
        app.sync_logs();
        app.tick(Instant::now());

        terminal.draw(|f| ui(f, &app))?;

        // Poll with a timeout so the dealer reveal keeps moving without input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key.code, Instant::now()) {
                    return Ok(());
                }
            }
        }
    }
}

fn card_span(card: Option<Card>) -> Span<'static> {
    match card {
        Some(card) => {
            let color = if card.suit().is_red() {
                Color::Red
            } else {
                Color::Black
            };
            Span::styled(
                format!("{card} "),
                Style::default().fg(color).bg(Color::Gray),
            )
        }
        None => Span::styled("?? ", Style::default().fg(Color::White).bg(Color::DarkGray)),
    }
}

fn outcome_style(app: &App) -> Style {
    match app.outcome.map(|o| o.result) {
        Some(RoundResult::Win) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Some(RoundResult::Loss) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Some(RoundResult::Push) => Style::default().fg(Color::DarkGray),
        None => Style::default(),
    }
}

/// Center `lines` vertically inside a bordered block of height `area_height`.
fn centered(lines: Vec<Line<'static>>, area_height: u16) -> Vec<Line<'static>> {
    let inner = area_height.saturating_sub(2);
    let padding_top = inner.saturating_sub(lines.len() as u16) / 2;
    let mut out = vec![Line::from(""); padding_top as usize];
    out.extend(lines);
    out
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;
    let line = Line::from(vec![
        Span::styled(format!(" Wins {} ", stats.wins), Style::default().fg(Color::Green)),
        Span::raw("│"),
        Span::styled(format!(" Losses {} ", stats.losses), Style::default().fg(Color::Red)),
        Span::raw("│"),
        Span::styled(format!(" Pushes {} ", stats.pushes), Style::default().fg(Color::Blue)),
        Span::raw("│"),
        Span::styled(
            format!(" Wagered {} ", stats.total_wagered),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" Balance {} ", app.balance),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]);
    let widget = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn ui(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Title bar
                Constraint::Length(3), // Stats bar
                Constraint::Min(10),   // Table
                Constraint::Length(3), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let title_text = match app.round() {
        Some(round) => format!("Blackjack - Current bet {}", round.wager()),
        None => "Blackjack - Local Table".to_string(),
    };
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    render_stats(f, app, main_chunks[1]);

    // Split table area: left (game) and right (logs if visible)
    let (game_container, log_area) = if app.log_visible {
        let main_horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(main_chunks[2]);
        (main_horizontal[0], Some(main_horizontal[1]))
    } else {
        (main_chunks[2], None)
    };

    let game_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(game_container);

    // Dealer hand
    let dealer_cards = app.dealer_display();
    let dealer_title = match app.dealer_score_shown() {
        Some(score) if app.screen == Screen::PlayerTurn => format!(" Dealer Hand ({score} showing) "),
        Some(score) => format!(" Dealer Hand ({score}) "),
        None => " Dealer Hand ".to_string(),
    };
    let dealer_lines = if dealer_cards.is_empty() {
        vec![Line::from("Waiting for a bet")]
    } else {
        let mut lines = vec![Line::from(
            dealer_cards.into_iter().map(card_span).collect::<Vec<_>>(),
        )];
        if app.screen == Screen::PlayerTurn {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("↑", Style::default().fg(Color::Yellow)),
                Span::raw(" Hit  "),
                Span::styled("↓", Style::default().fg(Color::Yellow)),
                Span::raw(" Stand"),
            ]));
        }
        lines
    };
    let dealer_block = Paragraph::new(centered(dealer_lines, game_area[0].height))
        .block(Block::default().title(dealer_title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(dealer_block, game_area[0]);

    // Player hand
    let player_block = match app.round() {
        Some(round) => {
            let mut lines = vec![Line::from(
                round
                    .player_hand()
                    .cards()
                    .iter()
                    .map(|c| card_span(Some(*c)))
                    .collect::<Vec<_>>(),
            )];
            if let Some(message) = &app.result_message {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(message.clone(), outcome_style(app))));
            }

            let border_style = match app.screen {
                Screen::PlayerTurn => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Screen::RoundOver => outcome_style(app),
                _ => Style::default(),
            };
            Paragraph::new(centered(lines, game_area[1].height))
                .block(
                    Block::default()
                        .title(format!(" Your Hand ({}) ", round.player_score()))
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .alignment(Alignment::Center)
        }
        None => Paragraph::new(centered(
            vec![Line::from(format!("Bet: {}", app.bet_input))],
            game_area[1].height,
        ))
        .block(Block::default().title(" Your Hand ").borders(Borders::ALL))
        .alignment(Alignment::Center),
    };
    f.render_widget(player_block, game_area[1]);

    if let Some(log_area) = log_area {
        let log_frame_height = log_area.height.saturating_sub(2) as usize;
        let log_start_idx = app.logs.len().saturating_sub(log_frame_height);

        let log_lines: Vec<Line> = app
            .logs
            .iter()
            .skip(log_start_idx)
            .map(|log| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(log.clone()),
                ])
            })
            .collect();

        let logs_widget = Paragraph::new(log_lines)
            .block(
                Block::default()
                    .title(" Game Log ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(logs_widget, log_area);
    }

    let status_text = if app.screen == Screen::Betting {
        format!("{} > {}", app.status, app.bet_input)
    } else {
        app.status.clone()
    };
    let status_bar = Paragraph::new(status_text)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[3]);
}

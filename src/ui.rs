//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * Layout, top to bottom: category tabs, search box, the article list
//!   beside a detail pane, and a one-line status bar.
//! * Colours and styles are defined inline.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, InputMode, LastRequest, CATEGORY_CHOICES};

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [tabs_area, search_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(main_area);

    draw_tabs(app, frame, tabs_area);
    draw_search_box(app, frame, search_area);
    draw_article_list(app, frame, list_area);
    draw_detail(app, frame, detail_area);
    draw_status_bar(app, frame, status_area);
}

fn draw_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let titles = CATEGORY_CHOICES
        .iter()
        .map(|c| c.map(|c| c.as_str()).unwrap_or("all"));
    let selected = CATEGORY_CHOICES
        .iter()
        .position(|c| *c == app.news.selected_category)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn draw_search_box(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let text = if app.news.search_query.is_empty() && !editing {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.news.search_query.as_str())
    };

    let search = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(search, area);

    if editing {
        let typed = u16::try_from(app.news.search_query.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(typed);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

/// Render the scrollable article list.
fn draw_article_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .news
        .articles()
        .iter()
        .map(|article| {
            let date_str = article
                .published()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "no date".into());

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<18}", date_str),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(&article.title, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", article.source.name),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let mut title = if app.news.search_query.trim().is_empty() {
        " Top headlines ".to_string()
    } else {
        format!(" Results for \"{}\" ", app.news.search_query.trim())
    };
    if app.news.is_busy() {
        title.push_str("⟳ ");
    }

    let list = List::new(list_items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_detail(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" Article ").borders(Borders::ALL);

    let Some(article) = app.selected_article() else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            article.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            match &article.author {
                Some(author) => format!("{} · {}", article.source.name, author),
                None => article.source.name.clone(),
            },
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];
    if let Some(description) = &article.description {
        lines.push(Line::from(description.as_str()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        article.url.as_str(),
        Style::default().fg(Color::Blue),
    )));

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, area);
}

/// Text for the status bar, most urgent first.
fn status_text(app: &App) -> (String, Color) {
    let news = &app.news;
    if let Some(error) = &news.error {
        let retry = match app.last_request() {
            LastRequest::Headlines => "reload",
            LastRequest::Refresh => "refresh",
            LastRequest::Search => "search",
        };
        return (format!("Error: {error}  R: retry {retry}  x: dismiss"), Color::Red);
    }
    if news.loading {
        return ("Loading…".into(), Color::Yellow);
    }
    if news.refreshing {
        return ("Refreshing…".into(), Color::Yellow);
    }
    if news.searching {
        return ("Searching…".into(), Color::Yellow);
    }
    if news.articles().is_empty() {
        return ("No articles".into(), Color::DarkGray);
    }
    (
        format!("{} of {} articles", news.articles().len(), news.total_results()),
        Color::Green,
    )
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let (text, colour) = status_text(app);
    let help = match app.input_mode {
        InputMode::Normal => "  q: quit  /: search  r: refresh  Tab: category  ↑/↓: scroll",
        InputMode::Search => "  Enter: done  Esc: clear search",
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(text, Style::default().fg(colour)),
        Span::raw(help),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::coordinator::{NewsCoordinator, SEARCH_DEBOUNCE};
    use crate::repository::NewsRepository;
    use crate::source::GatewayError;
    use crate::testing::{page, FakeSource};

    fn app_with(fake: &Arc<FakeSource>) -> App {
        App::new(NewsCoordinator::new(
            NewsRepository::new(fake.clone()),
            SEARCH_DEBOUNCE,
        ))
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn draw_does_not_panic_with_no_items() {
        let fake = FakeSource::new();
        let mut app = app_with(&fake);
        render(&mut app);
    }

    #[tokio::test(start_paused = true)]
    async fn draw_shows_articles_and_counts() {
        let fake = FakeSource::new();
        fake.set_headlines(Ok(page(3, 150)));
        let mut app = app_with(&fake);
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.sync();

        let text = render(&mut app);
        assert!(text.contains("headline 0"));
        assert!(text.contains("3 of 150 articles"), "status bar should show counts");
    }

    #[tokio::test(start_paused = true)]
    async fn draw_shows_error_banner() {
        let fake = FakeSource::new();
        fake.set_headlines(Err(GatewayError::BlankQuery));
        let mut app = app_with(&fake);
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.sync();

        let text = render(&mut app);
        assert!(text.contains("Error: Search query cannot be empty"));
    }

    #[tokio::test(start_paused = true)]
    async fn draw_handles_query_longer_than_terminal() {
        let fake = FakeSource::new();
        let mut app = app_with(&fake);
        app.begin_search();
        app.news.search_query = "z".repeat(70_000);

        let text = render(&mut app);
        assert!(text.contains("zzzz"));
    }

    #[tokio::test(start_paused = true)]
    async fn draw_shows_search_query_while_editing() {
        let fake = FakeSource::new();
        let mut app = app_with(&fake);
        app.begin_search();
        app.push_search_char('a');
        app.push_search_char('i');

        let text = render(&mut app);
        assert!(text.contains("Results for \"ai\""));
        assert!(text.contains("Esc: clear search"));
    }
}

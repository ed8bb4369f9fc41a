//! Application state for the TUI

use std::sync::Arc;

use goalimpact_search::{
    Bounds, DropdownView, EntityType, ResultSet, Route, SearchBackend, SearchWidget,
    WidgetOptions, WidgetState,
};
use ratatui::layout::Rect;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use url::Url;

/// One line of a rendered dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownRow {
    Header(EntityType),
    /// Index into the widget's result set
    Result(usize),
    Message(&'static str),
}

/// Dropdown lines for a state: group headings followed by their results
pub fn dropdown_rows(state: &WidgetState) -> Vec<DropdownRow> {
    match state.dropdown() {
        DropdownView::Hidden => Vec::new(),
        DropdownView::Loading => vec![DropdownRow::Message("Searching…")],
        DropdownView::NoResults => vec![DropdownRow::Message("No results found")],
        DropdownView::Results(results) => {
            let mut rows = Vec::with_capacity(results.len() + 4);
            let mut index = 0;
            for (kind, group) in results.groups() {
                rows.push(DropdownRow::Header(kind));
                for _ in group {
                    rows.push(DropdownRow::Result(index));
                    index += 1;
                }
            }
            rows
        }
    }
}

pub fn to_bounds(rect: Rect) -> Bounds {
    Bounds::new(rect.x, rect.y, rect.width, rect.height)
}

/// A mounted search widget and where it was last drawn
pub struct Pane {
    pub title: String,
    pub widget: SearchWidget,
    /// Dropdown area inside its border, when drawn
    pub dropdown_inner: Option<Rect>,
    /// Rows drawn in `dropdown_inner`, top to bottom
    pub rows: Vec<DropdownRow>,
    /// Results the drawn rows index into
    pub drawn_results: ResultSet,
    /// Last route this pane navigated to
    pub selected: Option<Route>,
}

impl Pane {
    /// Result index under a screen cell, if a result row was drawn there
    pub fn result_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.dropdown_inner?;
        if !to_bounds(inner).contains(goalimpact_search::Point::new(column, row)) {
            return None;
        }
        match self.rows.get(usize::from(row - inner.y))? {
            DropdownRow::Result(index) => Some(*index),
            _ => None,
        }
    }

    /// Like [`Pane::result_at`], but only while the widget still shows the
    /// results that were drawn. A response landing between draw and click
    /// must not turn the click into a different entity.
    pub fn current_result_at(&self, column: u16, row: u16) -> Option<usize> {
        let index = self.result_at(column, row)?;
        let state = self.widget.state();
        match state.dropdown() {
            DropdownView::Results(results) if *results == self.drawn_results => Some(index),
            _ => None,
        }
    }
}

pub struct App {
    pub panes: Vec<Pane>,
    pub focused: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    site: Url,
    navigations: UnboundedReceiver<(usize, Route)>,
}

impl App {
    pub fn new(
        panes: Vec<(String, WidgetOptions)>,
        backend: Arc<dyn SearchBackend>,
        site: Url,
    ) -> Self {
        let (tx, navigations) = mpsc::unbounded_channel();
        let panes = panes
            .into_iter()
            .enumerate()
            .map(|(index, (title, options))| {
                let tx = tx.clone();
                let navigator = move |route: Route| {
                    let _ = tx.send((index, route));
                };
                Pane {
                    title,
                    widget: SearchWidget::new(options, Arc::clone(&backend), Arc::new(navigator)),
                    dropdown_inner: None,
                    rows: Vec::new(),
                    drawn_results: ResultSet::default(),
                    selected: None,
                }
            })
            .collect();

        Self {
            panes,
            focused: 0,
            status_message: None,
            should_quit: false,
            site,
            navigations,
        }
    }

    pub fn focused_widget(&self) -> &SearchWidget {
        &self.panes[self.focused].widget
    }

    /// Focus a pane; its widget reopens cached results if allowed
    pub fn focus(&mut self, index: usize) {
        if index < self.panes.len() {
            self.focused = index;
            self.panes[index].widget.focus();
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focused + 1) % self.panes.len();
        self.focus(next);
    }

    pub fn insert_char(&mut self, c: char) {
        let widget = self.focused_widget();
        let mut query = widget.state().query;
        query.push(c);
        widget.input(query);
    }

    pub fn backspace(&mut self) {
        let widget = self.focused_widget();
        let mut query = widget.state().query;
        if query.pop().is_some() {
            widget.input(query);
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Apply navigations pushed by widgets since the last tick
    pub fn drain_navigations(&mut self) {
        while let Ok((index, route)) = self.navigations.try_recv() {
            let url = route
                .url(&self.site)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| route.path());
            let Some(pane) = self.panes.get_mut(index) else {
                continue;
            };
            pane.selected = Some(route);
            let msg = format!("{} → {}", pane.title, url);
            self.set_status(msg);
        }

        if let Some(comparison) = self.comparison() {
            self.set_status(comparison);
        }
    }

    /// "Comparing /players/7 vs /players/17" once every pane has a selection
    pub fn comparison(&self) -> Option<String> {
        if self.panes.len() < 2 {
            return None;
        }
        let routes = self
            .panes
            .iter()
            .map(|p| p.selected.map(|r| r.path()))
            .collect::<Option<Vec<_>>>()?;
        Some(format!("Comparing {}", routes.join(" vs ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalimpact_search::mock::MockBackend;
    use goalimpact_search::{Phase, SearchResult};
    use std::time::Duration;

    fn site() -> Url {
        Url::parse("https://goalimpact.example/").unwrap()
    }

    fn app(backend: &Arc<MockBackend>, panes: usize) -> App {
        let panes = (1..=panes)
            .map(|n| {
                (
                    format!("Player {n}"),
                    WidgetOptions::new(format!("player-{n}")).debounce(Duration::from_millis(300)),
                )
            })
            .collect();
        App::new(panes, backend.clone(), site())
    }

    #[test]
    fn test_dropdown_rows_group_headers() {
        let state = WidgetState {
            query: "a".into(),
            results: ResultSet::new(vec![
                SearchResult::new(1, "A Club", EntityType::Club),
                SearchResult::new(2, "A Player", EntityType::Player),
                SearchResult::new(3, "B Club", EntityType::Club),
            ]),
            is_open: true,
            phase: Phase::Results,
            ..Default::default()
        };

        assert_eq!(
            dropdown_rows(&state),
            vec![
                DropdownRow::Header(EntityType::Player),
                DropdownRow::Result(0),
                DropdownRow::Header(EntityType::Club),
                DropdownRow::Result(1),
                DropdownRow::Result(2),
            ]
        );
    }

    #[test]
    fn test_dropdown_rows_messages() {
        let mut state = WidgetState {
            query: "a".into(),
            is_open: true,
            is_loading: true,
            ..Default::default()
        };
        assert_eq!(dropdown_rows(&state), vec![DropdownRow::Message("Searching…")]);

        state.is_loading = false;
        assert_eq!(dropdown_rows(&state), vec![DropdownRow::Message("No results found")]);

        state.is_open = false;
        assert!(dropdown_rows(&state).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn typing_edits_only_focused_widget() {
        let backend = Arc::new(MockBackend::new());
        let mut app = app(&backend, 2);

        app.insert_char('k');
        app.insert_char('a');
        app.focus_next();
        app.insert_char('x');
        app.backspace();
        app.backspace();

        assert_eq!(app.panes[0].widget.state().query, "ka");
        assert_eq!(app.panes[1].widget.state().query, "");
        assert_eq!(app.focused, 1);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(backend.queries(), vec!["ka"]);
    }

    #[tokio::test(start_paused = true)]
    async fn navigations_update_status_and_comparison() {
        let backend = Arc::new(MockBackend::new());
        backend.respond("m", vec![SearchResult::new(7, "Messi", EntityType::Player)]);
        backend.respond("r", vec![SearchResult::new(17, "Ronaldo", EntityType::Player)]);
        let mut app = app(&backend, 2);

        app.insert_char('m');
        app.focus_next();
        app.insert_char('r');
        tokio::time::sleep(Duration::from_secs(1)).await;

        app.panes[0].widget.select(0);
        app.drain_navigations();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Player 1 → https://goalimpact.example/players/7")
        );

        app.panes[1].widget.select(0);
        app.drain_navigations();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Comparing /players/7 vs /players/17")
        );
    }

    #[test]
    fn test_result_at_maps_rows() {
        let backend = Arc::new(MockBackend::new());
        let mut app = App::new(
            vec![("Search".to_string(), WidgetOptions::new("search"))],
            backend,
            site(),
        );
        let pane = &mut app.panes[0];
        pane.dropdown_inner = Some(Rect::new(1, 4, 20, 3));
        pane.rows = vec![
            DropdownRow::Header(EntityType::Player),
            DropdownRow::Result(0),
            DropdownRow::Result(1),
        ];

        assert_eq!(pane.result_at(5, 4), None);
        assert_eq!(pane.result_at(5, 5), Some(0));
        assert_eq!(pane.result_at(5, 6), Some(1));
        assert_eq!(pane.result_at(5, 7), None);
        assert_eq!(pane.result_at(30, 5), None);
    }
}

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use agriculture::{
    record::{Fields as _, Reading, Stamped},
    series::TimeSeries,
};
use anyhow::{Context as _, Result};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    layout::{Constraint, Direction, Layout},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, BorderType, Chart, Dataset, GraphType, Paragraph},
};

pub struct App {
    series: TimeSeries,
    received: u64,
    missing: u64,
    connected: bool,
}

impl App {
    pub fn new(series: TimeSeries) -> Self {
        Self {
            series,
            received: 0,
            missing: 0,
            connected: true,
        }
    }

    fn record(&mut self, reading: Stamped<Reading>) {
        self.received += 1;
        match reading.record.value(self.series.name()) {
            Some(v) => self.series.push(reading.measured_at, v),
            None => self.missing += 1,
        }
    }

    /// Redraws until the user quits. Readings keep arriving on `readings`.
    pub fn run(
        &mut self,
        terminal: &mut DefaultTerminal,
        readings: &Receiver<Stamped<Reading>>,
        refresh: Duration,
    ) -> Result<()> {
        loop {
            loop {
                match readings.try_recv() {
                    Ok(reading) => self.record(reading),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.connected = false;
                        break;
                    }
                }
            }

            terminal
                .draw(|frame| self.draw(frame))
                .context("failed to draw plot")?;

            if event::poll(refresh).context("failed to poll terminal events")?
                && let Event::Key(key) = event::read().context("failed to read terminal event")?
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let data = self.series.chart_data();
        let [x_min, x_max] = self.series.x_bounds();
        let [y_min, y_max] = self.series.y_bounds();

        // Wall-clock `%X` labels at both ends of the time axis.
        let x_labels: Vec<Line> = [self.series.first_at(), self.series.last_at()]
            .into_iter()
            .map(|at| at.map(|t| t.format("%X").to_string()).unwrap_or_default())
            .map(Line::from)
            .collect();
        let y_labels: Vec<Line> = [y_min, (y_min + y_max) / 2.0, y_max]
            .into_iter()
            .map(|v| Line::from(format!("{v:.1}")))
            .collect();

        let dataset = Dataset::default()
            .name(self.series.name().to_string())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&data);

        let chart = Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(format!(" {} ", self.series.name())),
            )
            .x_axis(
                Axis::default()
                    .title("time")
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(self.series.name().to_string())
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, chunks[0]);

        let state = if self.connected {
            "connected".green()
        } else {
            "stream ended".red()
        };
        let status = Line::from(vec![
            state,
            format!(
                "  readings: {}  without {}: {}  (q to quit)",
                self.received,
                self.series.name(),
                self.missing
            )
            .into(),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[1]);
    }
}

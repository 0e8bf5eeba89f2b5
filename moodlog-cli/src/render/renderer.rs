use super::theme::OneDark;
use moodlog_core::{
    Calendar, DayBoundary, GoalSummary, GridCell, JournalEntry, LoadWarning, RatingMetric,
    ViewMode, config::DEFAULT_LIST_DATE_FORMAT, dates::parse_timestamp, grid::WEEKDAY_NAMES,
    navigator::label_for_cells,
};
use strum::IntoEnumIterator;
use termimad::{MadSkin, crossterm::style::Stylize};

/// Longest title shown inside a month cell.
const CELL_TITLE_CHARS: usize = 12;

#[derive(Clone)]
pub struct RenderOptions {
    pub list_date_format: String,
    pub use_color: bool,
    pub boundary: DayBoundary,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    list_date_format: DEFAULT_LIST_DATE_FORMAT.to_string(),
                    use_color: true,
                    boundary: DayBoundary::Local,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_calendar(&self, calendar: &Calendar, cells: &[GridCell]) {
        self.print_md(&self.calendar_markdown(calendar, cells));
    }

    pub fn print_entries(&self, entries: &[&JournalEntry]) {
        if entries.is_empty() {
            self.print_info("No entries found.");
            return;
        }
        self.print_info(&format!("{} entries found.", entries.len()));
        for entry in entries {
            self.print_md(&self.entry_markdown(entry));
            self.print_md("---");
        }
    }

    pub fn print_goals(&self, goals: &[GoalSummary]) {
        if goals.is_empty() {
            self.print_info("No goals found.");
            return;
        }
        self.print_info(&format!("{} goals found.", goals.len()));
        for summary in goals {
            for line in self.goal_lines(summary) {
                println!("{line}");
            }
        }
    }

    /// The goal line followed by one indented line per recent linked entry.
    fn goal_lines(&self, summary: &GoalSummary) -> Vec<String> {
        let goal = summary.goal;
        let mut target = goal
            .target_date
            .as_deref()
            .and_then(|raw| self.format_timestamp(raw))
            .unwrap_or_else(|| "recurring".to_string());
        let mut priority = goal.priority.as_ref().to_string();
        let mut title = goal.title.trim().to_string();
        let progress = format!("{:>3}%", goal.progress);
        let linked = match summary.linked_total {
            0 => String::new(),
            1 => " (1 entry)".to_string(),
            n => format!(" ({n} entries)"),
        };
        if self.opts.use_color {
            target = target.with(OneDark::BLUE).to_string();
            priority = priority.with(OneDark::RED).to_string();
            title = title.with(OneDark::YELLOW).to_string();
        }

        let mut lines = vec![format!("{progress} {title} [{priority}] {target}{linked}")];
        for entry in &summary.recent_entries {
            let date = self
                .format_timestamp(&entry.date)
                .unwrap_or_else(|| "undated".to_string());
            lines.push(format!("       ✎ {date}: {}", entry.title.trim()));
        }
        lines
    }

    fn format_timestamp(&self, raw: &str) -> Option<String> {
        parse_timestamp(raw, self.opts.boundary)
            .map(|t| t.format(&self.opts.list_date_format).to_string())
    }

    pub fn print_warnings(&self, warnings: &[LoadWarning]) {
        if warnings.is_empty() {
            return;
        }
        self.print_md("\n# Skipped records:");
        for warning in warnings {
            let message = match warning {
                LoadWarning::SkippedEntry { position, error } => {
                    format!("* Entry #{position}: {error}")
                }
                LoadWarning::SkippedGoal { position, error } => {
                    format!("* Goal #{position}: {error}")
                }
            };
            self.print_md(&message);
        }
    }

    fn calendar_markdown(&self, calendar: &Calendar, cells: &[GridCell]) -> String {
        let label = label_for_cells(calendar.reference(), calendar.mode(), cells);
        let mut md = format!("# {label}\n\n");
        match calendar.mode() {
            ViewMode::Monthly => {
                md.push_str(&format!("|{}|\n", WEEKDAY_NAMES.join("|")));
                md.push_str(&format!("|{}\n", ":-:|".repeat(WEEKDAY_NAMES.len())));
                for week in cells.chunks(WEEKDAY_NAMES.len()) {
                    let row: Vec<String> = week
                        .iter()
                        .map(|cell| month_cell_text(calendar, cell))
                        .collect();
                    md.push_str(&format!("|{}|\n", row.join("|")));
                }
                md.push_str("|-\n");
            }
            ViewMode::Weekly => {
                for (name, cell) in WEEKDAY_NAMES.iter().zip(cells) {
                    md.push_str(&self.week_day_markdown(calendar, name, cell));
                }
            }
        }
        md
    }

    fn week_day_markdown(&self, calendar: &Calendar, weekday: &str, cell: &GridCell) -> String {
        let today = if cell.is_today { " (today)" } else { "" };
        let mut md = format!("## {weekday} {}{today}\n", cell.date.format("%-d %b"));
        let shown = calendar.display(cell);
        for entry in shown.entries.visible {
            md.push_str(&format!("* ✎ {}{}\n", entry.title.trim(), ratings_suffix(entry)));
        }
        for goal in shown.goals.visible {
            md.push_str(&format!(
                "* ◎ {} ({}, {}%)\n",
                goal.title.trim(),
                goal.priority.as_ref(),
                goal.progress
            ));
        }
        if cell.record_count() == 0 {
            md.push_str("*nothing recorded*\n");
        }
        md.push('\n');
        md
    }

    fn entry_markdown(&self, entry: &JournalEntry) -> String {
        let date = self
            .format_timestamp(&entry.date)
            .unwrap_or_else(|| "undated".to_string());
        let mut md = format!("## {date}: {}\n", entry.title.trim());

        let ratings: Vec<String> = RatingMetric::iter()
            .filter_map(|metric| {
                let value = entry.rating(metric)?;
                Some(format!("{}: **{}**", metric.as_ref(), metric.label(value)?))
            })
            .collect();
        if !ratings.is_empty() {
            md.push_str(&ratings.join(" · "));
            md.push('\n');
        }
        if !entry.content.trim().is_empty() {
            md.push('\n');
            md.push_str(entry.content.trim_end());
            md.push('\n');
        }
        md
    }
}

fn month_cell_text(calendar: &Calendar, cell: &GridCell) -> String {
    let mut text = if cell.is_today {
        format!("**{}**", cell.day_number)
    } else if !cell.in_primary_period {
        format!("*{}*", cell.day_number)
    } else {
        cell.day_number.to_string()
    };

    let shown = calendar.display(cell);
    for entry in shown.entries.visible {
        text.push_str(&format!(" ✎{}", cell_title(&entry.title)));
    }
    for goal in shown.goals.visible {
        text.push_str(&format!(" ◎{}", cell_title(&goal.title)));
    }
    if shown.overflow > 0 {
        text.push_str(&format!(" +{} more", shown.overflow));
    }
    text
}

/// Shortens a title to fit a table cell and keeps it from breaking the table.
fn cell_title(title: &str) -> String {
    let title = title.trim().replace('|', "/");
    let mut short: String = title.chars().take(CELL_TITLE_CHARS).collect();
    if title.chars().count() > CELL_TITLE_CHARS {
        short.push('…');
    }
    short
}

fn ratings_suffix(entry: &JournalEntry) -> String {
    match entry.sentiment.and_then(|v| RatingMetric::Sentiment.label(v)) {
        Some(label) => format!(" ({label})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodlog_core::{DateKey, Goal, Priority, summarize_goals};

    fn plain() -> Renderer {
        Renderer::new(Some(RenderOptions {
            list_date_format: "%Y-%m-%d".to_string(),
            use_color: false,
            boundary: DayBoundary::Utc,
        }))
    }

    fn key(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn month_table_has_a_row_per_week_and_overflow_note() {
        let entries: Vec<_> = (1..=3)
            .map(|i| JournalEntry::new(i.to_string().as_str(), "2024-05-15", "Busy | day"))
            .collect();
        let goals = vec![
            Goal::new("a", "Read", Some("2024-05-15")),
            Goal::new("b", "Swim", Some("2024-05-15")),
        ];
        let calendar =
            Calendar::new(key(2024, 5, 1), ViewMode::Monthly).with_boundary(DayBoundary::Utc);
        let cells = calendar.build_grid_at(key(2024, 5, 2), &entries, &goals);

        let md = plain().calendar_markdown(&calendar, &cells);
        assert!(md.starts_with("# May 2024\n"));
        // header, separator, five weeks, closing rule
        assert_eq!(md.lines().filter(|l| l.starts_with('|')).count(), 8);
        assert!(md.contains("**2**"));
        assert!(md.contains("*28*"));
        assert!(md.contains("15 ✎Busy / day ✎Busy / day ◎Read ◎Swim +1 more"));
    }

    #[test]
    fn week_view_lists_every_record() {
        let entries: Vec<_> = (1..=3)
            .map(|i| {
                JournalEntry::new(i.to_string().as_str(), "2025-01-01T09:00:00", "Note")
                    .with_rating(RatingMetric::Sentiment, 4)
            })
            .collect();
        let calendar = Calendar::new(key(2025, 1, 1), ViewMode::Weekly);
        let cells = calendar.build_grid_at(key(2025, 1, 1), &entries, &[]);

        let md = plain().calendar_markdown(&calendar, &cells);
        assert!(md.starts_with("# Dec 29, 2024 - Jan 4, 2025\n"));
        assert!(md.contains("## Wed 1 Jan (today)\n"));
        assert_eq!(md.matches("* ✎ Note (Good)").count(), 3);
        assert_eq!(md.matches("*nothing recorded*").count(), 6);
    }

    #[test]
    fn entry_markdown_shows_ratings_and_body() {
        let mut entry = JournalEntry::new("1", "2024-03-01T08:00:00Z", "Lake")
            .with_rating(RatingMetric::Sleep, 5)
            .with_rating(RatingMetric::Stress, 2);
        entry.content = "Swam before work.\n".to_string();

        let md = plain().entry_markdown(&entry);
        assert!(md.starts_with("## 2024-03-01: Lake\n"));
        assert!(md.contains("sleep: **Excellent** · stress: **High**"));
        assert!(md.ends_with("\nSwam before work.\n"));
    }

    #[test]
    fn goal_lines_show_link_count_and_recent_entries() {
        let read = Goal::new("g1", "Read more", Some("2024-06-30")).with_priority(Priority::High);
        let stretch = Goal::new("g2", "Stretch", None);
        let goals = vec![stretch, read];
        let entries = vec![
            JournalEntry::new("1", "2024-03-01T20:00:00", "Chapter one").with_goal("g1"),
            JournalEntry::new("2", "2024-03-05", "Chapter two").with_goal("g1"),
        ];
        let summaries = summarize_goals(&goals, &entries, DayBoundary::Utc, 5);

        let renderer = plain();
        let lines = renderer.goal_lines(&summaries[0]);
        assert_eq!(
            lines,
            [
                "  0% Read more [High] 2024-06-30 (2 entries)",
                "       ✎ 2024-03-05: Chapter two",
                "       ✎ 2024-03-01: Chapter one",
            ]
        );
        assert_eq!(
            renderer.goal_lines(&summaries[1]),
            ["  0% Stretch [Medium] recurring"]
        );
    }

    #[test]
    fn long_titles_are_shortened() {
        assert_eq!(cell_title("A very long title indeed"), "A very long …");
        assert_eq!(cell_title("Short"), "Short");
    }
}

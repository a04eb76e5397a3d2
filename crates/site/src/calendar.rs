//! Month calendar of available forecast runs.

use chrono::{Datelike, Duration, NaiveDate};

use catalog::RunIndex;
use gallery_common::{GalleryError, GalleryResult, RunId};

/// Month names in Brazilian Portuguese, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Column headers, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Whether a day has a run to link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayState {
    Active(RunId),
    Inactive,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    /// Padding before the first or after the last day of the month.
    Empty,
    Day {
        date: NaiveDate,
        state: DayState,
        today: bool,
    },
}

impl CalendarCell {
    /// HTML `<td>` for this cell.
    pub fn to_html(&self) -> String {
        match self {
            CalendarCell::Empty => r#"<td class="empty"></td>"#.to_string(),
            CalendarCell::Day { date, state, today } => {
                let mut classes = vec!["day-cell"];
                if *today {
                    classes.push("today");
                }
                match state {
                    DayState::Active(run) => {
                        classes.push("active");
                        format!(
                            r#"<td class="{}"><a href="./{}/index.html" title="Ver previsão de {}/{}/{}">{}</a></td>"#,
                            classes.join(" "),
                            run,
                            date.day(),
                            date.month(),
                            date.year(),
                            date.day()
                        )
                    }
                    DayState::Inactive => {
                        classes.push("inactive");
                        format!(r#"<td class="{}">{}</td>"#, classes.join(" "), date.day())
                    }
                }
            }
        }
    }
}

/// Sunday-first week layout of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    weeks: Vec<[Option<NaiveDate>; 7]>,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> GalleryResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            GalleryError::Config(format!("invalid calendar month {}-{}", year, month))
        })?;

        let mut weeks = Vec::with_capacity(6);
        let mut week = [None; 7];
        let mut column = first.weekday().num_days_from_sunday() as usize;
        let mut day = first;

        while day.month() == month {
            week[column] = Some(day);
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
            day += Duration::days(1);
        }
        if column > 0 {
            weeks.push(week);
        }

        Ok(Self { year, month, weeks })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> GalleryResult<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Week rows; `None` marks padding.
    pub fn weeks(&self) -> &[[Option<NaiveDate>; 7]] {
        &self.weeks
    }

    /// Header text, e.g. `Junho de 2025`.
    pub fn title(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month as usize - 1)
            .copied()
            .unwrap_or_default();
        format!("{} de {}", name, self.year)
    }

    /// Resolve every cell against the available runs.
    pub fn cells(&self, runs: &RunIndex, today: NaiveDate) -> Vec<[CalendarCell; 7]> {
        self.weeks
            .iter()
            .map(|week| {
                week.map(|slot| match slot {
                    None => CalendarCell::Empty,
                    Some(date) => CalendarCell::Day {
                        date,
                        state: match runs.run_for(date) {
                            Some(run) => DayState::Active(run.clone()),
                            None => DayState::Inactive,
                        },
                        today: date == today,
                    },
                })
            })
            .collect()
    }

    /// Calendar table markup (header plus grid).
    pub fn to_html(&self, runs: &RunIndex, today: NaiveDate) -> String {
        let mut html = format!(
            r#"<div class="calendar-header"><h2>{}</h2></div>"#,
            self.title()
        );
        html.push_str(r#"<table class="calendar"><thead><tr>"#);
        for header in WEEKDAY_HEADERS {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr></thead><tbody>");
        for week in self.cells(runs, today) {
            html.push_str("<tr>");
            for cell in &week {
                html.push_str(&cell.to_html());
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

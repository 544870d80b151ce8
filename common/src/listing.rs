//! State shared by the dashboard list views.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ApiError;

/// Viewport width from which lists render as a table instead of cards.
pub const TABLE_MIN_WIDTH: f64 = 900.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<T> {
    Loading,
    Failed(String),
    Loaded(Vec<T>),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Loading
    }
}

/// What a list view should draw right now.
#[derive(Debug, PartialEq, Eq)]
pub enum ListView<'a, T> {
    Loading,
    Error(&'a str),
    Empty,
    Rows(&'a [T]),
}

impl<T> ListState<T> {
    pub fn from_result(result: Result<Vec<T>, ApiError>, fallback: &str) -> Self {
        match result {
            Ok(rows) => ListState::Loaded(rows),
            Err(err) => {
                log::warn!("list fetch failed: {err}");
                ListState::Failed(err.user_message(fallback))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn view(&self) -> ListView<'_, T> {
        match self {
            ListState::Loading => ListView::Loading,
            ListState::Failed(message) => ListView::Error(message),
            ListState::Loaded(rows) if rows.is_empty() => ListView::Empty,
            ListState::Loaded(rows) => ListView::Rows(rows),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    Table,
    Cards,
}

impl ListLayout {
    pub fn for_width(width: f64) -> Self {
        if width >= TABLE_MIN_WIDTH {
            ListLayout::Table
        } else {
            ListLayout::Cards
        }
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|stamp| stamp.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Renders an ISO-8601 date or timestamp as `M/D/YYYY`; anything else is returned as is.
pub fn format_date(raw: &str) -> String {
    match parse_day(raw.trim()) {
        Some(day) => day.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Like [`format_date`], with `N/A` for a missing value.
pub fn format_optional_date(raw: Option<&str>) -> String {
    raw.filter(|value| !value.is_empty())
        .map(format_date)
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_distinguishes_empty_from_rows() {
        let state: ListState<u32> = ListState::default();
        assert_eq!(state.view(), ListView::Loading);
        assert_eq!(ListState::<u32>::Loaded(vec![]).view(), ListView::Empty);
        let loaded = ListState::Loaded(vec![1, 2]);
        assert_eq!(loaded.view(), ListView::Rows(&[1, 2][..]));
    }

    #[test]
    fn failures_carry_server_detail_or_fallback() {
        let state: ListState<u32> = ListState::from_result(
            Err(ApiError::Status {
                status: 500,
                detail: Some("database offline".into()),
            }),
            "Could not load submissions.",
        );
        assert_eq!(state.view(), ListView::Error("database offline"));

        let state: ListState<u32> = ListState::from_result(
            Err(ApiError::Transport("offline".into())),
            "Could not load submissions.",
        );
        assert_eq!(state.view(), ListView::Error("Could not load submissions."));
    }

    #[test]
    fn layout_switches_at_breakpoint() {
        assert_eq!(ListLayout::for_width(1280.0), ListLayout::Table);
        assert_eq!(ListLayout::for_width(900.0), ListLayout::Table);
        assert_eq!(ListLayout::for_width(899.0), ListLayout::Cards);
    }

    #[test]
    fn dates_render_month_day_year() {
        assert_eq!(format_date("2024-03-07"), "3/7/2024");
        assert_eq!(format_date("2024-11-21T09:15:00"), "11/21/2024");
        assert_eq!(format_date("2024-11-21T09:15:00.123456"), "11/21/2024");
        assert_eq!(format_date("2024-01-02T23:00:00Z"), "1/2/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_optional_date(None), "N/A");
    }
}

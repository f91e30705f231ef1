//! Upstream fetch collaborator.
//!
//! The league site exposes its schedule through an ASMX endpoint: a JSON
//! POST whose response wraps the rendered schedule fragment in
//! `d.p_Content`. This module owns request shaping (filter XML, week-range
//! keys, fixed headers) and envelope unwrapping; the pipeline proper only
//! ever sees the unwrapped markup string.
//!
//! Fetch failure or an empty payload is fatal to the run, unlike the
//! row-local problems downstream.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};

/// Request shaping for the schedule endpoint.
///
/// Filter values follow the site's conventions: `-1` means "no filter", and
/// week keys look like `2025|8|18:2025|8|24`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Endpoint URL.
    pub url: String,
    /// Competition id(s), `|`-separated.
    pub competition: String,
    /// Date-range filter value.
    pub date_range: String,
    /// Club filter value.
    pub club: String,
    /// Division filter value.
    pub division: String,
    /// Team filter value.
    pub team: String,
    /// Field filter value.
    pub field: String,
    /// Games filter value.
    pub games: String,
    /// First week of the requested span.
    pub week_min: String,
    /// Last week of the requested span.
    pub week_max: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent presented to the site.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: "https://lisa.gameschedule.ca/GSServicePublic.asmx/LOAD_SchedulePublic"
                .to_string(),
            competition: "12".to_string(),
            date_range: "-1".to_string(),
            club: "-1".to_string(),
            division: "161".to_string(),
            team: "-1".to_string(),
            field: "-1".to_string(),
            games: "-1".to_string(),
            week_min: "2025|8|18:2025|8|24".to_string(),
            week_max: "2026|3|16:2026|3|22".to_string(),
            timeout_secs: 60,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl FetchConfig {
    fn filters_xml(&self) -> String {
        format!(
            "<FILTERS>\
             <DATERANGE><NAME>DATERANGE</NAME><VALUE>{}</VALUE></DATERANGE>\
             <CLUB><NAME>CLUB</NAME><VALUE>{}</VALUE></CLUB>\
             <DIVISION><NAME>DIVISION</NAME><VALUE>{}</VALUE></DIVISION>\
             <TEAM><NAME>TEAM</NAME><VALUE>{}</VALUE></TEAM>\
             <FIELD><NAME>FIELD</NAME><VALUE>{}</VALUE></FIELD>\
             <GAMES><NAME>GAMES</NAME><VALUE>{}</VALUE></GAMES>\
             </FILTERS>",
            self.date_range, self.club, self.division, self.team, self.field, self.games
        )
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleEnvelope {
    d: EnvelopeBody,
}

#[derive(Debug, Deserialize)]
struct EnvelopeBody {
    #[serde(rename = "p_Content")]
    content: Option<String>,
}

/// Unwraps the `d.p_Content` markup fragment from a response body.
///
/// An unparseable envelope or an empty fragment is fatal: there is nothing
/// to build a calendar from.
fn unwrap_content(body: &str) -> ScheduleResult<String> {
    let envelope: ScheduleEnvelope = serde_json::from_str(body).map_err(|err| {
        ScheduleError::invalid_response("schedule response was not the expected JSON envelope")
            .with_source(err)
    })?;
    envelope
        .d
        .content
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ScheduleError::invalid_response("schedule payload was empty"))
}

/// Blocking HTTP client for the schedule endpoint.
pub struct ScheduleFetcher {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

impl ScheduleFetcher {
    /// Creates a fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> ScheduleResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|err| {
                ScheduleError::network("failed to create HTTP client").with_source(err)
            })?;
        Ok(Self { client, config })
    }

    /// Fetches the schedule and returns the unwrapped markup fragment.
    pub fn fetch_markup(&self) -> ScheduleResult<String> {
        let payload = serde_json::json!({
            "strCompetition": self.config.competition,
            "strFiltersXML": self.config.filters_xml(),
            "strWeekMin": self.config.week_min,
            "strWeekMax": self.config.week_max,
        });

        debug!(url = %self.config.url, division = %self.config.division, "fetching schedule");

        let response = self
            .client
            .post(&self.config.url)
            .header("x-requested-with", "XMLHttpRequest")
            .json(&payload)
            .send()
            .map_err(|err| ScheduleError::network("schedule request failed").with_source(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleError::server(format!(
                "schedule endpoint returned {status}"
            )));
        }

        let body = response
            .text()
            .map_err(|err| ScheduleError::network("failed to read response body").with_source(err))?;
        unwrap_content(&body)
    }
}

//! Knowledge views - what each character knows (or claims) about the case.
//!
//! A view is derived on demand from the case and the static profile tables.
//! It is a pure function of its inputs and is never cached across cases,
//! because innocents' fragments mention the actual killer, weapon and place.

use crate::case::Case;
use crate::character::{CharacterId, Roster};
use crate::profiles::{
    ObservationTemplate, SuspectProfile, TimelineTemplates, COVER_ACTIVITY, COVER_LOCATIONS,
    VAGUE_DETAILS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from deriving a knowledge view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    #[error("{0} is not a suspect and cannot be questioned")]
    NotASuspect(CharacterId),
}

/// The three parts of the story a character can talk about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NarrativeWindow {
    DayBefore,
    IncidentNight,
    DayAfter,
}

impl NarrativeWindow {
    pub const ALL: [NarrativeWindow; 3] = [
        NarrativeWindow::DayBefore,
        NarrativeWindow::IncidentNight,
        NarrativeWindow::DayAfter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NarrativeWindow::DayBefore => "The day before",
            NarrativeWindow::IncidentNight => "The night of the murder",
            NarrativeWindow::DayAfter => "The morning after",
        }
    }
}

/// Where a character says they were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alibi {
    pub location: String,
    pub activity: String,
    pub time_window: String,
    pub supporting_details: Vec<String>,
    pub companions: Vec<CharacterId>,
    /// False only for the killer.
    pub is_true: bool,
}

/// A sentence the character may volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub text: String,
    /// Important observations contain a marked span.
    pub important: bool,
}

/// The character-specific subset of facts handed to the dialogue oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeView {
    pub character: CharacterId,
    pub alibi: Alibi,
    pub timeline: BTreeMap<NarrativeWindow, String>,
    pub observations: Vec<Observation>,
}

impl KnowledgeView {
    /// Fragment for one narrative window.
    pub fn fragment(&self, window: NarrativeWindow) -> Option<&str> {
        self.timeline.get(&window).map(String::as_str)
    }
}

/// Derives knowledge views for the suspects of a roster.
#[derive(Debug, Clone)]
pub struct KnowledgeDeriver {
    roster: Roster,
}

impl KnowledgeDeriver {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// Derive what `character` knows about `case`.
    pub fn derive_view(
        &self,
        case: &Case,
        character: CharacterId,
    ) -> Result<KnowledgeView, KnowledgeError> {
        if !self.roster.is_suspect(character) {
            return Err(KnowledgeError::NotASuspect(character));
        }
        let suspect = character
            .profile()
            .suspect
            .ok_or(KnowledgeError::NotASuspect(character))?;

        let is_killer = case.is_killer(character);
        let subs = Substitutions::new(case, &self.roster);

        let alibi = if is_killer {
            cover_story(case, character, &suspect)
        } else {
            true_alibi(&suspect)
        };

        let templates = if is_killer {
            &suspect.killer_timeline
        } else {
            &suspect.innocent_timeline
        };
        let timeline = timeline_fragments(templates, &subs);

        let observation_templates = if is_killer {
            suspect.killer_observations
        } else {
            suspect.observations
        };
        let observations = observation_templates
            .iter()
            .map(|template| render_observation(template, &subs))
            .collect();

        Ok(KnowledgeView {
            character,
            alibi,
            timeline,
            observations,
        })
    }
}

fn true_alibi(suspect: &SuspectProfile) -> Alibi {
    let template = &suspect.alibi;
    Alibi {
        location: template.location.to_string(),
        activity: template.activity.to_string(),
        time_window: template.time_window.to_string(),
        supporting_details: template.details.iter().map(|d| d.to_string()).collect(),
        companions: template.companions.to_vec(),
        is_true: true,
    }
}

/// A fabricated alibi: somewhere other than the crime scene, same window width,
/// and nothing anyone could check.
fn cover_story(case: &Case, killer: CharacterId, suspect: &SuspectProfile) -> Alibi {
    let start = CharacterId::ALL
        .iter()
        .position(|c| *c == killer)
        .unwrap_or(0);
    let location = (0..COVER_LOCATIONS.len())
        .map(|offset| COVER_LOCATIONS[(start + offset) % COVER_LOCATIONS.len()])
        .find(|place| !place.eq_ignore_ascii_case(case.location.trim()))
        .unwrap_or("somewhere else in the house");

    Alibi {
        location: location.to_string(),
        activity: COVER_ACTIVITY.to_string(),
        time_window: suspect.alibi.time_window.to_string(),
        supporting_details: VAGUE_DETAILS
            .iter()
            .map(|detail| format!("{} {}", killer.name(), detail))
            .collect(),
        companions: Vec::new(),
        is_true: false,
    }
}

fn timeline_fragments(
    templates: &TimelineTemplates,
    subs: &Substitutions<'_>,
) -> BTreeMap<NarrativeWindow, String> {
    BTreeMap::from([
        (NarrativeWindow::DayBefore, subs.fill(templates.day_before)),
        (NarrativeWindow::IncidentNight, subs.fill(templates.incident_night)),
        (NarrativeWindow::DayAfter, subs.fill(templates.day_after)),
    ])
}

fn render_observation(template: &ObservationTemplate, subs: &Substitutions<'_>) -> Observation {
    Observation {
        text: subs.fill(template.text),
        important: template.important,
    }
}

/// Case values substituted into profile templates.
struct Substitutions<'a> {
    victim: &'static str,
    killer: &'static str,
    telltale: String,
    weapon: &'a str,
    location: &'a str,
    time: &'a str,
    motive_hint: &'a str,
    scapegoat: &'static str,
}

impl<'a> Substitutions<'a> {
    fn new(case: &'a Case, roster: &Roster) -> Self {
        let victim = roster.victim.name();
        let telltale = case
            .killer
            .profile()
            .suspect
            .map(|s| s.telltale.replace("{victim}", victim))
            .unwrap_or_default();

        Self {
            victim,
            killer: case.killer.name(),
            telltale,
            weapon: &case.weapon,
            location: &case.location,
            time: &case.time_of_death,
            motive_hint: case.motive.split_whitespace().next().unwrap_or(""),
            scapegoat: scapegoat(roster, case.killer),
        }
    }

    fn fill(&self, template: &str) -> String {
        template
            .replace("{telltale}", &self.telltale)
            .replace("{victim}", self.victim)
            .replace("{killer}", self.killer)
            .replace("{weapon}", self.weapon)
            .replace("{location}", self.location)
            .replace("{time}", self.time)
            .replace("{motive_hint}", self.motive_hint)
            .replace("{scapegoat}", self.scapegoat)
    }
}

/// The suspect a killer points at: the next one after them in roster order.
fn scapegoat(roster: &Roster, killer: CharacterId) -> &'static str {
    let Some(pos) = roster.suspects.iter().position(|s| *s == killer) else {
        return "someone";
    };
    (1..roster.suspects.len())
        .map(|offset| roster.suspects[(pos + offset) % roster.suspects.len()])
        .find(|s| *s != killer)
        .map(|s| s.name())
        .unwrap_or("someone")
}

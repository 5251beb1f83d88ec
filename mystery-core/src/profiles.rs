//! Static per-character data: alibis, timelines, and observation templates.
//!
//! Templates use these placeholders, filled in per case by the knowledge
//! deriver: `{victim}`, `{killer}`, `{telltale}`, `{weapon}`, `{location}`,
//! `{time}`, `{motive_hint}`, `{scapegoat}`. Spans wrapped in `*` are the
//! facts a player can pick up as clues.

use crate::character::CharacterId;

/// Everything static we know about a character.
pub struct CharacterProfile {
    /// Family role, e.g. "grandmother".
    pub role: &'static str,
    pub personality: &'static str,
    pub interests: &'static [&'static str],
    /// Present for everyone who can be questioned; `None` for the victim.
    pub suspect: Option<SuspectProfile>,
}

/// Data for a character who can be questioned and accused.
pub struct SuspectProfile {
    /// What this character was really doing on the night.
    pub alibi: AlibiTemplate,
    /// What others notice about this character when they are the killer.
    pub telltale: &'static str,
    pub innocent_timeline: TimelineTemplates,
    pub killer_timeline: TimelineTemplates,
    pub observations: &'static [ObservationTemplate],
    pub killer_observations: &'static [ObservationTemplate],
}

/// A truthful alibi, used unmodified when the character is innocent.
pub struct AlibiTemplate {
    pub location: &'static str,
    pub activity: &'static str,
    pub time_window: &'static str,
    pub details: &'static [&'static str],
    /// Who the character was with. Symmetric across the table.
    pub companions: &'static [CharacterId],
}

/// One fragment per narrative window.
pub struct TimelineTemplates {
    pub day_before: &'static str,
    pub incident_night: &'static str,
    pub day_after: &'static str,
}

/// A sentence template a character may volunteer.
pub struct ObservationTemplate {
    pub text: &'static str,
    /// Important templates carry a marked span.
    pub important: bool,
}

/// Places a killer may claim to have been, tried in rotation.
pub const COVER_LOCATIONS: &[&str] = &[
    "front porch",
    "upstairs landing",
    "library",
    "parked car",
    "attic",
];

/// Activity claimed in every fabricated alibi.
pub const COVER_ACTIVITY: &str = "resting on my own";

/// Unverifiable filler for a fabricated alibi.
pub const VAGUE_DETAILS: &[&str] = &[
    "was alone most of the night",
    "might have dozed off for a while",
    "doesn't remember exactly when they went back inside",
    "nobody else was around to see",
];

impl CharacterId {
    /// Static profile for this character.
    pub fn profile(&self) -> CharacterProfile {
        match self {
            CharacterId::Rachel => CharacterProfile {
                role: "grandmother",
                personality: "Loud and expressive, uses humor even in serious moments, protective and sharp",
                interests: &["dogs", "tigers", "solving mysteries", "protecting family"],
                suspect: Some(SuspectProfile {
                    alibi: AlibiTemplate {
                        location: "orchard path",
                        activity: "walking Shawn and Louie",
                        time_window: "22:00-23:30",
                        details: &[
                            "Marked 22:00 on the dog-walk chart by the mudroom door",
                            "Shawn's leash clip snapped at the orchard gate; the broken clip is in her coat pocket",
                            "Brought Neta ginger tea at 23:30 and stayed ten minutes",
                        ],
                        companions: &[CharacterId::Neta],
                    },
                    telltale: "scrubbing something in the sink long after the dishes were done",
                    innocent_timeline: TimelineTemplates {
                        day_before: "The afternoon before, Shawn and Louie wouldn't stop growling at {killer}, who was {telltale}.",
                        incident_night: "On my last round with the dogs I saw a light bobbing near the {location}. Shawn growled at it like a tiger.",
                        day_after: "Next morning the dogs kept dragging me toward the {location}. Animals know these things.",
                    },
                    killer_timeline: TimelineTemplates {
                        day_before: "I spent the day with Shawn and Louie, same as every day. Nothing to tell.",
                        incident_night: "I was alone most of the night. Might have dozed off in the armchair.",
                        day_after: "I only heard when the shouting started. Poor {victim}.",
                    },
                    observations: &[
                        ObservationTemplate {
                            text: "Shawn dug up something shiny near the *{location}* and I had to pry it out of his mouth.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "Somebody circled the word \"{motive_hint}\" on the crossword by the fireplace.",
                            important: false,
                        },
                    ],
                    killer_observations: &[
                        ObservationTemplate {
                            text: "If you ask me, *{scapegoat} was acting strange near the {location}*.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "I never touch the {weapon}, honey. My hands are full with the dogs.",
                            important: false,
                        },
                    ],
                }),
            },
            CharacterId::Rom => CharacterProfile {
                role: "uncle",
                personality: "Energetic and competitive, defensive when questioned, often deflects with others' flaws",
                interests: &["AI technology", "competition", "proving himself", "debates"],
                suspect: Some(SuspectProfile {
                    alibi: AlibiTemplate {
                        location: "living room",
                        activity: "on a video call with investors in Singapore",
                        time_window: "22:00-23:45",
                        details: &[
                            "The call log shows 104 minutes with the Singapore office",
                            "Kept his webcam on, so the investors saw the living room bookshelf behind him",
                            "Left a half-finished espresso on the side table at 23:45",
                        ],
                        companions: &[],
                    },
                    telltale: "pacing the hallway on the phone, muttering about getting even with {victim}",
                    innocent_timeline: TimelineTemplates {
                        day_before: "Yesterday I caught {killer} {telltale}. I read people for a living, trust me.",
                        incident_night: "Between calls I went for water and heard a thud from the direction of the {location}. I figured it was the wind.",
                        day_after: "This morning {killer} was the first to say we should all stay calm and stick together. Convenient.",
                    },
                    killer_timeline: TimelineTemplates {
                        day_before: "Yesterday was all work. Meetings, pitches. You wouldn't follow it.",
                        incident_night: "I was around. Working. Does it matter exactly where?",
                        day_after: "I've been on the phone with lawyers all morning. Standard procedure.",
                    },
                    observations: &[
                        ObservationTemplate {
                            text: "The *{weapon} wasn't in its usual place* when I walked past, I'd bet my company on it.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "People in this house say \"{motive_hint}\" like it's a family curse.",
                            important: false,
                        },
                    ],
                    killer_observations: &[
                        ObservationTemplate {
                            text: "Check *{scapegoat}'s phone, they were asking about the {weapon}*. That's where your answers are.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "My AI would have solved this before breakfast.",
                            important: false,
                        },
                    ],
                }),
            },
            CharacterId::Ilan => CharacterProfile {
                role: "grandfather",
                personality: "Reserved and thoughtful, speaks only when necessary, observant",
                interests: &["farm work", "observation", "machinery", "solitude"],
                suspect: Some(SuspectProfile {
                    alibi: AlibiTemplate {
                        location: "barn",
                        activity: "replacing the tractor's fuel pump",
                        time_window: "21:00-00:30",
                        details: &[
                            "The new fuel pump's box, dated that day, is still in the barn bin",
                            "Grease on his sleeves matches the old pump on the workbench",
                            "The barn light burned all night; the neighbour complained about it at 00:15",
                        ],
                        companions: &[],
                    },
                    telltale: "hauling a heavy canvas bundle out toward the barn",
                    innocent_timeline: TimelineTemplates {
                        day_before: "Day before, I saw {killer} {telltale}. Said nothing. Not my place.",
                        incident_night: "From the barn door I saw someone come back from the {location}, carrying something. Could have been the {weapon}.",
                        day_after: "Someone moved my tools in the night. Put them back wrong.",
                    },
                    killer_timeline: TimelineTemplates {
                        day_before: "Worked. Like always.",
                        incident_night: "Was alone. Can't give you the hour.",
                        day_after: "Found out with everyone else.",
                    },
                    observations: &[
                        ObservationTemplate {
                            text: "Fresh footprints in the mud, *leading from the {location} to the back door*.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "Heard an angry voice say *\"{motive_hint}\"* through the study window.",
                            important: true,
                        },
                    ],
                    killer_observations: &[
                        ObservationTemplate {
                            text: "*{scapegoat} was up late near the {location}*. Ask them.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "Tractors don't fix themselves. Neither do families.",
                            important: false,
                        },
                    ],
                }),
            },
            CharacterId::Michal => CharacterProfile {
                role: "mother",
                personality: "Warm and humorous, becomes defensive when cornered, tries to deflect attention",
                interests: &["cooking", "night walks", "family care", "maintaining appearances"],
                suspect: Some(SuspectProfile {
                    alibi: AlibiTemplate {
                        location: "laundry room",
                        activity: "ironing shirts for the morning",
                        time_window: "21:30-23:00",
                        details: &[
                            "Set the dryer for 40 minutes at 22:15; the machine logs its cycles",
                            "Seven pressed shirts were hanging on the door by 23:00",
                            "Phoned her sister at 22:50 while the iron heated",
                        ],
                        companions: &[],
                    },
                    telltale: "asking, a little too casually, where {victim} planned to sleep that night",
                    innocent_timeline: TimelineTemplates {
                        day_before: "Yesterday in the kitchen I noticed {killer} {telltale}. I just kept stirring the soup.",
                        incident_night: "While the iron heated I heard the back door open twice. Later the {weapon} wasn't where it belongs.",
                        day_after: "{killer} didn't touch breakfast this morning. That has never happened.",
                    },
                    killer_timeline: TimelineTemplates {
                        day_before: "Oh, yesterday was just cooking and cleaning, you know how it is!",
                        incident_night: "I needed some fresh air, that's all. I don't remember exactly when I came back in.",
                        day_after: "I made everyone breakfast. Someone has to keep this family fed.",
                    },
                    observations: &[
                        ObservationTemplate {
                            text: "Someone *rinsed the {weapon} and put it back wet*. I know how I leave my things.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "Someone wrote \"{motive_hint}\" on my shopping list, and it wasn't me.",
                            important: false,
                        },
                    ],
                    killer_observations: &[
                        ObservationTemplate {
                            text: "I'm almost sure I saw *{scapegoat} near the {location}* that night.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "Let's talk about something happier, shall we?",
                            important: false,
                        },
                    ],
                }),
            },
            CharacterId::Neta => CharacterProfile {
                role: "aunt",
                personality: "Kind and gentle, cautious due to pregnancy, unintentionally revealing",
                interests: &["baby preparation", "family well-being", "truth-telling", "observation"],
                suspect: Some(SuspectProfile {
                    alibi: AlibiTemplate {
                        location: "upstairs guest bedroom",
                        activity: "resting with her feet up",
                        time_window: "21:30-00:00",
                        details: &[
                            "Texted her midwife at 22:40; the message is on her phone",
                            "Rachel brought her ginger tea at 23:30 and stayed ten minutes",
                            "Heard the hallway clock strike midnight before falling asleep",
                        ],
                        companions: &[CharacterId::Rachel],
                    },
                    telltale: "slipping out of {victim}'s study with a folder under one arm",
                    innocent_timeline: TimelineTemplates {
                        day_before: "The day before, I saw {killer} {telltale}. I didn't want to cause trouble.",
                        incident_night: "The baby kept me up. I heard slow footsteps toward the {location}, like someone trying not to be heard.",
                        day_after: "This morning {killer} couldn't look at me. Maybe I'm oversensitive, but...",
                    },
                    killer_timeline: TimelineTemplates {
                        day_before: "I rested most of the day. The baby, you know.",
                        incident_night: "I was so tired I must have slept through everything.",
                        day_after: "I haven't stopped shaking since this morning. Can we talk about something else?",
                    },
                    observations: &[
                        ObservationTemplate {
                            text: "I heard *a clink like the {weapon} being set down*, somewhere near the {location}.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "There was a note by the phone that just said \"{motive_hint}\", underlined twice.",
                            important: false,
                        },
                    ],
                    killer_observations: &[
                        ObservationTemplate {
                            text: "I didn't want to say, but *{scapegoat} seemed so nervous by the {location} last night*.",
                            important: true,
                        },
                        ObservationTemplate {
                            text: "We need to stay together as a family, especially now.",
                            important: false,
                        },
                    ],
                }),
            },
            CharacterId::Omri => CharacterProfile {
                role: "victim",
                personality: "Witty and tech-savvy, friendly teasing nature, puzzle enthusiast",
                interests: &["technology", "puzzles", "teasing others", "AI development"],
                suspect: None,
            },
        }
    }
}

//! Expert personas known to the feed
//!
//! The catalog is static data used to provision personas on the chat service
//! and to decorate cards. Cards only ever store an [`ExpertSlug`].

use crate::types::{BackgroundPattern, ColorTheme};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable reference to an expert
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpertSlug(String);

impl ExpertSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpertSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpertSlug {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Static description of one expert persona
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expert {
    pub name: &'static str,
    pub slug: &'static str,
    pub short_description: &'static str,
    pub greeting: &'static str,
    pub system_message: &'static str,
    pub tags: &'static [&'static str],
    pub domain: &'static str,
    pub personality: &'static str,
    pub sample_topics: &'static [&'static str],
    /// Headline topics used when generating trending cards
    pub trending_topics: &'static [&'static str],
    pub icon: &'static str,
    pub palette: (&'static str, &'static str, &'static str),
    pub pattern: BackgroundPattern,
}

impl Expert {
    pub fn slug(&self) -> ExpertSlug {
        ExpertSlug::new(self.slug)
    }

    pub fn theme(&self) -> ColorTheme {
        let (from, via, to) = self.palette;
        ColorTheme::new(from, via, to)
    }
}

const EXPERTS: &[Expert] = &[
    Expert {
        name: "Dr. Quantum",
        slug: "dr-quantum",
        short_description: "The Physics Whisperer who makes impossible concepts possible",
        greeting: "Ready to have your mind blown? Physics is way cooler than you think! 🚀",
        system_message: "You are Dr. Quantum, an enthusiastic physics expert who makes complex \
physics concepts accessible and mind-blowing. Use mind-bending analogies, casual language and \
emojis. Connect physics to everyday experiences, always include a \"wait, it gets weirder\" \
element and end explanations with an intriguing question. For reels, open with a hook that \
challenges assumptions and keep reel content under 200 words.",
        tags: &["physics", "science", "quantum", "education"],
        domain: "Physics & Quantum Mechanics",
        personality: "Enthusiastic, Mind-bending, Accessible",
        sample_topics: &[
            "Quantum tunneling in your smartphone",
            "Why you're constantly teleporting at quantum level",
            "How cats changed physics forever",
            "The universe's weirdest speed limit",
            "Why parallel universes might be real",
        ],
        trending_topics: &[
            "🤯 You're quantum tunneling RIGHT NOW",
            "⚛️ Why parallel universes might be real",
            "🐱 How Schrödinger's cat broke physics",
            "🚀 The universe's ultimate speed limit",
            "🕳️ Black holes aren't what you think",
            "🔬 The experiment that broke reality",
        ],
        icon: "⚛️",
        palette: ("purple-600", "blue-600", "indigo-600"),
        pattern: BackgroundPattern::Particles,
    },
    Expert {
        name: "CodeMaster Alex",
        slug: "codemaster-alex",
        short_description: "The Debug Detective who turns code mysteries into aha moments",
        greeting: "Hey there! Ready to unlock the secrets behind the tech you use daily? 💻",
        system_message: "You are CodeMaster Alex, a patient and practical programming mentor. \
Break complex concepts into building blocks, share stories from the coding trenches and focus \
on real-world applications. Keep jargon minimal, explain every acronym and always end with \
something the viewer can try themselves.",
        tags: &["programming", "technology", "coding", "web development"],
        domain: "Programming & Software Development",
        personality: "Patient, Practical, Encouraging",
        sample_topics: &[
            "The one line of code that powers half the internet",
            "How Netflix saves $1B with algorithms",
            "Why your phone's autocorrect fails so badly",
            "The bug that crashed the entire internet",
            "How to build your first app in 30 minutes",
        ],
        trending_topics: &[
            "💰 Netflix's $1B algorithm secret",
            "🌐 The ONE line powering the internet",
            "🤖 Why autocorrect STILL fails you",
            "📱 Build your first app in 30 minutes",
            "💥 The bug that crashed everything",
            "🧠 How AI actually works (simply)",
        ],
        icon: "💻",
        palette: ("green-600", "teal-600", "emerald-600"),
        pattern: BackgroundPattern::Geometric,
    },
    Expert {
        name: "Prof. Timeline",
        slug: "prof-timeline",
        short_description: "The History Storyteller who connects dots across centuries",
        greeting: "History isn't boring - it's the ultimate thriller series! Let's dive in 📚",
        system_message: "You are Prof. Timeline, a master storyteller who brings history to life. \
Tell history as an epic narrative with cliffhangers, connect past events to what is happening \
today and reveal the surprising human stories behind big moments. Make history feel like a \
story, not a list of dry facts.",
        tags: &["history", "storytelling", "culture", "civilization"],
        domain: "History & Historical Analysis",
        personality: "Storytelling, Pattern-connecting, Engaging",
        sample_topics: &[
            "The sandwich that started World War I",
            "How ancient Rome predicted social media",
            "The accidental discovery that changed everything",
            "Why civilizations collapse (and what we can learn)",
            "The historical pattern repeating right now",
        ],
        trending_topics: &[
            "🥪 The sandwich that started WWI",
            "🏛️ How Rome predicted social media",
            "💡 The accident that changed everything",
            "📉 Why civilizations REALLY collapse",
            "🏺 Ancient solutions to modern problems",
            "🌍 How climate shaped human history",
        ],
        icon: "🏛️",
        palette: ("amber-600", "orange-600", "red-600"),
        pattern: BackgroundPattern::Dots,
    },
    Expert {
        name: "Dr. Mind",
        slug: "dr-mind",
        short_description: "The Psychology Decoder who reveals how your brain really works",
        greeting: "Your brain is playing tricks on you right now. Want to know how? 🧠",
        system_message: "You are Dr. Mind, an empathetic psychology expert who helps people \
understand their minds and behavior. Explain the research behind everyday habits, give \
practical techniques people can use today and stay supportive and evidence-based, especially \
around mental health topics.",
        tags: &["psychology", "mental health", "behavior", "wellbeing"],
        domain: "Psychology & Behavioral Science",
        personality: "Empathetic, Practical, Supportive",
        sample_topics: &[
            "Why your brain tricks you into procrastinating",
            "The psychology behind social media addiction",
            "How to rewire your brain for happiness",
            "Why smart people make dumb decisions",
            "The one mindset shift that changes everything",
        ],
        trending_topics: &[
            "🧠 Your brain is lying to you RN",
            "📱 The psychology of social media addiction",
            "😊 How to literally rewire your brain",
            "🤔 Why smart people make dumb decisions",
            "⏳ The psychology behind procrastination",
            "🗞️ Why we believe fake news",
        ],
        icon: "🧠",
        palette: ("pink-600", "rose-600", "purple-600"),
        pattern: BackgroundPattern::Geometric,
    },
    Expert {
        name: "Eco Emma",
        slug: "eco-emma",
        short_description: "The Climate Realist who turns climate anxiety into climate action",
        greeting: "The planet needs us, but there's hope! Let's explore solutions together 🌍",
        system_message: "You are Eco Emma, a solution-focused environmental scientist who \
empowers people to take climate action. Lead with solutions, show the impact of everyday \
choices with concrete numbers and turn climate anxiety into climate action and hope.",
        tags: &["climate", "environment", "sustainability", "green technology"],
        domain: "Environmental Science & Sustainability",
        personality: "Solution-focused, Empowering, Optimistic",
        sample_topics: &[
            "The technology that could save the planet",
            "How your daily choices impact climate",
            "The surprising climate solution in your pocket",
            "Why renewable energy is unstoppable now",
            "How to turn climate anxiety into action",
        ],
        trending_topics: &[
            "🌍 The tech literally saving our planet",
            "⚡ Why renewable energy is unstoppable",
            "🌱 How YOUR choices impact climate",
            "💚 Turn climate anxiety into ACTION",
            "🚗 Why electric cars are inevitable",
            "💰 Save money while saving the planet",
        ],
        icon: "🌱",
        palette: ("emerald-600", "green-600", "teal-600"),
        pattern: BackgroundPattern::Waves,
    },
];

/// Every expert in the catalog, in display order
pub fn catalog() -> &'static [Expert] {
    EXPERTS
}

/// Looks up an expert by slug
pub fn find_expert(slug: &str) -> Option<&'static Expert> {
    EXPERTS.iter().find(|e| e.slug == slug)
}

/// Experts whose domain mentions `domain`, case-insensitive
pub fn experts_in_domain(domain: &str) -> Vec<&'static Expert> {
    let needle = domain.to_lowercase();
    EXPERTS
        .iter()
        .filter(|e| e.domain.to_lowercase().contains(&needle))
        .collect()
}

/// Icon shown for an expert; unknown slugs get the generic robot
pub fn icon_for(slug: &ExpertSlug) -> &'static str {
    find_expert(slug.as_str()).map_or("🤖", |e| e.icon)
}

/// One row of a [`KeywordTable`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub expert: ExpertSlug,
    pub keywords: Vec<String>,
}

/// Maps topic keywords to the experts that should weigh in on them
///
/// Matching is a case-insensitive substring test of each keyword against the
/// topic. Rows are consulted in order and each expert appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
    fallback: Vec<ExpertSlug>,
}

impl KeywordTable {
    /// Creates an empty table that answers every topic with `fallback`
    pub fn new(fallback: Vec<ExpertSlug>) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    pub fn with_entry<I, S>(mut self, expert: impl Into<ExpertSlug>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(KeywordEntry {
            expert: expert.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        });
        self
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &[ExpertSlug] {
        &self.fallback
    }

    /// Experts matching `topic`, at most `limit`, falling back when none match
    pub fn match_topic(&self, topic: &str, limit: usize) -> Vec<ExpertSlug> {
        let topic = topic.to_lowercase();
        let mut matched: Vec<ExpertSlug> = Vec::new();

        for entry in &self.entries {
            if matched.len() >= limit {
                break;
            }
            let hit = entry
                .keywords
                .iter()
                .any(|k| !k.is_empty() && topic.contains(k.as_str()));
            if hit && !matched.contains(&entry.expert) {
                matched.push(entry.expert.clone());
            }
        }

        if matched.is_empty() {
            return self.fallback.iter().take(limit).cloned().collect();
        }
        matched
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        KeywordTable::new(vec![
            "dr-quantum".into(),
            "codemaster-alex".into(),
            "prof-timeline".into(),
        ])
        .with_entry("dr-quantum", ["physics", "quantum", "science"])
        .with_entry("codemaster-alex", ["code", "program", "tech", "algorithm"])
        .with_entry("prof-timeline", ["history", "historical", "ancient"])
        .with_entry("dr-mind", ["psychology", "mind", "behavior", "brain"])
        .with_entry(
            "eco-emma",
            ["climate", "environment", "green", "sustainability"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(v: &[ExpertSlug]) -> Vec<&str> {
        v.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_catalog_slugs_unique() {
        let mut seen: Vec<&str> = catalog().iter().map(|e| e.slug).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), catalog().len());
    }

    #[test]
    fn test_catalog_entries_complete() {
        for expert in catalog() {
            assert!(!expert.greeting.is_empty(), "{}", expert.slug);
            assert!(!expert.system_message.is_empty(), "{}", expert.slug);
            assert!(!expert.trending_topics.is_empty(), "{}", expert.slug);
        }
    }

    #[test]
    fn test_find_expert() {
        let expert = find_expert("eco-emma").unwrap();
        assert_eq!(expert.name, "Eco Emma");
        assert_eq!(expert.slug().as_str(), "eco-emma");
        assert!(find_expert("nobody").is_none());
    }

    #[test]
    fn test_experts_in_domain() {
        let found = experts_in_domain("psychology");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "dr-mind");
    }

    #[test]
    fn test_icon_fallback() {
        assert_eq!(icon_for(&"dr-mind".into()), "🧠");
        assert_eq!(icon_for(&"ghost".into()), "🤖");
    }

    #[test]
    fn test_match_single_domain() {
        let table = KeywordTable::default();
        assert_eq!(
            slugs(&table.match_topic("Climate change solutions", 3)),
            vec!["eco-emma"]
        );
    }

    #[test]
    fn test_match_is_case_insensitive_and_ordered() {
        let table = KeywordTable::default();
        let matched = table.match_topic("The History of Quantum PHYSICS and the Brain", 3);
        assert_eq!(
            slugs(&matched),
            vec!["dr-quantum", "prof-timeline", "dr-mind"]
        );
    }

    #[test]
    fn test_match_respects_limit() {
        let table = KeywordTable::default();
        let matched = table.match_topic("ancient tech for the mind and the climate", 2);
        assert_eq!(slugs(&matched), vec!["codemaster-alex", "prof-timeline"]);
    }

    #[test]
    fn test_no_match_falls_back_to_default_trio() {
        let table = KeywordTable::default();
        assert_eq!(
            slugs(&table.match_topic("Cooking pasta", 3)),
            vec!["dr-quantum", "codemaster-alex", "prof-timeline"]
        );
    }

    #[test]
    fn test_custom_table() {
        let table = KeywordTable::new(vec!["dr-mind".into()]).with_entry("eco-emma", ["Ocean"]);
        assert_eq!(slugs(&table.match_topic("ocean currents", 3)), vec!["eco-emma"]);
        assert_eq!(slugs(&table.match_topic("jazz", 3)), vec!["dr-mind"]);
    }
}

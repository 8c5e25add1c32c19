// crates/generator/src/prompts.rs
//! Prompt templates sent to expert personas
//!
//! The templates ask for the labels the content parser recognises (`Hook:`,
//! `Key insight:`, `Action steps:`, `Step n:`, `Quiz:` with lettered options and
//! an `Answer:` line) so replies come back in a shape it can structure.

use mentorscroll_content_parser::EpisodeOutline;
use mentorscroll_core::{ContentType, Difficulty, Expert};

/// Opening line that puts the persona in character
pub fn persona_context(expert: &Expert) -> String {
    format!(
        "You are {}, an expert in {}. Your personality: {}.",
        expert.name, expert.domain, expert.personality
    )
}

fn with_context(expert: Option<&Expert>, body: String) -> String {
    match expert {
        Some(expert) => format!("{}\n\n{}", persona_context(expert), body),
        None => body,
    }
}

/// Prompt for one reel of the given type
pub fn reel_prompt(
    expert: Option<&Expert>,
    topic: &str,
    content_type: ContentType,
    difficulty: Difficulty,
) -> String {
    let body = match content_type {
        ContentType::Hook => format!(
            "Create a captivating hook about \"{topic}\" for {difficulty} learners.\n\
             \n\
             Requirements:\n\
             - Start with a mind-blowing emoji and fact\n\
             - Connect to something relatable\n\
             - Under 50 words\n\
             \n\
             Format: [Emoji] [Surprising statement that makes people stop scrolling]"
        ),
        ContentType::Explanation => format!(
            "Create educational content about \"{topic}\" for {difficulty} learners.\n\
             \n\
             Structure:\n\
             Hook: an attention-grabbing opener with an emoji (1 sentence)\n\
             A clear explanation with examples (300-400 words)\n\
             Key insight: a takeaway that changes perspective (1-2 sentences)\n\
             Action steps: 3-4 numbered things readers can do next\n\
             Quiz: one multiple-choice question with options A) to D), then a line 'Answer: <letter>'\n\
             \n\
             Tone: conversational and enthusiastic, with analogies and real-world examples."
        ),
        ContentType::Practical => format!(
            "Create a 60-second practical guide about \"{topic}\" for {difficulty} learners.\n\
             \n\
             Give step-by-step instructions, one per line, as 'Step 1:', 'Step 2:' and so on.\n\
             Keep every step concrete and doable today.\n\
             Finish with 'Key insight:' and the one thing to remember."
        ),
    };
    with_context(expert, body)
}

/// Prompt asking for a numbered episode outline
pub fn series_outline_prompt(expert: Option<&Expert>, subject: &str, episodes: u32) -> String {
    let body = format!(
        "Create a {episodes}-part learning series about \"{subject}\".\n\
         For each episode, provide a title (max 60 characters), the key concept to teach, \
         an engaging one-sentence hook with an emoji and the main takeaway.\n\
         \n\
         Format as:\n\
         Episode 1: [Title]\n\
         Hook: [Hook with emoji]\n\
         Concept: [Key concept]\n\
         Insight: [Main takeaway]\n\
         \n\
         [Repeat for all episodes]"
    );
    with_context(expert, body)
}

/// Prompt for the full text of one planned episode
pub fn episode_prompt(
    expert: Option<&Expert>,
    subject: &str,
    outline: &EpisodeOutline,
    total: u32,
) -> String {
    let mut plan = format!("Title: {}\n", outline.title);
    if let Some(hook) = &outline.hook {
        plan.push_str(&format!("Hook: {}\n", hook));
    }
    if let Some(concept) = &outline.concept {
        plan.push_str(&format!("Key Concept: {}\n", concept));
    }

    let body = format!(
        "Create detailed educational content for Episode {} of {} in a series about \"{}\".\n\
         \n\
         {}\n\
         Provide:\n\
         - A detailed explanation (300-500 words) with practical examples and analogies\n\
         - Key insight: one profound takeaway\n\
         - Action steps: 3-4 numbered actionable takeaways\n\
         - Quiz: a thought-provoking question with options A) to D), then 'Answer: <letter>'\n\
         \n\
         Write in an engaging, conversational tone that makes complex topics accessible.",
        outline.number, total, subject, plan
    );
    with_context(expert, body)
}

/// Wraps a chat question with the reel it is about
pub fn contextual_question(reel_title: &str, reel_topic: &str, question: &str) -> String {
    format!(
        "The user is asking about the educational content titled \"{}\" about {}. \
         Their question: \"{}\". Please provide a helpful, engaging response that builds on \
         the educational content while maintaining your expert personality and teaching style.",
        reel_title, reel_topic, question
    )
}

/// Smoke test prompt used by `test-expert`
pub const INTRODUCTION_PROMPT: &str =
    "Introduce yourself and explain your expertise in 2-3 sentences.";

/// Follow-up question used by `test-expert` after a generated reel
pub fn simplify_prompt(topic: &str) -> String {
    format!(
        "A student watched content about \"{}\" and asks: \"Can you explain this more simply \
         with an analogy I can relate to?\"",
        topic
    )
}

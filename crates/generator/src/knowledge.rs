// crates/generator/src/knowledge.rs
//! Seed knowledge uploaded to catalog personas right after they are created

const DR_QUANTUM: &str = "\
Physics and quantum mechanics knowledge base.

QUANTUM MECHANICS FUNDAMENTALS:
- Quantum superposition: particles exist in multiple states simultaneously
- Wave-particle duality: light and matter behave as both waves and particles
- Heisenberg uncertainty principle: position and momentum cannot both be known precisely
- Quantum tunneling: particles can pass through energy barriers
- Quantum entanglement: particles stay connected regardless of distance

EVERYDAY PHYSICS:
- Smartphone processors rely on quantum tunneling in transistors
- LEDs, MRI machines and solar panels all work through quantum effects
- GPS satellites correct for relativistic time dilation

ANALOGIES:
- Superposition is a coin spinning in the air, heads AND tails
- Entanglement is a pair of magic coins that always land opposite
- Relativity is time zones, but for speed and gravity";

const CODEMASTER_ALEX: &str = "\
Programming and software development knowledge base.

FUNDAMENTALS:
- Variables store data, functions package reusable behaviour
- Loops repeat work until a condition is met, conditionals make decisions
- Arrays are ordered lists, objects group related data and behaviour

REAL-WORLD ALGORITHMS:
- Recommendation systems match viewers with similar taste profiles
- Search engines rank billions of pages for every query
- Routing algorithms plan millions of trips every day

DEBUGGING STRATEGIES:
- Rubber duck debugging: explain the code out loud
- Binary search debugging: eliminate half the code at a time
- Unit tests check small pieces in isolation
- Version control lets you go back to the last working state

CAREER GUIDANCE:
- Learn fundamentals before frameworks
- Build projects rather than only following tutorials
- Read other people's code regularly";

const PROF_TIMELINE: &str = "\
History and storytelling knowledge base.

HISTORICAL PATTERNS:
- Civilizations rise and fall in recognisable cycles
- Technological revolutions disrupt social structures
- Economic inequality often precedes upheaval
- Information technologies change how societies organise

TURNING POINTS:
- Agricultural Revolution (10,000 BCE) made civilization possible
- Writing (3200 BCE) preserved knowledge
- The printing press (1440) democratized information
- The Industrial Revolution (1760) mechanized production
- The internet (1969) connected humanity

STORYTELLING:
- Start with characters and personal stakes
- Show cause and effect
- Connect past events to the present";

const DR_MIND: &str = "\
Psychology and behavioural science knowledge base.

COGNITIVE BIASES:
- Confirmation bias: seeking information that confirms what we believe
- Availability heuristic: judging likelihood by how easily examples come to mind
- Anchoring: over-relying on the first number we hear
- Loss aversion: losses feel about twice as strong as gains

BEHAVIOUR CHANGE:
- The habit loop: cue, routine, reward, repetition
- Small wins build momentum and self-efficacy
- Environment design beats willpower

WELLBEING:
- Sleep consolidates memory and regulates mood
- Gratitude practice measurably improves wellbeing
- Social connection is one of the strongest predictors of happiness";

const ECO_EMMA: &str = "\
Environmental science and sustainability knowledge base.

CLIMATE BASICS:
- Greenhouse gases trap heat in the atmosphere
- Energy, transport, agriculture and buildings dominate global emissions

SOLUTIONS:
- Solar and wind are now the cheapest new electricity in most of the world
- Electric vehicles cut lifetime emissions even on today's grids
- Heat pumps move heat instead of making it
- Reducing food waste is one of the most effective climate actions

PERSONAL ACTION:
- Diet, travel and home energy are the biggest personal levers
- Talking about climate with friends spreads action further than any single choice
- Turning anxiety into action improves both wellbeing and outcomes";

/// Seed knowledge for a catalog expert, if there is any
pub fn seed_knowledge(slug: &str) -> Option<&'static str> {
    match slug {
        "dr-quantum" => Some(DR_QUANTUM),
        "codemaster-alex" => Some(CODEMASTER_ALEX),
        "prof-timeline" => Some(PROF_TIMELINE),
        "dr-mind" => Some(DR_MIND),
        "eco-emma" => Some(ECO_EMMA),
        _ => None,
    }
}

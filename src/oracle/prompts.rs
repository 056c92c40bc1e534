//! Prompt wording for the collaborators
//!
//! Wording is data: each game variant picks a `PromptSet`, and the
//! collaborator fills in the `{object}` placeholder at call time.

/// System prompts for the three collaborator capabilities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub namer: String,
    pub answerer: String,
    pub hinter: String,
}

const NAMER: &str = "You choose the secret object for a game of 20 Questions. \
Name exactly one concrete, common, tangible, family-friendly physical object \
that a child would recognize. Use a plain lowercase noun of one or two words. \
Never use brand names, people, places, animals' proper names or abstract ideas. \
Reply with the object only, no punctuation.";

const CLASSIC_ANSWERER: &str = "You are playing a 20 questions game. The object is '{object}'. \
Answer only with 'Yes', 'No', or 'Maybe'. Be accurate but don't reveal what the object is.";

const HINTED_ANSWERER: &str = "You are the host of a game of Twenty Questions. \
The secret object is '{object}'. The player asks yes/no questions about it. \
Reply with exactly one word: Yes, No, or Maybe. Use Maybe only when the honest \
answer depends on the particular {object}. Never mention the object.";

const HINTER: &str = "You are the host of a game of Twenty Questions. \
The secret object is '{object}'. Give the player one short, cryptic hint \
(a single sentence) that nudges them toward the object without naming it, \
spelling it, or rhyming with it. Reply with the hint only.";

impl PromptSet {
    /// Wording of the ten-question game
    pub fn classic() -> Self {
        Self {
            namer: NAMER.to_string(),
            answerer: CLASSIC_ANSWERER.to_string(),
            hinter: HINTER.to_string(),
        }
    }

    /// Wording of the twenty-question game with hints
    pub fn hinted() -> Self {
        Self {
            namer: NAMER.to_string(),
            answerer: HINTED_ANSWERER.to_string(),
            hinter: HINTER.to_string(),
        }
    }

    pub fn answerer_for(&self, object: &str) -> String {
        fill(&self.answerer, object)
    }

    pub fn hinter_for(&self, object: &str) -> String {
        fill(&self.hinter, object)
    }
}

fn fill(template: &str, object: &str) -> String {
    template.replace("{object}", object)
}

/// User message for the namer
pub fn namer_request(category: Option<&str>, avoid: &[String]) -> String {
    let mut message = match category {
        Some(category) => format!("Choose an object from this category: {category}."),
        None => "Choose an object.".to_string(),
    };
    if !avoid.is_empty() {
        message.push_str(&format!(" Do not choose any of: {}.", avoid.join(", ")));
    }
    message
}

/// User message for the hinter
pub fn hinter_request(previous_hints: &[String]) -> String {
    if previous_hints.is_empty() {
        "Give your first hint.".to_string()
    } else {
        let listed = previous_hints
            .iter()
            .map(|h| format!("- {h}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Give a new hint. Do not repeat or rephrase these earlier hints:\n{listed}")
    }
}

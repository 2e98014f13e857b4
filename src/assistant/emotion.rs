//! Emotion-Aware Prompting
//!
//! Fuses the voice and facial emotion readings into one emotional state and
//! renders the tutoring system prompt around it. Detection itself happens
//! elsewhere; this module only sees the labels.
//!
//! ```text
//! voice, face ──> both agree (not neutral) ──> Agreement(e)    focus e
//!             ├─> both set, differ ──────────> Conflict         focus Confusion
//!             ├─> voice only ────────────────> Voice(e)         focus e
//!             ├─> face only ─────────────────> Face(e)          focus e
//!             └─> neither ───────────────────> Neutral          focus Neutral
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Emotion label reported by a detector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Fear,
    Disgust,
    Surprise,
    Boredom,
    Focused,
    Confusion,
}

impl Emotion {
    pub fn all() -> &'static [Emotion] {
        &[
            Emotion::Neutral,
            Emotion::Happy,
            Emotion::Sad,
            Emotion::Angry,
            Emotion::Fear,
            Emotion::Disgust,
            Emotion::Surprise,
            Emotion::Boredom,
            Emotion::Focused,
            Emotion::Confusion,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "Neutral",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Angry => "Angry",
            Emotion::Fear => "Fear",
            Emotion::Disgust => "Disgust",
            Emotion::Surprise => "Surprise",
            Emotion::Boredom => "Boredom",
            Emotion::Focused => "Focused",
            Emotion::Confusion => "Confusion",
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Emotion::Neutral
    }

    /// Lenient parse for detector output: unknown or blank labels read as
    /// neutral
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|e: UnknownEmotion| {
            tracing::debug!(label = %e.0, "Unknown emotion label, treating as neutral");
            Emotion::Neutral
        })
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown emotion: {0}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Emotion::all()
            .iter()
            .find(|e| e.as_str().to_lowercase() == lowered)
            .copied()
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

/// Combined reading of the voice and facial signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionalState {
    /// Voice and face report the same non-neutral emotion
    Agreement(Emotion),
    /// Voice and face report different non-neutral emotions
    Conflict { voice: Emotion, face: Emotion },
    /// Only the voice reading is non-neutral
    Voice(Emotion),
    /// Only the facial reading is non-neutral
    Face(Emotion),
    Neutral,
}

impl EmotionalState {
    pub fn fuse(voice: Emotion, face: Emotion) -> Self {
        match (voice.is_neutral(), face.is_neutral()) {
            (false, false) if voice == face => EmotionalState::Agreement(voice),
            (false, false) => EmotionalState::Conflict { voice, face },
            (false, true) => EmotionalState::Voice(voice),
            (true, false) => EmotionalState::Face(face),
            (true, true) => EmotionalState::Neutral,
        }
    }

    /// Emotion the tutor adapts its tone to. Conflicting signals are treated
    /// as confusion.
    pub fn focus(&self) -> Emotion {
        match self {
            EmotionalState::Agreement(e) | EmotionalState::Voice(e) | EmotionalState::Face(e) => *e,
            EmotionalState::Conflict { .. } => Emotion::Confusion,
            EmotionalState::Neutral => Emotion::Neutral,
        }
    }

    pub fn describe(&self) -> String {
        let upper = |e: &Emotion| e.as_str().to_uppercase();
        match self {
            EmotionalState::Agreement(e) => format!(
                "The student shows high conviction: **{}** (Voice and Face agree).",
                upper(e)
            ),
            EmotionalState::Conflict { voice, face } => format!(
                "The student is showing CONFLICT: Voice is {}, Face is {}.",
                upper(voice),
                upper(face)
            ),
            EmotionalState::Voice(e) => format!(
                "The student's primary emotion is detected via Voice: {}.",
                upper(e)
            ),
            EmotionalState::Face(e) => format!(
                "The student's primary emotion is detected via Face: {}.",
                upper(e)
            ),
            EmotionalState::Neutral => "The student is currently Neutral.".to_string(),
        }
    }
}

const DEFAULT_CONTEXT: &str = "a student";
const DEFAULT_LIKES: &str = "learning";

/// What the tutor knows about the student for one turn
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StudentProfile {
    pub context: Option<String>,
    pub likes: Option<String>,
    pub voice_emotion: Emotion,
    pub facial_emotion: Emotion,
}

impl StudentProfile {
    /// Context line, `"a student"` when unset or blank
    pub fn context(&self) -> &str {
        non_blank(self.context.as_deref()).unwrap_or(DEFAULT_CONTEXT)
    }

    /// Interests line, `"learning"` when unset or blank
    pub fn likes(&self) -> &str {
        non_blank(self.likes.as_deref()).unwrap_or(DEFAULT_LIKES)
    }

    pub fn with_emotions(mut self, voice: Emotion, face: Emotion) -> Self {
        self.voice_emotion = voice;
        self.facial_emotion = face;
        self
    }

    pub fn state(&self) -> EmotionalState {
        EmotionalState::fuse(self.voice_emotion, self.facial_emotion)
    }

    /// Render the system prompt for the current profile and emotions
    pub fn system_prompt(&self) -> String {
        let state = self.state();
        let likes = self.likes();

        format!(
            "You are the **Emotion-Aware Virtual Teaching Assistant (VTA)**: an expert, dynamic, and highly engaging educator. \
Your prime directive is to make complex learning concepts immediately captivating, personalized, and easy to digest. \
\n\n---\
\n\n**Student Profile & Context:**\n\
* **Context**: {context}\n\
* **Likes/Interests**: {likes}\n\
* **Current Emotional State**: **{state}**\n\
\n\n---\
\n\n**Adaptive Pedagogy & Tone Matrix:**\n\
Adapt your tone and approach instantaneously based on the emotional focus ({focus}):\n\
\n\
* **If Sad, Angry, or Confusion** 😔: Adopt a gentle, highly supportive, and empathetic tone. Immediately simplify the core concept and focus on encouragement, offering a small, digestible step forward. Conclude by asking a clarifying question to address the misunderstanding directly.\n\
* **If Boredom** 😴: Shift to an energetic, stimulating, and challenging tone. The explanation must be dynamic and immediately include a surprising fact, a captivating real-world analogy, or a mini-challenge related to their **Likes**.\n\
* **If Happy or Focused** 😄: Maintain a positive, stimulating, and academic tone. Congratulate their focus, and introduce slightly more complex layers of the current topic or supplementary, advanced context to deepen their expertise.\n\
\n\n---\
\n\n**Response Formatting & Engagement Protocol (Mandatory):**\n\
Your response must be aesthetically attractive, easy to scan, and stimulating. Ignore constraints on paragraph count. Focus on quality and structure:\n\
\n\
1.  **Opening Hook:** Start with an energetic, concise **Title or Hook** that summarizes the main idea and includes an engaging emoji (e.g., 'Unlocking the Mystery of Fusion 💡').\n\
2.  **Personalized Bridge:** Immediately integrate a highly relevant analogy or example **directly related to the student's Likes ('{likes}')** to bridge the new concept to their existing interests. This is critical for creating interest.\n\
3.  **Structured Content:** Break down the main explanation using a clear hierarchy, utilizing:\n\
\x20   * **Markdown Headings (`###`)** for sub-topics.\n\
\x20   * **Bullet Points (`*`) or Numbered Lists (`1.`)** for key principles or steps.\n\
\x20   * **Bold text** to emphasize academic vocabulary or crucial takeaways.\n\
4.  **Actionable Conclusion:** Do not simply end. Conclude with a specific, forward-looking **Challenge** or an **Open-ended Question** that requires the student to reflect or propose the next learning step.\
\n\n---\
\n\n**Constraint Removal:** Do not adhere to any specific paragraph count. Let the content's depth dictate the length, but ensure the structure remains digestible and focused.",
            context = self.context(),
            likes = likes,
            state = state.describe(),
            focus = state.focus(),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

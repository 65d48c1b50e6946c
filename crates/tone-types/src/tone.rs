use std::fmt;

/// Sentiment scores at or above this mark a message as excited.
pub const EXCITED_SENTIMENT: f64 = 0.70;

/// Coarse affect of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Question,
    Excited,
    Plain,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Question, Tone::Excited, Tone::Plain];

    /// Label as stored in the `message_tone.tone` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Excited => "excited",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tone: Tone,
    pub exclamations: usize,
    pub qmarks: usize,
}

/// Classify a message by its punctuation and an optional sentiment score.
///
/// Any `?` wins outright. Otherwise two or more `!`, or a sentiment of at
/// least [`EXCITED_SENTIMENT`], make it excited. Everything else is plain.
pub fn classify(text: &str, sentiment: Option<f64>) -> Classification {
    let exclamations = text.matches('!').count();
    let qmarks = text.matches('?').count();

    let tone = if qmarks > 0 {
        Tone::Question
    } else if exclamations >= 2 || sentiment.is_some_and(|s| s >= EXCITED_SENTIMENT) {
        Tone::Excited
    } else {
        Tone::Plain
    };

    Classification {
        tone,
        exclamations,
        qmarks,
    }
}

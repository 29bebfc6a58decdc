//! Telephony control verbs.
//!
//! A [`VerbSequence`] is the literal, ordered list of instructions the
//! platform executes for the call. The wire encoding lives in the HTTP
//! adapter; these are the domain shapes.

/// One telephony instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// Play an audio file.
    Play {
        audio_url: String,
        allow_barge_in: bool,
    },
    /// Gather key presses and report them to `callback_url`.
    Collect {
        callback_url: String,
        max_digits: u32,
        terminate_on_hash: bool,
    },
    /// Keep the line open without doing anything.
    Pause { duration_secs: u32 },
}

impl Verb {
    pub fn is_play(&self) -> bool {
        matches!(self, Verb::Play { .. })
    }

    pub fn is_collect(&self) -> bool {
        matches!(self, Verb::Collect { .. })
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Verb::Pause { .. })
    }
}

/// Ordered verbs returned to the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerbSequence(Vec<Verb>);

impl VerbSequence {
    pub fn new(verbs: Vec<Verb>) -> Self {
        Self(verbs)
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Verb> {
        self.0.iter()
    }

    /// Number of `Collect` verbs; never more than one.
    pub fn collect_count(&self) -> usize {
        self.0.iter().filter(|verb| verb.is_collect()).count()
    }

    /// True when the sequence leaves the platform nothing further to report,
    /// i.e. the flow ends after playback.
    pub fn ends_flow(&self) -> bool {
        self.collect_count() == 0
    }
}

impl<'a> IntoIterator for &'a VerbSequence {
    type Item = &'a Verb;
    type IntoIter = std::slice::Iter<'a, Verb>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//! Scripted stand-ins for the UI collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use flexuml::edit::{DiagramBuilder, Prompter};

/// A prompt shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Confirm { title: String, message: String },
    Error { title: String, message: String },
}

/// Answers every confirmation the same way and records every prompt.
#[derive(Debug)]
pub struct ScriptedPrompter {
    answer: bool,
    shown: Mutex<Vec<Prompt>>,
}

impl ScriptedPrompter {
    /// A prompter that answers every confirmation with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.shown.lock().clone()
    }

    pub fn confirmations(&self) -> usize {
        self.count(|prompt| matches!(prompt, Prompt::Confirm { .. }))
    }

    pub fn errors(&self) -> usize {
        self.count(|prompt| matches!(prompt, Prompt::Error { .. }))
    }

    fn count(&self, predicate: impl Fn(&Prompt) -> bool) -> usize {
        self.shown.lock().iter().filter(|&prompt| predicate(prompt)).count()
    }
}

impl Default for ScriptedPrompter {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, title: &str, message: &str) -> bool {
        self.shown.lock().push(Prompt::Confirm {
            title: title.to_string(),
            message: message.to_string(),
        });
        self.answer
    }

    fn show_error(&self, title: &str, message: &str) {
        self.shown.lock().push(Prompt::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// Counts re-render requests.
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    requests: AtomicUsize,
}

impl RecordingBuilder {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl DiagramBuilder for RecordingBuilder {
    fn request_update(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

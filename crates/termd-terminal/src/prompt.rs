//! Multi-turn prompt state machine.
//!
//! While a prompt is active the next submitted line is an answer for the
//! command that opened it, not a new command. The pending question and the
//! answers collected so far live in one session value, so they can only be
//! set and cleared together.

/// Identifier of a step inside a command's prompt flow.
pub type StepId = &'static str;

/// The question currently awaiting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    /// Command that receives the answer.
    pub owner: String,
    pub step: StepId,
    /// Text shown in place of the prompt prefix, e.g. `Password:`.
    pub content: String,
}

#[derive(Debug, Clone)]
struct PromptSession {
    state: PromptState,
    answers: Vec<String>,
}

/// `Idle` when no session is active, `AwaitingAnswer` otherwise.
#[derive(Debug, Clone, Default)]
pub struct Prompter {
    active: Option<PromptSession>,
}

impl Prompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending question, if any.
    pub fn current(&self) -> Option<&PromptState> {
        self.active.as_ref().map(|s| &s.state)
    }

    pub fn is_prompting(&self) -> bool {
        self.active.is_some()
    }

    /// The current step when the prompt belongs to `owner`.
    pub fn step_for(&self, owner: &str) -> Option<StepId> {
        self.current()
            .filter(|s| s.owner == owner)
            .map(|s| s.step)
    }

    /// Answers collected so far, including any seed values.
    pub fn answers(&self) -> &[String] {
        self.active
            .as_ref()
            .map(|s| s.answers.as_slice())
            .unwrap_or_default()
    }

    /// Open a prompt for `owner`, replacing any previous one.
    pub fn begin(
        &mut self,
        owner: &str,
        step: StepId,
        content: impl Into<String>,
        seed: Vec<String>,
    ) {
        log::debug!("prompt begin: {owner}/{step}");
        self.active = Some(PromptSession {
            state: PromptState {
                owner: owner.to_string(),
                step,
                content: content.into(),
            },
            answers: seed,
        });
    }

    /// Record `answer` and move to the next step. Returns `false` when idle.
    pub fn advance(&mut self, step: StepId, content: impl Into<String>, answer: String) -> bool {
        let Some(session) = self.active.as_mut() else {
            return false;
        };
        log::debug!("prompt advance: {}/{step}", session.state.owner);
        session.answers.push(answer);
        session.state.step = step;
        session.state.content = content.into();
        true
    }

    /// Drop the most recent answer and re-ask `step`. Returns `false` when idle.
    pub fn rollback(&mut self, step: StepId, content: impl Into<String>) -> bool {
        let Some(session) = self.active.as_mut() else {
            return false;
        };
        log::debug!("prompt rollback: {}/{step}", session.state.owner);
        session.answers.pop();
        session.state.step = step;
        session.state.content = content.into();
        true
    }

    /// Close the prompt and hand back the collected answers.
    pub fn finish(&mut self) -> Vec<String> {
        match self.active.take() {
            Some(session) => {
                log::debug!("prompt finish: {}", session.state.owner);
                session.answers
            },
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let p = Prompter::new();
        assert!(!p.is_prompting());
        assert!(p.current().is_none());
        assert!(p.answers().is_empty());
    }

    #[test]
    fn begin_sets_state_and_seed() {
        let mut p = Prompter::new();
        p.begin("login", "login_pass", "Password:", vec!["a@b.com".into()]);
        let s = p.current().unwrap();
        assert_eq!(s.owner, "login");
        assert_eq!(s.step, "login_pass");
        assert_eq!(s.content, "Password:");
        assert_eq!(p.answers(), ["a@b.com"]);
    }

    #[test]
    fn step_for_checks_owner() {
        let mut p = Prompter::new();
        p.begin("register", "register_pass_1", "Password:", vec![]);
        assert_eq!(p.step_for("register"), Some("register_pass_1"));
        assert_eq!(p.step_for("login"), None);
    }

    #[test]
    fn advance_appends_answer() {
        let mut p = Prompter::new();
        p.begin("register", "register_pass_1", "Password:", vec!["u".into()]);
        assert!(p.advance("register_pass_2", "Confirm password:", "pw".into()));
        assert_eq!(p.answers(), ["u", "pw"]);
        assert_eq!(p.current().unwrap().step, "register_pass_2");
    }

    #[test]
    fn rollback_drops_latest_answer() {
        let mut p = Prompter::new();
        p.begin("register", "register_pass_1", "Password:", vec!["u".into()]);
        p.advance("register_pass_2", "Confirm password:", "pw".into());
        assert!(p.rollback("register_pass_1", "Password:"));
        assert_eq!(p.answers(), ["u"]);
        assert_eq!(p.current().unwrap().step, "register_pass_1");
    }

    #[test]
    fn finish_clears_both() {
        let mut p = Prompter::new();
        p.begin("login", "login_pass", "Password:", vec!["u".into()]);
        assert_eq!(p.finish(), vec!["u".to_string()]);
        assert!(!p.is_prompting());
        assert!(p.answers().is_empty());
    }

    #[test]
    fn idle_transitions_are_noops() {
        let mut p = Prompter::new();
        assert!(!p.advance("x", "y", "z".into()));
        assert!(!p.rollback("x", "y"));
        assert!(p.finish().is_empty());
        assert!(!p.is_prompting());
    }
}

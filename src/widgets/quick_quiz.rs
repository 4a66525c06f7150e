//! Quick quiz - one multiple-choice question with submit, feedback, and reset

use crate::accessibility::AccessibilityRole;
use crate::component::Component;
use crate::components::{Button, ButtonVariant, Card, Icon, IconKind, Text, TextRole};
use crate::context::{RenderContext, UseTheme};
use crate::error::WidgetError;
use crate::event::{Event, EventHandler, Key};
use crate::layout::{truncate, Rect};
use crate::render::Renderer;
use crate::style::Style;
use crate::theme::Theme;
use anyhow::Result;

const SUBMIT_LABEL: &str = "Submit";
const RESET_LABEL: &str = "Try again";

/// Where the quiz is in its select, submit, reset cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Unanswered,
    /// An option is selected but not submitted
    Pending,
    Submitted,
}

/// Selection and submission state
///
/// A selection can only change while the quiz is not submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizState {
    selected: Option<usize>,
    submitted: bool,
}

impl QuizState {
    pub fn new() -> Self {
        QuizState {
            selected: None,
            submitted: false,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn phase(&self) -> QuizPhase {
        match (self.selected, self.submitted) {
            (_, true) => QuizPhase::Submitted,
            (Some(_), false) => QuizPhase::Pending,
            (None, false) => QuizPhase::Unanswered,
        }
    }

    /// Select an option, replacing any earlier choice; ignored once submitted
    pub fn select(&mut self, index: usize) -> bool {
        if self.submitted {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn can_submit(&self) -> bool {
        !self.submitted && self.selected.is_some()
    }

    /// Lock in the selection; ignored without one
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.submitted = true;
        true
    }

    /// Clear selection and submission
    pub fn reset(&mut self) {
        *self = QuizState::new();
    }
}

/// How one option is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionVisual {
    Idle,
    Selected,
    Correct,
    Incorrect,
    /// Submitted and neither the answer nor the chosen option
    Locked,
}

impl OptionVisual {
    /// Icon inside the option's brackets; none for an empty slot
    pub fn icon(&self) -> Option<Icon> {
        match self {
            OptionVisual::Idle | OptionVisual::Locked => None,
            OptionVisual::Selected => Some(Icon::new(IconKind::Dot)),
            OptionVisual::Correct => Some(Icon::new(IconKind::Check)),
            OptionVisual::Incorrect => Some(Icon::new(IconKind::Cross)),
        }
    }

    pub fn marker(&self) -> String {
        let glyph = self.icon().map_or(' ', |icon| icon.glyph());
        format!("({glyph})")
    }

    fn style(&self, theme: &Theme) -> Style {
        match self {
            OptionVisual::Idle => theme.text_style(),
            OptionVisual::Selected => theme.selected_style(),
            OptionVisual::Correct => theme.success_style(),
            OptionVisual::Incorrect => theme.error_style(),
            OptionVisual::Locked => theme.muted_style(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, OptionVisual::Idle | OptionVisual::Selected)
    }
}

pub fn option_visual(state: &QuizState, index: usize, correct: usize) -> OptionVisual {
    if !state.is_submitted() {
        return if state.selected() == Some(index) {
            OptionVisual::Selected
        } else {
            OptionVisual::Idle
        };
    }

    if index == correct {
        OptionVisual::Correct
    } else if state.selected() == Some(index) {
        OptionVisual::Incorrect
    } else {
        OptionVisual::Locked
    }
}

/// Which action control is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlVisual {
    Submit { enabled: bool },
    Reset,
}

pub fn control_visual(state: &QuizState) -> ControlVisual {
    if state.is_submitted() {
        ControlVisual::Reset
    } else {
        ControlVisual::Submit {
            enabled: state.can_submit(),
        }
    }
}

/// Single-question quiz
pub struct QuickQuiz {
    question: Text,
    options: Vec<String>,
    correct_answer: usize,
    explanation: Option<Text>,
    state: QuizState,
    control: Button,
    card: Card,
    option_rows: Vec<Rect>,
    focused: bool,
    dirty: bool,
}

impl QuickQuiz {
    /// Build a quiz. Inputs are not checked; an empty option list or an
    /// out-of-range answer still renders, with nothing marked correct.
    pub fn new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: usize,
    ) -> Self {
        QuickQuiz {
            question: Text::new(question).with_role(TextRole::Heading),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer,
            explanation: None,
            state: QuizState::new(),
            control: Button::new(SUBMIT_LABEL),
            card: Card::new(),
            option_rows: Vec::new(),
            focused: false,
            dirty: true,
        }
    }

    /// Like [`QuickQuiz::new`], but rejects inputs that can't be answered
    pub fn try_new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: usize,
    ) -> std::result::Result<Self, WidgetError> {
        let quiz = Self::new(question, options, correct_answer);
        if quiz.options.is_empty() {
            return Err(WidgetError::NoOptions);
        }
        if correct_answer >= quiz.options.len() {
            return Err(WidgetError::AnswerOutOfRange {
                index: correct_answer,
                len: quiz.options.len(),
            });
        }
        Ok(quiz)
    }

    /// Text shown once the answer is submitted
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(Text::new(explanation));
        self
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    pub fn option_visual(&self, index: usize) -> OptionVisual {
        option_visual(&self.state, index, self.correct_answer)
    }

    pub fn control_visual(&self) -> ControlVisual {
        control_visual(&self.state)
    }

    /// Whether the submitted answer was right; `None` before submission
    pub fn is_correct(&self) -> Option<bool> {
        self.state
            .is_submitted()
            .then(|| self.state.selected() == Some(self.correct_answer))
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.options.len() || !self.state.select(index) {
            return false;
        }
        tracing::trace!(index, "option selected");
        self.dirty = true;
        true
    }

    pub fn submit(&mut self) -> bool {
        if !self.state.submit() {
            return false;
        }
        tracing::debug!(
            selected = ?self.state.selected(),
            correct = self.correct_answer,
            "quiz submitted"
        );
        self.dirty = true;
        true
    }

    pub fn reset(&mut self) {
        self.state.reset();
        tracing::debug!("quiz reset");
        self.dirty = true;
    }

    /// Move the selection by `delta` options, starting at the first
    fn move_selection(&mut self, delta: isize) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let last = self.options.len() as isize - 1;
        let next = match self.state.selected() {
            Some(current) => (current as isize + delta).clamp(0, last),
            None => 0,
        };
        self.select(next as usize)
    }

    fn activate_control(&mut self) -> bool {
        match self.control_visual() {
            ControlVisual::Submit { enabled: true } => self.submit(),
            ControlVisual::Submit { enabled: false } => false,
            ControlVisual::Reset => {
                self.reset();
                true
            }
        }
    }

    fn sync_control(&mut self) {
        match self.control_visual() {
            ControlVisual::Submit { enabled } => {
                self.control.set_label(SUBMIT_LABEL);
                self.control.set_variant(ButtonVariant::Primary);
                self.control.set_enabled(enabled);
            }
            ControlVisual::Reset => {
                self.control.set_label(RESET_LABEL);
                self.control.set_variant(ButtonVariant::Secondary);
                self.control.set_enabled(true);
            }
        }
    }

    fn feedback_rows(&self, width: u16) -> u16 {
        if !self.state.is_submitted() {
            return 0;
        }
        let explanation = self
            .explanation
            .as_ref()
            .map_or(0, |text| text.preferred_height(width));
        // Blank row and verdict, then the explanation
        2 + explanation
    }

    fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Up | Key::Char('k') => self.move_selection(-1),
            Key::Down | Key::Char('j') => self.move_selection(1),
            Key::Char(c @ '1'..='9') => self.select(c as usize - '1' as usize),
            Key::Enter => self.activate_control(),
            Key::Char('r') if self.state.is_submitted() => {
                self.reset();
                true
            }
            _ => false,
        }
    }
}

impl EventHandler for QuickQuiz {
    fn handle_event(&mut self, event: &Event) -> bool {
        self.sync_control();

        if self.control.is_pressed_by(event) {
            return self.activate_control();
        }

        if let Some(index) = self.option_rows.iter().position(|row| event.is_click_in(*row)) {
            // Clicks on locked options are swallowed
            self.select(index);
            return true;
        }

        match event {
            Event::Key(key) if self.focused => self.handle_key(*key),
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.dirty = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }
}

impl Component for QuickQuiz {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = self.use_theme(ctx);
        let inner = self.card.draw(renderer, bounds, ctx)?;

        let question_rows = self.question.preferred_height(inner.width);
        let (question_area, rest) = inner.split_top(question_rows);
        self.question.render(renderer, question_area, ctx)?;
        let (_, mut rest) = rest.split_top(1);

        self.option_rows.clear();
        for (index, option) in self.options.iter().enumerate() {
            let (row, remaining) = rest.split_top(1);
            rest = remaining;
            self.option_rows.push(row);
            if row.is_empty() {
                continue;
            }

            let visual = option_visual(&self.state, index, self.correct_answer);
            let label = truncate(&format!("{} {}", visual.marker(), option), row.width as usize);
            renderer.draw_text(row.x, row.y, &label, &visual.style(theme))?;
        }

        let (_, rest) = rest.split_top(1);
        let (control_row, rest) = rest.split_top(1);
        self.sync_control();
        let control_ctx = ctx.with_focus(false);
        self.control.render(renderer, control_row, &control_ctx)?;

        if let Some(correct) = self.is_correct() {
            let (_, rest) = rest.split_top(1);
            let (verdict_row, rest) = rest.split_top(1);
            let (verdict, style) = if correct {
                ("Correct!", theme.success_style())
            } else {
                ("Not quite.", theme.error_style())
            };
            if !verdict_row.is_empty() {
                renderer.draw_text(verdict_row.x, verdict_row.y, verdict, &style)?;
            }
            if let Some(explanation) = self.explanation.as_mut() {
                explanation.render(renderer, rest, ctx)?;
            }
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let rows = 1 + 1 + self.options.len() as u16 + 1 + 1;
        (self.card.chrome_width() + 10, self.card.chrome_height() + rows)
    }

    fn preferred_height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(self.card.chrome_width());
        self.card.chrome_height()
            + self.question.preferred_height(inner)
            + 1
            + self.options.len() as u16
            + 1
            + 1
            + self.feedback_rows(inner)
    }

    fn on_mount(&mut self) {
        self.state = QuizState::new();
        self.sync_control();
        self.dirty = true;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn focusable(&self) -> bool {
        true
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::RadioGroup
    }

    fn name(&self) -> &str {
        "QuickQuiz"
    }
}

/// Discrete user actions forwarded by the presentation layer.
///
/// The adapter translates raw UI events (clicks, taps, key presses) into
/// these commands and renders whatever `Screen` the driver returns; all
/// quiz behavior lives behind this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    /// Start a fresh session for a topic from the selection screen.
    SelectTopic(String),
    /// Continue the saved session offered on the selection screen.
    Resume,
    /// Discard saved progress and stay on the selection screen.
    ClearProgress,
    /// Answer the current question with one of its options.
    SelectOption(String),
    /// Show the hint for the current question.
    RequestHint,
    /// Move past the answered question (or to the results screen).
    Next,
    /// Start a review run over the finished session's missed questions.
    Review,
    /// Leave the results screen and return to topic selection.
    Retry,
}

use std::time::Duration;

/// Fixed pieces of text and timing a [`Book`](crate::Book) is told with
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Config {
    /// wait between the title and the first point
    pub warm_up: Duration,
    /// shown before each answer is read
    pub prompt: String,
    /// header listing the keywords after an answer matched none
    pub reminder: String,
    /// last line of every story
    pub end_marker: String,
    /// drawn on both sides of the title
    pub banner: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warm_up: Duration::from_secs(3),
            prompt: "> ".to_owned(),
            reminder: "Your choices are:".to_owned(),
            end_marker: "====END====".to_owned(),
            banner: "===".to_owned(),
        }
    }
}

impl Config {
    #[inline]
    #[must_use]
    pub fn with_warm_up(mut self, warm_up: Duration) -> Self {
        self.warm_up = warm_up;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_reminder(mut self, reminder: impl Into<String>) -> Self {
        self.reminder = reminder.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_end_marker(mut self, end_marker: impl Into<String>) -> Self {
        self.end_marker = end_marker.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }
}
